//! External tools — run the pick tool and copy colors to the clipboard.
//!
//! Commands are argv lists, not shell strings. Both run with a timeout and
//! are killed and reaped if they exceed it. Single-flight picking across
//! processes is the caller's job (see [`crate::lock::acquire_pick_lock`]).

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::color::HexColor;
use crate::error::Result;

/// Default timeout for the pick tool (the user has to click somewhere).
pub const PICK_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for the clipboard tool.
pub const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval when waiting for a process to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to keep reading stdout after the tool has exited.
///
/// A background child that inherited the pipe can hold it open indefinitely.
const OUTPUT_GRACE: Duration = Duration::from_secs(1);

/// Run the pick tool and return its stdout.
pub fn run_pick_command(argv: &[String], timeout: Duration) -> Result<String> {
    capture_stdout(argv, timeout)
}

/// Copy `color` to the clipboard by running `argv` with the color appended.
pub fn copy_to_clipboard(argv: &[String], color: &HexColor, timeout: Duration) -> Result<()> {
    if is_empty_command(argv) {
        return Err(crate::HexpickError::Command("command is empty".into()));
    }
    let mut full = argv.to_vec();
    full.push(color.to_string());
    let mut child = spawn(&full, Stdio::null())?;
    let status = wait_with_timeout(&mut child, &full[0], timeout)?;
    check_status(&full[0], status)?;
    log::debug!("copied {color} with {}", full[0]);
    Ok(())
}

fn capture_stdout(argv: &[String], timeout: Duration) -> Result<String> {
    let mut child = spawn(argv, Stdio::piped())?;
    let program = &argv[0];

    // Drain stdout on a separate thread so a chatty tool can't block on a full pipe.
    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    if let Some(mut stdout) = child.stdout.take() {
        std::thread::spawn(move || {
            let mut chunk = [0u8; 4096];
            loop {
                match stdout.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if tx.send(chunk[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    let status = wait_with_timeout(&mut child, program, timeout)?;
    check_status(program, status)?;
    let bytes = collect_output(&rx, program, OUTPUT_GRACE);

    let output = String::from_utf8_lossy(&bytes).into_owned();
    log::debug!("{program} produced {} bytes", output.len());
    Ok(output)
}

/// Gather stdout chunks until the pipe closes or `grace` runs out.
///
/// The reader thread is left behind on timeout; it ends when the last writer
/// closes the pipe or the process exits.
fn collect_output(rx: &mpsc::Receiver<Vec<u8>>, program: &str, grace: Duration) -> Vec<u8> {
    let deadline = Instant::now() + grace;
    let mut bytes = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => bytes.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("{program} exited but its stdout is still open, using output so far");
                break;
            }
        }
    }
    bytes
}

fn is_empty_command(argv: &[String]) -> bool {
    argv.first().is_none_or(|p| p.trim().is_empty())
}

fn spawn(argv: &[String], stdout: Stdio) -> Result<Child> {
    let Some((program, args)) = argv.split_first().filter(|_| !is_empty_command(argv)) else {
        return Err(crate::HexpickError::Command("command is empty".into()));
    };
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(stdout)
        .spawn()
        .map_err(|e| crate::HexpickError::Command(format!("failed to run {program}: {e}")))
}

/// Poll until the child exits. Kills the process if it exceeds the deadline.
fn wait_with_timeout(child: &mut Child, program: &str, timeout: Duration) -> io::Result<ExitStatus> {
    let max_polls = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1) as u64;
    for _ in 0..max_polls {
        match child.try_wait()? {
            Some(status) => return Ok(status),
            None => std::thread::sleep(POLL_INTERVAL),
        }
    }

    // Timeout — kill and reap
    log::warn!("{program} timed out after {timeout:?}, killing");
    let _ = child.kill();
    child.wait() // reap zombie
}

fn check_status(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        log::warn!("{program} exited with {status}");
        Err(crate::HexpickError::Command(format!(
            "{program} exited with {status}"
        )))
    }
}
