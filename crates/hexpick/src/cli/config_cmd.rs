//! `config` subcommand — show current settings and file path.

use std::path::Path;

use super::{ConfigOutput, Result, Settings, kv, kv_indent, kv_width};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let settings_path = custom_path.map(|p| p.to_path_buf()).or_else(Settings::path);
    let settings_exists = settings_path.as_ref().is_some_and(|p| p.exists());
    let (settings, mut problems) = match &settings_path {
        Some(p) => Settings::load_from(p),
        None => (Settings::default(), vec![]),
    };
    if let Err(errors) = settings.validate() {
        problems.extend(errors.iter().map(|e| e.to_string()));
    }

    if json {
        let output = ConfigOutput {
            settings_file: settings_path.as_ref().map(|p| p.display().to_string()),
            settings_file_exists: settings_exists,
            settings,
            problems,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => log::error!("serializing settings: {e}"),
        }
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Settings file:"],
        &[
            "history:",
            "history_capacity:",
            "grid_columns:",
            "output_label:",
            "pick_command:",
            "clipboard_command:",
            "copy_to_clipboard:",
        ],
    );

    match &settings_path {
        Some(p) => {
            if settings_exists {
                kv("Settings file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Settings file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Settings file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent(
        "history:",
        format_args!("{} color(s)", settings.color_history.len()),
        w,
    );
    kv_indent("history_capacity:", settings.history_capacity, w);
    kv_indent("grid_columns:", settings.grid_columns, w);
    kv_indent("output_label:", format_args!("{:?}", settings.output_label), w);
    kv_indent("pick_command:", settings.pick_command.join(" "), w);
    kv_indent("clipboard_command:", settings.clipboard_command.join(" "), w);
    kv_indent("copy_to_clipboard:", settings.copy_to_clipboard, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  {p}");
        }
    }
    Ok(())
}
