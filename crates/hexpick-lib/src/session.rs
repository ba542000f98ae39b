//! Read-modify-write around the color history.
//!
//! A [`Session`] owns the loaded settings and the file they came from. Each
//! mutation applies one history operation and saves immediately, so the file
//! always reflects the latest pick or selection. Sessions opened with
//! [`Session::open_locked`] hold the cross-process history lock until dropped,
//! so another writer can't interleave its load and save with ours.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::color::HexColor;
use crate::error::Result;
use crate::history::ColorHistory;
use crate::lock::{self, NamedLock};
use crate::parser::OutputParser;
use crate::settings::Settings;

pub struct Session {
    settings: Settings,
    path: PathBuf,
    parser: OutputParser,
    _lock: Option<NamedLock>,
}

impl Session {
    /// Load settings from `path` (defaults if missing or unparseable).
    ///
    /// Fails only if the configured output label can't be turned into a parser.
    pub fn open(path: &Path) -> Result<Self> {
        let (settings, warnings) = Settings::load_from(path);
        for w in &warnings {
            log::warn!("{w}");
        }
        Self::with_settings(settings, path)
    }

    /// Take the history lock for `path` (waiting up to `timeout`), then load.
    ///
    /// The settings are read after the lock is held, so the session starts from
    /// the latest saved history.
    pub fn open_locked(path: &Path, timeout: Duration) -> Result<Self> {
        let held = lock::acquire_history_lock(path, timeout)?;
        let mut session = Self::open(path)?;
        session._lock = Some(held);
        Ok(session)
    }

    /// Open the settings file at the default platform path.
    pub fn open_default() -> Result<Self> {
        Self::open(&default_path()?)
    }

    pub fn with_settings(settings: Settings, path: &Path) -> Result<Self> {
        let parser = settings.output_parser()?;
        Ok(Session {
            settings,
            path: path.to_path_buf(),
            parser,
            _lock: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &ColorHistory {
        &self.settings.color_history
    }

    /// Parse pick tool output and record the color.
    ///
    /// Returns `Ok(None)` without touching the file when the output holds no color.
    pub fn record_pick(&mut self, output: &str) -> Result<Option<HexColor>> {
        let Some(color) = self.parser.parse(output) else {
            log::debug!(
                "no {:?} color in pick output ({} bytes)",
                self.parser.label(),
                output.len()
            );
            return Ok(None);
        };
        self.record_color(color.clone())?;
        Ok(Some(color))
    }

    /// Record `color` as the most recent entry, enforcing the configured capacity.
    pub fn record_color(&mut self, color: HexColor) -> Result<()> {
        let capacity = self.settings.history_capacity;
        self.update(|h| h.insert_most_recent(color, capacity))
    }

    /// Re-promote `color` to the front. Never evicts.
    pub fn select(&mut self, color: HexColor) -> Result<()> {
        self.update(|h| h.move_to_front(color))
    }

    /// Remove every entry.
    pub fn clear_history(&mut self) -> Result<()> {
        self.update(ColorHistory::clear)
    }

    fn update(&mut self, op: impl FnOnce(ColorHistory) -> ColorHistory) -> Result<()> {
        let current = std::mem::take(&mut self.settings.color_history);
        let next = op(current.clone());
        // Keep the in-memory copy in sync with disk: roll back if the save fails.
        self.settings.color_history = next;
        if let Err(e) = self.settings.save_to(&self.path) {
            self.settings.color_history = current;
            return Err(e.into());
        }
        log::debug!(
            "history now {} entries, front {:?}",
            self.settings.color_history.len(),
            self.settings.color_history.first().map(HexColor::as_str)
        );
        Ok(())
    }
}

/// Default platform settings path.
pub fn default_path() -> Result<PathBuf> {
    Settings::path().ok_or_else(|| crate::HexpickError::Config("no config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn open_temp() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(&dir.path().join("settings.toml")).unwrap();
        (dir, session)
    }

    #[test]
    fn open_missing_file_is_empty() {
        let (_dir, session) = open_temp();
        assert!(session.history().is_empty());
        assert_eq!(session.settings().history_capacity, 36);
    }

    #[test]
    fn record_pick_persists() {
        let (dir, mut session) = open_temp();
        let picked = session
            .record_pick("Picked color: rgb(40, 40, 40)\nHex: #282828\n")
            .unwrap();
        assert_eq!(picked, Some(c("#282828")));

        let (reloaded, _) = Settings::load_from(&dir.path().join("settings.toml"));
        assert_eq!(reloaded.color_history.to_strings(), ["#282828"]);
    }

    #[test]
    fn record_pick_miss_does_not_write() {
        let (dir, mut session) = open_temp();
        assert_eq!(session.record_pick("nothing here").unwrap(), None);
        assert!(!dir.path().join("settings.toml").exists());
    }

    #[test]
    fn record_color_uses_configured_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings {
            history_capacity: 2,
            ..Settings::default()
        };
        let mut session = Session::with_settings(settings, &path).unwrap();
        for s in ["#AAAAAA", "#BBBBBB", "#CCCCCC"] {
            session.record_color(c(s)).unwrap();
        }
        assert_eq!(session.history().to_strings(), ["#CCCCCC", "#BBBBBB"]);
    }

    #[test]
    fn select_never_evicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings {
            history_capacity: 2,
            color_history: ColorHistory::from_entries(["#111111", "#222222"]),
            ..Settings::default()
        };
        let mut session = Session::with_settings(settings, &path).unwrap();
        session.select(c("#222222")).unwrap();
        assert_eq!(session.history().to_strings(), ["#222222", "#111111"]);
        session.select(c("#333333")).unwrap();
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn clear_history_persists() {
        let (dir, mut session) = open_temp();
        session.record_color(c("#111111")).unwrap();
        session.clear_history().unwrap();
        assert!(session.history().is_empty());

        let reopened = Session::open(&dir.path().join("settings.toml")).unwrap();
        assert!(reopened.history().is_empty());
    }

    #[test]
    fn custom_label_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings {
            output_label: "Color:".into(),
            ..Settings::default()
        };
        let mut session = Session::with_settings(settings, &path).unwrap();
        assert_eq!(session.record_pick("Hex: #111111").unwrap(), None);
        assert_eq!(
            session.record_pick("Color: #222222").unwrap(),
            Some(c("#222222"))
        );
    }

    #[test]
    fn empty_label_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_label: String::new(),
            ..Settings::default()
        };
        assert!(Session::with_settings(settings, &dir.path().join("s.toml")).is_err());
    }

    #[test]
    fn locked_session_blocks_second_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut first = Session::open_locked(&path, lock::LOCK_TIMEOUT).unwrap();
        let err = Session::open_locked(&path, Duration::from_millis(100))
            .err()
            .unwrap();
        assert!(matches!(err, crate::HexpickError::Busy(_)));

        first.record_color(c("#111111")).unwrap();
        drop(first);

        // The next writer sees the first writer's save.
        let mut second = Session::open_locked(&path, Duration::from_secs(1)).unwrap();
        second.record_color(c("#222222")).unwrap();
        assert_eq!(second.history().to_strings(), ["#222222", "#111111"]);
    }

    #[test]
    fn failed_save_keeps_previous_history() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every save fail.
        let path = dir.path().join("settings.toml");
        std::fs::create_dir(&path).unwrap();
        let settings = Settings {
            color_history: ColorHistory::from_entries(["#111111"]),
            ..Settings::default()
        };
        let mut session = Session::with_settings(settings, &path).unwrap();
        assert!(session.record_color(c("#222222")).is_err());
        assert_eq!(session.history().to_strings(), ["#111111"]);
    }
}
