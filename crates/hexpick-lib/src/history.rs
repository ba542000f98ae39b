//! Color history — deduplicated, capacity-bounded, most-recent-first.
//!
//! Every operation consumes the current history and returns the new one.
//! The caller owns the value and is responsible for persisting it; nothing
//! here holds state between calls.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::HexColor;

/// Default capacity: one 6x6 grid.
pub const DEFAULT_CAPACITY: usize = 36;

/// Ordered color history. Index 0 is the most recently used color.
///
/// Invariants: no duplicates, and the most recently inserted or selected
/// color is at index 0. Length is bounded by the capacity passed to
/// [`ColorHistory::insert_most_recent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHistory(Vec<HexColor>);

impl ColorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from untrusted entries (e.g. a settings file).
    ///
    /// Invalid colors are dropped and duplicates keep their first (most
    /// recent) position. Lowercase entries are normalized.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut colors: Vec<HexColor> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            match HexColor::parse(entry) {
                Ok(c) if !colors.contains(&c) => colors.push(c),
                Ok(c) => log::warn!("dropping duplicate history entry {c}"),
                Err(_) => log::warn!("dropping invalid history entry {entry:?}"),
            }
        }
        ColorHistory(colors)
    }

    /// Make `color` the most recent entry, evicting the oldest entries so that
    /// at most `capacity` remain.
    ///
    /// Applying the same color twice yields the same history as applying it once.
    /// A capacity of zero always yields an empty history.
    #[must_use]
    pub fn insert_most_recent(self, color: HexColor, capacity: usize) -> Self {
        let mut colors = self.move_to_front(color).0;
        if colors.len() > capacity {
            log::debug!(
                "history over capacity ({} > {capacity}), evicting {} oldest",
                colors.len(),
                colors.len() - capacity
            );
            colors.truncate(capacity);
        }
        ColorHistory(colors)
    }

    /// Move `color` to the front without enforcing any capacity.
    ///
    /// If `color` is already present the length is unchanged; otherwise it grows
    /// by one. Intended for re-selecting an existing entry.
    #[must_use]
    pub fn move_to_front(self, color: HexColor) -> Self {
        let mut colors = self.0;
        colors.retain(|c| *c != color);
        colors.insert(0, color);
        ColorHistory(colors)
    }

    /// Drop every entry.
    #[must_use]
    pub fn clear(self) -> Self {
        ColorHistory::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent color, if any.
    pub fn first(&self) -> Option<&HexColor> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&HexColor> {
        self.0.get(index)
    }

    pub fn contains(&self, color: &HexColor) -> bool {
        self.0.contains(color)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HexColor> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[HexColor] {
        &self.0
    }

    /// Entries as plain strings, for persistence.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a ColorHistory {
    type Item = &'a HexColor;
    type IntoIter = std::slice::Iter<'a, HexColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ColorHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Stored shape accepted for a history: a list of anything. Non-list values
/// decode to an empty history instead of failing the whole settings file.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum StoredHistory {
    List(Vec<StoredEntry>),
    Malformed(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum StoredEntry {
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for ColorHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StoredHistory::deserialize(deserializer)? {
            StoredHistory::List(entries) => {
                let total = entries.len();
                let texts: Vec<String> = entries
                    .into_iter()
                    .filter_map(|e| match e {
                        StoredEntry::Text(s) => Some(s),
                        StoredEntry::Other(_) => None,
                    })
                    .collect();
                if texts.len() != total {
                    log::warn!(
                        "dropping {} non-string history entries",
                        total - texts.len()
                    );
                }
                Ok(ColorHistory::from_entries(texts))
            }
            StoredHistory::Malformed(_) => {
                log::warn!("stored color history is not a list, starting empty");
                Ok(ColorHistory::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn hist(entries: &[&str]) -> ColorHistory {
        ColorHistory::from_entries(entries)
    }

    fn strings(h: &ColorHistory) -> Vec<String> {
        h.to_strings()
    }

    // ── insert_most_recent ──

    #[test]
    fn insert_into_empty() {
        let h = ColorHistory::new().insert_most_recent(c("#AAAAAA"), DEFAULT_CAPACITY);
        assert_eq!(strings(&h), ["#AAAAAA"]);
    }

    #[test]
    fn insert_prepends() {
        let h = hist(&["#111111", "#222222"]).insert_most_recent(c("#333333"), 36);
        assert_eq!(strings(&h), ["#333333", "#111111", "#222222"]);
    }

    #[test]
    fn insert_existing_moves_to_front() {
        let h = hist(&["#111111", "#222222", "#333333"]).insert_most_recent(c("#222222"), 3);
        assert_eq!(strings(&h), ["#222222", "#111111", "#333333"]);
    }

    #[test]
    fn insert_evicts_oldest() {
        let h = ColorHistory::new()
            .insert_most_recent(c("#AAAAAA"), 2)
            .insert_most_recent(c("#BBBBBB"), 2)
            .insert_most_recent(c("#CCCCCC"), 2);
        assert_eq!(strings(&h), ["#CCCCCC", "#BBBBBB"]);
    }

    #[test]
    fn insert_is_idempotent() {
        let base = hist(&["#111111", "#222222", "#333333"]);
        let once = base.clone().insert_most_recent(c("#333333"), 3);
        let twice = once.clone().insert_most_recent(c("#333333"), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn insert_shrinks_oversized_history() {
        // A history persisted under a larger capacity is cut down on next insert.
        let h = hist(&["#111111", "#222222", "#333333", "#444444"]);
        let h = h.insert_most_recent(c("#555555"), 2);
        assert_eq!(strings(&h), ["#555555", "#111111"]);
    }

    #[test]
    fn insert_zero_capacity_is_empty() {
        let h = hist(&["#111111"]).insert_most_recent(c("#222222"), 0);
        assert!(h.is_empty());
    }

    #[test]
    fn insert_capacity_one_keeps_only_latest() {
        let h = hist(&["#111111"]).insert_most_recent(c("#222222"), 1);
        assert_eq!(strings(&h), ["#222222"]);
    }

    #[test]
    fn insert_fills_default_grid() {
        let mut h = ColorHistory::new();
        for i in 0..40u32 {
            h = h.insert_most_recent(c(&format!("#{i:06X}")), DEFAULT_CAPACITY);
        }
        assert_eq!(h.len(), DEFAULT_CAPACITY);
        assert_eq!(h.first().unwrap().as_str(), "#000027");
        assert_eq!(h.get(35).unwrap().as_str(), "#000004");
    }

    // ── move_to_front ──

    #[test]
    fn move_present_reorders_only() {
        let h = hist(&["#111111", "#222222", "#333333"]).move_to_front(c("#333333"));
        assert_eq!(strings(&h), ["#333333", "#111111", "#222222"]);
    }

    #[test]
    fn move_front_is_noop() {
        let base = hist(&["#111111", "#222222"]);
        assert_eq!(base.clone().move_to_front(c("#111111")), base);
    }

    #[test]
    fn move_absent_grows_past_capacity() {
        let mut h = ColorHistory::new();
        for i in 0..DEFAULT_CAPACITY as u32 {
            h = h.insert_most_recent(c(&format!("#{i:06X}")), DEFAULT_CAPACITY);
        }
        let h = h.move_to_front(c("#FFFFFF"));
        assert_eq!(h.len(), DEFAULT_CAPACITY + 1);
        assert_eq!(h.first().unwrap().as_str(), "#FFFFFF");
    }

    // ── clear ──

    #[test]
    fn clear_empties() {
        assert!(hist(&["#111111", "#222222"]).clear().is_empty());
        assert!(ColorHistory::new().clear().is_empty());
    }

    // ── from_entries ──

    #[test]
    fn from_entries_normalizes_and_dedups() {
        let h = hist(&["#abcdef", "#ABCDEF", "nope", "#123456"]);
        assert_eq!(strings(&h), ["#ABCDEF", "#123456"]);
    }

    // ── serde ──

    #[derive(Serialize, Deserialize)]
    struct Stored {
        #[serde(default)]
        colors: ColorHistory,
    }

    #[test]
    fn deserialize_list() {
        let s: Stored = toml::from_str(r##"colors = ["#111111", "#aaaaaa"]"##).unwrap();
        assert_eq!(strings(&s.colors), ["#111111", "#AAAAAA"]);
    }

    #[test]
    fn deserialize_non_list_is_empty() {
        let s: Stored = toml::from_str(r#"colors = "not a list""#).unwrap();
        assert!(s.colors.is_empty());
        let s: Stored = toml::from_str("colors = 42").unwrap();
        assert!(s.colors.is_empty());
    }

    #[test]
    fn deserialize_drops_non_strings() {
        let s: Stored = toml::from_str(r##"colors = ["#111111", 7, true, "#222222"]"##).unwrap();
        assert_eq!(strings(&s.colors), ["#111111", "#222222"]);
    }

    #[test]
    fn deserialize_missing_is_empty() {
        let s: Stored = toml::from_str("").unwrap();
        assert!(s.colors.is_empty());
    }

    #[test]
    fn serialize_as_string_list() {
        let s = Stored {
            colors: hist(&["#111111", "#222222"]),
        };
        let out = toml::to_string(&s).unwrap();
        assert!(out.contains(r##"colors = ["#111111", "#222222"]"##), "{out}");
    }
}
