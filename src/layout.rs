//! Keyboard layout: per-key geometry and ideal key paths for words.
//!
//! A layout is parsed once from a textual description and never mutated
//! afterward. Each key contributes its center point to the ideal path a
//! word would trace across the keyboard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::geometry::Point;
use crate::resample::resample;

/// Geometry of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Top-left corner of the key.
    pub left_upper: Point,
    pub width: f64,
    pub height: f64,
}

impl KeyInfo {
    /// The key's representative point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left_upper.x + self.width / 2.0,
            self.left_upper.y + self.height / 2.0,
        )
    }
}

/// Mapping from character to key geometry, built once from a layout
/// description.
#[derive(Debug, Clone, Default)]
pub struct KeyLayout {
    keys: HashMap<char, KeyInfo>,
}

impl KeyLayout {
    /// Parse a layout description of the form `key1:x:y key2:x:y ...`.
    ///
    /// Entries are space-separated colon-joined key/x/y triples. Width and
    /// height both default to the y-coordinate field, a quirk of the task
    /// file format kept as-is. A tab terminates the description; any
    /// trailer after it is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidInput`] for an entry with a missing
    /// field, an empty key, or a non-numeric coordinate.
    pub fn parse(source: &str) -> Result<Self> {
        let description = source.split('\t').next().unwrap_or("");

        let mut keys = HashMap::new();
        for entry in description.split_whitespace() {
            let mut fields = entry.splitn(3, ':');
            let (Some(key), Some(x), Some(y)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(DecodeError::invalid_input(format!(
                    "layout entry {entry:?} is not a key:x:y triple"
                )));
            };

            let symbol = key.chars().next().ok_or_else(|| {
                DecodeError::invalid_input(format!("layout entry {entry:?} has an empty key"))
            })?;
            let x = parse_coordinate(x, entry)?;
            let y = parse_coordinate(y, entry)?;

            keys.insert(
                symbol,
                KeyInfo {
                    left_upper: Point::new(x, y),
                    width: y,
                    height: y,
                },
            );
        }

        Ok(Self { keys })
    }

    /// Look up the geometry of a key.
    #[must_use]
    pub fn key(&self, symbol: char) -> Option<&KeyInfo> {
        self.keys.get(&symbol)
    }

    /// Number of keys in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the layout holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The sequence of key centers a word visits. Characters absent from
    /// the layout are skipped.
    #[must_use]
    pub fn key_path(&self, word: &str) -> Vec<Point> {
        word.chars()
            .filter_map(|c| self.keys.get(&c).map(KeyInfo::center))
            .collect()
    }

    /// The word's ideal trajectory: its key path resampled to `target_len`
    /// points.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownWord`] when no character of the word
    /// maps to a key.
    pub fn word_trajectory(&self, word: &str, target_len: usize) -> Result<Vec<Point>> {
        let path = self.key_path(word);
        if path.is_empty() {
            return Err(DecodeError::unknown_word(word));
        }
        resample(&path, target_len)
    }
}

fn parse_coordinate(token: &str, entry: &str) -> Result<f64> {
    token.parse().map_err(|_| {
        DecodeError::invalid_input(format!(
            "layout entry {entry:?} has non-numeric coordinate {token:?}"
        ))
    })
}
