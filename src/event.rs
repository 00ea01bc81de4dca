//! Swipe event wire format.
//!
//! One event per tab-separated line: field 0 is ignored (the task files
//! carry the layout description there), field 1 is a space-separated list of
//! `x:y` integer coordinate pairs, field 2 is the ground-truth target word.
//! Any further fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::geometry::Point;

/// A recorded swipe gesture: raw touch points plus the optional
/// ground-truth target word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeEvent {
    /// Ground-truth word, when the line carries one.
    pub target: Option<String>,
    /// Raw ordered touch points.
    pub points: Vec<Point>,
}

impl SwipeEvent {
    /// Parse one task line.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidInput`] when the point field is missing
    /// or a coordinate token is not an `x:y` integer pair.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split('\t');
        let _layout = fields.next();
        let point_field = fields.next().ok_or_else(|| {
            DecodeError::invalid_input("swipe line is missing the point field")
        })?;

        let mut points = Vec::new();
        for token in point_field.split_whitespace() {
            points.push(parse_pair(token)?);
        }

        let target = fields
            .next()
            .filter(|t| !t.is_empty())
            .map(str::to_owned);

        Ok(Self { target, points })
    }
}

fn parse_pair(token: &str) -> Result<Point> {
    let malformed =
        || DecodeError::invalid_input(format!("coordinate token {token:?} is not an x:y pair"));

    let (x, y) = token.split_once(':').ok_or_else(malformed)?;
    let x: i64 = x.parse().map_err(|_| malformed())?;
    let y: i64 = y.parse().map_err(|_| malformed())?;

    Ok(Point::new(x as f64, y as f64))
}
