//! Bin location parsing and spatial coordinates.
//!
//! A bin location string has the form `ZONE-AISLE-SHELF` with an optional
//! `L`/`R` side suffix, e.g. `"A-3-12"` or `"B-01-4L"`. The zone is a
//! single uppercase letter; multi-letter or non-alphabetic zones are
//! rejected rather than silently mapped to coordinates.

use std::fmt;

use crate::config::WarehouseConfig;
use crate::error::OptimizeError;

/// Sentinel location marking the route start/end. Bypasses the grammar and
/// maps to a fixed reference coordinate at the origin.
pub const DEPOT: &str = "DEPOT";

/// Which side of the aisle a bin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Key identifying a physical bin, used to group tasks that share one.
pub(crate) type SlotKey = (char, u32, u32, Option<Side>);

/// Parsed representation of a bin location string.
///
/// The canonical string form is the input exactly as received, so
/// zero-padding conventions survive a parse/format round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLocation {
    zone: char,
    aisle: u32,
    shelf: u32,
    side: Option<Side>,
    canonical: String,
}

impl BinLocation {
    /// Parses a location string, or the `"DEPOT"` sentinel.
    pub fn parse(raw: &str) -> Result<Self, OptimizeError> {
        if raw == DEPOT {
            return Ok(Self::depot());
        }

        let malformed = || OptimizeError::MalformedLocation { raw: raw.to_string() };

        let mut parts = raw.split('-');
        let zone_part = parts.next().ok_or_else(malformed)?;
        let aisle_part = parts.next().ok_or_else(malformed)?;
        let shelf_part = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        let mut zone_chars = zone_part.chars();
        let zone = zone_chars.next().ok_or_else(malformed)?;
        if zone_chars.next().is_some() || !zone.is_ascii_uppercase() {
            return Err(malformed());
        }

        let aisle = parse_digits(aisle_part).ok_or_else(malformed)?;

        let (shelf_digits, side) = if let Some(rest) = shelf_part.strip_suffix('L') {
            (rest, Some(Side::Left))
        } else if let Some(rest) = shelf_part.strip_suffix('R') {
            (rest, Some(Side::Right))
        } else {
            (shelf_part, None)
        };
        let shelf = parse_digits(shelf_digits).ok_or_else(malformed)?;

        Ok(Self {
            zone,
            aisle,
            shelf,
            side,
            canonical: raw.to_string(),
        })
    }

    /// The fixed route start/end reference.
    pub fn depot() -> Self {
        Self {
            zone: 'A',
            aisle: 0,
            shelf: 0,
            side: None,
            canonical: DEPOT.to_string(),
        }
    }

    pub fn zone(&self) -> char {
        self.zone
    }

    pub fn aisle(&self) -> u32 {
        self.aisle
    }

    pub fn shelf(&self) -> u32 {
        self.shelf
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// 0-based alphabetical index of the zone letter (`A` = 0).
    pub fn zone_index(&self) -> u32 {
        self.zone as u32 - 'A' as u32
    }

    /// The string form exactly as parsed.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub(crate) fn slot_key(&self) -> SlotKey {
        (self.zone, self.aisle, self.shelf, self.side)
    }

    /// Spatial coordinates of this bin.
    ///
    /// Zones are modeled as parallel bands along the y axis, one unit per
    /// zone letter. This is a deliberate approximation of the floor plan,
    /// not a full 2D warehouse map.
    pub fn coordinates(&self, config: &WarehouseConfig) -> (f64, f64, f64) {
        (
            self.aisle as f64 * config.aisle_width,
            self.zone_index() as f64,
            self.shelf as f64 * config.shelf_height,
        )
    }
}

impl fmt::Display for BinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
