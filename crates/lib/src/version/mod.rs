//! Version identifiers, patterns, and advancement.
//!
//! A [`Pattern`] is an ordered list of [`Segment`]s, each declaring the
//! closed integer range its position may take. A [`Version`] is one value
//! per segment, parsed from (and displayed as) dot-joined integers.
//!
//! Versions produced by the same pattern compare lexicographically, most
//! significant segment first. [`Version::next`] advances odometer-style:
//! increment the last segment, carrying leftward on overflow; overflowing
//! the most significant segment means the pattern cannot express a later
//! version and fails immediately.
//!
//! ```
//! use canopy::version::{Pattern, Segment};
//!
//! let pattern = Pattern::new(vec![Segment::new(0, 9)?, Segment::new(0, 9)?])?;
//! let version = pattern.parse("1.9")?;
//! assert_eq!(version.next()?.to_string(), "2.0");
//! # Ok::<(), canopy::Error>(())
//! ```

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod scheme;

pub use errors::VersionError;
pub use scheme::{Automatic, Manual, Versioning};

/// One position of a version pattern: a closed integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    min: i64,
    max: i64,
}

impl Segment {
    /// A segment spanning `[min, max]`, inclusive on both ends.
    pub fn new(min: i64, max: i64) -> Result<Self, VersionError> {
        if min > max {
            return Err(VersionError::SegmentBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// The lowest legal value.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The highest legal value.
    pub fn max(&self) -> i64 {
        self.max
    }
}

/// An ordered list of segments defining the legal version space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// A pattern over the given segments, most significant first.
    pub fn new(segments: Vec<Segment>) -> Result<Self, VersionError> {
        if segments.is_empty() {
            return Err(VersionError::EmptyPattern);
        }
        Ok(Self { segments })
    }

    /// The pattern's segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The first version: every segment at its minimum.
    pub fn first(&self) -> Version {
        Version {
            pattern: self.clone(),
            values: self.segments.iter().map(Segment::min).collect(),
        }
    }

    /// Parses a dot-joined version string against this pattern.
    ///
    /// The string must supply exactly one in-range integer per segment;
    /// anything else is a malformed-schema condition.
    pub fn parse(&self, text: &str) -> Result<Version, VersionError> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != self.segments.len() {
            return Err(VersionError::Malformed {
                text: text.to_string(),
                reason: format!(
                    "expected {} segments, found {}",
                    self.segments.len(),
                    parts.len()
                ),
            });
        }
        let mut values = Vec::with_capacity(parts.len());
        for (part, segment) in parts.iter().zip(&self.segments) {
            let value: i64 = part.parse().map_err(|_| VersionError::Malformed {
                text: text.to_string(),
                reason: format!("segment '{part}' is not an integer"),
            })?;
            if value < segment.min || value > segment.max {
                return Err(VersionError::Malformed {
                    text: text.to_string(),
                    reason: format!(
                        "segment value {value} is outside [{}, {}]",
                        segment.min, segment.max
                    ),
                });
            }
            values.push(value);
        }
        Ok(Version {
            pattern: self.clone(),
            values,
        })
    }
}

/// A concrete version: one value per pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pattern: Pattern,
    values: Vec<i64>,
}

impl Version {
    /// The pattern this version was produced by.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The segment values, most significant first.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The canonical string form, used as the relocation-table key.
    pub fn as_id(&self) -> String {
        self.to_string()
    }

    /// The next version in advance order.
    ///
    /// Increments the last segment; on overflow resets it to its minimum
    /// and carries into the next more significant segment. Overflowing the
    /// most significant segment is an error, surfaced immediately.
    pub fn next(&self) -> Result<Version, VersionError> {
        let mut values = self.values.clone();
        for (i, segment) in self.pattern.segments.iter().enumerate().rev() {
            if values[i] < segment.max {
                values[i] += 1;
                for (value, later) in values[i + 1..]
                    .iter_mut()
                    .zip(&self.pattern.segments[i + 1..])
                {
                    *value = later.min;
                }
                return Ok(Version {
                    pattern: self.pattern.clone(),
                    values,
                });
            }
        }
        Err(VersionError::Overflow {
            max: self.pattern.segments[0].max,
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Lexicographic, most significant segment first. Only meaningful for
    /// versions produced by the same pattern.
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.pattern, other.pattern);
        self.values.cmp(&other.values)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
