//! Error types shared across the trackfind crates.

use std::error::Error;
use std::fmt;

/// Errors from constructing a [`MapGeometry`](crate::MapGeometry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// An axis exponent is outside the supported range.
    AxisOutOfRange {
        /// Which axis (`"log_x"` or `"log_y"`).
        name: &'static str,
        /// The rejected exponent.
        value: u8,
        /// Smallest accepted exponent.
        min: u8,
        /// Largest accepted exponent.
        max: u8,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisOutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} = {value} is outside {min}..={max}"),
        }
    }
}

impl Error for GeometryError {}
