//! Generation-specific error types.
//!
//! Every error is local to a single regeneration request: there is no
//! cross-call recovery state, so a caller retries by regenerating with
//! corrected parameters.
//!
//! ## Usage
//!
//! ```no_run
//! use spiral_galaxy::error::{validate_finite, GalaxyResult};
//!
//! fn check(spin: f32) -> GalaxyResult<()> {
//!     validate_finite("spin", spin)?;
//!     Ok(())
//! }
//! # assert!(check(1.0).is_ok());
//! # assert!(check(f32::NAN).is_err());
//! ```

use std::fmt;

/// Top-level error enum for galaxy generation and scene management.
#[derive(Debug, Clone, PartialEq)]
pub enum GalaxyError {
    /// A parameter reached the generator with a value that cannot produce
    /// well-defined buffers (NaN, infinite, negative where only non-negative
    /// makes sense, or zero branches).
    InvalidParameter {
        /// Field name as it appears in `assets/galaxy.toml`.
        name: &'static str,
        /// The rejected value, widened for display.
        value: f64,
        /// Human-readable description of the accepted domain.
        reason: &'static str,
    },

    /// A configured color string is not a valid sRGB hex color.
    InvalidColor {
        /// Field name as it appears in `assets/galaxy.toml`.
        field: &'static str,
        /// The rejected string.
        value: String,
    },

    /// Releasing the previously installed galaxy failed.  Regeneration
    /// proceeds regardless.
    ResourceDisposal {
        /// Which release step failed.
        context: &'static str,
    },
}

impl fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalaxyError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid parameter '{}' = {}: {}", name, value, reason),
            GalaxyError::InvalidColor { field, value } => {
                write!(f, "invalid color '{}' = {:?}: expected sRGB hex", field, value)
            }
            GalaxyError::ResourceDisposal { context } => {
                write!(f, "failed to release previous galaxy during '{}'", context)
            }
        }
    }
}

impl std::error::Error for GalaxyError {}

/// Convenience alias: a `Result` using `GalaxyError` as the error type.
pub type GalaxyResult<T> = Result<T, GalaxyError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `value` is NaN or infinite.
pub fn validate_finite(name: &'static str, value: f32) -> GalaxyResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GalaxyError::InvalidParameter {
            name,
            value: value as f64,
            reason: "must be a finite number",
        })
    }
}

/// Returns an error if `value` is not a finite, non-negative number.
pub fn validate_non_negative(name: &'static str, value: f32) -> GalaxyResult<()> {
    validate_finite(name, value)?;
    if value < 0.0 {
        Err(GalaxyError::InvalidParameter {
            name,
            value: value as f64,
            reason: "must be >= 0",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `count` exceeds `ceiling`.
pub fn validate_count(count: u32, ceiling: u32) -> GalaxyResult<()> {
    if count > ceiling {
        Err(GalaxyError::InvalidParameter {
            name: "count",
            value: count as f64,
            reason: "exceeds the point-count ceiling",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `branches` is zero (arm angle would divide by zero).
pub fn validate_branches(branches: u32) -> GalaxyResult<()> {
    if branches == 0 {
        Err(GalaxyError::InvalidParameter {
            name: "branches",
            value: 0.0,
            reason: "must be >= 1",
        })
    } else {
        Ok(())
    }
}
