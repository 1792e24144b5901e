//! Generation inputs and the field model the control panel edits.
//!
//! [`GalaxyParameters`] is a plain value: the regeneration system copies it
//! out of [`GalaxySettings`] so a generation always sees one consistent
//! snapshot.  [`ParamField`] describes each editable field (label, bounds,
//! nudge size) so the UI never hard-codes ranges.

use crate::constants::*;
use crate::error::{
    validate_branches, validate_count, validate_finite, validate_non_negative, GalaxyResult,
};
use crate::spin::SpinProfile;
use bevy::color::{Hsla, Hue, Srgba};
use bevy::prelude::*;

/// Snapshot of every generation input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyParameters {
    /// Number of points.
    pub count: u32,
    /// Render-only point size; not used by the generation math.
    pub size: f32,
    /// Maximum sampled radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Twist coefficient handed to the spin profile.
    pub spin: f32,
    /// Jitter magnitude scale.
    pub randomness: f32,
    /// Jitter falloff exponent.
    pub randomness_power: f32,
    /// Color at radius 0.
    pub inside_color: Srgba,
    /// Color at the full radius.
    pub outside_color: Srgba,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            radius: DEFAULT_RADIUS,
            branches: DEFAULT_BRANCHES,
            spin: DEFAULT_SPIN,
            randomness: DEFAULT_RANDOMNESS,
            randomness_power: DEFAULT_RANDOMNESS_POWER,
            inside_color: Srgba::hex(DEFAULT_INSIDE_COLOR).unwrap_or(Srgba::WHITE),
            outside_color: Srgba::hex(DEFAULT_OUTSIDE_COLOR).unwrap_or(Srgba::WHITE),
        }
    }
}

impl GalaxyParameters {
    /// Reject values the generator cannot turn into well-defined buffers.
    ///
    /// Out-of-bounds but representable values (e.g. `radius = 50`) pass; only
    /// NaN/infinite reals, negative radius or jitter terms, zero branches, and
    /// a count above [`COUNT_CEILING`] fail.
    pub fn validate(&self) -> GalaxyResult<()> {
        validate_count(self.count, COUNT_CEILING)?;
        validate_non_negative("size", self.size)?;
        validate_non_negative("radius", self.radius)?;
        validate_branches(self.branches)?;
        validate_finite("spin", self.spin)?;
        validate_non_negative("randomness", self.randomness)?;
        validate_non_negative("randomness_power", self.randomness_power)?;
        Ok(())
    }

    /// Copy with every numeric field clamped to its control-panel bounds.
    pub fn clamped(&self) -> Self {
        Self {
            count: self.count.clamp(COUNT_MIN, COUNT_MAX),
            size: self.size.clamp(SIZE_MIN, SIZE_MAX),
            radius: self.radius.clamp(RADIUS_MIN, RADIUS_MAX),
            branches: self.branches.clamp(BRANCHES_MIN, BRANCHES_MAX),
            spin: self.spin.clamp(SPIN_MIN, SPIN_MAX),
            randomness: self.randomness.clamp(RANDOMNESS_MIN, RANDOMNESS_MAX),
            randomness_power: self
                .randomness_power
                .clamp(RANDOMNESS_POWER_MIN, RANDOMNESS_POWER_MAX),
            ..*self
        }
    }
}

// ── Settings resource ─────────────────────────────────────────────────────────

/// Current generation inputs plus the active spin profile.
///
/// Written by the control panel; read by the regeneration system.  The
/// profile lives here (not in a closure) so the last selected variant
/// survives unrelated parameter edits.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GalaxySettings {
    pub params: GalaxyParameters,
    pub profile: SpinProfile,
}

impl GalaxySettings {
    /// Switch the active spin profile.  Returns `true` if it changed.
    pub fn select_profile(&mut self, profile: SpinProfile) -> bool {
        let changed = self.profile != profile;
        self.profile = profile;
        changed
    }
}

// ── Field model ───────────────────────────────────────────────────────────────

/// Direction of a single nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Down,
    Up,
}

impl Nudge {
    fn sign(self) -> f32 {
        match self {
            Nudge::Down => -1.0,
            Nudge::Up => 1.0,
        }
    }
}

/// One editable field of [`GalaxyParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
}

impl ParamField {
    /// Every field in panel order.
    pub const ALL: [ParamField; 9] = [
        ParamField::Count,
        ParamField::Size,
        ParamField::Radius,
        ParamField::Branches,
        ParamField::Spin,
        ParamField::Randomness,
        ParamField::RandomnessPower,
        ParamField::InsideColor,
        ParamField::OutsideColor,
    ];

    /// Human-readable label displayed next to the value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "Number of particles",
            Self::Size => "Size of the particles",
            Self::Radius => "Radius of the galaxy",
            Self::Branches => "Number of branches/lines",
            Self::Spin => "Spin frequency",
            Self::Randomness => "Randomness",
            Self::RandomnessPower => "Randomness power",
            Self::InsideColor => "Inside color",
            Self::OutsideColor => "Outside color",
        }
    }

    /// Inclusive edit bounds; `None` for color fields.
    pub fn bounds(self) -> Option<(f32, f32)> {
        match self {
            Self::Count => Some((COUNT_MIN as f32, COUNT_MAX as f32)),
            Self::Size => Some((SIZE_MIN, SIZE_MAX)),
            Self::Radius => Some((RADIUS_MIN, RADIUS_MAX)),
            Self::Branches => Some((BRANCHES_MIN as f32, BRANCHES_MAX as f32)),
            Self::Spin => Some((SPIN_MIN, SPIN_MAX)),
            Self::Randomness => Some((RANDOMNESS_MIN, RANDOMNESS_MAX)),
            Self::RandomnessPower => Some((RANDOMNESS_POWER_MIN, RANDOMNESS_POWER_MAX)),
            Self::InsideColor | Self::OutsideColor => None,
        }
    }

    /// Amount one nudge moves the field (hue degrees for colors).
    pub fn nudge_size(self) -> f32 {
        match self {
            Self::Count => (COUNT_STEP * 10) as f32,
            Self::Size => 0.001,
            Self::Radius => 0.1,
            Self::Branches => 1.0,
            Self::Spin => 0.05,
            Self::Randomness => 0.01,
            Self::RandomnessPower => 0.1,
            Self::InsideColor | Self::OutsideColor => COLOR_HUE_STEP_DEGREES,
        }
    }

    /// Apply one nudge, clamped to [`ParamField::bounds`].
    pub fn adjust(self, params: &mut GalaxyParameters, nudge: Nudge) {
        let delta = self.nudge_size() * nudge.sign();
        match self {
            Self::Count => {
                let next = params.count as i64 + delta as i64;
                params.count = next.clamp(COUNT_MIN as i64, COUNT_MAX as i64) as u32;
            }
            Self::Size => params.size = (params.size + delta).clamp(SIZE_MIN, SIZE_MAX),
            Self::Radius => params.radius = (params.radius + delta).clamp(RADIUS_MIN, RADIUS_MAX),
            Self::Branches => {
                let next = params.branches as i64 + delta as i64;
                params.branches = next.clamp(BRANCHES_MIN as i64, BRANCHES_MAX as i64) as u32;
            }
            Self::Spin => params.spin = (params.spin + delta).clamp(SPIN_MIN, SPIN_MAX),
            Self::Randomness => {
                params.randomness =
                    (params.randomness + delta).clamp(RANDOMNESS_MIN, RANDOMNESS_MAX);
            }
            Self::RandomnessPower => {
                params.randomness_power = (params.randomness_power + delta)
                    .clamp(RANDOMNESS_POWER_MIN, RANDOMNESS_POWER_MAX);
            }
            Self::InsideColor => params.inside_color = rotate_hue(params.inside_color, delta),
            Self::OutsideColor => params.outside_color = rotate_hue(params.outside_color, delta),
        }
    }

    /// Current value formatted for the panel.
    pub fn format_value(self, params: &GalaxyParameters) -> String {
        match self {
            Self::Count => params.count.to_string(),
            Self::Size => format!("{:.3}", params.size),
            Self::Radius => format!("{:.2}", params.radius),
            Self::Branches => params.branches.to_string(),
            Self::Spin => format!("{:.3}", params.spin),
            Self::Randomness => format!("{:.3}", params.randomness),
            Self::RandomnessPower => format!("{:.3}", params.randomness_power),
            Self::InsideColor => params.inside_color.to_hex(),
            Self::OutsideColor => params.outside_color.to_hex(),
        }
    }

    /// Field after this one in panel order, wrapping.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Field before this one in panel order, wrapping.
    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn rotate_hue(color: Srgba, degrees: f32) -> Srgba {
    Srgba::from(Hsla::from(color).rotate_hue(degrees))
}
