//! Spin profiles: the swappable twist applied to every point before placement.
//!
//! A profile maps a point's sampled radius and the global spin coefficient to
//! an extra angle added to the point's arm angle.  [`SpinProfile`] is the
//! closed set of seven named variants the control panel offers; the generator
//! itself accepts any `Fn(f32, f32) -> f32`, so ad-hoc profiles work too.
//!
//! | # | Variant          | Angle                    |
//! |---|------------------|--------------------------|
//! | 1 | `Linear`         | `r·s`                    |
//! | 2 | `Sine`           | `sin(r·s)`               |
//! | 3 | `Cosine`         | `cos(r·s)`               |
//! | 4 | `CosineOfSine3`  | `cos(3·sin(r·s))`        |
//! | 5 | `SineOfCosine3`  | `sin(3·cos(r·s))`        |
//! | 6 | `CosineOfSine8`  | `cos(8·sin(r·s))`        |
//! | 7 | `SineOfCosine5`  | `sin(5·cos(r·s))`        |

use serde::Deserialize;

/// One of the seven named spin profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinProfile {
    /// Classic logarithmic-looking spiral: angle grows with radius.
    Linear,
    /// Arms wobble back and forth instead of winding.
    #[default]
    Sine,
    Cosine,
    CosineOfSine3,
    SineOfCosine3,
    CosineOfSine8,
    SineOfCosine5,
}

impl SpinProfile {
    /// Every variant in selector order.
    pub const ALL: [SpinProfile; 7] = [
        SpinProfile::Linear,
        SpinProfile::Sine,
        SpinProfile::Cosine,
        SpinProfile::CosineOfSine3,
        SpinProfile::SineOfCosine3,
        SpinProfile::CosineOfSine8,
        SpinProfile::SineOfCosine5,
    ];

    /// Extra rotation (radians) for a point at `radius` under coefficient `spin`.
    #[inline]
    pub fn angle(self, radius: f32, spin: f32) -> f32 {
        let phase = radius * spin;
        match self {
            SpinProfile::Linear => phase,
            SpinProfile::Sine => phase.sin(),
            SpinProfile::Cosine => phase.cos(),
            SpinProfile::CosineOfSine3 => (phase.sin() * 3.0).cos(),
            SpinProfile::SineOfCosine3 => (phase.cos() * 3.0).sin(),
            SpinProfile::CosineOfSine8 => (phase.sin() * 8.0).cos(),
            SpinProfile::SineOfCosine5 => (phase.cos() * 5.0).sin(),
        }
    }

    /// The profile as a plain function, for handing to the generator.
    pub fn as_fn(self) -> impl Fn(f32, f32) -> f32 {
        move |radius, spin| self.angle(radius, spin)
    }

    /// Selector label shown in the control panel.
    pub fn label(self) -> &'static str {
        match self {
            SpinProfile::Linear => "First variation",
            SpinProfile::Sine => "Second variation",
            SpinProfile::Cosine => "Third variation",
            SpinProfile::CosineOfSine3 => "Fourth variation",
            SpinProfile::SineOfCosine3 => "Fifth variation",
            SpinProfile::CosineOfSine8 => "Sixth variation",
            SpinProfile::SineOfCosine5 => "Seventh variation",
        }
    }

    /// 1-based position in [`SpinProfile::ALL`]; matches the digit hotkey.
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|&p| p == self)
            .map_or(0, |i| i + 1)
    }

    /// Look up a variant by its 1-based number.
    pub fn from_number(number: usize) -> Option<SpinProfile> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn linear_is_radius_times_spin() {
        assert_eq!(SpinProfile::Linear.angle(2.0, 1.5), 3.0);
        assert_eq!(SpinProfile::Linear.angle(4.0, 0.0), 0.0);
    }

    #[test]
    fn sine_and_cosine_profiles_follow_phase() {
        assert!((SpinProfile::Sine.angle(FRAC_PI_2, 1.0) - 1.0).abs() < 1e-6);
        assert!((SpinProfile::Cosine.angle(0.0, 3.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn composed_profiles_match_their_formulas() {
        let (r, s) = (1.3_f32, -0.7_f32);
        let p = r * s;
        let cases = [
            (SpinProfile::CosineOfSine3, (p.sin() * 3.0).cos()),
            (SpinProfile::SineOfCosine3, (p.cos() * 3.0).sin()),
            (SpinProfile::CosineOfSine8, (p.sin() * 8.0).cos()),
            (SpinProfile::SineOfCosine5, (p.cos() * 5.0).sin()),
        ];
        for (profile, expected) in cases {
            assert!(
                (profile.angle(r, s) - expected).abs() < 1e-6,
                "{profile:?}: got {}, expected {expected}",
                profile.angle(r, s)
            );
        }
    }

    #[test]
    fn bounded_profiles_stay_within_unit_range() {
        for profile in SpinProfile::ALL {
            if profile == SpinProfile::Linear {
                continue;
            }
            for step in 0..200 {
                let r = step as f32 * 0.1;
                let a = profile.angle(r, 5.0);
                assert!((-1.0..=1.0).contains(&a), "{profile:?} at r={r} gave {a}");
            }
        }
    }

    #[test]
    fn as_fn_agrees_with_angle() {
        let f = SpinProfile::SineOfCosine5.as_fn();
        assert_eq!(f(0.8, 2.0), SpinProfile::SineOfCosine5.angle(0.8, 2.0));
    }

    #[test]
    fn numbers_round_trip_and_are_one_based() {
        for (i, profile) in SpinProfile::ALL.iter().enumerate() {
            assert_eq!(profile.number(), i + 1);
            assert_eq!(SpinProfile::from_number(i + 1), Some(*profile));
        }
        assert_eq!(SpinProfile::from_number(0), None);
        assert_eq!(SpinProfile::from_number(8), None);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = SpinProfile::ALL.iter().map(|p| p.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SpinProfile::ALL.len());
    }

    #[test]
    fn default_profile_is_sine() {
        assert_eq!(SpinProfile::default(), SpinProfile::Sine);
    }
}
