//! Keyboard controls and the edit-commit policy.
//!
//! ## Keys
//!
//! | Key              | Action                                              |
//! |------------------|-----------------------------------------------------|
//! | `↑` / `↓`        | Select previous / next parameter field              |
//! | `←` / `→`        | Nudge the selected field (auto-repeats when held)   |
//! | `1` … `7`        | Select a spin variant and regenerate immediately    |
//! | `R`              | Re-roll: same parameters, fresh random draw         |
//!
//! Nudges only edit [`GalaxySettings`]; the galaxy is rebuilt once, when the
//! key (or panel button) is released.  [`EditSession`] tracks whether an
//! uncommitted edit exists so a release without edits does nothing.

use crate::config::GalaxyConfig;
use crate::galaxy::{regenerate_galaxy_system, RegenerateGalaxy, RegenerateReason};
use crate::params::{GalaxySettings, Nudge, ParamField};
use crate::spin::SpinProfile;
use bevy::prelude::*;

/// Digit keys mapped to spin variants, in selector order.
pub const VARIANT_KEYS: [KeyCode; 7] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
];

// ── Resources ─────────────────────────────────────────────────────────────────

/// Field the arrow keys currently edit.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedField(pub ParamField);

impl Default for SelectedField {
    fn default() -> Self {
        Self(ParamField::Count)
    }
}

/// Uncommitted edits since the last regeneration request.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pending: u32,
}

impl EditSession {
    /// Note one edit to the settings.
    pub fn record_edit(&mut self) {
        self.pending += 1;
    }

    /// `true` if edits are waiting for a commit.
    pub fn is_dirty(&self) -> bool {
        self.pending > 0
    }

    /// End the interaction.  Returns `true` if there was anything to commit,
    /// i.e. a regeneration should be requested.
    pub fn commit(&mut self) -> bool {
        std::mem::take(&mut self.pending) > 0
    }
}

/// Hold-to-repeat timing for one held key or button.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyRepeat {
    held_for: f32,
    fired: u32,
}

impl KeyRepeat {
    /// Start a fresh hold.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the hold by `dt` seconds and return how many repeats became
    /// due.  Nothing fires before `delay`; after that one repeat fires per
    /// `interval`.
    pub fn tick(&mut self, dt: f32, delay: f32, interval: f32) -> u32 {
        self.held_for += dt;
        if self.held_for < delay {
            return 0;
        }
        let interval = interval.max(f32::EPSILON);
        let due = ((self.held_for - delay) / interval).floor() as u32 + 1;
        let fire = due.saturating_sub(self.fired);
        self.fired = due;
        fire
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Keyboard editing of the galaxy settings.
///
/// Requires [`crate::galaxy::GalaxyPlugin`].  Inputs are read before the
/// regeneration system so a commit is applied in the same frame.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedField>()
            .init_resource::<EditSession>()
            .add_systems(
                Update,
                keyboard_controls_system.before(regenerate_galaxy_system),
            );
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Translate keyboard input into settings edits and regeneration requests.
#[allow(clippy::too_many_arguments)]
pub fn keyboard_controls_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GalaxyConfig>,
    mut selected: ResMut<SelectedField>,
    mut settings: ResMut<GalaxySettings>,
    mut session: ResMut<EditSession>,
    mut repeats: Local<[KeyRepeat; 2]>,
    mut requests: MessageWriter<RegenerateGalaxy>,
) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        selected.0 = selected.0.previous();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        selected.0 = selected.0.next();
    }

    // Each arrow keeps its own hold timer.
    for ((key, nudge), repeat) in [
        (KeyCode::ArrowLeft, Nudge::Down),
        (KeyCode::ArrowRight, Nudge::Up),
    ]
    .into_iter()
    .zip(repeats.iter_mut())
    {
        let steps = if keys.just_pressed(key) {
            repeat.reset();
            1
        } else if keys.pressed(key) {
            repeat.tick(
                time.delta_secs(),
                config.key_repeat_delay,
                config.key_repeat_interval,
            )
        } else {
            0
        };
        for _ in 0..steps {
            selected.0.adjust(&mut settings.params, nudge);
            session.record_edit();
        }
    }

    if (keys.just_released(KeyCode::ArrowLeft) || keys.just_released(KeyCode::ArrowRight))
        && session.commit()
    {
        requests.write(RegenerateGalaxy {
            reason: RegenerateReason::Commit,
        });
    }

    for (key, profile) in VARIANT_KEYS.into_iter().zip(SpinProfile::ALL) {
        if keys.just_pressed(key) {
            settings.select_profile(profile);
            // The pending edit rides along with this generation.
            session.commit();
            requests.write(RegenerateGalaxy {
                reason: RegenerateReason::ProfileSelected,
            });
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        requests.write(RegenerateGalaxy {
            reason: RegenerateReason::Reroll,
        });
    }
}
