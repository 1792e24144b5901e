//! Rendering systems: the galaxy control panel overlay.
//!
//! ## Layout
//!
//! | Section        | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | Parameters     | One row per [`ParamField`]: `[-]` `[+]`, label, value  |
//! | Spin           | Seven variant buttons, active one highlighted          |
//! | Actions        | Re-roll button                                         |
//! | Status         | Points, profile, generation count, last duration       |
//!
//! ## System Responsibilities
//!
//! | System                    | Schedule | Purpose                                 |
//! |---------------------------|----------|-----------------------------------------|
//! | `setup_control_panel`     | Startup  | Spawn the panel                         |
//! | `panel_button_system`     | Update   | Nudge / select / re-roll on button input|
//! | `panel_refresh_system`    | Update   | Values, selected row, active variant    |
//! | `status_line_system`      | Update   | Refresh the status text from stats      |
//!
//! Buttons follow the same commit policy as the keyboard: a held `[-]`/`[+]`
//! edits (with auto-repeat) and the release commits one regeneration.

use crate::config::GalaxyConfig;
use crate::controls::{EditSession, KeyRepeat, SelectedField};
use crate::galaxy::{
    init_galaxy_state, regenerate_galaxy_system, GalaxyStats, RegenerateGalaxy, RegenerateReason,
};
use crate::params::{GalaxyParameters, GalaxySettings, Nudge, ParamField};
use crate::spin::SpinProfile;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Component markers ─────────────────────────────────────────────────────────

/// Marker for the control panel root node.
#[derive(Component)]
pub struct ControlPanel;

/// Row node for one parameter field; highlighted while selected.
#[derive(Component, Clone, Copy, Debug)]
pub struct FieldRow(pub ParamField);

/// Text node showing one field's current value.
#[derive(Component, Clone, Copy, Debug)]
pub struct FieldValue(pub ParamField);

/// Marker for the status line text node.
#[derive(Component)]
pub struct StatusLine;

/// What a panel button does when pressed.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PanelButton {
    Nudge(ParamField, Nudge),
    Variant(SpinProfile),
    Reroll,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Spawns and drives the control panel.  Requires `GalaxyPlugin` and
/// `ControlsPlugin` for the resources it edits.
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_control_panel.after(init_galaxy_state))
            .add_systems(
                Update,
                (
                    panel_button_system.before(regenerate_galaxy_system),
                    panel_refresh_system,
                    status_line_system.after(regenerate_galaxy_system),
                ),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn active_bg() -> Color {
    Color::srgb(0.08, 0.30, 0.44)
}
fn idle_bg() -> Color {
    Color::srgb(0.14, 0.14, 0.19)
}
fn selected_row_bg() -> Color {
    Color::srgba(0.25, 0.25, 0.40, 0.65)
}
fn label_text() -> Color {
    Color::srgb(0.85, 0.85, 0.88)
}
fn heading_text() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Value column text, with the range for numeric fields.
pub fn field_value_text(field: ParamField, params: &GalaxyParameters) -> String {
    let value = field.format_value(params);
    match field.bounds() {
        Some((min, max)) => format!("{value}  [{min}..{max}]"),
        None => value,
    }
}

/// Status line text.
pub fn status_text(stats: &GalaxyStats) -> String {
    let mut line = format!(
        "{} points | {} | gen #{} | {:.1} ms",
        stats.point_count,
        stats.profile.label(),
        stats.generations,
        stats.last_generation_ms
    );
    if stats.rejected > 0 {
        line.push_str(&format!(" | {} rejected", stats.rejected));
    }
    if stats.failed_disposals > 0 {
        line.push_str(&format!(" | {} failed releases", stats.failed_disposals));
    }
    line
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the control panel in the top-right corner.
pub fn setup_control_panel(
    mut commands: Commands,
    config: Res<GalaxyConfig>,
    settings: Res<GalaxySettings>,
) {
    let font_size = config.panel_font_size;

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                top: Val::Px(10.0),
                width: Val::Px(340.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(5.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
            BorderColor::all(Color::srgb(0.32, 0.32, 0.44)),
            ControlPanel,
        ))
        .with_children(|panel| {
            spawn_heading(panel, "Galaxy", font_size + 1.0);
            spawn_divider(panel);

            for field in ParamField::ALL {
                spawn_field_row(panel, field, &settings.params, font_size);
            }

            spawn_divider(panel);
            spawn_heading(panel, "Spin", font_size);
            for profile in SpinProfile::ALL {
                spawn_wide_button(
                    panel,
                    PanelButton::Variant(profile),
                    &format!("{}. {}", profile.number(), profile.label()),
                    profile == settings.profile,
                    font_size,
                );
            }

            spawn_divider(panel);
            spawn_wide_button(panel, PanelButton::Reroll, "Re-roll", false, font_size);

            spawn_divider(panel);
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: font_size - 1.0,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 1.0)),
                StatusLine,
            ));
            panel.spawn((
                Text::new("Left/Right edit, Up/Down select, 1-7 variant, R re-roll, drag to orbit"),
                TextFont {
                    font_size: font_size - 2.0,
                    ..default()
                },
                TextColor(Color::srgb(0.42, 0.42, 0.52)),
            ));
        });
}

fn spawn_heading(parent: &mut ChildSpawnerCommands<'_>, text: &str, font_size: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(heading_text()),
    ));
}

fn spawn_divider(parent: &mut ChildSpawnerCommands<'_>) {
    parent.spawn((
        Text::new("──────────────────────────────────────"),
        TextFont {
            font_size: 9.0,
            ..default()
        },
        TextColor(Color::srgb(0.28, 0.28, 0.38)),
    ));
}

fn spawn_field_row(
    parent: &mut ChildSpawnerCommands<'_>,
    field: ParamField,
    params: &GalaxyParameters,
    font_size: f32,
) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(6.0),
                align_items: AlignItems::Center,
                padding: UiRect::horizontal(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
            FieldRow(field),
        ))
        .with_children(|row| {
            spawn_nudge_button(row, field, Nudge::Down, "-", font_size);
            spawn_nudge_button(row, field, Nudge::Up, "+", font_size);
            row.spawn((
                Text::new(field.label()),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(label_text()),
            ));
            row.spawn((
                Text::new(field_value_text(field, params)),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                FieldValue(field),
            ));
        });
}

fn spawn_nudge_button(
    parent: &mut ChildSpawnerCommands<'_>,
    field: ParamField,
    nudge: Nudge,
    glyph: &str,
    font_size: f32,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(20.0),
                height: Val::Px(18.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(idle_bg()),
            BorderColor::all(Color::srgb(0.5, 0.5, 0.5)),
            PanelButton::Nudge(field, nudge),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(glyph),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(label_text()),
            ));
        });
}

fn spawn_wide_button(
    parent: &mut ChildSpawnerCommands<'_>,
    button: PanelButton,
    text: &str,
    active: bool,
    font_size: f32,
) {
    parent
        .spawn((
            Button,
            Node {
                height: Val::Px(20.0),
                padding: UiRect::horizontal(Val::Px(6.0)),
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(if active { active_bg() } else { idle_bg() }),
            BorderColor::all(Color::srgb(0.5, 0.5, 0.5)),
            button,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(text),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(label_text()),
            ));
        });
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Apply panel button presses.
///
/// A `[-]`/`[+]` press selects its field and nudges it once; holding repeats
/// on the key-repeat timing; leaving the pressed state commits.  Variant and
/// re-roll buttons request a regeneration immediately.
#[allow(clippy::too_many_arguments)]
pub fn panel_button_system(
    buttons: Query<(&Interaction, &PanelButton), Changed<Interaction>>,
    time: Res<Time>,
    config: Res<GalaxyConfig>,
    mut selected: ResMut<SelectedField>,
    mut settings: ResMut<GalaxySettings>,
    mut session: ResMut<EditSession>,
    mut held: Local<Option<(ParamField, Nudge)>>,
    mut repeat: Local<KeyRepeat>,
    mut requests: MessageWriter<RegenerateGalaxy>,
) {
    for (interaction, button) in buttons.iter() {
        match (*interaction, *button) {
            (Interaction::Pressed, PanelButton::Nudge(field, nudge)) => {
                selected.0 = field;
                field.adjust(&mut settings.params, nudge);
                session.record_edit();
                *held = Some((field, nudge));
                repeat.reset();
            }
            (Interaction::Pressed, PanelButton::Variant(profile)) => {
                settings.select_profile(profile);
                session.commit();
                requests.write(RegenerateGalaxy {
                    reason: RegenerateReason::ProfileSelected,
                });
            }
            (Interaction::Pressed, PanelButton::Reroll) => {
                requests.write(RegenerateGalaxy {
                    reason: RegenerateReason::Reroll,
                });
            }
            (_, PanelButton::Nudge(field, nudge)) if *held == Some((field, nudge)) => {
                *held = None;
                if session.commit() {
                    requests.write(RegenerateGalaxy {
                        reason: RegenerateReason::Commit,
                    });
                }
            }
            _ => {}
        }
    }

    if let Some((field, nudge)) = *held {
        let steps = repeat.tick(
            time.delta_secs(),
            config.key_repeat_delay,
            config.key_repeat_interval,
        );
        for _ in 0..steps {
            field.adjust(&mut settings.params, nudge);
            session.record_edit();
        }
    }
}

/// Refresh value texts, the selected-row highlight, and the active variant.
#[allow(clippy::type_complexity)]
pub fn panel_refresh_system(
    settings: Res<GalaxySettings>,
    selected: Res<SelectedField>,
    mut rows: Query<(&FieldRow, &mut BackgroundColor)>,
    mut buttons: Query<(&PanelButton, &mut BackgroundColor), Without<FieldRow>>,
    mut values: Query<(&FieldValue, &mut Text)>,
) {
    if !settings.is_changed() && !selected.is_changed() {
        return;
    }

    for (row, mut bg) in rows.iter_mut() {
        *bg = BackgroundColor(if row.0 == selected.0 {
            selected_row_bg()
        } else {
            Color::NONE
        });
    }

    for (button, mut bg) in buttons.iter_mut() {
        if let PanelButton::Variant(profile) = button {
            *bg = BackgroundColor(if *profile == settings.profile {
                active_bg()
            } else {
                idle_bg()
            });
        }
    }

    for (value, mut text) in values.iter_mut() {
        *text = Text::new(field_value_text(value.0, &settings.params));
    }
}

/// Rewrite the status line whenever [`GalaxyStats`] changes.
pub fn status_line_system(
    stats: Res<GalaxyStats>,
    mut query: Query<&mut Text, With<StatusLine>>,
) {
    if !stats.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        *text = Text::new(status_text(&stats));
    }
}
