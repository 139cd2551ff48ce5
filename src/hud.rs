//! Solar-system heads-up display.
//!
//! | Widget          | Shown                         | Driven by                    |
//! |-----------------|-------------------------------|------------------------------|
//! | Start label     | until the first touch         | `solar_system` first touch   |
//! | Progress strip  | after the first touch         | [`PlanetDiscovered`]         |
//! | Info panel      | 20 s after each discovery     | [`PlanetDiscovered`], cues   |
//! | Reset button    | after the first touch         | writes [`ResetRequested`]    |
//! | Exit button     | 4 s after the journey ends    | [`Cue::RevealExit`]          |
//!
//! Panels and badges carry the asset keys from [`crate::planet`] so an
//! artwork layer can resolve them later; the text shown today is generated.

use crate::config::GameConfig;
use crate::cues::{schedule_cue, Cue, CueFired};
use crate::discovery::{JourneyState, PlanetDiscovered, ResetRequested};
use crate::planet::{balloon_key, check_key, surface_gravity, PlanetBody, PlanetId};
use crate::scene::{GameScene, SceneEntity, SceneRequest};
use crate::ui::*;
use crate::world::GameWorld;
use bevy::prelude::*;

pub const START_TEXT: &str = "Tap the screen to start";
pub const WELCOME_TEXT: &str = "Bob arrived in the solar system";
pub const COMPLETION_TEXT: &str =
    "Bob has completed his awe-inspiring journey through the wonders of the Solar System.";

/// Key of the welcome panel, which has no planet of its own.
pub const WELCOME_KEY: &str = "balloon";

const EARTH_GRAVITY: f32 = 9.8;

// ── Components ────────────────────────────────────────────────────────────────

/// The centre label: start prompt first, completion line at the end.
#[derive(Component)]
pub struct StartLabel;

#[derive(Component)]
pub struct ResetButton;

#[derive(Component)]
pub struct ExitButton;

/// One badge per planet in the progress strip.
#[derive(Component, Debug, Clone)]
pub struct ProgressBadge {
    pub id: PlanetId,
    /// `<name>_check1` until discovered, then `<name>_check2`.
    pub key: String,
}

/// A transient info panel; at most one exists at a time.
#[derive(Component, Debug, Clone)]
pub struct InfoPanel {
    pub key: String,
}

fn badge_idle() -> Color {
    Color::srgba(0.35, 0.35, 0.45, 0.8)
}

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn spawn_start_label(commands: &mut Commands) -> Entity {
    spawn_text_block(
        commands,
        Val::Percent(30.0),
        START_TEXT,
        34.0,
        title_color(),
        StartLabel,
    )
}

/// Row of planet badges along the bottom edge, in roster order.
pub fn spawn_progress_strip(commands: &mut Commands, planets: &[PlanetBody]) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(86.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceEvenly,
                ..default()
            },
            SceneEntity,
        ))
        .with_children(|strip| {
            for planet in planets {
                strip.spawn((
                    Text::new(planet.id.as_str()),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(badge_idle()),
                    ProgressBadge {
                        id: planet.id.clone(),
                        key: check_key(&planet.id, 1),
                    },
                ));
            }
        })
        .id()
}

pub fn spawn_reset_button(commands: &mut Commands) -> Entity {
    spawn_corner_button(
        commands,
        Corner::TopRight,
        "Reset",
        ButtonStyle::Back,
        ResetButton,
    )
}

/// Two-line description shown when a planet is discovered.
pub fn planet_blurb(id: &PlanetId) -> String {
    let g = surface_gravity(id.as_str());
    format!(
        "{id}\nSurface gravity {g} m/s², {:.2}× Earth's pull.",
        g / EARTH_GRAVITY
    )
}

/// Replace any visible info panel with a new one and schedule its dismissal.
pub fn show_info_panel(
    commands: &mut Commands,
    existing: &Query<Entity, With<InfoPanel>>,
    key: String,
    text: &str,
    secs: f32,
) -> Entity {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    let panel = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(84.0),
                left: Val::Percent(10.0),
                width: Val::Percent(80.0),
                padding: UiRect::all(Val::Px(14.0)),
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(panel_bg()),
            BorderColor::all(Color::BLACK),
            InfoPanel { key },
            SceneEntity,
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(text),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(panel_text()),
                TextLayout::new_with_justify(Justify::Center),
            ));
        })
        .id();
    schedule_cue(commands, secs, Cue::DismissPanel(panel));
    panel
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Mark the badge and open the info panel for each new discovery.
pub fn discovery_hud_system(
    mut commands: Commands,
    mut discoveries: MessageReader<PlanetDiscovered>,
    config: Res<GameConfig>,
    panels: Query<Entity, With<InfoPanel>>,
    mut badges: Query<(&mut ProgressBadge, &mut TextColor)>,
) {
    let mut latest = None;
    for discovery in discoveries.read() {
        for (mut badge, mut color) in badges.iter_mut() {
            if badge.id == discovery.id {
                badge.key = check_key(&badge.id, 2);
                *color = TextColor(accent_color());
            }
        }
        latest = Some(discovery.id.clone());
    }
    let Some(latest) = latest else {
        return;
    };
    show_info_panel(
        &mut commands,
        &panels,
        balloon_key(&latest),
        &planet_blurb(&latest),
        config.info_panel_secs,
    );
}

/// Despawn info panels whose display time ran out.
pub fn dismiss_panel_system(
    mut commands: Commands,
    mut fired: MessageReader<CueFired>,
    panels: Query<(), With<InfoPanel>>,
) {
    for CueFired(cue) in fired.read() {
        if let Cue::DismissPanel(panel) = *cue {
            if panels.contains(panel) {
                commands.entity(panel).despawn();
            }
        }
    }
}

/// Show the completion line and the exit control once the reveal cue fires.
///
/// The cue is ignored unless every planet has been discovered.
pub fn reveal_exit_system(
    mut commands: Commands,
    mut fired: MessageReader<CueFired>,
    world: Option<Res<GameWorld>>,
    mut labels: Query<(&mut Text, &mut Visibility), With<StartLabel>>,
    exits: Query<(), With<ExitButton>>,
) {
    let cued = fired
        .read()
        .filter(|CueFired(cue)| *cue == Cue::RevealExit)
        .count()
        > 0;
    if !cued {
        return;
    }
    let journey = world.map(|w| w.discovery().state());
    if journey != Some(JourneyState::AllDiscovered) {
        warn!("[scene] Exit reveal cue ignored: journey still in progress");
        return;
    }
    for (mut text, mut visibility) in labels.iter_mut() {
        text.0 = COMPLETION_TEXT.to_string();
        *visibility = Visibility::Inherited;
    }
    if exits.is_empty() {
        spawn_corner_button(
            &mut commands,
            Corner::BottomRight,
            "Next",
            ButtonStyle::Forward,
            ExitButton,
        );
        info!("[scene] Exit control revealed");
    }
}

pub fn reset_button_system(
    q_button: Query<(&Interaction, &Children), (Changed<Interaction>, With<ResetButton>)>,
    mut texts: Query<&mut TextColor>,
    mut resets: MessageWriter<ResetRequested>,
) {
    for (interaction, children) in q_button.iter() {
        if *interaction == Interaction::Pressed {
            resets.write(ResetRequested);
        }
        hover_text_color(interaction, children, back_text(), &mut texts);
    }
}

pub fn exit_button_system(
    q_button: Query<(&Interaction, &Children), (Changed<Interaction>, With<ExitButton>)>,
    mut texts: Query<&mut TextColor>,
    mut requests: MessageWriter<SceneRequest>,
) {
    for (interaction, children) in q_button.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::End));
        }
        hover_text_color(interaction, children, next_text(), &mut texts);
    }
}

/// Progress line for logs and tests: `"3/8"`.
pub fn progress_text(world: &GameWorld) -> String {
    format!(
        "{}/{}",
        world.discovery().len(),
        world.discovery().total()
    )
}
