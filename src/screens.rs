//! Presentation-only scenes: start card, intro narration and end credits.
//!
//! | Scene   | Content                                      | Leaves to             |
//! |---------|----------------------------------------------|-----------------------|
//! | `Start` | title, portrait hint, Start / Free play      | `Intro`, `FreePlay`   |
//! | `Intro` | five narration lines, Back / Next            | `Tutorial`            |
//! | `End`   | gravity Q&A revealed every 2.5 s, Bob in box | `Start`               |

use crate::camera::{reset_camera, MainCamera};
use crate::config::GameConfig;
use crate::constants::{BOX_HALF_HEIGHT, BOX_HALF_WIDTH};
use crate::cues::{schedule_cue, Cue, CueFired};
use crate::player::{blink_system, spawn_player};
use crate::scene::{GameScene, SceneEntity, SceneRequest};
use crate::ui::*;
use crate::walls::spawn_walled_box;
use bevy::prelude::*;

pub const GAME_TITLE: &str = "Bob the Ball";
pub const PORTRAIT_HINT: &str =
    "For a better game experience, lock the screen rotation in portrait mode";

pub const INTRO_LINES: [&str; 5] = [
    "Bob, a small ball, arrives at an unknown Solar System.",
    "Driven by curiosity and courage, he decides to explore.",
    "On his journey, he unravels planetary secrets and mysteries.",
    "Learning about gravity, he understands the phenomena of the universe.",
    "Help Bob explore and get to know this intriguing Solar System.",
];

/// Question and answer pairs of the end credits.
pub const END_CREDITS: [(&str, &str); 4] = [
    (
        "What is gravity?",
        "Gravity is the pull that every object with mass exerts on every other. \
         In space it keeps the planets circling the Sun and the moons circling their planets.",
    ),
    (
        "How does gravity affect planets?",
        "Gravity pulls a planet into a compact sphere. It shapes its atmosphere, \
         climate and tides, and it is what gathers dust and gas into stars and planetary systems.",
    ),
    (
        "Does gravity vary between planets?",
        "Yes. A planet's pull depends on its mass and radius: massive, dense planets pull \
         harder than small, light ones. On Jupiter you would weigh far more than on Earth.",
    ),
    (
        "The effect of gravity on Bob:",
        "Each planet tugs on Bob with a different strength, bending his speed and direction. \
         He learns to ride that pull instead of fighting it to explore efficiently.",
    ),
];

pub const END_CLOSING: &str = "After exploring this incredible Solar System, Bob heads towards \
     others, continuing his mission to explore the vast and immense universe.";

const INTRO_FADE_SECS: f32 = 0.8;
const CREDIT_FADE_SECS: f32 = 0.5;

// ── Components ────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct StartButton;

#[derive(Component)]
pub struct FreePlayButton;

#[derive(Component)]
pub struct IntroNextButton;

#[derive(Component)]
pub struct IntroBackButton;

#[derive(Component)]
pub struct IntroLine;

#[derive(Component)]
pub struct EndNextButton;

/// One credit paragraph; hidden until its cue fires.
#[derive(Component, Debug, Clone, Copy)]
pub struct Credit {
    pub index: usize,
}

// ── Intro script ──────────────────────────────────────────────────────────────

/// Position in the intro narration.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntroScript {
    pub index: usize,
}

/// What the intro should do after a Next or Back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    Show(usize),
    Finished,
}

impl IntroScript {
    pub fn advance(&mut self) -> IntroStep {
        self.index += 1;
        if self.index >= INTRO_LINES.len() {
            IntroStep::Finished
        } else {
            IntroStep::Show(self.index)
        }
    }

    /// Step back one line; stays on the first line.
    pub fn back(&mut self) -> IntroStep {
        self.index = self.index.saturating_sub(1);
        IntroStep::Show(self.index)
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ScreensPlugin;

impl Plugin for ScreensPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameScene::Start), setup_start_screen)
            .add_systems(OnEnter(GameScene::Intro), setup_intro)
            .add_systems(OnEnter(GameScene::End), setup_end_credits)
            .add_systems(
                Update,
                start_buttons_system.run_if(in_state(GameScene::Start)),
            )
            .add_systems(
                Update,
                intro_buttons_system.run_if(in_state(GameScene::Intro)),
            )
            .add_systems(
                Update,
                (reveal_credit_system, end_next_button_system, blink_system)
                    .run_if(in_state(GameScene::End)),
            )
            .add_systems(Update, fade_in_system);
    }
}

// ── Start ─────────────────────────────────────────────────────────────────────

/// Layout:
/// ```text
/// ┌──────────────────────────┐
/// │       Bob the Ball       │
/// │                          │
/// │        [ START ]         │
/// │      [ FREE PLAY ]       │
/// │                          │
/// │  lock portrait rotation  │
/// └──────────────────────────┘
/// ```
pub fn setup_start_screen(
    mut commands: Commands,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    reset_camera(&mut q_camera, 1.0);
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            SceneEntity,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(GAME_TITLE),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
            spacer(root, 60.0);
            menu_button(root, "START", ButtonStyle::Forward, StartButton);
            spacer(root, 14.0);
            menu_button(root, "FREE PLAY", ButtonStyle::Back, FreePlayButton);
            spacer(root, 80.0);
            root.spawn((
                Text::new(PORTRAIT_HINT),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(hint_color()),
                TextLayout::new_with_justify(Justify::Center),
                Node {
                    max_width: Val::Px(320.0),
                    ..default()
                },
            ));
        });
}

fn menu_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    style: ButtonStyle,
    marker: impl Component,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(style.bg()),
            BorderColor::all(style.border()),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(style.text()),
            ));
        });
}

pub fn start_buttons_system(
    start: Query<(&Interaction, &Children), (Changed<Interaction>, With<StartButton>)>,
    freeplay: Query<(&Interaction, &Children), (Changed<Interaction>, With<FreePlayButton>)>,
    mut texts: Query<&mut TextColor>,
    mut requests: MessageWriter<SceneRequest>,
) {
    for (interaction, children) in start.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::Intro));
        }
        hover_text_color(interaction, children, next_text(), &mut texts);
    }
    for (interaction, children) in freeplay.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::FreePlay));
        }
        hover_text_color(interaction, children, back_text(), &mut texts);
    }
}

// ── Intro ─────────────────────────────────────────────────────────────────────

pub fn setup_intro(mut commands: Commands) {
    commands.insert_resource(IntroScript::default());
    spawn_text_block(
        &mut commands,
        Val::Percent(42.0),
        INTRO_LINES[0],
        26.0,
        body_color(),
        (IntroLine, FadeIn::new(INTRO_FADE_SECS, body_color())),
    );
    spawn_corner_button(
        &mut commands,
        Corner::BottomLeft,
        "Back",
        ButtonStyle::Back,
        IntroBackButton,
    );
    spawn_corner_button(
        &mut commands,
        Corner::BottomRight,
        "Next",
        ButtonStyle::Forward,
        IntroNextButton,
    );
}

pub fn intro_buttons_system(
    mut commands: Commands,
    next: Query<(&Interaction, &Children), (Changed<Interaction>, With<IntroNextButton>)>,
    back: Query<(&Interaction, &Children), (Changed<Interaction>, With<IntroBackButton>)>,
    mut texts: Query<&mut TextColor>,
    mut lines: Query<(Entity, &mut Text), With<IntroLine>>,
    mut script: ResMut<IntroScript>,
    mut requests: MessageWriter<SceneRequest>,
) {
    let mut step = None;
    for (interaction, children) in next.iter() {
        if *interaction == Interaction::Pressed {
            step = Some(script.advance());
        }
        hover_text_color(interaction, children, next_text(), &mut texts);
    }
    for (interaction, children) in back.iter() {
        if *interaction == Interaction::Pressed {
            step = Some(script.back());
        }
        hover_text_color(interaction, children, back_text(), &mut texts);
    }

    match step {
        Some(IntroStep::Show(index)) => {
            for (entity, mut text) in lines.iter_mut() {
                text.0 = INTRO_LINES[index].to_string();
                commands
                    .entity(entity)
                    .insert(FadeIn::new(INTRO_FADE_SECS, body_color()));
            }
        }
        Some(IntroStep::Finished) => {
            requests.write(SceneRequest(GameScene::Tutorial));
        }
        None => {}
    }
}

// ── End credits ───────────────────────────────────────────────────────────────

/// Q&A column with every paragraph hidden, Bob in a box, and the Next button.
pub fn setup_end_credits(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    reset_camera(&mut q_camera, 1.0);
    spawn_walled_box(&mut commands, BOX_HALF_WIDTH, BOX_HALF_HEIGHT);
    spawn_player(
        &mut commands,
        Vec2::new(-BOX_HALF_WIDTH + 40.0, -BOX_HALF_HEIGHT + 120.0),
        config.player_box_radius,
        &config,
    );

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(40.0),
                width: Val::Percent(100.0),
                padding: UiRect::horizontal(Val::Px(28.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
            SceneEntity,
        ))
        .with_children(|column| {
            for (i, (title, answer)) in END_CREDITS.iter().enumerate() {
                credit_text(column, title, 17.0, accent_color(), i);
                credit_text(column, answer, 13.0, body_color(), i);
                spacer(column, 12.0);
            }
            credit_text(column, END_CLOSING, 17.0, title_color(), END_CREDITS.len());
        });

    for i in 0..=END_CREDITS.len() {
        schedule_cue(
            &mut commands,
            config.end_text_stagger_secs * i as f32,
            Cue::RevealCredit(i),
        );
    }

    spawn_corner_button(
        &mut commands,
        Corner::BottomRight,
        "Next",
        ButtonStyle::Forward,
        EndNextButton,
    );
}

fn credit_text(
    parent: &mut ChildSpawnerCommands<'_>,
    text: &str,
    font_size: f32,
    color: Color,
    index: usize,
) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color.with_alpha(0.0)),
        TextLayout::new_with_justify(Justify::Center),
        Credit { index },
    ));
}

/// Fade in every paragraph whose reveal cue fired.
pub fn reveal_credit_system(
    mut commands: Commands,
    mut fired: MessageReader<CueFired>,
    credits: Query<(Entity, &Credit, &TextColor)>,
) {
    for CueFired(cue) in fired.read() {
        let Cue::RevealCredit(index) = *cue else {
            continue;
        };
        for (entity, credit, color) in credits.iter() {
            if credit.index == index {
                commands
                    .entity(entity)
                    .insert(FadeIn::new(CREDIT_FADE_SECS, color.0.with_alpha(1.0)));
            }
        }
    }
}

pub fn end_next_button_system(
    next: Query<(&Interaction, &Children), (Changed<Interaction>, With<EndNextButton>)>,
    mut texts: Query<&mut TextColor>,
    mut requests: MessageWriter<SceneRequest>,
) {
    for (interaction, children) in next.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::Start));
        }
        hover_text_color(interaction, children, next_text(), &mut texts);
    }
}
