//! Tutorial scene: Bob in a walled box while the player learns tap and drag.
//!
//! The instruction switches from the tap hint to the swipe hint on the first
//! tap; the Next control appears after `tutorial_next_delay_secs`.

use crate::camera::{reset_camera, MainCamera};
use crate::config::GameConfig;
use crate::constants::{BOX_HALF_HEIGHT, BOX_HALF_WIDTH};
use crate::cues::{schedule_cue, Cue, CueFired};
use crate::player::{spawn_player, PointerIntent, PointerSet};
use crate::scene::{GameScene, SceneRequest};
use crate::ui::*;
use crate::walls::spawn_walled_box;
use bevy::prelude::*;

pub const TAP_HINT: &str = "Tap on the screen to give Bob a boost.";
pub const SWIPE_HINT: &str = "Swipe on the screen to move Bob around.";

#[derive(Component)]
pub struct TutorialInstruction;

#[derive(Component)]
pub struct TutorialNextButton;

pub struct TutorialPlugin;

impl Plugin for TutorialPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameScene::Tutorial), setup_tutorial)
            .add_systems(
                Update,
                (
                    instruction_system.after(PointerSet),
                    reveal_tutorial_next_system,
                    tutorial_next_button_system,
                )
                    .run_if(in_state(GameScene::Tutorial)),
            );
    }
}

pub fn setup_tutorial(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    reset_camera(&mut q_camera, 1.0);
    spawn_walled_box(&mut commands, BOX_HALF_WIDTH, BOX_HALF_HEIGHT);
    spawn_player(
        &mut commands,
        Vec2::new(-BOX_HALF_WIDTH + 40.0, -BOX_HALF_HEIGHT + 40.0),
        config.player_box_radius,
        &config,
    );
    spawn_text_block(
        &mut commands,
        Val::Px(140.0),
        TAP_HINT,
        20.0,
        body_color(),
        TutorialInstruction,
    );
    schedule_cue(
        &mut commands,
        config.tutorial_next_delay_secs,
        Cue::RevealTutorialNext,
    );
}

/// Swap to the swipe hint on the first tap.
pub fn instruction_system(
    intent: Res<PointerIntent>,
    mut q_text: Query<&mut Text, With<TutorialInstruction>>,
) {
    if intent.tap.is_none() {
        return;
    }
    for mut text in q_text.iter_mut() {
        if text.0 != SWIPE_HINT {
            text.0 = SWIPE_HINT.to_string();
        }
    }
}

pub fn reveal_tutorial_next_system(
    mut commands: Commands,
    mut fired: MessageReader<CueFired>,
    existing: Query<(), With<TutorialNextButton>>,
) {
    let reveal = fired
        .read()
        .any(|CueFired(cue)| *cue == Cue::RevealTutorialNext);
    if reveal && existing.is_empty() {
        spawn_corner_button(
            &mut commands,
            Corner::BottomRight,
            "Next",
            ButtonStyle::Forward,
            TutorialNextButton,
        );
    }
}

pub fn tutorial_next_button_system(
    next: Query<(&Interaction, &Children), (Changed<Interaction>, With<TutorialNextButton>)>,
    mut texts: Query<&mut TextColor>,
    mut requests: MessageWriter<SceneRequest>,
) {
    for (interaction, children) in next.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::Game));
        }
        hover_text_color(interaction, children, next_text(), &mut texts);
    }
}
