//! Scene router: `GameScene` definition and `ScenePlugin`.
//!
//! ## States
//!
//! | State      | Description                                         |
//! |------------|-----------------------------------------------------|
//! | `Start`    | Title card with Start and Free play (initial state) |
//! | `Intro`    | Narration lines, Next and Back buttons              |
//! | `Tutorial` | Bob in a walled box, learn tap and drag             |
//! | `Game`     | Solar-system exploration                            |
//! | `End`      | Gravity Q&A credits, Bob in a walled box            |
//! | `FreePlay` | Procedurally generated planets, no fields           |
//!
//! Gameplay code never sets `NextState` directly; it writes a
//! [`SceneRequest`] and [`scene_router_system`] applies the latest one.  Every
//! entity a scene spawns carries [`SceneEntity`] and is despawned when any
//! scene exits.

use crate::config::{GameConfig, ImpulseProfile};
use bevy::prelude::*;

/// Top-level application state machine.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameScene {
    #[default]
    Start,
    Intro,
    Tutorial,
    Game,
    End,
    FreePlay,
}

impl GameScene {
    pub const ALL: [GameScene; 6] = [
        GameScene::Start,
        GameScene::Intro,
        GameScene::Tutorial,
        GameScene::Game,
        GameScene::End,
        GameScene::FreePlay,
    ];

    /// Tap/drag intensities Bob responds to in this scene, if he is controllable.
    pub fn impulse_profile(self, config: &GameConfig) -> Option<ImpulseProfile> {
        match self {
            GameScene::Tutorial => Some(config.tutorial_impulse),
            GameScene::Game => Some(config.game_impulse),
            GameScene::End => Some(config.end_impulse),
            GameScene::FreePlay => Some(config.freeplay_impulse),
            GameScene::Start | GameScene::Intro => None,
        }
    }
}

/// Request to switch scenes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequest(pub GameScene);

/// Tags everything spawned by a scene so it can be torn down on exit.
#[derive(Component, Default)]
pub struct SceneEntity;

/// Impulse profile of the running scene; absent while Bob is not controllable.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ActiveImpulse(pub ImpulseProfile);

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameScene`, the request message and the generic enter/exit hooks.
///
/// Must be added before any plugin that uses `in_state(GameScene::…)`.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameScene>()
            .add_message::<SceneRequest>()
            .add_systems(Update, scene_router_system);

        for scene in GameScene::ALL {
            app.add_systems(OnEnter(scene), activate_impulse_profile)
                .add_systems(OnExit(scene), despawn_scene_entities);
        }
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Apply the most recent [`SceneRequest`] of this frame.
pub fn scene_router_system(
    mut requests: MessageReader<SceneRequest>,
    current: Res<State<GameScene>>,
    mut next: ResMut<NextState<GameScene>>,
) {
    let Some(SceneRequest(target)) = requests.read().last().copied() else {
        return;
    };
    if target != *current.get() {
        info!("[scene] {:?} → {:?}", current.get(), target);
        next.set(target);
    }
}

/// Install (or clear) the [`ActiveImpulse`] for the scene just entered.
pub fn activate_impulse_profile(
    mut commands: Commands,
    scene: Res<State<GameScene>>,
    config: Res<GameConfig>,
) {
    match scene.get().impulse_profile(&config) {
        Some(profile) => commands.insert_resource(ActiveImpulse(profile)),
        None => commands.remove_resource::<ActiveImpulse>(),
    }
}

/// Despawn every entity tagged [`SceneEntity`].
pub fn despawn_scene_entities(mut commands: Commands, query: Query<Entity, With<SceneEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
