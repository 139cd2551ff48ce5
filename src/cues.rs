//! Delayed presentation cues.
//!
//! A cue is a one-shot timer entity.  When it expires a [`CueFired`] message
//! is written and the entity despawns itself; despawning it earlier (for
//! example when its scene exits, since cue entities carry
//! [`SceneEntity`]) cancels it.  Cues never touch physics or discovery state.

use crate::scene::SceneEntity;
use bevy::prelude::*;

/// What a cue does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Show the solar-system exit control after the journey completes.
    RevealExit,
    /// Show the tutorial's Next control.
    RevealTutorialNext,
    /// Remove a planet info panel.
    DismissPanel(Entity),
    /// Fade in the n-th end-credit paragraph.
    RevealCredit(usize),
}

/// Pending one-shot timer.
#[derive(Component, Debug)]
pub struct ScheduledCue {
    pub timer: Timer,
    pub cue: Cue,
}

/// A cue's timer expired.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueFired(pub Cue);

/// Schedule `cue` to fire after `secs` seconds.  Returns the cancellable entity.
pub fn schedule_cue(commands: &mut Commands, secs: f32, cue: Cue) -> Entity {
    commands
        .spawn((
            ScheduledCue {
                timer: Timer::from_seconds(secs, TimerMode::Once),
                cue,
            },
            SceneEntity,
        ))
        .id()
}

/// Tick every pending cue and fire the expired ones.
pub fn cue_timer_system(
    mut commands: Commands,
    time: Res<Time>,
    mut cues: Query<(Entity, &mut ScheduledCue)>,
    mut fired: MessageWriter<CueFired>,
) {
    for (entity, mut scheduled) in cues.iter_mut() {
        scheduled.timer.tick(time.delta());
        if scheduled.timer.is_finished() {
            fired.write(CueFired(scheduled.cue));
            commands.entity(entity).despawn();
        }
    }
}

pub struct CuePlugin;

impl Plugin for CuePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CueFired>()
            .add_systems(Update, cue_timer_system);
    }
}
