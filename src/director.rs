// The frame loop. `Director::tick` is the whole game step and knows nothing
// about Bevy; `DirectorPlugin` feeds it input and publishes its cues.
use std::time::Duration;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested};

use crate::config::GameConfig;
use crate::context::{Cue, Steering, VoiceTicket};
use crate::input::{InputEvent, InputRouter};
use crate::sequencer::RoundSequencer;
use crate::timeline::Timeline;

/// Everything that happened outside the game since the last tick.
#[derive(Debug, Default)]
pub struct Frame {
    pub dt: Duration,
    pub events: Vec<InputEvent>,
    pub steering: Steering,
    pub finished: Vec<VoiceTicket>,
}

#[derive(Debug, Default)]
pub struct Tick {
    pub cues: Vec<Cue>,
    pub quit: bool,
}

#[derive(Resource, Debug, Default)]
pub struct Director {
    pub clock: Timeline,
    pub sequencer: RoundSequencer,
    pub router: InputRouter,
}

impl Director {
    pub fn tick(&mut self, frame: Frame, config: &GameConfig) -> Tick {
        let sequencer = &mut self.sequencer;
        sequencer.spawn_round_entities();

        for ticket in frame.finished {
            sequencer.ctx.voice_finished(ticket);
        }
        sequencer.ctx.steering = frame.steering;

        let mut quit = false;
        for event in frame.events {
            quit |= self.router.route(event, sequencer, self.clock.elapsed, config);
        }

        self.clock.advance(frame.dt);
        let now = self.clock.elapsed;
        sequencer.fire_due(now);
        sequencer.update_actors(now, config);

        sequencer.advance();
        sequencer.trigger_game_over();
        sequencer.trigger_game_end();
        sequencer.restart();

        Tick {
            cues: sequencer.ctx.drain_cues(),
            quit,
        }
    }
}

pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Director>()
            .init_resource::<PendingInput>()
            .init_resource::<FinishedVoices>()
            .add_message::<CueMessage>()
            .add_systems(Update, (gather_pointer, gather_quit))
            .add_systems(FixedUpdate, run_director);
    }
}

/// A cue published for the presentation plugins.
#[derive(Message, Debug, Clone)]
pub struct CueMessage(pub Cue);

/// Input collected on render frames, consumed by the next fixed tick.
#[derive(Resource, Default)]
pub struct PendingInput {
    events: Vec<InputEvent>,
}

/// Voice playbacks that ended since the last fixed tick.
#[derive(Resource, Default)]
pub struct FinishedVoices {
    pub tickets: Vec<VoiceTicket>,
}

fn gather_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    mut last: Local<Option<Vec2>>,
    mut pending: ResMut<PendingInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        *last = None;
        return;
    };
    let point = cursor * config.logical_size() / Vec2::new(window.width(), window.height());

    if let Some(previous) = *last
        && previous != point
    {
        pending.events.push(InputEvent::PointerMove(point - previous));
    }
    *last = Some(point);

    if mouse.just_pressed(MouseButton::Left) {
        pending.events.push(InputEvent::PointerDown(point));
    }
    if mouse.just_released(MouseButton::Left) {
        pending.events.push(InputEvent::PointerUp(point));
    }
}

fn gather_quit(mut requests: MessageReader<WindowCloseRequested>, mut pending: ResMut<PendingInput>) {
    if requests.read().count() > 0 {
        pending.events.push(InputEvent::Quit);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_director(
    mut director: ResMut<Director>,
    config: Res<GameConfig>,
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pending: ResMut<PendingInput>,
    mut finished: ResMut<FinishedVoices>,
    mut cues: MessageWriter<CueMessage>,
    mut exit: MessageWriter<AppExit>,
) {
    let frame = Frame {
        dt: time.delta(),
        events: std::mem::take(&mut pending.events),
        steering: Steering {
            left: keyboard.pressed(KeyCode::ArrowLeft),
            right: keyboard.pressed(KeyCode::ArrowRight),
        },
        finished: std::mem::take(&mut finished.tickets),
    };
    let tick = director.tick(frame, &config);
    cues.write_batch(tick.cues.into_iter().map(CueMessage));
    if tick.quit {
        info!("quit requested");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::Role;
    use crate::rounds::{Backdrop, Round, Scene};

    const STEP: Duration = Duration::from_micros(16_667);

    fn step(events: Vec<InputEvent>) -> Frame {
        Frame {
            dt: STEP,
            events,
            ..Default::default()
        }
    }

    #[test]
    fn clicking_start_leaves_the_title() {
        let config = GameConfig::default();
        let mut director = Director::default();

        let first = director.tick(step(Vec::new()), &config);
        assert!(first.cues.contains(&Cue::Backdrop(Backdrop::Title)));
        let start = director
            .sequencer
            .stage
            .find(Role::StartButton)
            .map(|prop| prop.bounds.center())
            .unwrap();

        let tick = director.tick(step(vec![InputEvent::PointerDown(start)]), &config);
        assert_eq!(director.sequencer.scene(), Scene::Round(Round::Intro));
        assert!(tick.cues.contains(&Cue::Backdrop(Backdrop::Intro)));
        assert!(!director.sequencer.stage.contains_role(Role::GameLabel));
    }

    #[test]
    fn voice_completion_is_delivered_before_actors_run() {
        let config = GameConfig::default();
        let mut director = Director::default();
        director.sequencer.ctx.next_round = true;
        director.tick(step(Vec::new()), &config);
        assert_eq!(director.sequencer.scene(), Scene::Round(Round::Intro));

        // Spawns the fairy, which starts narrating.
        let tick = director.tick(step(Vec::new()), &config);
        let ticket = tick
            .cues
            .iter()
            .find_map(|cue| match cue {
                Cue::Voice { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .unwrap();
        assert_eq!(director.sequencer.ctx.round_event(), 1);

        let frame = Frame {
            dt: STEP,
            finished: vec![ticket],
            ..Default::default()
        };
        director.tick(frame, &config);
        assert_eq!(director.sequencer.scene(), Scene::Round(Round::Supplies));
    }

    #[test]
    fn quit_is_passed_through() {
        let config = GameConfig::default();
        let mut director = Director::default();
        let tick = director.tick(step(vec![InputEvent::Quit]), &config);
        assert!(tick.quit);
    }

    #[test]
    fn the_clock_advances_every_tick() {
        let config = GameConfig::default();
        let mut director = Director::default();
        for _ in 0..3 {
            director.tick(step(Vec::new()), &config);
        }
        assert_eq!(director.clock.tick, 3);
        assert_eq!(director.clock.elapsed, STEP * 3);
    }
}
