// Walks the campaign: owns the stage, the round context and the scheduled
// callbacks, and moves between rounds when the actors ask for it.
use std::time::Duration;

use bevy::log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::actor::Performer;
use crate::config::GameConfig;
use crate::context::RoundContext;
use crate::error::GameError;
use crate::rounds::{Round, Scene};
use crate::script::Playbook;
use crate::stage::{PropId, Stage};
use crate::timeline::Scheduler;

#[derive(Debug)]
pub struct RoundSequencer {
    campaign: Vec<Round>,
    index: usize,
    scene: Scene,
    playbook: Playbook,
    spawned: bool,
    pub ctx: RoundContext,
    pub stage: Stage,
    pub scheduler: Scheduler,
}

impl Default for RoundSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundSequencer {
    pub fn new() -> Self {
        let campaign: Vec<Round> = Round::iter().collect();
        let scene = Scene::Round(campaign[0]);
        let playbook = scene.playbook();
        let mut ctx = RoundContext::default();
        ctx.cue_backdrop(playbook.backdrop);
        Self {
            campaign,
            index: 0,
            scene,
            playbook,
            spawned: false,
            ctx,
            stage: Stage::default(),
            scheduler: Scheduler::default(),
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn round_index(&self) -> usize {
        self.index
    }

    fn enter(&mut self, scene: Scene) {
        self.scene = scene;
        self.playbook = scene.playbook();
        self.spawned = false;
        self.ctx.cue_backdrop(self.playbook.backdrop);
        info!("entering {scene}");
    }

    /// Move to the next round once an actor has asked for it.
    pub fn advance(&mut self) {
        if !self.ctx.next_round {
            return;
        }
        self.ctx.next_round = false;
        let Scene::Round(_) = self.scene else {
            return;
        };
        let Some(&next) = self.campaign.get(self.index + 1) else {
            warn!("{}", GameError::CampaignExhausted(self.campaign[self.index].into()));
            return;
        };

        self.index += 1;
        self.scheduler.cancel_all();
        self.stage.retain(|prop| !prop.is_scoped());
        self.ctx.reset_round();
        self.enter(Scene::Round(next));

        for prop in self.stage.iter_mut() {
            prop.speaking = false;
        }
        for (role, (anchor, at)) in &self.playbook.entries {
            if let Some(prop) = self.stage.find_mut(*role) {
                prop.bounds.move_anchor(*anchor, *at);
            }
        }
    }

    /// Spawn the wave for the current beat. Once a wave has spawned nothing
    /// more appears until an actor asks for a respawn; the request stays open
    /// through beats that have no wave. Returns how many props were created.
    pub fn spawn_round_entities(&mut self) -> usize {
        if self.ctx.respawn {
            self.ctx.respawn = false;
            self.spawned = false;
        }
        if self.spawned {
            return 0;
        }
        let Some(wave) = self.playbook.wave_at(self.ctx.round_event()) else {
            return 0;
        };
        if wave.after_voice && !self.ctx.voice_idle() {
            return 0;
        }

        let mut count = 0;
        for &role in &wave.roles {
            if role.carries_over() && self.stage.contains_role(role) {
                continue;
            }
            let id = self.stage.spawn(role, self.scene);
            if let (Some((anchor, at)), Some(prop)) =
                (self.playbook.entries.get(&role), self.stage.get_mut(id))
            {
                prop.bounds.move_anchor(*anchor, *at);
            }
            count += 1;
        }
        self.spawned = true;
        count
    }

    pub fn trigger_game_over(&mut self) {
        if !self.ctx.game_over {
            return;
        }
        self.ctx.game_over = false;
        self.clear_stage();
        self.ctx.reset_round();
        self.enter(Scene::GameOver);
    }

    pub fn trigger_game_end(&mut self) {
        if !self.ctx.end_game {
            return;
        }
        self.ctx.end_game = false;
        self.clear_stage();
        self.ctx.reset_round();
        self.enter(Scene::Ending);
    }

    /// Play again from the title screen.
    pub fn restart(&mut self) {
        if !self.ctx.restart {
            return;
        }
        self.ctx.restart();
        self.ctx.stop_voices();
        self.clear_stage();
        self.index = 0;
        self.enter(Scene::Round(self.campaign[0]));
    }

    fn clear_stage(&mut self) {
        self.scheduler.cancel_all();
        self.stage.kill_all();
    }

    pub fn fire_due(&mut self, now: Duration) {
        for callback in self.scheduler.due(now) {
            callback(&mut self.stage);
        }
    }

    /// Run every live actor's script once, in draw order.
    pub fn update_actors(&mut self, now: Duration, config: &GameConfig) {
        let before = self.ctx.round_event();
        for id in self.stage.ids_in_draw_order() {
            let Some(role) = self.stage.get(id).map(|prop| prop.role) else {
                continue;
            };
            let Some(script) = self.playbook.scripts.get(&role) else {
                continue;
            };
            Performer {
                stage: &mut self.stage,
                ctx: &mut self.ctx,
                scheduler: &mut self.scheduler,
                config,
                now,
                scene: self.scene,
            }
            .run(id, script);
        }

        let after = self.ctx.round_event();
        if after != before && !self.handles_beat(after) {
            warn!("{}: nothing on stage reacts to round event {after}", self.scene);
        }
    }

    fn handles_beat(&self, beat: u32) -> bool {
        self.playbook.waves.iter().any(|wave| wave.beat == beat)
            || self.stage.iter().any(|prop| {
                self.playbook
                    .scripts
                    .get(&prop.role)
                    .is_some_and(|script| script.listens_on(beat))
            })
    }

    /// Run the click handler of a button.
    pub fn click(&mut self, id: PropId, now: Duration, config: &GameConfig) {
        let role = match self.stage.require(id) {
            Ok(prop) => prop.role,
            Err(err) => {
                debug!("ignoring click: {err}");
                return;
            }
        };
        let Some(effects) = self.playbook.clicks.get(&role) else {
            return;
        };
        Performer {
            stage: &mut self.stage,
            ctx: &mut self.ctx,
            scheduler: &mut self.scheduler,
            config,
            now,
            scene: self.scene,
        }
        .apply_all(id, effects);
    }

    #[cfg(test)]
    pub fn at(round: Round) -> Self {
        let mut sequencer = Self::new();
        sequencer.index = sequencer
            .campaign
            .iter()
            .position(|candidate| *candidate == round)
            .unwrap();
        sequencer.ctx.drain_cues();
        sequencer.enter(Scene::Round(round));
        sequencer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use bevy::math::Vec2;

    use super::*;
    use crate::cast::{Role, VoiceLine};
    use crate::context::Cue;
    use crate::geometry::Anchor;
    use crate::rounds::Backdrop;

    fn place(sequencer: &mut RoundSequencer, id: PropId, at: Vec2) {
        if let Some(prop) = sequencer.stage.get_mut(id) {
            prop.bounds.move_anchor(Anchor::Center, at);
        }
    }

    #[test]
    fn spawning_is_idempotent() {
        let mut sequencer = RoundSequencer::at(Round::Supplies);
        assert_eq!(sequencer.spawn_round_entities(), 4);
        assert_eq!(sequencer.spawn_round_entities(), 0);
        assert_eq!(sequencer.stage.len(), 4);
    }

    #[test]
    fn a_respawn_request_waits_for_the_next_wave() {
        let mut sequencer = RoundSequencer::at(Round::Supplies);
        sequencer.spawn_round_entities();
        sequencer.ctx.respawn = true;
        sequencer.ctx.set_beat(1).unwrap();
        assert_eq!(sequencer.spawn_round_entities(), 0);

        sequencer.ctx.set_beat(3).unwrap();
        assert_eq!(sequencer.spawn_round_entities(), 3);
        assert!(sequencer.stage.contains_role(Role::Saw));
        assert_eq!(sequencer.spawn_round_entities(), 0);
    }

    #[test]
    fn waves_after_voice_wait_for_silence() {
        let mut sequencer = RoundSequencer::at(Round::RabbitHill);
        sequencer.spawn_round_entities();
        sequencer.ctx.advance_beat(1);
        sequencer.ctx.respawn = true;
        let ticket = sequencer.ctx.play(VoiceLine::RabbitHungry);

        assert_eq!(sequencer.spawn_round_entities(), 0);
        assert!(!sequencer.stage.contains_role(Role::Player));

        sequencer.ctx.voice_finished(ticket);
        assert_eq!(sequencer.spawn_round_entities(), 1);
        let player = sequencer.stage.find(Role::Player).unwrap();
        assert_eq!(player.bounds.anchor_point(Anchor::MidBottom), Vec2::new(5.0, 400.0));
    }

    #[test]
    fn hazard_kills_the_actor_and_ends_the_game() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::RhinoPlain);
        let scene = sequencer.scene();
        sequencer.ctx.set_beat(2).unwrap();
        let rhino = sequencer.stage.spawn(Role::Rhino, scene);
        let saw = sequencer.stage.spawn(Role::Saw, scene);
        let horn = sequencer.stage.spawn(Role::Horn, scene);
        let target = sequencer.stage.get(rhino).unwrap().bounds.center();
        place(&mut sequencer, saw, target);
        place(&mut sequencer, horn, target);

        sequencer.update_actors(Duration::ZERO, &config);
        let rhino_prop = sequencer.stage.get(rhino).unwrap();
        assert!(rhino_prop.dying);
        assert!(!sequencer.stage.is_alive(saw));
        // The horn cannot save a dying rhino.
        assert!(sequencer.stage.is_alive(horn));
        assert_eq!(sequencer.ctx.round_event(), 2);

        let ticket = sequencer
            .ctx
            .drain_cues()
            .into_iter()
            .find_map(|cue| match cue {
                Cue::Voice { line: VoiceLine::RhinoDie, ticket } => Some(ticket),
                _ => None,
            })
            .unwrap();

        sequencer.update_actors(Duration::ZERO, &config);
        assert!(!sequencer.ctx.game_over);

        assert!(sequencer.ctx.voice_finished(ticket));
        sequencer.update_actors(Duration::ZERO, &config);
        assert!(sequencer.ctx.game_over);

        sequencer.trigger_game_over();
        assert_eq!(sequencer.scene(), Scene::GameOver);
        assert!(sequencer.stage.is_empty());
        assert!(!sequencer.ctx.game_over);
        assert!(sequencer.ctx.drain_cues().contains(&Cue::Backdrop(Backdrop::GameOver)));

        assert_eq!(sequencer.spawn_round_entities(), 1);
        assert!(sequencer.stage.contains_role(Role::PlayAgainButton));
    }

    #[test]
    fn meeting_the_goal_and_walking_out_advances() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::Supplies);
        sequencer.spawn_round_entities();
        sequencer.ctx.set_beat(3).unwrap();
        sequencer.ctx.add_win(3);
        if let Some(player) = sequencer.stage.find_mut(Role::Player) {
            player.bounds.set_left(720.0);
        }

        sequencer.update_actors(Duration::ZERO, &config);
        assert!(sequencer.ctx.next_round);

        sequencer.advance();
        assert_eq!(sequencer.scene(), Scene::Round(Round::Bridge));
        assert_eq!(sequencer.ctx.round_event(), 0);
        assert_eq!(sequencer.ctx.win_round(), 0);
        assert!(!sequencer.ctx.next_round);
        assert!(!sequencer.stage.contains_role(Role::Mouse));
        let player = sequencer.stage.find(Role::Player).unwrap();
        assert_eq!(player.bounds.anchor_point(Anchor::MidBottom), Vec2::new(5.0, 545.0));
        assert!(sequencer.stage.contains_role(Role::ItemsBar));
    }

    #[test]
    fn short_of_the_goal_the_player_stays() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::Supplies);
        sequencer.spawn_round_entities();
        sequencer.ctx.set_beat(3).unwrap();
        sequencer.ctx.add_win(2);
        if let Some(player) = sequencer.stage.find_mut(Role::Player) {
            player.bounds.set_left(720.0);
        }
        sequencer.update_actors(Duration::ZERO, &config);
        assert!(!sequencer.ctx.next_round);
    }

    #[test]
    fn callbacks_never_fire_into_the_next_round() {
        let mut sequencer = RoundSequencer::at(Round::Intro);
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        sequencer.scheduler.schedule(
            Duration::ZERO,
            Duration::from_secs(9),
            Box::new(move |_: &mut Stage| flag.store(true, Ordering::SeqCst)),
        );

        sequencer.ctx.next_round = true;
        sequencer.advance();
        sequencer.fire_due(Duration::from_secs(30));
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn the_earth_heals_while_the_fairy_talks() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::Intro);
        sequencer.spawn_round_entities();
        sequencer.update_actors(Duration::ZERO, &config);
        assert_eq!(sequencer.ctx.round_event(), 1);
        sequencer.update_actors(Duration::from_millis(16), &config);
        sequencer.update_actors(Duration::from_millis(33), &config);
        assert_eq!(sequencer.scheduler.len(), 1);

        sequencer.fire_due(Duration::from_secs(10));
        let earth = sequencer.stage.find(Role::Earth).unwrap();
        assert_eq!(earth.visual.look, crate::cast::Look::EarthHealed);
        assert_eq!(earth.bounds.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn advancing_past_the_last_round_is_refused() {
        let mut sequencer = RoundSequencer::at(Round::Town);
        sequencer.ctx.next_round = true;
        sequencer.advance();
        assert_eq!(sequencer.scene(), Scene::Round(Round::Town));
        assert!(!sequencer.ctx.next_round);
    }

    #[test]
    fn the_ending_clears_the_stage() {
        let mut sequencer = RoundSequencer::at(Round::Town);
        sequencer.spawn_round_entities();
        sequencer.ctx.end_game = true;
        sequencer.trigger_game_end();
        assert_eq!(sequencer.scene(), Scene::Ending);
        assert!(sequencer.stage.is_empty());
        assert!(!sequencer.ctx.end_game);
    }

    #[test]
    fn play_again_returns_to_the_title() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::LionDen);
        sequencer.ctx.game_over = true;
        sequencer.trigger_game_over();
        sequencer.spawn_round_entities();
        let button = sequencer.stage.find(Role::PlayAgainButton).unwrap().id;

        sequencer.click(button, Duration::ZERO, &config);
        sequencer.restart();
        assert_eq!(sequencer.scene(), Scene::Round(Round::Title));
        assert_eq!(sequencer.round_index(), 0);
        assert!(sequencer.stage.is_empty());
        assert_eq!(sequencer.spawn_round_entities(), 2);
    }

    #[test]
    fn skip_button_leaves_once_the_fairy_is_done() {
        let config = GameConfig::default();
        let mut sequencer = RoundSequencer::at(Round::RhinoPlain);
        sequencer.spawn_round_entities();
        sequencer.update_actors(Duration::ZERO, &config);
        let skip = sequencer.stage.find(Role::SkipButton).unwrap().id;

        sequencer.click(skip, Duration::ZERO, &config);
        assert!(!sequencer.stage.is_alive(skip));
        assert!(sequencer.ctx.voice_idle());

        sequencer.update_actors(Duration::ZERO, &config);
        assert!(!sequencer.stage.contains_role(Role::Fairy));
        assert!(sequencer.ctx.respawn);
        assert_eq!(sequencer.spawn_round_entities(), 1);
        assert!(sequencer.stage.contains_role(Role::Rhino));
    }
}
