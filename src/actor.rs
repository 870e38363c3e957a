// Runs scripts against the stage. One `Performer` is built per tick and
// borrows everything an actor is allowed to touch.
use std::time::Duration;

use bevy::log::warn;
use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role};
use crate::config::GameConfig;
use crate::context::RoundContext;
use crate::geometry::{overlaps, Anchor};
use crate::rounds::Scene;
use crate::script::{Effect, Guard, Rule, Script};
use crate::stage::{Prop, PropId, Stage};
use crate::timeline::Scheduler;

pub struct Performer<'a> {
    pub stage: &'a mut Stage,
    pub ctx: &'a mut RoundContext,
    pub scheduler: &'a mut Scheduler,
    pub config: &'a GameConfig,
    pub now: Duration,
    pub scene: Scene,
}

impl Performer<'_> {
    /// Evaluate every chain of `script` for `id`. Stops as soon as the
    /// actor leaves the stage.
    pub fn run(&mut self, id: PropId, script: &Script) {
        for chain in &script.chains {
            if !self.stage.is_alive(id) {
                return;
            }
            let fired = chain.iter().find(|rule| self.admits(id, rule));
            if let Some(rule) = fired {
                self.apply_all(id, &rule.effects);
            }
        }
    }

    fn admits(&self, id: PropId, rule: &Rule) -> bool {
        let Some(prop) = self.stage.get(id) else {
            return false;
        };
        rule.beat.admits(self.ctx.round_event()) && rule.guards.iter().all(|guard| self.check(prop, *guard))
    }

    fn check(&self, prop: &Prop, guard: Guard) -> bool {
        match guard {
            Guard::VoiceIdle => self.ctx.voice_idle(),
            Guard::Touches(role) => self
                .stage
                .iter()
                .any(|other| other.role == role && other.id != prop.id && overlaps(&prop.bounds, &other.bounds)),
            Guard::Unharmed(role) => self.stage.find(role).is_some_and(|other| !other.dying),
            Guard::Dying => prop.dying,
            Guard::NotDying => !prop.dying,
            Guard::Collected => prop.collected,
            Guard::Uncollected => !prop.collected,
            Guard::XAtLeast(x) => prop.x() >= x,
            Guard::XAtMost(x) => prop.x() <= x,
            Guard::WinIs(n) => self.ctx.win_round() == n,
            Guard::WinAtLeast(n) => self.ctx.win_round() >= n,
            Guard::WinAtMost(n) => self.ctx.win_round() <= n,
            Guard::LapsAtLeast(n) => prop.laps >= n,
            Guard::Unlatched => !prop.latched,
            Guard::NarratorSilent => !self.stage.iter().any(|other| other.speaking),
        }
    }

    pub fn apply_all(&mut self, id: PropId, effects: &[Effect]) {
        for effect in effects {
            self.apply(id, *effect);
        }
    }

    fn apply(&mut self, id: PropId, effect: Effect) {
        match effect {
            Effect::Voice(line) => {
                self.ctx.play(line);
            }
            Effect::Narrate(line) => {
                self.ctx.play(line);
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.speaking = true;
                }
                if !self.stage.contains_role(Role::SkipButton) {
                    self.stage.spawn(Role::SkipButton, self.scene);
                }
            }
            Effect::Hush => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.speaking = false;
                }
            }
            Effect::StopVoices => self.ctx.stop_voices(),
            Effect::AdvanceBeat(step) => self.ctx.advance_beat(step),
            Effect::SetBeat(value) => {
                if let Err(err) = self.ctx.set_beat(value) {
                    warn!("{err}");
                }
            }
            Effect::AddWin(amount) => self.ctx.add_win(amount),
            Effect::SetWin(value) => self.ctx.set_win(value),
            Effect::Stride { look, speed } => {
                let step = self.config.stride_step;
                if let Some(prop) = self.stage.get_mut(id) {
                    stride(prop, look, speed, step);
                }
            }
            Effect::Face(facing) => {
                if let Some(prop) = self.stage.get_mut(id) {
                    face(prop, facing);
                }
            }
            Effect::Patrol { min_x, max_x } => {
                if let Some(prop) = self.stage.get_mut(id) {
                    let turn = match prop.facing {
                        Facing::Left if prop.x() <= min_x => Some(Facing::Right),
                        Facing::Right if prop.x() >= max_x => Some(Facing::Left),
                        _ => None,
                    };
                    if let Some(facing) = turn {
                        face(prop, facing);
                        prop.laps += 1;
                    }
                }
            }
            Effect::Flank { distance } => {
                let Some(player_x) = self.stage.find(Role::Player).map(|player| player.x()) else {
                    return;
                };
                if let Some(prop) = self.stage.get_mut(id) {
                    // Walking left ends up on the player's right.
                    prop.bounds.set_left(player_x - distance * prop.facing.sign());
                }
            }
            Effect::FollowSteering => {
                let steering = self.ctx.steering;
                let (speed, step, exit_x) = (
                    self.config.player_speed,
                    self.config.player_stride,
                    self.config.exit_x,
                );
                // Both keys held walk right then back left, ending up facing left.
                if let Some(prop) = self.stage.get_mut(id) {
                    if steering.right && prop.x() <= exit_x {
                        face(prop, Facing::Right);
                        stride(prop, Look::PlayerRun, speed, step);
                    }
                    if steering.left && prop.x() >= 0.0 {
                        face(prop, Facing::Left);
                        stride(prop, Look::PlayerRun, speed, step);
                    }
                }
            }
            Effect::Nudge(delta) => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.bounds.translate(delta);
                }
            }
            Effect::SetBottom(y) => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.bounds.set_bottom(y);
                }
            }
            Effect::Pose { look, frame, mirrored } => {
                if let Some(prop) = self.stage.get_mut(id) {
                    refit_look(prop, look, Anchor::MidBottom);
                    prop.visual.frame = frame.min(look.frame_count() - 1);
                    prop.visual.mirrored = mirrored;
                }
            }
            Effect::Mirror => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.visual.mirrored = !prop.visual.mirrored;
                }
            }
            Effect::Refit { anchor, at } => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.bounds.move_anchor(anchor, at);
                }
            }
            Effect::Collect { slot } => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.collected = true;
                    prop.draggable = true;
                    prop.bounds.move_anchor(Anchor::Center, slot);
                }
            }
            Effect::StartDying { look, line } => {
                self.ctx.play(line);
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.dying = true;
                    if let Some(look) = look {
                        let mirrored = prop.visual.mirrored;
                        refit_look(prop, look, Anchor::MidBottom);
                        prop.visual.frame = 0;
                        prop.visual.mirrored = mirrored;
                    }
                }
            }
            Effect::Despawn => {
                self.stage.kill(id);
            }
            Effect::DespawnRole(role) => {
                if let Some(other) = self.stage.find(role).map(|prop| prop.id) {
                    self.stage.kill(other);
                }
            }
            Effect::Respawn => self.ctx.respawn = true,
            Effect::NextRound => self.ctx.next_round = true,
            Effect::GameOver => self.ctx.game_over = true,
            Effect::EndGame => self.ctx.end_game = true,
            Effect::Restart => self.ctx.restart = true,
            Effect::Latch => {
                if let Some(prop) = self.stage.get_mut(id) {
                    prop.latched = true;
                }
            }
            Effect::Defer { delay, look } => {
                self.scheduler.schedule(
                    self.now,
                    delay,
                    Box::new(move |stage: &mut Stage| {
                        if let Some(prop) = stage.get_mut(id) {
                            refit_look(prop, look, Anchor::Center);
                        }
                    }),
                );
            }
        }
    }
}

fn mirrored_for(facing: Facing, look: Look) -> bool {
    (facing == Facing::Left) != look.faces_left()
}

fn face(prop: &mut Prop, facing: Facing) {
    prop.facing = facing;
    prop.visual.mirrored = mirrored_for(facing, prop.visual.look);
}

/// Swap the look, resizing around `anchor` so the prop stays put.
fn refit_look(prop: &mut Prop, look: Look, anchor: Anchor) {
    if prop.visual.look == look {
        return;
    }
    let point = prop.bounds.anchor_point(anchor);
    prop.visual.look = look;
    prop.visual.frame = 0;
    prop.stride_phase = 0.0;
    prop.bounds.size = look.size();
    prop.bounds.move_anchor(anchor, point);
}

fn stride(prop: &mut Prop, look: Look, speed: f32, step: f32) {
    refit_look(prop, look, Anchor::MidBottom);
    let frames = look.frame_count() as f32;
    prop.stride_phase += step;
    if prop.stride_phase >= frames {
        prop.stride_phase = 0.0;
    }
    prop.visual.frame = prop.stride_phase as usize;
    prop.visual.mirrored = mirrored_for(prop.facing, look);
    prop.bounds.translate(Vec2::new(speed * prop.facing.sign(), 0.0));
}
