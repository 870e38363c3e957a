// Declarative actor scripts.
//
// A script is a list of chains. Each tick every chain is evaluated in order and
// fires at most its first admitted rule, so a chain reads like an if/else-if
// ladder and later chains see the effects of earlier ones.
use std::collections::HashMap;
use std::time::Duration;

use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::rounds::Backdrop;

/// Which round event values a rule listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Any,
    At(u32),
    /// Half-open range `lo..hi`.
    Span(u32, u32),
}

impl Beat {
    pub fn admits(self, event: u32) -> bool {
        match self {
            Beat::Any => true,
            Beat::At(value) => event == value,
            Beat::Span(lo, hi) => (lo..hi).contains(&event),
        }
    }
}

/// A predicate over the acting prop, the stage and the round context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    VoiceIdle,
    /// The actor overlaps a live prop of this role.
    Touches(Role),
    /// A prop of this role is on stage and not dying.
    Unharmed(Role),
    Dying,
    NotDying,
    Collected,
    Uncollected,
    XAtLeast(f32),
    XAtMost(f32),
    WinIs(u32),
    WinAtLeast(u32),
    WinAtMost(u32),
    LapsAtLeast(u32),
    Unlatched,
    /// Nobody on stage is narrating.
    NarratorSilent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Voice(VoiceLine),
    /// Voice line that can be skipped while it plays.
    Narrate(VoiceLine),
    /// Mark the narrator as done speaking.
    Hush,
    StopVoices,
    AdvanceBeat(u32),
    SetBeat(u32),
    AddWin(u32),
    SetWin(u32),
    /// Walk one tick in the facing direction, animating with `look`.
    Stride { look: Look, speed: f32 },
    Face(Facing),
    /// Turn around at the edges, counting laps.
    Patrol { min_x: f32, max_x: f32 },
    /// Stand `distance` from the player on the side the actor is walking
    /// away from.
    Flank { distance: f32 },
    /// Walk with the held steering keys.
    FollowSteering,
    Nudge(Vec2),
    SetBottom(f32),
    Pose { look: Look, frame: usize, mirrored: bool },
    Mirror,
    Refit { anchor: Anchor, at: Vec2 },
    /// Put the item into its bar slot.
    Collect { slot: Vec2 },
    StartDying { look: Option<Look>, line: VoiceLine },
    Despawn,
    DespawnRole(Role),
    Respawn,
    NextRound,
    GameOver,
    EndGame,
    Restart,
    Latch,
    /// Swap to `look` once `delay` has elapsed.
    Defer { delay: Duration, look: Look },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub beat: Beat,
    pub guards: Vec<Guard>,
    pub effects: Vec<Effect>,
}

impl Rule {
    pub fn new(beat: Beat) -> Self {
        Self {
            beat,
            guards: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn at(event: u32) -> Self {
        Self::new(Beat::At(event))
    }

    pub fn any() -> Self {
        Self::new(Beat::Any)
    }

    pub fn span(lo: u32, hi: u32) -> Self {
        Self::new(Beat::Span(lo, hi))
    }

    pub fn when(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn then(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub chains: Vec<Vec<Rule>>,
}

impl Script {
    /// Add a rule that stands on its own.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.chains.push(vec![rule]);
        self
    }

    /// Add a chain of mutually exclusive rules, highest priority first.
    pub fn chain(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.chains.push(rules.into_iter().collect());
        self
    }

    pub fn listens_on(&self, event: u32) -> bool {
        self.chains
            .iter()
            .flatten()
            .any(|rule| rule.beat.admits(event))
    }
}

/// Props spawned when the round reaches `beat`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub beat: u32,
    /// Hold the wave back until no voice line is playing.
    pub after_voice: bool,
    pub roles: Vec<Role>,
}

/// Everything a scene needs: what to show, who to spawn and how they behave.
#[derive(Debug, Clone)]
pub struct Playbook {
    pub backdrop: Backdrop,
    pub waves: Vec<Wave>,
    pub scripts: HashMap<Role, Script>,
    pub clicks: HashMap<Role, Vec<Effect>>,
    pub entries: HashMap<Role, (Anchor, Vec2)>,
}

impl Playbook {
    pub fn new(backdrop: Backdrop) -> Self {
        let skip = Script::default().rule(Rule::any().when(Guard::NarratorSilent).then(Effect::Despawn));
        Self {
            backdrop,
            waves: Vec::new(),
            scripts: HashMap::from([(Role::SkipButton, skip)]),
            clicks: HashMap::new(),
            entries: HashMap::new(),
        }
    }

    pub fn wave(mut self, beat: u32, roles: impl IntoIterator<Item = Role>) -> Self {
        self.waves.push(Wave {
            beat,
            after_voice: false,
            roles: roles.into_iter().collect(),
        });
        self
    }

    pub fn wave_after_voice(mut self, beat: u32, roles: impl IntoIterator<Item = Role>) -> Self {
        self.waves.push(Wave {
            beat,
            after_voice: true,
            roles: roles.into_iter().collect(),
        });
        self
    }

    pub fn script(mut self, role: Role, script: Script) -> Self {
        self.scripts.insert(role, script);
        self
    }

    pub fn click(mut self, role: Role, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.clicks.insert(role, effects.into_iter().collect());
        self
    }

    /// Where a carried or newly spawned actor stands when the scene starts.
    pub fn entry(mut self, role: Role, anchor: Anchor, at: Vec2) -> Self {
        self.entries.insert(role, (anchor, at));
        self
    }

    pub fn wave_at(&self, beat: u32) -> Option<&Wave> {
        self.waves.iter().find(|wave| wave.beat == beat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_half_open() {
        let beat = Beat::Span(1, 4);
        assert!(!beat.admits(0));
        assert!(beat.admits(1));
        assert!(beat.admits(3));
        assert!(!beat.admits(4));
    }

    #[test]
    fn every_playbook_can_dismiss_the_skip_button() {
        let playbook = Playbook::new(Backdrop::Title);
        let skip = &playbook.scripts[&Role::SkipButton];
        assert!(skip.listens_on(42));
    }

    #[test]
    fn listens_on_ignores_unrelated_beats() {
        let script = Script::default()
            .rule(Rule::at(2).then(Effect::AdvanceBeat(1)))
            .chain([Rule::at(5).then(Effect::Despawn), Rule::span(7, 9).then(Effect::Hush)]);
        assert!(script.listens_on(2));
        assert!(script.listens_on(8));
        assert!(!script.listens_on(6));
    }
}
