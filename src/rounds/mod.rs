//! The campaign: rounds, terminal scenes and the playbook for each.
mod bridge;
mod elephant_camp;
mod finale;
mod garden;
mod intro;
mod lion_den;
mod new_world;
mod rabbit_hill;
mod rhino_plain;
mod supplies;
mod title;
mod town;

use std::fmt;

use bevy::color::Color;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::cast::{Look, Role, VoiceLine};
use crate::script::{Effect, Guard, Playbook, Rule, Script};

/// Rounds in campaign order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
pub enum Round {
    Title,
    Intro,
    Supplies,
    Bridge,
    RhinoPlain,
    LionDen,
    RabbitHill,
    ElephantCamp,
    Garden,
    NewWorld,
    Town,
}

/// What is on screen: a campaign round or one of the two endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Round(Round),
    GameOver,
    Ending,
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Round(round) => fmt::Display::fmt(round, f),
            Scene::GameOver => f.write_str("GameOver"),
            Scene::Ending => f.write_str("Ending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Backdrop {
    Title,
    Intro,
    Supplies,
    Bridge,
    RhinoPlain,
    LionDen,
    RabbitHill,
    ElephantCamp,
    Garden,
    NewWorld,
    Town,
    GameOver,
    Ending,
}

impl Backdrop {
    pub fn path(self) -> &'static str {
        match self {
            Backdrop::Title => "graphics/backgrounds/start_screen.png",
            Backdrop::Intro => "graphics/backgrounds/intro_screen.png",
            Backdrop::Supplies => "graphics/backgrounds/round1_1.png",
            Backdrop::Bridge => "graphics/backgrounds/round1_2.png",
            Backdrop::RhinoPlain => "graphics/backgrounds/round2.png",
            Backdrop::LionDen => "graphics/backgrounds/round3.png",
            Backdrop::RabbitHill => "graphics/backgrounds/round4.png",
            Backdrop::ElephantCamp => "graphics/backgrounds/round5.png",
            Backdrop::Garden => "graphics/backgrounds/round6_1.png",
            Backdrop::NewWorld => "graphics/backgrounds/round6_2.png",
            Backdrop::Town => "graphics/backgrounds/round7.png",
            Backdrop::GameOver => "graphics/backgrounds/game_over_screen.png",
            Backdrop::Ending => "graphics/backgrounds/end_screen.png",
        }
    }

    /// Solid color behind a backdrop with transparent regions.
    pub fn matte(self) -> Option<Color> {
        match self {
            Backdrop::RabbitHill => Some(Color::WHITE),
            _ => None,
        }
    }
}

impl Scene {
    pub fn playbook(self) -> Playbook {
        match self {
            Scene::Round(Round::Title) => title::playbook(),
            Scene::Round(Round::Intro) => intro::playbook(),
            Scene::Round(Round::Supplies) => supplies::playbook(),
            Scene::Round(Round::Bridge) => bridge::playbook(),
            Scene::Round(Round::RhinoPlain) => rhino_plain::playbook(),
            Scene::Round(Round::LionDen) => lion_den::playbook(),
            Scene::Round(Round::RabbitHill) => rabbit_hill::playbook(),
            Scene::Round(Round::ElephantCamp) => elephant_camp::playbook(),
            Scene::Round(Round::Garden) => garden::playbook(),
            Scene::Round(Round::NewWorld) => new_world::playbook(),
            Scene::Round(Round::Town) => town::playbook(),
            Scene::GameOver => finale::game_over(),
            Scene::Ending => finale::ending(),
        }
    }
}

/// Past this x the player has left the screen to the right.
const EXIT_X: f32 = 720.0;

/// The player's round rules followed by walking with the steering keys.
fn steered(script: Script) -> Script {
    script.rule(Rule::any().then(Effect::FollowSteering))
}

/// An actor that dies when `hazard` reaches it during `beat`. Once the dying
/// line has finished the game is over.
fn hazard(script: Script, beat: u32, hazard: Role, line: VoiceLine, look: Option<Look>) -> Script {
    script
        .rule(
            Rule::at(beat)
                .when(Guard::Touches(hazard))
                .when(Guard::NotDying)
                .then(Effect::StartDying { look, line }),
        )
        .rule(
            Rule::any()
                .when(Guard::Dying)
                .when(Guard::VoiceIdle)
                .then(Effect::GameOver)
                .then(Effect::Despawn),
        )
}

/// Drives a sequencer through a round without a window or input.
#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use bevy::math::Vec2;

    use crate::cast::Role;
    use crate::config::GameConfig;
    use crate::geometry::Anchor;
    use crate::sequencer::RoundSequencer;
    use crate::stage::Prop;

    /// One loop iteration: the spawn table, then every actor.
    pub fn tick(sequencer: &mut RoundSequencer) {
        sequencer.spawn_round_entities();
        sequencer.update_actors(Duration::ZERO, &GameConfig::default());
    }

    /// Let the line that is playing run to its end.
    pub fn finish_voice(sequencer: &mut RoundSequencer) {
        sequencer.ctx.stop_voices();
    }

    pub fn prop(sequencer: &mut RoundSequencer, role: Role) -> &mut Prop {
        sequencer.stage.find_mut(role).unwrap()
    }

    pub fn center(sequencer: &RoundSequencer, role: Role) -> Vec2 {
        sequencer.stage.find(role).unwrap().bounds.center()
    }

    pub fn put(sequencer: &mut RoundSequencer, role: Role, at: Vec2) {
        prop(sequencer, role).bounds.move_anchor(Anchor::Center, at);
    }

    /// Drop `role` onto whatever `target` is standing on.
    pub fn drop_on(sequencer: &mut RoundSequencer, role: Role, target: Role) {
        let at = center(sequencer, target);
        put(sequencer, role, at);
    }
}
