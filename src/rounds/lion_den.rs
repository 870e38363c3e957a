use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{hazard, steered, Backdrop, EXIT_X};

pub fn playbook() -> Playbook {
    let lion = Script::default()
        .rule(Rule::at(0).then(Effect::Stride {
            look: Look::LionRun,
            speed: 3.0,
        }))
        .rule(
            Rule::at(1)
                .then(Effect::Voice(VoiceLine::LionNail))
                .then(Effect::Pose {
                    look: Look::LionHurt,
                    frame: 0,
                    mirrored: true,
                })
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(4)
                .then(Effect::Pose {
                    look: Look::LionWin,
                    frame: 0,
                    mirrored: false,
                })
                .then(Effect::Voice(VoiceLine::LionThanks))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(Rule::at(5).when(Guard::VoiceIdle).then(Effect::AdvanceBeat(1)))
        .rule(Rule::at(6).then(Effect::Face(Facing::Right)).then(Effect::Stride {
            look: Look::LionRun,
            speed: 3.5,
        }))
        .rule(
            Rule::at(6)
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Despawn),
        );
    let lion = hazard(lion, 3, Role::Saw, VoiceLine::LionDie, Some(Look::LionDie));

    let nail = Script::default().rule(
        Rule::any()
            .when(Guard::Touches(Role::Lion))
            .then(Effect::AdvanceBeat(1))
            .then(Effect::Despawn),
    );
    let kit = Script::default().rule(
        Rule::at(3)
            .when(Guard::Touches(Role::Lion))
            .when(Guard::Unharmed(Role::Lion))
            .when(Guard::VoiceIdle)
            .then(Effect::SetBeat(4))
            .then(Effect::Despawn),
    );
    let saw = Script::default().rule(
        Rule::at(3)
            .when(Guard::Touches(Role::Lion))
            .then(Effect::Despawn),
    );

    let player = Script::default()
        .rule(
            Rule::at(2)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::PlayerHelpLion))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(7)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::PlayerLionSaved))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(Rule::at(8).when(Guard::VoiceIdle).then(Effect::SetWin(1)))
        .rule(
            Rule::any()
                .when(Guard::WinAtLeast(1))
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::NextRound)
                .then(Effect::Despawn),
        );

    Playbook::new(Backdrop::LionDen)
        .wave(0, [Role::Lion, Role::Nail])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 530.0))
        .script(Role::Lion, lion)
        .script(Role::Nail, nail)
        .script(Role::FirstAidKit, kit)
        .script(Role::Saw, saw)
        .script(Role::Player, steered(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::testing::{drop_on, finish_voice, prop, tick};
    use crate::rounds::{Round, Scene};
    use crate::sequencer::RoundSequencer;

    /// Lion on the nail, the player has asked for help.
    fn lion_waiting_for_help() -> RoundSequencer {
        let mut sequencer = RoundSequencer::at(Round::LionDen);
        let scene = sequencer.scene();
        for role in [Role::Player, Role::FirstAidKit, Role::Saw] {
            sequencer.stage.spawn(role, scene);
        }
        sequencer.spawn_round_entities();
        prop(&mut sequencer, Role::Lion).bounds.set_left(300.0);

        tick(&mut sequencer);
        assert!(!sequencer.stage.contains_role(Role::Nail));
        assert_eq!(sequencer.stage.find(Role::Lion).unwrap().visual.look, Look::LionHurt);
        assert_eq!(sequencer.ctx.round_event(), 2);

        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.round_event(), 3);
        finish_voice(&mut sequencer);
        sequencer
    }

    #[test]
    fn the_kit_heals_the_lion_and_the_player_walks_on() {
        let mut sequencer = lion_waiting_for_help();
        drop_on(&mut sequencer, Role::FirstAidKit, Role::Lion);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.round_event(), 4);
        assert!(!sequencer.stage.contains_role(Role::FirstAidKit));

        tick(&mut sequencer);
        let lion = sequencer.stage.find(Role::Lion).unwrap();
        assert_eq!(lion.visual.look, Look::LionWin);
        assert!(!lion.visual.mirrored);
        assert_eq!(sequencer.ctx.round_event(), 5);

        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.round_event(), 6);
        assert_eq!(sequencer.stage.find(Role::Lion).unwrap().facing, Facing::Right);

        prop(&mut sequencer, Role::Lion).bounds.set_left(EXIT_X);
        tick(&mut sequencer);
        assert!(!sequencer.stage.contains_role(Role::Lion));
        assert_eq!(sequencer.ctx.round_event(), 8);

        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.win_round(), 1);
        assert!(!sequencer.ctx.next_round);

        prop(&mut sequencer, Role::Player).bounds.set_left(EXIT_X);
        tick(&mut sequencer);
        assert!(sequencer.ctx.next_round);
        sequencer.advance();
        assert_eq!(sequencer.scene(), Scene::Round(Round::RabbitHill));
    }

    #[test]
    fn the_saw_kills_the_lion() {
        let mut sequencer = lion_waiting_for_help();
        drop_on(&mut sequencer, Role::FirstAidKit, Role::Lion);
        drop_on(&mut sequencer, Role::Saw, Role::Lion);
        tick(&mut sequencer);

        let lion = sequencer.stage.find(Role::Lion).unwrap();
        assert!(lion.dying);
        assert_eq!(lion.visual.look, Look::LionDie);
        assert!(!sequencer.stage.contains_role(Role::Saw));
        // Too late for the kit.
        assert!(sequencer.stage.contains_role(Role::FirstAidKit));
        assert_eq!(sequencer.ctx.round_event(), 3);

        tick(&mut sequencer);
        assert!(!sequencer.ctx.game_over);
        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert!(sequencer.ctx.game_over);
        assert!(!sequencer.stage.contains_role(Role::Lion));
    }
}
