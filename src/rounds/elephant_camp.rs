use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop, EXIT_X};

pub fn playbook() -> Playbook {
    let elephant = Script::default()
        .chain([
            Rule::at(0)
                .when(Guard::VoiceIdle)
                .then(Effect::Mirror)
                .then(Effect::Voice(VoiceLine::ElephantHelp))
                .then(Effect::AdvanceBeat(1)),
            Rule::at(3)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::ElephantFreed))
                .then(Effect::AdvanceBeat(1)),
            Rule::at(5)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::ElephantReply))
                .then(Effect::AdvanceBeat(1)),
        ])
        .chain([
            Rule::at(7)
                .when(Guard::VoiceIdle)
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::AddWin(1))
                .then(Effect::Despawn),
            Rule::at(7)
                .when(Guard::VoiceIdle)
                .then(Effect::Face(Facing::Right))
                .then(Effect::Stride {
                    look: Look::ElephantRun,
                    speed: 5.0,
                }),
        ]);

    // Sawing through the cage frees the elephant.
    let saw = Script::default().rule(
        Rule::at(2)
            .when(Guard::Touches(Role::Cage))
            .when(Guard::VoiceIdle)
            .then(Effect::AdvanceBeat(1))
            .then(Effect::DespawnRole(Role::Cage))
            .then(Effect::Despawn),
    );

    let player = Script::default().chain([
        Rule::at(1)
            .when(Guard::VoiceIdle)
            .then(Effect::Voice(VoiceLine::PlayerElephantCaged))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(4)
            .when(Guard::VoiceIdle)
            .then(Effect::Voice(VoiceLine::PlayerThankElephant))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(6)
            .when(Guard::VoiceIdle)
            .then(Effect::Voice(VoiceLine::PlayerByeElephant))
            .then(Effect::AdvanceBeat(1)),
        Rule::any()
            .when(Guard::WinIs(2))
            .when(Guard::XAtLeast(EXIT_X))
            .then(Effect::NextRound),
        Rule::any().when(Guard::WinIs(1)).then(Effect::AddWin(1)),
    ]);

    Playbook::new(Backdrop::ElephantCamp)
        .wave(0, [Role::Cage, Role::Elephant])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 450.0))
        .script(Role::Elephant, elephant)
        .script(Role::Saw, saw)
        .script(Role::Player, steered(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::testing::{drop_on, finish_voice, prop, tick};
    use crate::rounds::Round;
    use crate::sequencer::RoundSequencer;

    #[test]
    fn sawing_the_cage_frees_the_elephant() {
        let mut sequencer = RoundSequencer::at(Round::ElephantCamp);
        let scene = sequencer.scene();
        sequencer.stage.spawn(Role::Player, scene);
        sequencer.stage.spawn(Role::Saw, scene);

        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.round_event(), 1);
        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.round_event(), 2);

        // Still talking: the saw waits.
        drop_on(&mut sequencer, Role::Saw, Role::Cage);
        tick(&mut sequencer);
        assert!(sequencer.stage.contains_role(Role::Cage));

        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert!(!sequencer.stage.contains_role(Role::Cage));
        assert!(!sequencer.stage.contains_role(Role::Saw));
        assert_eq!(sequencer.ctx.round_event(), 3);

        // Elephant and player thank each other, then the elephant leaves.
        for beat in [4, 5, 6, 7] {
            tick(&mut sequencer);
            assert_eq!(sequencer.ctx.round_event(), beat);
            finish_voice(&mut sequencer);
        }
        tick(&mut sequencer);
        assert_eq!(sequencer.stage.find(Role::Elephant).unwrap().facing, Facing::Right);

        prop(&mut sequencer, Role::Elephant).bounds.set_left(EXIT_X);
        tick(&mut sequencer);
        assert!(!sequencer.stage.contains_role(Role::Elephant));
        // The elephant's exit and the player's acknowledgement both count.
        assert_eq!(sequencer.ctx.win_round(), 2);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.win_round(), 2);
        assert!(!sequencer.ctx.next_round);

        prop(&mut sequencer, Role::Player).bounds.set_left(EXIT_X);
        tick(&mut sequencer);
        assert!(sequencer.ctx.next_round);
    }
}
