use bevy::math::Vec2;

use crate::cast::{Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop};

pub fn playbook() -> Playbook {
    // The townsfolk wander until the player speaks through the megaphone,
    // then stay next to them on whichever side they were walking from.
    let man = |look: Look| {
        Script::default().chain([
            Rule::span(0, 2)
                .then(Effect::Stride { look, speed: 2.0 })
                .then(Effect::Patrol {
                    min_x: -100.0,
                    max_x: 800.0,
                }),
            Rule::at(2).then(Effect::Flank { distance: 150.0 }),
        ])
    };

    let speaker = Script::default()
        .rule(
            Rule::at(1)
                .when(Guard::Touches(Role::Player))
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Despawn),
        )
        .rule(
            Rule::at(0)
                .when(Guard::Uncollected)
                .when(Guard::Touches(Role::Player))
                .then(Effect::Collect {
                    slot: Vec2::new(500.0, 110.0),
                })
                .then(Effect::AdvanceBeat(1)),
        );

    let player = Script::default().chain([
        Rule::at(2)
            .then(Effect::Voice(VoiceLine::PlayerMegaphone))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(3)
            .when(Guard::VoiceIdle)
            .then(Effect::SetWin(1))
            .then(Effect::AdvanceBeat(1)),
        Rule::any().when(Guard::WinAtLeast(1)).then(Effect::EndGame),
    ]);

    Playbook::new(Backdrop::Town)
        .wave(0, [Role::Man1, Role::Man2, Role::Speaker])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 600.0))
        .script(Role::Man1, man(Look::Man1Walk))
        .script(Role::Man2, man(Look::Man2Walk))
        .script(Role::Speaker, speaker)
        .script(Role::Player, steered(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::Facing;
    use crate::rounds::testing::{drop_on, finish_voice, prop, tick};
    use crate::rounds::{Round, Scene};
    use crate::sequencer::RoundSequencer;

    #[test]
    fn the_megaphone_gathers_the_town_and_ends_the_game() {
        let mut sequencer = RoundSequencer::at(Round::Town);
        let scene = sequencer.scene();
        sequencer.stage.spawn(Role::Player, scene);
        tick(&mut sequencer);

        drop_on(&mut sequencer, Role::Player, Role::Speaker);
        tick(&mut sequencer);
        assert!(sequencer.stage.find(Role::Speaker).unwrap().collected);
        assert_eq!(sequencer.ctx.round_event(), 1);

        drop_on(&mut sequencer, Role::Speaker, Role::Player);
        tick(&mut sequencer);
        assert!(!sequencer.stage.contains_role(Role::Speaker));
        assert_eq!(sequencer.ctx.round_event(), 2);

        // Each man joins on the side he was walking away from.
        prop(&mut sequencer, Role::Man1).facing = Facing::Left;
        prop(&mut sequencer, Role::Man2).facing = Facing::Right;
        tick(&mut sequencer);
        let player_x = sequencer.stage.find(Role::Player).unwrap().x();
        let man1 = sequencer.stage.find(Role::Man1).unwrap();
        let man2 = sequencer.stage.find(Role::Man2).unwrap();
        assert_eq!(man1.x(), player_x + 150.0);
        assert_eq!(man1.facing, Facing::Left);
        assert_eq!(man2.x(), player_x - 150.0);
        assert_eq!(man2.facing, Facing::Right);
        assert_eq!(sequencer.ctx.round_event(), 3);

        finish_voice(&mut sequencer);
        tick(&mut sequencer);
        assert_eq!(sequencer.ctx.win_round(), 1);
        assert!(!sequencer.ctx.end_game);
        tick(&mut sequencer);
        assert!(sequencer.ctx.end_game);

        sequencer.trigger_game_end();
        assert_eq!(sequencer.scene(), Scene::Ending);
    }
}
