use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{hazard, steered, Backdrop, EXIT_X};

/// The rabbit gives up running and sits down here.
const CRY_SPOT: Vec2 = Vec2::new(580.0, 600.0);

pub fn playbook() -> Playbook {
    let rabbit = Script::default()
        .rule(Rule::at(0).then(Effect::Stride {
            look: Look::RabbitRun,
            speed: 5.0,
        }))
        .chain([
            Rule::at(0)
                .when(Guard::LapsAtLeast(2))
                .when(Guard::XAtMost(CRY_SPOT.x))
                .then(Effect::Pose {
                    look: Look::RabbitCry,
                    frame: 0,
                    mirrored: true,
                })
                .then(Effect::Refit {
                    anchor: Anchor::MidBottom,
                    at: CRY_SPOT,
                })
                .then(Effect::Voice(VoiceLine::RabbitHungry))
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Respawn),
            Rule::at(0).then(Effect::Patrol {
                min_x: -130.0,
                max_x: 800.0,
            }),
        ])
        .rule(
            Rule::at(3)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::RabbitFed))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(5)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::RabbitThanks))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(6)
                .when(Guard::VoiceIdle)
                .then(Effect::Face(Facing::Right))
                .then(Effect::Stride {
                    look: Look::RabbitRun,
                    speed: 5.0,
                }),
        )
        .rule(
            Rule::at(6)
                .when(Guard::VoiceIdle)
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Despawn),
        );
    let rabbit = hazard(rabbit, 2, Role::Saw, VoiceLine::RabbitDie, None);

    // The carrot feeds the rabbit once it has been picked up.
    let carrot = Script::default()
        .rule(
            Rule::at(2)
                .when(Guard::Touches(Role::Rabbit))
                .when(Guard::Unharmed(Role::Rabbit))
                .when(Guard::VoiceIdle)
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Despawn),
        )
        .rule(
            Rule::at(2)
                .when(Guard::Uncollected)
                .when(Guard::Touches(Role::Player))
                .then(Effect::Collect {
                    slot: Vec2::new(360.0, 110.0),
                }),
        );
    let saw = Script::default().rule(
        Rule::at(2)
            .when(Guard::Touches(Role::Rabbit))
            .then(Effect::Despawn),
    );

    let player = Script::default()
        .rule(
            Rule::at(1)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::PlayerSeeRabbit))
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Respawn),
        )
        .rule(
            Rule::at(4)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::PlayerThankRabbit))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(7)
                .when(Guard::VoiceIdle)
                .then(Effect::Voice(VoiceLine::PlayerReplyRabbit))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(Rule::at(8).when(Guard::VoiceIdle).then(Effect::SetWin(1)))
        .rule(
            Rule::any()
                .when(Guard::WinAtLeast(1))
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::NextRound),
        );

    Playbook::new(Backdrop::RabbitHill)
        .wave(0, [Role::Rabbit])
        .wave_after_voice(1, [Role::Player])
        .wave_after_voice(2, [Role::Carrot])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 400.0))
        .script(Role::Rabbit, rabbit)
        .script(Role::Carrot, carrot)
        .script(Role::Saw, saw)
        .script(Role::Player, steered(player))
}
