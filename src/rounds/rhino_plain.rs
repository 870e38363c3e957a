use bevy::math::Vec2;

use crate::cast::{Facing, Look, Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{hazard, steered, Backdrop, EXIT_X};

pub fn playbook() -> Playbook {
    let fairy = Script::default()
        .rule(
            Rule::at(0)
                .then(Effect::Narrate(VoiceLine::FairyRhino))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(1)
                .when(Guard::VoiceIdle)
                .then(Effect::Hush)
                .then(Effect::Respawn)
                .then(Effect::Despawn),
        );

    let rhino = Script::default()
        .chain([
            Rule::at(1).when(Guard::XAtLeast(400.0)).then(Effect::Stride {
                look: Look::RhinoBefore,
                speed: 3.0,
            }),
            Rule::at(1)
                .then(Effect::Voice(VoiceLine::RhinoCall))
                .then(Effect::AdvanceBeat(1)),
        ])
        .rule(
            Rule::at(3)
                .when(Guard::VoiceIdle)
                .then(Effect::Pose {
                    look: Look::RhinoAfter,
                    frame: 0,
                    mirrored: true,
                })
                .then(Effect::Voice(VoiceLine::RhinoThanks))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(4)
                .when(Guard::VoiceIdle)
                .then(Effect::Respawn)
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(Rule::at(5).then(Effect::Face(Facing::Right)).then(Effect::Stride {
            look: Look::RhinoAfter,
            speed: 3.5,
        }))
        .rule(
            Rule::at(5)
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::AddWin(1))
                .then(Effect::Despawn),
        );
    let rhino = hazard(rhino, 2, Role::Saw, VoiceLine::RhinoDie, Some(Look::RhinoDie));

    // The horn straightens the rhino's horn; the saw kills it.
    let horn = Script::default().rule(
        Rule::at(2)
            .when(Guard::Touches(Role::Rhino))
            .when(Guard::Unharmed(Role::Rhino))
            .when(Guard::VoiceIdle)
            .then(Effect::AdvanceBeat(1))
            .then(Effect::Despawn),
    );
    let saw = Script::default().rule(
        Rule::at(2)
            .when(Guard::Touches(Role::Rhino))
            .then(Effect::Despawn),
    );
    let seed = Script::default().rule(
        Rule::any()
            .when(Guard::Uncollected)
            .when(Guard::Touches(Role::Player))
            .when(Guard::WinAtMost(1))
            .then(Effect::Collect {
                slot: Vec2::new(210.0, 110.0),
            })
            .then(Effect::AddWin(1)),
    );

    let player = Script::default().rule(
        Rule::any()
            .when(Guard::WinIs(2))
            .when(Guard::XAtLeast(EXIT_X))
            .then(Effect::NextRound),
    );

    Playbook::new(Backdrop::RhinoPlain)
        .wave(0, [Role::Fairy])
        .wave(1, [Role::Rhino])
        .wave(5, [Role::Seed])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 490.0))
        .entry(Role::Fairy, Anchor::MidBottom, Vec2::new(600.0, 320.0))
        .script(Role::Fairy, fairy)
        .script(Role::Rhino, rhino)
        .script(Role::Horn, horn)
        .script(Role::Saw, saw)
        .script(Role::Seed, seed)
        .script(Role::Player, steered(player))
        .click(
            Role::SkipButton,
            [Effect::StopVoices, Effect::SetBeat(1), Effect::Despawn],
        )
}
