use bevy::math::Vec2;

use crate::cast::{Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop};

pub fn playbook() -> Playbook {
    let player = Script::default().chain([
        Rule::at(0)
            .then(Effect::Voice(VoiceLine::PlayerGardenSurprise))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(1)
            .when(Guard::VoiceIdle)
            .then(Effect::AdvanceBeat(1))
            .then(Effect::Respawn),
        Rule::any().when(Guard::WinIs(3)).then(Effect::NextRound),
    ]);

    let fairy = Script::default()
        .rule(
            Rule::at(2)
                .when(Guard::VoiceIdle)
                .then(Effect::Narrate(VoiceLine::FairyGarden))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(3)
                .when(Guard::VoiceIdle)
                .then(Effect::Hush)
                .then(Effect::Despawn),
        );

    Playbook::new(Backdrop::Garden)
        .wave(0, [Role::Flowerpot, Role::Shovel, Role::WateringCan])
        .wave(2, [Role::Fairy])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 535.0))
        .entry(Role::Fairy, Anchor::MidBottom, Vec2::new(600.0, 320.0))
        .script(Role::Player, steered(player))
        .script(Role::Fairy, fairy)
        .script(Role::Shovel, tool(Vec2::new(500.0, 110.0)))
        .script(Role::WateringCan, tool(Vec2::new(360.0, 110.0)))
        .script(Role::Seed, Script::default().rule(plant()))
        .click(Role::SkipButton, [Effect::StopVoices, Effect::Despawn])
}

/// Dropping a tool or the seed into the flowerpot.
fn plant() -> Rule {
    Rule::at(3)
        .when(Guard::Collected)
        .when(Guard::Touches(Role::Flowerpot))
        .when(Guard::VoiceIdle)
        .then(Effect::AddWin(1))
        .then(Effect::Despawn)
}

fn tool(slot: Vec2) -> Script {
    Script::default().rule(plant()).rule(
        Rule::span(1, 4)
            .when(Guard::Uncollected)
            .when(Guard::Touches(Role::Player))
            .then(Effect::Collect { slot }),
    )
}
