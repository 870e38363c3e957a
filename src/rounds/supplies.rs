use bevy::math::Vec2;

use crate::cast::{Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop, EXIT_X};

/// Bar slots for the three supplies, left to right.
const SLOTS: [(Role, Vec2); 3] = [
    (Role::Horn, Vec2::new(210.0, 110.0)),
    (Role::FirstAidKit, Vec2::new(360.0, 110.0)),
    (Role::Saw, Vec2::new(500.0, 110.0)),
];

pub fn playbook() -> Playbook {
    let fairy = Script::default()
        .rule(
            Rule::at(0)
                .when(Guard::Touches(Role::Player))
                .then(Effect::Narrate(VoiceLine::FairySupplies))
                .then(Effect::Nudge(Vec2::new(-100.0, -280.0)))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(1)
                .when(Guard::VoiceIdle)
                .then(Effect::AdvanceBeat(1))
                .then(Effect::Respawn)
                .then(Effect::Hush)
                .then(Effect::Despawn),
        )
        // Reached when the narration was skipped.
        .rule(
            Rule::at(2)
                .then(Effect::StopVoices)
                .then(Effect::Respawn)
                .then(Effect::Hush)
                .then(Effect::Despawn),
        );

    let player = Script::default()
        .rule(
            Rule::at(2)
                .then(Effect::Voice(VoiceLine::PlayerSupplies))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::any()
                .when(Guard::WinIs(3))
                .when(Guard::XAtLeast(EXIT_X))
                .then(Effect::NextRound),
        );

    let mut playbook = Playbook::new(Backdrop::Supplies)
        .wave(0, [Role::Mouse, Role::Arrow, Role::ItemsBar, Role::Player])
        .wave(3, SLOTS.map(|(role, _)| role))
        .entry(Role::Fairy, Anchor::MidBottom, Vec2::new(700.0, 600.0))
        .script(Role::Fairy, fairy)
        .script(Role::Player, steered(player))
        .click(
            Role::SkipButton,
            [Effect::StopVoices, Effect::AdvanceBeat(1), Effect::Despawn],
        );
    for (role, slot) in SLOTS {
        playbook = playbook.script(role, pick_up(slot));
    }
    playbook
}

fn pick_up(slot: Vec2) -> Script {
    Script::default().rule(
        Rule::any()
            .when(Guard::Uncollected)
            .when(Guard::Touches(Role::Player))
            .then(Effect::Collect { slot })
            .then(Effect::AddWin(1)),
    )
}
