use bevy::math::Vec2;

use crate::cast::{Role, VoiceLine};
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop, EXIT_X};

pub fn playbook() -> Playbook {
    let player = Script::default().chain([
        Rule::at(0)
            .then(Effect::Voice(VoiceLine::PlayerNewWorld))
            .then(Effect::AdvanceBeat(1))
            .then(Effect::Respawn),
        Rule::at(2)
            .when(Guard::VoiceIdle)
            .then(Effect::Voice(VoiceLine::PlayerFarewell))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(3)
            .when(Guard::VoiceIdle)
            .then(Effect::AddWin(1))
            .then(Effect::AdvanceBeat(3)),
        Rule::any()
            .when(Guard::WinAtLeast(1))
            .when(Guard::XAtLeast(EXIT_X))
            .then(Effect::NextRound),
    ]);

    let fairy = Script::default().chain([
        Rule::at(1)
            .then(Effect::Narrate(VoiceLine::FairyNewWorld))
            .then(Effect::AdvanceBeat(1)),
        Rule::at(2)
            .when(Guard::VoiceIdle)
            .then(Effect::Hush)
            .then(Effect::Despawn),
    ]);

    Playbook::new(Backdrop::NewWorld)
        .wave_after_voice(1, [Role::Fairy])
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 600.0))
        .entry(Role::Fairy, Anchor::MidBottom, Vec2::new(600.0, 320.0))
        .script(Role::Player, steered(player))
        .script(Role::Fairy, fairy)
        .click(Role::SkipButton, [Effect::StopVoices, Effect::Despawn])
}
