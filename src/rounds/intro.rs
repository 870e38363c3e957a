use std::time::Duration;

use crate::cast::{Look, Role, VoiceLine};
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::Backdrop;

/// How long the fairy talks before the earth heals.
const EARTH_HEALS_AFTER: Duration = Duration::from_secs(9);

pub fn playbook() -> Playbook {
    let fairy = Script::default()
        .rule(
            Rule::at(0)
                .then(Effect::Narrate(VoiceLine::FairyIntro))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(
            Rule::at(1)
                .when(Guard::VoiceIdle)
                .then(Effect::Hush)
                .then(Effect::NextRound),
        );

    let earth = Script::default().rule(
        Rule::at(1)
            .when(Guard::Unlatched)
            .then(Effect::Latch)
            .then(Effect::Defer {
                delay: EARTH_HEALS_AFTER,
                look: Look::EarthHealed,
            }),
    );

    Playbook::new(Backdrop::Intro)
        .wave(0, [Role::Earth, Role::Fairy])
        .script(Role::Fairy, fairy)
        .script(Role::Earth, earth)
        .click(
            Role::SkipButton,
            [Effect::StopVoices, Effect::NextRound, Effect::Despawn],
        )
}
