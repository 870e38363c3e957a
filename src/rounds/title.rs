use crate::cast::Role;
use crate::script::{Effect, Playbook};

use super::Backdrop;

pub fn playbook() -> Playbook {
    Playbook::new(Backdrop::Title)
        .wave(0, [Role::StartButton, Role::GameLabel])
        .click(Role::StartButton, [Effect::NextRound, Effect::Despawn])
}
