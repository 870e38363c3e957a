use crate::cast::Role;
use crate::script::{Effect, Playbook};

use super::Backdrop;

pub fn game_over() -> Playbook {
    Playbook::new(Backdrop::GameOver)
        .wave(0, [Role::PlayAgainButton])
        .click(Role::PlayAgainButton, [Effect::Restart])
}

pub fn ending() -> Playbook {
    Playbook::new(Backdrop::Ending)
}
