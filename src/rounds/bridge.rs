use bevy::math::Vec2;

use crate::cast::Role;
use crate::geometry::Anchor;
use crate::script::{Effect, Guard, Playbook, Rule, Script};

use super::{steered, Backdrop, EXIT_X};

/// Where the player's feet land once they climb onto the plank.
const PLANK_TOP: f32 = 497.0;

pub fn playbook() -> Playbook {
    let player = Script::default()
        .rule(
            Rule::at(0)
                .when(Guard::XAtLeast(225.0))
                .then(Effect::SetBottom(PLANK_TOP))
                .then(Effect::AdvanceBeat(1)),
        )
        .rule(Rule::at(1).when(Guard::XAtLeast(EXIT_X)).then(Effect::NextRound));

    Playbook::new(Backdrop::Bridge)
        .entry(Role::Player, Anchor::MidBottom, Vec2::new(5.0, 545.0))
        .script(Role::Player, steered(player))
}
