// Pointer handling: buttons are clicked, items are picked up and dragged.
use std::time::Duration;

use bevy::math::Vec2;

use crate::config::GameConfig;
use crate::sequencer::RoundSequencer;
use crate::stage::PropId;

/// Pointer positions are logical screen coordinates; moves carry a delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerUp(Vec2),
    PointerMove(Vec2),
    Quit,
}

#[derive(Debug, Default)]
pub struct InputRouter {
    active: Option<PropId>,
}

impl InputRouter {
    pub fn active(&self) -> Option<PropId> {
        self.active
    }

    /// Apply one event. Returns true when the player asked to quit.
    pub fn route(
        &mut self,
        event: InputEvent,
        sequencer: &mut RoundSequencer,
        now: Duration,
        config: &GameConfig,
    ) -> bool {
        match event {
            InputEvent::PointerDown(point) => {
                let hit = sequencer
                    .stage
                    .hit_test(point, |prop| prop.role.is_button() || prop.role.is_item());
                let Some(id) = hit else {
                    return false;
                };
                let is_button = sequencer
                    .stage
                    .get(id)
                    .is_some_and(|prop| prop.role.is_button());
                if is_button {
                    sequencer.click(id, now, config);
                } else {
                    self.active = Some(id);
                }
            }
            InputEvent::PointerMove(delta) => {
                let Some(id) = self.active else {
                    return false;
                };
                match sequencer.stage.get_mut(id) {
                    Some(prop) if prop.draggable => prop.bounds.translate(delta),
                    Some(_) => {}
                    None => self.active = None,
                }
            }
            InputEvent::PointerUp(_) => self.active = None,
            InputEvent::Quit => return true,
        }
        false
    }
}
