// Owns every live prop. Scripts and the input router only ever hold ids and
// resolve them here, so a prop that was killed simply stops being found.
use bevy::math::Vec2;

use crate::cast::{Facing, Layer, Look, Role};
use crate::error::GameError;
use crate::geometry::Bounds;
use crate::rounds::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropId(pub u32);

/// What the renderer needs to draw a prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub look: Look,
    pub frame: usize,
    pub mirrored: bool,
}

#[derive(Debug, Clone)]
pub struct Prop {
    pub id: PropId,
    pub role: Role,
    pub bounds: Bounds,
    pub layer: Layer,
    pub visual: Visual,
    pub facing: Facing,
    /// Fractional animation frame; the drawn frame is its floor.
    pub stride_phase: f32,
    /// Completed patrol turns.
    pub laps: u32,
    pub draggable: bool,
    pub collected: bool,
    pub dying: bool,
    pub speaking: bool,
    /// Set once a one-shot effect has been started, e.g. a deferred pose swap.
    pub latched: bool,
    /// The scene this prop belongs to. `None` for props that carry over.
    pub home: Option<Scene>,
}

impl Prop {
    pub fn is_scoped(&self) -> bool {
        self.home.is_some()
    }

    pub fn x(&self) -> f32 {
        self.bounds.left()
    }
}

#[derive(Debug, Default)]
pub struct Stage {
    props: Vec<Prop>,
    next_id: u32,
}

impl Stage {
    /// Spawn a prop at its blueprint position.
    pub fn spawn(&mut self, role: Role, scene: Scene) -> PropId {
        let blueprint = role.blueprint();
        let id = PropId(self.next_id);
        self.next_id += 1;
        let mirrored = (blueprint.facing == Facing::Left) != blueprint.look.faces_left();
        self.props.push(Prop {
            id,
            role,
            bounds: Bounds::anchored(blueprint.anchor, blueprint.at, blueprint.look.size()),
            layer: blueprint.layer,
            visual: Visual {
                look: blueprint.look,
                frame: 0,
                mirrored,
            },
            facing: blueprint.facing,
            stride_phase: 0.0,
            laps: 0,
            draggable: false,
            collected: false,
            dying: false,
            speaking: false,
            latched: false,
            home: (!role.carries_over()).then_some(scene),
        });
        id
    }

    pub fn is_alive(&self, id: PropId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: PropId) -> Option<&Prop> {
        self.props.iter().find(|prop| prop.id == id)
    }

    pub fn get_mut(&mut self, id: PropId) -> Option<&mut Prop> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    pub fn require(&self, id: PropId) -> Result<&Prop, GameError> {
        self.get(id).ok_or(GameError::StaleProp(id))
    }

    /// First live prop playing `role`.
    pub fn find(&self, role: Role) -> Option<&Prop> {
        self.props.iter().find(|prop| prop.role == role)
    }

    pub fn find_mut(&mut self, role: Role) -> Option<&mut Prop> {
        self.props.iter_mut().find(|prop| prop.role == role)
    }

    pub fn contains_role(&self, role: Role) -> bool {
        self.find(role).is_some()
    }

    pub fn kill(&mut self, id: PropId) -> bool {
        let before = self.props.len();
        self.props.retain(|prop| prop.id != id);
        self.props.len() != before
    }

    pub fn kill_all(&mut self) {
        self.props.clear();
    }

    /// Kill every prop for which `keep` returns false.
    pub fn retain(&mut self, keep: impl FnMut(&Prop) -> bool) {
        self.props.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Prop> {
        self.props.iter_mut()
    }

    /// Ids bottom layer first; within a layer, oldest first.
    pub fn ids_in_draw_order(&self) -> Vec<PropId> {
        let mut keyed: Vec<_> = self.props.iter().map(|prop| (prop.layer, prop.id)).collect();
        keyed.sort();
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    /// Topmost prop under `point` that passes `filter`.
    pub fn hit_test(&self, point: Vec2, filter: impl Fn(&Prop) -> bool) -> Option<PropId> {
        self.ids_in_draw_order()
            .into_iter()
            .rev()
            .filter_map(|id| self.get(id))
            .find(|prop| filter(prop) && prop.bounds.contains(point))
            .map(|prop| prop.id)
    }
}
