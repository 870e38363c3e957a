// Draws the stage: one sprite per live prop plus the backdrop.
use std::collections::HashMap;

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::cast::Look;
use crate::config::GameConfig;
use crate::context::Cue;
use crate::director::{CueMessage, Director};
use crate::geometry::Bounds;
use crate::rounds::Backdrop;
use crate::stage::{PropId, Visual};

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (load_images, spawn_backdrop).chain())
            .add_systems(Update, (swap_backdrop, sync_props));
    }
}

#[derive(Resource)]
pub struct ImageBank {
    looks: HashMap<Look, Vec<Handle<Image>>>,
    backdrops: HashMap<Backdrop, Handle<Image>>,
}

impl ImageBank {
    fn frame(&self, visual: &Visual) -> Handle<Image> {
        self.looks
            .get(&visual.look)
            .and_then(|frames| frames.get(visual.frame).or_else(|| frames.first()))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Component)]
pub struct BackdropSprite;

/// Links a sprite to the prop it draws.
#[derive(Component)]
pub struct PropSprite(pub PropId);

const BACKDROP_Z: f32 = -100.0;

fn load_images(mut commands: Commands, assets: Res<AssetServer>) {
    let looks = Look::iter()
        .map(|look| {
            let frames = look.frames().iter().map(|path| assets.load(*path)).collect();
            (look, frames)
        })
        .collect();
    let backdrops = Backdrop::iter()
        .map(|backdrop| (backdrop, assets.load(backdrop.path())))
        .collect();
    commands.insert_resource(ImageBank { looks, backdrops });
}

fn spawn_backdrop(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((Name::new("Camera"), Camera2d));
    commands.spawn((
        Name::new("Backdrop"),
        BackdropSprite,
        Sprite {
            custom_size: Some(config.logical_size()),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
    ));
}

fn swap_backdrop(
    mut cues: MessageReader<CueMessage>,
    bank: Res<ImageBank>,
    mut backdrop: Query<&mut Sprite, With<BackdropSprite>>,
    mut clear: ResMut<ClearColor>,
) {
    let Ok(mut sprite) = backdrop.single_mut() else {
        return;
    };
    for CueMessage(cue) in cues.read() {
        let Cue::Backdrop(next) = cue else {
            continue;
        };
        if let Some(image) = bank.backdrops.get(next) {
            sprite.image = image.clone();
        }
        clear.0 = next.matte().unwrap_or(Color::BLACK);
    }
}

/// Screen-space rectangle to a world-space translation, y up from the center.
fn world_position(bounds: &Bounds, logical: Vec2, z: f32) -> Vec3 {
    let center = bounds.center();
    Vec3::new(center.x - logical.x / 2.0, logical.y / 2.0 - center.y, z)
}

fn sync_props(
    mut commands: Commands,
    director: Res<Director>,
    bank: Res<ImageBank>,
    config: Res<GameConfig>,
    mut sprites: Query<(Entity, &PropSprite, &mut Sprite, &mut Transform)>,
) {
    let stage = &director.sequencer.stage;
    let logical = config.logical_size();
    let order: HashMap<PropId, f32> = stage
        .ids_in_draw_order()
        .into_iter()
        .enumerate()
        .map(|(index, id)| (id, index as f32))
        .collect();

    let mut drawn = Vec::new();
    for (entity, PropSprite(id), mut sprite, mut transform) in &mut sprites {
        let (Some(prop), Some(z)) = (stage.get(*id), order.get(id)) else {
            commands.entity(entity).despawn();
            continue;
        };
        sprite.image = bank.frame(&prop.visual);
        sprite.flip_x = prop.visual.mirrored;
        sprite.custom_size = Some(prop.bounds.size);
        transform.translation = world_position(&prop.bounds, logical, *z);
        drawn.push(*id);
    }

    for prop in stage.iter().filter(|prop| !drawn.contains(&prop.id)) {
        let z = order.get(&prop.id).copied().unwrap_or_default();
        commands.spawn((
            Name::new(<&'static str>::from(prop.role)),
            PropSprite(prop.id),
            Sprite {
                image: bank.frame(&prop.visual),
                flip_x: prop.visual.mirrored,
                custom_size: Some(prop.bounds.size),
                ..default()
            },
            Transform::from_translation(world_position(&prop.bounds, logical, z)),
        ));
    }
}
