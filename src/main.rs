// Main
mod actor;
mod assets;
mod cast;
mod config;
mod context;
mod director;
mod error;
mod geometry;
mod input;
mod media;
mod rounds;
mod scenery;
mod script;
mod sequencer;
mod stage;
mod timeline;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use assets::AssetCheckPlugin;
use config::GameConfig;
use director::DirectorPlugin;
use media::MediaPlugin;
use scenery::SceneryPlugin;

fn main() -> AppExit {
    let config = GameConfig::default();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.title.clone(),
                        resolution: WindowResolution::new(config.width, config.height),
                        resizable: false,
                        ..default()
                    }),
                    // Closing goes through the game's own quit path.
                    close_when_requested: false,
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: config.asset_root.to_string_lossy().into_owned(),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .set(LogPlugin {
                    filter: "info,wgpu=error,naga=warn,marvellous=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
        .insert_resource(config)
        .add_plugins((AssetCheckPlugin, DirectorPlugin, MediaPlugin, SceneryPlugin))
        .run()
}
