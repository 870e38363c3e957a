use std::path::PathBuf;

use bevy::prelude::*;

/// Tunables shared by the sequencer and the engine adapters.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    /// Logical display size. Everything on stage is placed in these units.
    pub width: u32,
    pub height: u32,
    /// Fixed update rate of the game loop.
    pub tick_hz: f64,
    /// Pixels per tick while the steering keys are held.
    pub player_speed: f32,
    /// Animation frames per tick for the player.
    pub player_stride: f32,
    /// Animation frames per tick for everyone else.
    pub stride_step: f32,
    /// Walking past this x ends a round once its objectives are met.
    pub exit_x: f32,
    pub asset_root: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Marvellous".to_string(),
            width: 800,
            height: 600,
            tick_hz: 60.0,
            player_speed: 4.0,
            player_stride: 0.2,
            stride_step: 0.14,
            exit_x: 720.0,
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}
