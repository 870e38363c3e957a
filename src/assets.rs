// Startup check that every image and sound the story can ask for is on disk.
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::cast::{Look, VoiceLine, MUSIC_PATH};
use crate::error::GameError;
use crate::rounds::Backdrop;

/// Every asset path the game loads, relative to the asset root.
pub fn manifest() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = Look::iter()
        .flat_map(|look| look.frames().iter().copied())
        .chain(VoiceLine::iter().map(VoiceLine::path))
        .chain(Backdrop::iter().map(Backdrop::path))
        .collect();
    paths.push(MUSIC_PATH);
    paths
}

pub fn missing(root: &Path) -> Vec<PathBuf> {
    manifest()
        .into_iter()
        .map(|path| root.join(path))
        .filter(|path| !path.is_file())
        .collect()
}

pub fn verify(root: &Path) -> Result<(), GameError> {
    match missing(root).into_iter().next() {
        Some(path) => Err(GameError::AssetMissing(path)),
        None => Ok(()),
    }
}

pub struct AssetCheckPlugin;

impl Plugin for AssetCheckPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(PreStartup, check_assets);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn check_assets(config: Res<crate::config::GameConfig>, mut exit: MessageWriter<AppExit>) {
    use bevy::asset::io::file::FileAssetReader;

    let root = FileAssetReader::get_base_path().join(&config.asset_root);
    if let Err(err) = verify(&root) {
        let count = missing(&root).len();
        error!("{err} ({count} missing under {})", root.display());
        exit.write(AppExit::error());
        return;
    }
    info!("all {} assets present under {}", manifest().len(), root.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_has_no_duplicates() {
        let paths = manifest();
        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn missing_root_reports_the_first_asset() {
        let root = Path::new("definitely/not/an/asset/root");
        let err = verify(root).unwrap_err();
        match err {
            GameError::AssetMissing(path) => assert!(path.starts_with(root)),
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(missing(root).len(), manifest().len());
    }
}
