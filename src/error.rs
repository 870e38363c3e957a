use std::path::PathBuf;

use thiserror::Error;

use crate::stage::PropId;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("missing asset {}", .0.display())]
    AssetMissing(PathBuf),
    #[error("prop {0:?} is no longer on stage")]
    StaleProp(PropId),
    #[error("already at the last round ({0})")]
    CampaignExhausted(&'static str),
    #[error("round event cannot go back from {current} to {requested}")]
    BeatRegression { current: u32, requested: u32 },
}
