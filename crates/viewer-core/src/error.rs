use thiserror::Error;

/// Errors surfaced by a viewer or sound simulator instance.
///
/// None of these are fatal to the page; each is scoped to one mounted
/// instance and cleared by mounting it again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("failed to load {asset}: {reason}")]
    AssetLoadFailure { asset: String, reason: String },
    #[error("audio playback needs a user gesture before it can start")]
    AudioContextBlocked,
    #[error("duplicate hotspot id '{0}'")]
    DuplicateHotspot(String),
    #[error("unknown drone model '{0}'")]
    UnknownModel(String),
    #[error("asset has not finished loading")]
    NotReady,
    #[error("instance has been torn down")]
    TornDown,
}

impl ViewerError {
    pub fn asset_load(asset: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoadFailure {
            asset: asset.into(),
            reason: reason.to_string(),
        }
    }
}
