use catalog::CatalogError;
use runtime::HostError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("host container is not available")]
    HostUnavailable,
    #[error("rendering surface is already detached")]
    SurfaceDetached,
    #[error("rendering surface failed: {0}")]
    Surface(String),
    #[error("view has been torn down")]
    TornDown,
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
