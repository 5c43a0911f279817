use catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("an architecture name is required")]
    MissingArch,

    #[error("worker count must be at least 1")]
    ZeroJobs,

    #[error("maximum fault multiplicity must be at least 1")]
    ZeroBits,

    #[error("maximum fault multiplicity {0} exceeds the 32-bit encoding limit")]
    TooManyBits(u32),

    #[error("encoding width {0} exceeds the 32-bit encoding limit")]
    UnsupportedWidth(u32),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
