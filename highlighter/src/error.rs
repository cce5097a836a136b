#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("loading kills: {0}")]
    Source(#[from] SourceError),
    #[error("serializing highlights: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("writing {path:?}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("building highlights: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("cancelled before highlights were built")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("steamid is required")]
    SteamIdRequired,
    #[error("steamid must be a 17-digit steamid64")]
    SteamIdLength,
    #[error("steamid must contain digits only")]
    SteamIdDigits,
    #[error("{flag} must be >= 0")]
    Negative { flag: &'static str },
    #[error("{flag} is out of range")]
    OutOfRange { flag: &'static str },
    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("kill log path is required")]
    Required,
    #[error("kill log must have .json extension: {0:?}")]
    InvalidExtension(std::path::PathBuf),
    #[error("kill log path must point to a regular file: {0:?}")]
    NotRegularFile(std::path::PathBuf),
    #[error("kill log is empty: {0:?}")]
    Empty(std::path::PathBuf),
    #[error("kill log check failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("reading kill log: {0}")]
    Io(#[source] std::io::Error),
    #[error("decoding kill log: {0}")]
    Decode(#[from] serde_json::Error),
}
