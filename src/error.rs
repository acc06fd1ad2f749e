use thiserror::Error;

/// Parameter combinations rejected before generation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas must be non-empty, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    Config(#[from] ConfigError),
    #[error("could not allocate a {0}x{1} canvas")]
    Canvas(u32, u32),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad params file: {0}")]
    Params(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
