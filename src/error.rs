//! Error types.
//!
//! These never reach callers of [`ControllerApi`](crate::device::ControllerApi): load failures
//! are recorded by the [`Loader`](crate::loader::Loader) and replaced by the stub backend.

use std::path::PathBuf;

use thiserror::Error;

/// Why one loader candidate could not produce a backend.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("library loading error: {0}")]
    Library(#[from] libloading::Error),

    #[error("`{target}` does not export {symbol}")]
    MissingSymbol {
        target: String,
        symbol: &'static str,
    },

    #[error("XInput libraries can only be loaded on Windows")]
    Unsupported,

    #[error("loader panicked while opening `{target}`: {message}")]
    Panicked { target: String, message: String },
}

/// Failure to read a loader configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
