//! Loader configuration.
//!
//! [`LoaderConfig`] says where the [`Loader`](crate::loader::Loader) looks for an XInput
//! library. Defaults work out of the box; a TOML file and environment variables can move the
//! directories or change the tolerated file names.
//!
//! ```toml
//! prebuild_dir = "vendor/prebuilds"
//! local_build_dir = "target/xinput"
//! prebuild_names = ["xinput1_4.dll"]
//! ```
//!
//! ## Environment overrides
//! - `XINPUT_BRIDGE_PREBUILDS`: replaces `prebuild_dir`.
//! - `XINPUT_BRIDGE_BUILD_DIR`: replaces `local_build_dir`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_PREBUILD_DIR: &str = "XINPUT_BRIDGE_PREBUILDS";
pub const ENV_LOCAL_BUILD_DIR: &str = "XINPUT_BRIDGE_BUILD_DIR";

/// `{os}-{arch}` pair keying a prebuild subdirectory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The running process (`std::env::consts`).
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Only Windows has a real XInput backend.
    pub fn has_xinput(&self) -> bool {
        self.os == "windows"
    }
}

impl Default for PlatformKey {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Search locations for the XInput library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Root of the `{os}-{arch}` prebuild tree.
    pub prebuild_dir: PathBuf,
    /// Conventional output directory of a local build.
    pub local_build_dir: PathBuf,
    /// File names tolerated inside the prebuild and local build directories, in order.
    pub prebuild_names: Vec<String>,
    /// Names handed to the OS library search path, in order.
    pub system_names: Vec<String>,
    pub platform: PlatformKey,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            prebuild_dir: PathBuf::from("prebuilds"),
            local_build_dir: PathBuf::from("build").join("Release"),
            prebuild_names: ["xinput.dll", "xinput1_4.dll", "xinput1_3.dll", "xinput9_1_0.dll"]
                .map(String::from)
                .to_vec(),
            system_names: ["xinput1_4.dll", "xinput1_3.dll", "xinput9_1_0.dll"]
                .map(String::from)
                .to_vec(),
            platform: PlatformKey::current(),
        }
    }
}

impl LoaderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `XINPUT_BRIDGE_PREBUILDS` / `XINPUT_BRIDGE_BUILD_DIR` if set and non-empty.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var_os(key))
    }

    pub(crate) fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<std::ffi::OsString>,
    ) -> Self {
        if let Some(dir) = lookup(ENV_PREBUILD_DIR).filter(|v| !v.is_empty()) {
            self.prebuild_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_LOCAL_BUILD_DIR).filter(|v| !v.is_empty()) {
            self.local_build_dir = PathBuf::from(dir);
        }
        self
    }

    /// `{prebuild_dir}/{os}-{arch}`.
    pub fn platform_prebuild_dir(&self) -> PathBuf {
        self.prebuild_dir.join(self.platform.to_string())
    }
}
