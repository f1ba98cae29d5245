//! Backend resolution.
//!
//! The [`Loader`] turns a [`LoaderConfig`] into an ordered list of [`Candidate`]s and tries them
//! one by one; the first candidate that opens wins. If none does, the result is the
//! [`StubBackend`](crate::backends::StubBackend), so loading never fails.
//!
//! # Resolution order
//! 1. [`Step::Prebuilt`]: every tolerated file name under `{prebuild_dir}/{os}-{arch}/`.
//! 2. [`Step::SystemSearch`]: every system DLL name, resolved by the OS search order.
//! 3. [`Step::LocalBuild`]: every tolerated file name under `local_build_dir`.
//!
//! Path candidates are made absolute when the plan is built, so the file checked for existence
//! is the file handed to the OS (a relative path would go through the DLL search order instead).
//! Path candidates that do not exist are skipped without being opened. On platforms without
//! XInput the plan is empty and the stub is returned without a diagnostic.

use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::backends::{Backend, XInputBackend};
use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Which resolution step produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Prebuilt,
    SystemSearch,
    LocalBuild,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Prebuilt => "prebuilt",
            Step::SystemSearch => "system",
            Step::LocalBuild => "local build",
        })
    }
}

/// What to open.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A concrete file.
    Path(PathBuf),
    /// A bare library name for the OS search path.
    Name(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(p) => write!(f, "{}", p.display()),
            Target::Name(n) => f.write_str(n),
        }
    }
}

/// One resolution attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub step: Step,
    pub target: Target,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.step, self.target)
    }
}

/// A candidate that did not produce a backend.
#[derive(Debug)]
pub struct AttemptFailure {
    pub candidate: Candidate,
    pub error: LoadError,
}

/// Outcome of [`Loader::load`]: always a usable backend, plus what went wrong on the way.
#[derive(Debug)]
pub struct Loaded {
    pub backend: Backend,
    /// The candidate that produced `backend`, or `None` for the stub.
    pub chosen: Option<Candidate>,
    pub failures: Vec<AttemptFailure>,
}

/// Resolves the XInput backend for a configuration.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Candidates in resolution order. Empty when the target platform has no XInput.
    ///
    /// Path targets are absolute (resolved against the current directory).
    pub fn plan(&self) -> Vec<Candidate> {
        let cfg = &self.config;
        if !cfg.platform.has_xinput() {
            return Vec::new();
        }

        let prebuild_dir = cfg.platform_prebuild_dir();
        let prebuilt = cfg.prebuild_names.iter().map(|name| Candidate {
            step: Step::Prebuilt,
            target: Target::Path(absolute(&prebuild_dir.join(name))),
        });
        let system = cfg.system_names.iter().map(|name| Candidate {
            step: Step::SystemSearch,
            target: Target::Name(name.clone()),
        });
        let local = cfg.prebuild_names.iter().map(|name| Candidate {
            step: Step::LocalBuild,
            target: Target::Path(absolute(&cfg.local_build_dir.join(name))),
        });

        prebuilt.chain(system).chain(local).collect()
    }

    /// Resolve with the platform's real library opener.
    pub fn load(&self) -> Loaded {
        self.load_with(crate::backends::library::open)
    }

    /// Resolve with a caller-supplied opener.
    ///
    /// `open` is only called for name candidates and for path candidates that exist on disk.
    /// A panic inside `open` is caught and recorded as that candidate's failure.
    pub fn load_with<F>(&self, mut open: F) -> Loaded
    where
        F: FnMut(&Candidate) -> Result<XInputBackend, LoadError>,
    {
        let plan = self.plan();
        if plan.is_empty() {
            tracing::debug!(platform = %self.config.platform, "no XInput on this platform, using stub");
            return Loaded {
                backend: Backend::stub(),
                chosen: None,
                failures: Vec::new(),
            };
        }

        let mut failures = Vec::new();
        for candidate in plan {
            tracing::debug!(%candidate, "trying XInput candidate");
            #[cfg(feature = "debug-log")]
            eprintln!("[XINPUT/LOAD] trying {}", candidate);

            match try_candidate(&candidate, &mut open) {
                Ok(backend) => {
                    tracing::info!(%candidate, "loaded XInput backend");
                    return Loaded {
                        backend: Backend::XInput(backend),
                        chosen: Some(candidate),
                        failures,
                    };
                }
                Err(error) => {
                    tracing::debug!(%candidate, %error, "candidate rejected");
                    failures.push(AttemptFailure { candidate, error });
                }
            }
        }

        tracing::warn!(
            attempts = failures.len(),
            "failed to load an XInput library, falling back to stub"
        );
        // Nothing useful to do if stderr itself is gone.
        let _ = write_fallback_report(&mut io::stderr().lock(), &failures);
        Loaded {
            backend: Backend::stub(),
            chosen: None,
            failures,
        }
    }
}

fn try_candidate<F>(candidate: &Candidate, open: &mut F) -> Result<XInputBackend, LoadError>
where
    F: FnMut(&Candidate) -> Result<XInputBackend, LoadError>,
{
    if let Target::Path(path) = &candidate.target {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.clone()));
        }
    }

    match panic::catch_unwind(AssertUnwindSafe(|| open(candidate))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(LoadError::Panicked {
                target: candidate.target.to_string(),
                message,
            })
        }
    }
}

/// `path` made absolute; falls back to `path` itself if the current directory is unavailable.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Diagnostic printed to stderr when every candidate failed.
pub(crate) fn write_fallback_report<W: Write>(
    out: &mut W,
    failures: &[AttemptFailure],
) -> io::Result<()> {
    writeln!(
        out,
        "xinput-bridge: failed to load XInput library, using stub backend"
    )?;
    for f in failures {
        writeln!(out, "  {}: {}", f.candidate, f.error)?;
    }
    Ok(())
}
