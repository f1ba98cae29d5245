//! xinput-bridge — Xbox controller access through XInput.
//!
//! On Windows the [`Loader`] maps an XInput DLL and the resulting [`Backend`] reads the four
//! controller slots, drives rumble and reports battery state. Everywhere else (and whenever no
//! library can be loaded) the backend is a stub that reports nothing connected.
//!
//! ```no_run
//! use xinput_bridge::ControllerApi;
//!
//! let pads = xinput_bridge::load();
//! for index in pads.connected_controllers() {
//!     let state = pads.controller_state(index);
//!     println!("{index}: {:?}", state.gamepad().map(|g| g.buttons.pressed_labels()));
//! }
//! ```

pub mod backends;
pub mod config;
pub mod dashboard;
pub mod device;
pub mod error;
pub mod harness;
pub mod loader;
pub mod state;
pub mod watch;

pub use backends::{Backend, StubBackend, XInputBackend, XInputFns};
pub use config::{LoaderConfig, PlatformKey};
pub use device::*;
pub use error::{ConfigError, LoadError};
pub use loader::{Candidate, Loaded, Loader, Step, Target};
pub use state::*;
pub use watch::{Observation, PacketWatch};

/// Resolve the backend with the default configuration plus environment overrides.
///
/// Never fails; falls back to the stub and prints a diagnostic to stderr if a Windows host
/// has no loadable XInput library.
pub fn load() -> Backend {
    Loader::new(LoaderConfig::default().with_env()).load().backend
}
