//! Controller backends for `xinput-bridge`.
//!
//! Implementations of [`ControllerApi`](crate::device::ControllerApi):
//! - [`XInputBackend`]: calls into a loaded XInput DLL (Windows).
//! - [`StubBackend`]: always reports "nothing there"; used on every other platform and
//!   whenever loading fails.
//!
//! [`Backend`] is the closed set of the two, selected once by the
//! [`Loader`](crate::loader::Loader) and handed to consumers.

use crate::device::ControllerApi;
use crate::state::{BatteryInfo, ControllerState};

pub mod abi;
pub mod library;
pub mod stub;
pub mod xinput;

pub use stub::StubBackend;
pub use xinput::{XInputBackend, XInputFns};

/// The backend chosen at startup.
#[derive(Debug)]
pub enum Backend {
    XInput(XInputBackend),
    Stub(StubBackend),
}

impl Backend {
    pub fn stub() -> Self {
        Backend::Stub(StubBackend::new())
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Backend::Stub(_))
    }

    /// Human-readable origin: the library path/name, or `"stub"`.
    pub fn describe(&self) -> &str {
        match self {
            Backend::XInput(b) => b.source(),
            Backend::Stub(_) => "stub",
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Backend::stub()
    }
}

impl ControllerApi for Backend {
    fn controller_state(&self, index: u32) -> ControllerState {
        match self {
            Backend::XInput(b) => b.controller_state(index),
            Backend::Stub(b) => b.controller_state(index),
        }
    }

    fn connected_controllers(&self) -> Vec<u32> {
        match self {
            Backend::XInput(b) => b.connected_controllers(),
            Backend::Stub(b) => b.connected_controllers(),
        }
    }

    fn set_vibration(&self, index: u32, left_motor: f32, right_motor: f32) -> bool {
        match self {
            Backend::XInput(b) => b.set_vibration(index, left_motor, right_motor),
            Backend::Stub(b) => b.set_vibration(index, left_motor, right_motor),
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Backend::XInput(b) => b.is_available(),
            Backend::Stub(b) => b.is_available(),
        }
    }

    fn battery_info(&self, index: u32) -> BatteryInfo {
        match self {
            Backend::XInput(b) => b.battery_info(index),
            Backend::Stub(b) => b.battery_info(index),
        }
    }
}
