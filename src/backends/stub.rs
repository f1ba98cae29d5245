//! Always-negative backend used when no XInput library can be loaded.

use crate::device::ControllerApi;
use crate::state::{BatteryInfo, ControllerState};

/// Reports every slot as disconnected and rejects every command.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubBackend;

impl StubBackend {
    pub fn new() -> Self {
        StubBackend
    }
}

impl ControllerApi for StubBackend {
    fn controller_state(&self, _index: u32) -> ControllerState {
        ControllerState::disconnected()
    }

    fn connected_controllers(&self) -> Vec<u32> {
        Vec::new()
    }

    fn set_vibration(&self, _index: u32, _left_motor: f32, _right_motor: f32) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }

    fn battery_info(&self, _index: u32) -> BatteryInfo {
        BatteryInfo::unknown()
    }
}
