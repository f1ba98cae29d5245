//! The controller capability every backend implements.

use crate::state::{BatteryInfo, ControllerState};

/// Number of XInput user slots.
pub const MAX_CONTROLLERS: u32 = 4;

/// Query/command surface shared by the real XInput backend and the stub.
///
/// None of these methods fail: unsupported platforms, empty slots, out-of-range indices and
/// OS errors all come back as `connected: false`, an empty list, `false`, or an empty
/// [`BatteryInfo`]. Callers can poll unconditionally, once per frame.
pub trait ControllerApi: Send + Sync {
    /// Current state of slot `index` (`0..4`).
    fn controller_state(&self, index: u32) -> ControllerState;

    /// Slots currently reporting connected, ascending, without duplicates.
    fn connected_controllers(&self) -> Vec<u32> {
        (0..MAX_CONTROLLERS)
            .filter(|&i| self.controller_state(i).is_connected())
            .collect()
    }

    /// Set rumble intensity for both motors. Values outside `[0, 1]` are clamped.
    ///
    /// Returns `true` only if the device accepted the command.
    fn set_vibration(&self, index: u32, left_motor: f32, right_motor: f32) -> bool;

    /// `true` only when backed by a loaded XInput library.
    fn is_available(&self) -> bool;

    /// Battery type and charge level of slot `index`.
    ///
    /// Both fields are `None` when the platform, device or backend cannot answer.
    fn battery_info(&self, index: u32) -> BatteryInfo;
}
