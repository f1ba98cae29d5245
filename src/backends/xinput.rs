//! XInput-backed implementation of [`ControllerApi`].
//!
//! The backend calls through a small table of function pointers ([`XInputFns`]) resolved from
//! whichever XInput DLL the [`Loader`](crate::loader::Loader) managed to open. Slots are the
//! usual XInput user indices `0..4`; anything else is answered locally as "not connected"
//! without touching the OS.
//!
//! # Battery support
//! `xinput9_1_0.dll` does not export `XInputGetBatteryInformation`. When the entry point is
//! missing, [`battery_info`](ControllerApi::battery_info) returns an empty [`BatteryInfo`]
//! instead of failing the whole load.

use std::fmt;

use crate::backends::abi::{self, GetBatteryInformationFn, GetStateFn, SetStateFn};
use crate::device::{ControllerApi, MAX_CONTROLLERS};
use crate::state::{BatteryInfo, ControllerState};

/// Entry points of one XInput library.
#[derive(Clone, Copy)]
pub struct XInputFns {
    pub get_state: GetStateFn,
    pub set_state: SetStateFn,
    pub get_battery_information: Option<GetBatteryInformationFn>,
}

impl fmt::Debug for XInputFns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XInputFns")
            .field("get_state", &(self.get_state as usize as *const ()))
            .field("set_state", &(self.set_state as usize as *const ()))
            .field(
                "get_battery_information",
                &self.get_battery_information.map(|p| p as usize as *const ()),
            )
            .finish()
    }
}

/// Real controller backend.
pub struct XInputBackend {
    fns: XInputFns,
    /// Where the entry points came from (a path or a DLL name).
    source: String,
    /// Keeps the DLL mapped for as long as `fns` may be called.
    _library: Option<libloading::Library>,
}

impl XInputBackend {
    /// Build a backend over an arbitrary function table.
    ///
    /// # Safety
    /// Every pointer in `fns` must follow the XInput calling contract: accept any user index,
    /// write only through the provided out-pointer, and stay valid for the lifetime of the
    /// backend.
    pub unsafe fn from_fns(fns: XInputFns, source: impl Into<String>) -> Self {
        Self {
            fns,
            source: source.into(),
            _library: None,
        }
    }

    /// Build a backend whose entry points were resolved from `library`.
    ///
    /// # Safety
    /// Same contract as [`from_fns`](Self::from_fns); the pointers must come from `library`.
    pub(crate) unsafe fn from_library(
        fns: XInputFns,
        source: String,
        library: libloading::Library,
    ) -> Self {
        Self {
            fns,
            source,
            _library: Some(library),
        }
    }

    /// Path or name of the library this backend was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` when the loaded library exports `XInputGetBatteryInformation`.
    pub fn has_battery_support(&self) -> bool {
        self.fns.get_battery_information.is_some()
    }

    #[inline]
    fn in_range(index: u32) -> bool {
        index < MAX_CONTROLLERS
    }
}

impl fmt::Debug for XInputBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XInputBackend")
            .field("source", &self.source)
            .field("fns", &self.fns)
            .finish()
    }
}

impl ControllerApi for XInputBackend {
    fn controller_state(&self, index: u32) -> ControllerState {
        if !Self::in_range(index) {
            return ControllerState::disconnected();
        }

        let mut raw = abi::RawState::default();
        // SAFETY: contract of `from_fns` / the loaded library; `raw` outlives the call.
        let res = unsafe { (self.fns.get_state)(index, &mut raw) };
        if res != abi::ERROR_SUCCESS {
            // ERROR_DEVICE_NOT_CONNECTED for empty slots; anything else is treated the same.
            return ControllerState::disconnected();
        }

        ControllerState::connected(abi::decode_state(&raw))
    }

    fn set_vibration(&self, index: u32, left_motor: f32, right_motor: f32) -> bool {
        if !Self::in_range(index) {
            return false;
        }

        let mut vibration = abi::RawVibration {
            left_motor_speed: abi::motor_speed(left_motor),
            right_motor_speed: abi::motor_speed(right_motor),
        };
        // SAFETY: see `controller_state`.
        let res = unsafe { (self.fns.set_state)(index, &mut vibration) };
        res == abi::ERROR_SUCCESS
    }

    fn is_available(&self) -> bool {
        true
    }

    fn battery_info(&self, index: u32) -> BatteryInfo {
        let Some(get_battery) = self.fns.get_battery_information else {
            return BatteryInfo::unknown();
        };
        if !Self::in_range(index) {
            return BatteryInfo::unknown();
        }

        let mut raw = abi::RawBatteryInformation::default();
        // SAFETY: see `controller_state`.
        let res = unsafe { get_battery(index, abi::BATTERY_DEVTYPE_GAMEPAD, &mut raw) };
        if res != abi::ERROR_SUCCESS {
            return BatteryInfo::unknown();
        }

        abi::decode_battery(&raw)
    }
}
