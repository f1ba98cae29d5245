//! XInput ABI mirrors and decoding.
//!
//! These `#[repr(C)]` structs match the layout of the Win32 `XINPUT_*` types so that function
//! pointers resolved from any XInput DLL can be called with them. Keeping our own copies (rather
//! than the `windows-sys` definitions) lets the decoding and the backend compile and be tested on
//! every platform; on Windows the layouts are checked against `windows-sys` at compile time.

use crate::state::{BatteryInfo, BatteryLevel, BatteryType, Buttons, Gamepad, Stick};

/// `ERROR_SUCCESS`.
pub const ERROR_SUCCESS: u32 = 0;
/// `ERROR_DEVICE_NOT_CONNECTED`.
pub const ERROR_DEVICE_NOT_CONNECTED: u32 = 1167;

pub const GAMEPAD_DPAD_UP: u16 = 0x0001;
pub const GAMEPAD_DPAD_DOWN: u16 = 0x0002;
pub const GAMEPAD_DPAD_LEFT: u16 = 0x0004;
pub const GAMEPAD_DPAD_RIGHT: u16 = 0x0008;
pub const GAMEPAD_START: u16 = 0x0010;
pub const GAMEPAD_BACK: u16 = 0x0020;
pub const GAMEPAD_LEFT_THUMB: u16 = 0x0040;
pub const GAMEPAD_RIGHT_THUMB: u16 = 0x0080;
pub const GAMEPAD_LEFT_SHOULDER: u16 = 0x0100;
pub const GAMEPAD_RIGHT_SHOULDER: u16 = 0x0200;
pub const GAMEPAD_A: u16 = 0x1000;
pub const GAMEPAD_B: u16 = 0x2000;
pub const GAMEPAD_X: u16 = 0x4000;
pub const GAMEPAD_Y: u16 = 0x8000;

/// `BATTERY_DEVTYPE_GAMEPAD`.
pub const BATTERY_DEVTYPE_GAMEPAD: u8 = 0x00;

pub const BATTERY_TYPE_DISCONNECTED: u8 = 0x00;
pub const BATTERY_TYPE_WIRED: u8 = 0x01;
pub const BATTERY_TYPE_ALKALINE: u8 = 0x02;
pub const BATTERY_TYPE_NIMH: u8 = 0x03;
pub const BATTERY_TYPE_UNKNOWN: u8 = 0xFF;

pub const BATTERY_LEVEL_EMPTY: u8 = 0x00;
pub const BATTERY_LEVEL_LOW: u8 = 0x01;
pub const BATTERY_LEVEL_MEDIUM: u8 = 0x02;
pub const BATTERY_LEVEL_FULL: u8 = 0x03;

/// `XINPUT_GAMEPAD`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawGamepad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

/// `XINPUT_STATE`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawState {
    pub packet_number: u32,
    pub gamepad: RawGamepad,
}

/// `XINPUT_VIBRATION`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawVibration {
    pub left_motor_speed: u16,
    pub right_motor_speed: u16,
}

/// `XINPUT_BATTERY_INFORMATION`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawBatteryInformation {
    pub battery_type: u8,
    pub battery_level: u8,
}

/// `XInputGetState`.
pub type GetStateFn = unsafe extern "system" fn(u32, *mut RawState) -> u32;
/// `XInputSetState`.
pub type SetStateFn = unsafe extern "system" fn(u32, *mut RawVibration) -> u32;
/// `XInputGetBatteryInformation`.
pub type GetBatteryInformationFn =
    unsafe extern "system" fn(u32, u8, *mut RawBatteryInformation) -> u32;

#[inline]
/// Normalize a signed thumbstick axis into `[-1, 1]`.
pub fn normalize_thumb(v: i16) -> f32 {
    // Map [-32768, 32767] -> [-1, 1]
    if v >= 0 {
        (v as f32) / 32767.0
    } else {
        (v as f32) / 32768.0
    }
}

#[inline]
/// Normalize an 8-bit trigger into `[0, 1]`.
pub fn normalize_trigger(v: u8) -> f32 {
    (v as f32) / 255.0
}

#[inline]
/// Scale a motor intensity to the 16-bit XInput speed, clamping to `[0, 1]` first.
///
/// NaN is treated as `0`.
pub fn motor_speed(intensity: f32) -> u16 {
    if intensity.is_nan() {
        return 0;
    }
    (intensity.clamp(0.0, 1.0) * 65535.0) as u16
}

pub fn decode_buttons(bits: u16) -> Buttons {
    let on = |mask: u16| bits & mask != 0;
    Buttons {
        dpad_up: on(GAMEPAD_DPAD_UP),
        dpad_down: on(GAMEPAD_DPAD_DOWN),
        dpad_left: on(GAMEPAD_DPAD_LEFT),
        dpad_right: on(GAMEPAD_DPAD_RIGHT),
        start: on(GAMEPAD_START),
        back: on(GAMEPAD_BACK),
        left_thumb: on(GAMEPAD_LEFT_THUMB),
        right_thumb: on(GAMEPAD_RIGHT_THUMB),
        left_shoulder: on(GAMEPAD_LEFT_SHOULDER),
        right_shoulder: on(GAMEPAD_RIGHT_SHOULDER),
        a: on(GAMEPAD_A),
        b: on(GAMEPAD_B),
        x: on(GAMEPAD_X),
        y: on(GAMEPAD_Y),
    }
}

pub fn decode_state(raw: &RawState) -> Gamepad {
    let gp = &raw.gamepad;
    Gamepad {
        buttons: decode_buttons(gp.buttons),
        left_trigger: normalize_trigger(gp.left_trigger),
        right_trigger: normalize_trigger(gp.right_trigger),
        left_stick: Stick {
            x: normalize_thumb(gp.thumb_lx),
            y: normalize_thumb(gp.thumb_ly),
        },
        right_stick: Stick {
            x: normalize_thumb(gp.thumb_rx),
            y: normalize_thumb(gp.thumb_ry),
        },
        packet_number: raw.packet_number,
    }
}

pub fn decode_battery_type(code: u8) -> BatteryType {
    match code {
        BATTERY_TYPE_DISCONNECTED => BatteryType::Disconnected,
        BATTERY_TYPE_WIRED => BatteryType::Wired,
        BATTERY_TYPE_ALKALINE => BatteryType::Alkaline,
        BATTERY_TYPE_NIMH => BatteryType::NiMh,
        _ => BatteryType::Unknown,
    }
}

pub fn decode_battery_level(code: u8) -> BatteryLevel {
    match code {
        BATTERY_LEVEL_EMPTY => BatteryLevel::Empty,
        BATTERY_LEVEL_LOW => BatteryLevel::Low,
        BATTERY_LEVEL_MEDIUM => BatteryLevel::Medium,
        BATTERY_LEVEL_FULL => BatteryLevel::Full,
        _ => BatteryLevel::Unknown,
    }
}

pub fn decode_battery(raw: &RawBatteryInformation) -> BatteryInfo {
    BatteryInfo {
        kind: Some(decode_battery_type(raw.battery_type)),
        level: Some(decode_battery_level(raw.battery_level)),
    }
}

#[cfg(target_os = "windows")]
const _: () = {
    use std::mem::size_of;
    use windows_sys::Win32::UI::Input::XboxController::{
        XINPUT_BATTERY_INFORMATION, XINPUT_GAMEPAD, XINPUT_STATE, XINPUT_VIBRATION,
    };

    assert!(size_of::<RawGamepad>() == size_of::<XINPUT_GAMEPAD>());
    assert!(size_of::<RawState>() == size_of::<XINPUT_STATE>());
    assert!(size_of::<RawVibration>() == size_of::<XINPUT_VIBRATION>());
    assert!(size_of::<RawBatteryInformation>() == size_of::<XINPUT_BATTERY_INFORMATION>());
};
