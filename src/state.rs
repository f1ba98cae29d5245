//! Controller snapshots.
//!
//! Every query against a [`ControllerApi`](crate::device::ControllerApi) produces a fresh,
//! owned value from this module. Nothing here is mutated after construction.
//!
//! ## Value conventions
//! - **Sticks:** both axes normalized to `[-1.0, 1.0]`, `(0, 0)` is neutral, up is `+y`.
//! - **Triggers:** normalized to `[0.0, 1.0]` (released = `0.0`).
//! - **Packet number:** backend-maintained counter; equal numbers on consecutive polls of
//!   the same slot mean nothing changed.
//!
//! ## Serialization
//! Field names serialize in camelCase (`leftTrigger`, `packetNumber`, ...). Absent battery
//! fields are skipped, so an unsupported battery query serializes as `{}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Digital button flags of an Xbox-layout gamepad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buttons {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub start: bool,
    pub back: bool,
    /// Left stick click (L3).
    pub left_thumb: bool,
    /// Right stick click (R3).
    pub right_thumb: bool,
    pub left_shoulder: bool,
    pub right_shoulder: bool,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
}

impl Buttons {
    /// Short labels of every pressed button.
    ///
    /// Order is fixed: face buttons, shoulders, stick clicks, Start/Back, then the D-pad.
    pub fn pressed_labels(&self) -> Vec<&'static str> {
        let table: [(bool, &'static str); 14] = [
            (self.a, "A"),
            (self.b, "B"),
            (self.x, "X"),
            (self.y, "Y"),
            (self.left_shoulder, "LB"),
            (self.right_shoulder, "RB"),
            (self.left_thumb, "L3"),
            (self.right_thumb, "R3"),
            (self.start, "Start"),
            (self.back, "Back"),
            (self.dpad_up, "Up"),
            (self.dpad_down, "Down"),
            (self.dpad_left, "Left"),
            (self.dpad_right, "Right"),
        ];

        table
            .iter()
            .filter_map(|&(on, label)| if on { Some(label) } else { None })
            .collect()
    }

    /// `true` when no button is held.
    pub fn is_idle(&self) -> bool {
        *self == Buttons::default()
    }
}

/// Analog stick position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

impl Stick {
    /// Neutral position `(0, 0)`.
    pub const CENTER: Stick = Stick { x: 0.0, y: 0.0 };
}

/// Full input snapshot of a connected gamepad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gamepad {
    pub buttons: Buttons,
    pub left_trigger: f32,
    pub right_trigger: f32,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub packet_number: u32,
}

/// Result of a single state query.
///
/// `gamepad` is present exactly when the controller is connected. Fields are private; build
/// one with [`disconnected`](Self::disconnected) or [`connected`](Self::connected).
/// Deserialization rejects input that breaks the pairing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireControllerState")]
pub struct ControllerState {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    gamepad: Option<Gamepad>,
}

impl ControllerState {
    /// Empty slot, unplugged pad, stub backend, or out-of-range index.
    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            gamepad: None,
        }
    }

    pub const fn connected(gamepad: Gamepad) -> Self {
        Self {
            connected: true,
            gamepad: Some(gamepad),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Input snapshot; `None` iff disconnected.
    pub fn gamepad(&self) -> Option<&Gamepad> {
        self.gamepad.as_ref()
    }
}

#[derive(Deserialize)]
struct WireControllerState {
    connected: bool,
    #[serde(default)]
    gamepad: Option<Gamepad>,
}

impl TryFrom<WireControllerState> for ControllerState {
    type Error = String;

    fn try_from(wire: WireControllerState) -> Result<Self, Self::Error> {
        match (wire.connected, wire.gamepad) {
            (true, Some(gamepad)) => Ok(ControllerState::connected(gamepad)),
            (false, None) => Ok(ControllerState::disconnected()),
            (true, None) => Err("connected controller state is missing `gamepad`".to_string()),
            (false, Some(_)) => Err("disconnected controller state carries `gamepad`".to_string()),
        }
    }
}

/// Power source reported for a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryType {
    Disconnected,
    Wired,
    Alkaline,
    #[serde(rename = "NiMH")]
    NiMh,
    Unknown,
}

/// Coarse charge level reported for a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryLevel {
    Empty,
    Low,
    Medium,
    Full,
    Unknown,
}

impl fmt::Display for BatteryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatteryType::Disconnected => "Disconnected",
            BatteryType::Wired => "Wired",
            BatteryType::Alkaline => "Alkaline",
            BatteryType::NiMh => "NiMH",
            BatteryType::Unknown => "Unknown",
        })
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatteryLevel::Empty => "Empty",
            BatteryLevel::Low => "Low",
            BatteryLevel::Medium => "Medium",
            BatteryLevel::Full => "Full",
            BatteryLevel::Unknown => "Unknown",
        })
    }
}

/// Battery query result. Both fields are `None` when the platform, device or backend cannot
/// answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BatteryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<BatteryLevel>,
}

impl BatteryInfo {
    /// Nothing known.
    pub const fn unknown() -> Self {
        Self {
            kind: None,
            level: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.level.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_state_has_no_gamepad() {
        let s = ControllerState::disconnected();
        assert!(!s.is_connected());
        assert!(s.gamepad().is_none());
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"connected":false}"#);
    }

    #[test]
    fn gamepad_serializes_in_camel_case() {
        let g = Gamepad {
            packet_number: 7,
            ..Gamepad::default()
        };
        let v = serde_json::to_value(ControllerState::connected(g)).unwrap();
        assert_eq!(v["connected"], true);
        assert_eq!(v["gamepad"]["packetNumber"], 7);
        assert_eq!(v["gamepad"]["leftTrigger"], 0.0);
        assert_eq!(v["gamepad"]["buttons"]["dpadUp"], false);
        assert_eq!(v["gamepad"]["leftStick"]["x"], 0.0);
    }

    #[test]
    fn deserialize_enforces_gamepad_iff_connected() {
        let err = serde_json::from_str::<ControllerState>(r#"{"connected":true}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<ControllerState>(
            r#"{"connected":false,"gamepad":{"buttons":{"dpadUp":false,"dpadDown":false,"dpadLeft":false,"dpadRight":false,"start":false,"back":false,"leftThumb":false,"rightThumb":false,"leftShoulder":false,"rightShoulder":false,"a":false,"b":false,"x":false,"y":false},"leftTrigger":0.0,"rightTrigger":0.0,"leftStick":{"x":0.0,"y":0.0},"rightStick":{"x":0.0,"y":0.0},"packetNumber":1}}"#,
        );
        assert!(err.is_err());

        let s: ControllerState = serde_json::from_str(r#"{"connected":false}"#).unwrap();
        assert_eq!(s, ControllerState::disconnected());

        let connected = ControllerState::connected(Gamepad {
            packet_number: 3,
            ..Gamepad::default()
        });
        let back: ControllerState =
            serde_json::from_str(&serde_json::to_string(&connected).unwrap()).unwrap();
        assert!(back.is_connected());
        assert_eq!(back.gamepad().map(|g| g.packet_number), Some(3));
    }

    #[test]
    fn empty_battery_info_serializes_as_empty_object() {
        assert_eq!(serde_json::to_string(&BatteryInfo::unknown()).unwrap(), "{}");
    }

    #[test]
    fn battery_info_uses_display_names() {
        let info = BatteryInfo {
            kind: Some(BatteryType::NiMh),
            level: Some(BatteryLevel::Medium),
        };
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"type":"NiMH","level":"Medium"}"#
        );
    }

    #[test]
    fn pressed_labels_follow_fixed_order() {
        let b = Buttons {
            dpad_left: true,
            start: true,
            a: true,
            right_shoulder: true,
            ..Buttons::default()
        };
        assert_eq!(b.pressed_labels(), vec!["A", "RB", "Start", "Left"]);
        assert!(!b.is_idle());
        assert!(Buttons::default().pressed_labels().is_empty());
    }
}
