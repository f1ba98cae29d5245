//! Text dashboard used by the `monitor` demo.

use std::fmt;

use crate::state::{BatteryInfo, Gamepad};

/// ANSI "clear screen, cursor home".
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[0;0H";

/// One gamepad snapshot laid out for the terminal. Has no trailing newline.
#[derive(Clone, Copy, Debug)]
pub struct Dashboard<'a> {
    pub index: u32,
    pub gamepad: &'a Gamepad,
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.gamepad;
        let title = format!("xinput-monitor - Live Input (controller {})", self.index);
        writeln!(f, "{title}")?;
        writeln!(f, "{}\n", "=".repeat(title.len()))?;

        writeln!(f, "STICKS:")?;
        writeln!(
            f,
            "  Left:  X={:>6.2} Y={:>6.2}",
            g.left_stick.x, g.left_stick.y
        )?;
        writeln!(
            f,
            "  Right: X={:>6.2} Y={:>6.2}",
            g.right_stick.x, g.right_stick.y
        )?;
        writeln!(f)?;

        writeln!(f, "TRIGGERS:")?;
        writeln!(
            f,
            "  LT: {:>5.2}  RT: {:>5.2}",
            g.left_trigger, g.right_trigger
        )?;
        writeln!(f)?;

        let pressed = g.buttons.pressed_labels();
        writeln!(f, "BUTTONS:")?;
        if pressed.is_empty() {
            writeln!(f, "  (none)")?;
        } else {
            writeln!(f, "  {}", pressed.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Packet: {}", g.packet_number)?;
        write!(f, "Press Ctrl+C to exit.")
    }
}

/// Render one gamepad snapshot.
pub fn render(index: u32, gamepad: &Gamepad) -> String {
    Dashboard { index, gamepad }.to_string()
}

/// `"Wired - Unknown"` style summary; absent fields print as `Unknown`.
pub fn battery_line(info: &BatteryInfo) -> String {
    let kind = info
        .kind
        .map(|k| k.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let level = info
        .level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    format!("{kind} - {level}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BatteryLevel, BatteryType, Buttons, Stick};

    #[test]
    fn idle_pad_renders_none() {
        let text = render(0, &Gamepad::default());
        assert!(text.contains("  Left:  X=  0.00 Y=  0.00"));
        assert!(text.contains("  LT:  0.00  RT:  0.00"));
        assert!(text.contains("BUTTONS:\n  (none)"));
        assert!(text.ends_with("Press Ctrl+C to exit."));
    }

    #[test]
    fn active_pad_renders_values_and_buttons() {
        let g = Gamepad {
            buttons: Buttons {
                a: true,
                dpad_up: true,
                ..Buttons::default()
            },
            left_trigger: 1.0,
            right_trigger: 0.25,
            left_stick: Stick { x: -1.0, y: 0.5 },
            right_stick: Stick::CENTER,
            packet_number: 77,
        };
        let text = render(2, &g);
        assert!(text.starts_with("xinput-monitor - Live Input (controller 2)\n"));
        assert!(text.contains("  Left:  X= -1.00 Y=  0.50"));
        assert!(text.contains("  LT:  1.00  RT:  0.25"));
        assert!(text.contains("  A, Up\n"));
        assert!(text.contains("Packet: 77"));
    }

    #[test]
    fn title_underline_matches_title_width() {
        let text = render(3, &Gamepad::default());
        let mut lines = text.lines();
        let title = lines.next().unwrap();
        let rule = lines.next().unwrap();
        assert_eq!(rule.len(), title.len());
        assert!(rule.chars().all(|c| c == '='));
    }

    #[test]
    fn battery_line_fills_unknowns() {
        assert_eq!(battery_line(&BatteryInfo::unknown()), "Unknown - Unknown");
        let info = BatteryInfo {
            kind: Some(BatteryType::Alkaline),
            level: Some(BatteryLevel::Low),
        };
        assert_eq!(battery_line(&info), "Alkaline - Low");
        let info = BatteryInfo {
            kind: Some(BatteryType::NiMh),
            level: None,
        };
        assert_eq!(battery_line(&info), "NiMH - Unknown");
    }
}
