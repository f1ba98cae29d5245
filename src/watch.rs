//! Packet-number change detection for polling loops.

use crate::state::{ControllerState, Gamepad};

/// Classification of one poll relative to the previous one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Observation<'a> {
    Disconnected,
    /// Same packet number as last time; nothing to redraw.
    Unchanged,
    Changed(&'a Gamepad),
}

/// Remembers the last packet number seen for one slot.
///
/// A disconnect forgets it, so the first poll after a reconnect is always reported as changed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PacketWatch {
    last: Option<u32>,
}

impl PacketWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe<'a>(&mut self, state: &'a ControllerState) -> Observation<'a> {
        match state.gamepad() {
            Some(gamepad) => {
                if self.last == Some(gamepad.packet_number) {
                    return Observation::Unchanged;
                }
                self.last = Some(gamepad.packet_number);
                Observation::Changed(gamepad)
            }
            None => {
                self.last = None;
                Observation::Disconnected
            }
        }
    }

    pub fn last_packet(&self) -> Option<u32> {
        self.last
    }
}
