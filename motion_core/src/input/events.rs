use motion_schema::{Handedness, InputFrame, Millis, HAND_LANDMARK_COUNT};

use crate::gesture::is_hand_closed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GripEvent {
    pub hand: Handedness,
    /// Elapsed session time of the frame that closed the hand.
    pub at_ms: Millis,
}

/// Turns per-frame closed/not-closed into open-to-closed edges per hand.
///
/// A hand missing from a frame (or cut short) keeps its last state; only
/// a frame that shows the hand open re-arms the trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GripTracker {
    left_closed: bool,
    right_closed: bool,
}

impl GripTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, frame: &InputFrame, at_ms: Millis) -> Vec<GripEvent> {
        let mut events = Vec::new();
        for hand in [Handedness::Left, Handedness::Right] {
            let Some(landmarks) = frame.hand(hand).filter(|lm| lm.len() >= HAND_LANDMARK_COUNT) else {
                continue;
            };
            let closed = is_hand_closed(landmarks);
            let was_closed = match hand {
                Handedness::Left => std::mem::replace(&mut self.left_closed, closed),
                Handedness::Right => std::mem::replace(&mut self.right_closed, closed),
            };
            if closed && !was_closed {
                events.push(GripEvent { hand, at_ms });
            }
        }
        events
    }

    pub fn is_closed(&self, hand: Handedness) -> bool {
        match hand {
            Handedness::Left => self.left_closed,
            Handedness::Right => self.right_closed,
        }
    }
}
