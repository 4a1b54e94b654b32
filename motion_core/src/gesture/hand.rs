//! Single-frame hand classifiers over the 21-point hand layout.
//!
//! Every function accepts arrays of any length and answers "no gesture"
//! when the array is too short.

use motion_schema::{Landmark, HAND_LANDMARK_COUNT};

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, pip, mcp) for index, middle, ring, pinky.
const FINGERS: [(usize, usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_PIP, MIDDLE_MCP),
    (RING_TIP, RING_PIP, RING_MCP),
    (PINKY_TIP, PINKY_PIP, PINKY_MCP),
];

const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Fingers that must agree before the hand counts as open or closed.
pub const FINGER_QUORUM: usize = 3;
pub const SPREAD_THRESHOLD: f32 = 0.08;
pub const TOUCH_RADIUS: f32 = 0.05;

fn has_hand(landmarks: &[Landmark]) -> bool {
    landmarks.len() >= HAND_LANDMARK_COUNT
}

/// Curled fingers have their tip below the PIP joint in image space.
pub fn is_hand_closed(landmarks: &[Landmark]) -> bool {
    if !has_hand(landmarks) {
        return false;
    }
    let curled = FINGERS
        .iter()
        .filter(|(tip, pip, _)| landmarks[*tip].y > landmarks[*pip].y)
        .count();
    curled >= FINGER_QUORUM
}

/// Extended fingers have their tip above the knuckle in image space.
pub fn is_hand_open(landmarks: &[Landmark]) -> bool {
    if !has_hand(landmarks) {
        return false;
    }
    let extended = FINGERS
        .iter()
        .filter(|(tip, _, mcp)| landmarks[*tip].y < landmarks[*mcp].y)
        .count();
    extended >= FINGER_QUORUM
}

pub fn is_fingers_spread(landmarks: &[Landmark]) -> bool {
    if !has_hand(landmarks) {
        return false;
    }
    let gaps: f32 = FINGER_TIPS
        .windows(2)
        .map(|pair| landmarks[pair[0]].distance(&landmarks[pair[1]]))
        .sum();
    let mean_gap = gaps / (FINGER_TIPS.len() - 1) as f32;
    mean_gap > SPREAD_THRESHOLD
}

/// 1-based finger (1 = index .. 4 = pinky) touching the thumb tip.
pub fn thumb_to_finger_touching(landmarks: &[Landmark]) -> Option<u8> {
    if !has_hand(landmarks) {
        return None;
    }
    let thumb = &landmarks[THUMB_TIP];
    FINGER_TIPS
        .iter()
        .position(|&tip| landmarks[tip].distance(thumb) < TOUCH_RADIUS)
        .map(|i| i as u8 + 1)
}

/// Centre of the palm, used as the "fist" position for whacking.
pub fn palm_center(landmarks: &[Landmark]) -> Option<Landmark> {
    if !has_hand(landmarks) {
        return None;
    }
    let points = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &i| (sx + landmarks[i].x, sy + landmarks[i].y));
    Some(Landmark::new(sx / n, sy / n))
}

pub fn index_tip(landmarks: &[Landmark]) -> Option<Landmark> {
    has_hand(landmarks).then(|| landmarks[INDEX_TIP])
}
