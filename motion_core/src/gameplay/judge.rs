use motion_schema::{JudgmentTier, Millis};

use crate::chart::{Lane, Note};

/// Half-widths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingWindows {
    pub perfect: Millis,
    pub great: Millis,
    pub good: Millis,
    /// Extra tolerance past `good` in which a grip still consumes a note (as a miss).
    pub slack: Millis,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            perfect: 100.0,
            great: 200.0,
            good: 300.0,
            slack: 50.0,
        }
    }
}

impl TimingWindows {
    /// Tightest window containing `|offset|`, else `Miss`.
    pub fn tier_for_offset(&self, offset: Millis) -> JudgmentTier {
        let abs = offset.abs();
        if abs <= self.perfect {
            JudgmentTier::Perfect
        } else if abs <= self.great {
            JudgmentTier::Great
        } else if abs <= self.good {
            JudgmentTier::Good
        } else {
            JudgmentTier::Miss
        }
    }

    pub fn capture(&self) -> Millis {
        self.good + self.slack
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentResult {
    pub note_index: usize,
    pub tier: JudgmentTier,
    /// Action time minus note timing; positive is late.
    pub offset: Millis,
}

/// Fraction of the travel time a note may overrun before it is missed.
pub const MISS_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct GripJudge {
    pub windows: TimingWindows,
    pub travel_ms: Millis,
}

impl GripJudge {
    pub fn new(travel_ms: Millis) -> Self {
        Self {
            windows: TimingWindows::default(),
            travel_ms,
        }
    }

    /// Past this, the note has gone by the player.
    ///
    /// Never earlier than the capture window, so a late grip the windows
    /// still accept cannot lose the race with the default miss.
    pub fn deadline(&self, note: &Note) -> Millis {
        note.timing + (self.travel_ms * MISS_MARGIN).max(self.windows.capture())
    }

    /// Marks notes whose approach has begun.
    pub fn activate(&self, elapsed: Millis, notes: &mut [Note]) {
        for note in notes.iter_mut().filter(|n| !n.status.active) {
            if elapsed >= note.timing - self.travel_ms {
                note.status.active = true;
            }
        }
    }

    /// Judges a grip on `lane` at time `t` against the closest open note.
    ///
    /// A grip with nothing within the capture window is ignored.
    pub fn process_grip(&self, lane: Lane, t: Millis, notes: &mut [Note]) -> Option<JudgmentResult> {
        let mut best: Option<(usize, Millis)> = None;
        for (idx, note) in notes.iter().enumerate() {
            if note.lane != lane || !note.status.is_open() {
                continue;
            }
            let distance = (t - note.timing).abs();
            // Strictly closer only: ties keep the earlier note.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((idx, distance));
            }
        }

        let (idx, distance) = best?;
        if distance > self.windows.capture() {
            return None;
        }

        let note = &mut notes[idx];
        let offset = t - note.timing;
        let tier = self.windows.tier_for_offset(offset);
        note.status.judgment = Some(tier);

        Some(JudgmentResult {
            note_index: idx,
            tier,
            offset,
        })
    }

    /// Default-misses every unjudged note whose deadline has passed.
    pub fn check_expired(&self, elapsed: Millis, notes: &mut [Note]) -> Vec<JudgmentResult> {
        let mut results = Vec::new();
        for (idx, note) in notes.iter_mut().enumerate() {
            if note.status.is_judged() {
                continue;
            }
            if elapsed > self.deadline(note) {
                note.status.active = true;
                note.status.judgment = Some(JudgmentTier::Miss);
                results.push(JudgmentResult {
                    note_index: idx,
                    tier: JudgmentTier::Miss,
                    offset: elapsed - note.timing,
                });
            }
        }
        results
    }

    /// Default-misses everything still open, regardless of time.
    pub fn expire_all(&self, elapsed: Millis, notes: &mut [Note]) -> Vec<JudgmentResult> {
        self.check_expired(f64::INFINITY, notes)
            .into_iter()
            .map(|r| JudgmentResult {
                offset: elapsed - notes[r.note_index].timing,
                ..r
            })
            .collect()
    }
}
