pub mod events;

use crossbeam_channel::{unbounded, Receiver, Sender};
use motion_schema::{InputFrame, Millis};

#[derive(Debug, Clone, PartialEq)]
pub struct TimedFrame {
    /// Host clock when the detector produced the frame.
    pub host_ms: Millis,
    pub frame: InputFrame,
}

/// Hands detector output from its own thread to the game loop, in order.
pub struct FrameQueue {
    sender: Sender<TimedFrame>,
    receiver: Receiver<TimedFrame>,
}

impl FrameQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Pushes a frame into the queue.
    /// This can be called from the detector callback thread.
    pub fn push(&self, frame: TimedFrame) {
        let _ = self.sender.send(frame);
    }

    /// Pops the oldest frame. Non-blocking.
    pub fn pop(&self) -> Option<TimedFrame> {
        self.receiver.try_recv().ok()
    }

    /// Drains the queue and keeps only the newest frame, which is what a
    /// driver tick consumes.
    pub fn latest(&self) -> Option<TimedFrame> {
        self.receiver.try_iter().last()
    }

    pub fn sender(&self) -> Sender<TimedFrame> {
        self.sender.clone()
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new()
    }
}
