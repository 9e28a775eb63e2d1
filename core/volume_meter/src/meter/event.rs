use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::{MeterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionEvent {
    /// The playhead moved to `frame`
    Changed { frame: i64 },
    /// Clips or curves were edited; the current frame must be sampled again
    Invalidate,
}

pub type PositionConsumer = Consumer<PositionEvent>;

/// Playhead side of the meter's position queue.
#[derive(Debug)]
pub struct PositionSender {
    producer: Producer<PositionEvent>,
}

impl PositionSender {
    pub fn position_changed(&mut self, frame: i64) -> Result<()> {
        self.send(PositionEvent::Changed { frame })
    }

    pub fn invalidate(&mut self) -> Result<()> {
        self.send(PositionEvent::Invalidate)
    }

    pub fn send(&mut self, event: PositionEvent) -> Result<()> {
        self.producer.push(event).map_err(|_| MeterError::QueueFull)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.producer.slots()
    }
}

pub fn position_channel(capacity: usize) -> (PositionSender, PositionConsumer) {
    let (producer, consumer) = RingBuffer::new(capacity);
    (PositionSender { producer }, consumer)
}
