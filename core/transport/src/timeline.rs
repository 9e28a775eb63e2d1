/// Half-open span of timeline frames, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    /// Returns `None` unless `start < end`.
    pub const fn new(start: i64, end: i64) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub const fn len(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `start <= frame < end`
    pub const fn contains(&self, frame: i64) -> bool {
        frame >= self.start && frame < self.end
    }

    /// `start < frame < end`; both boundary frames are excluded.
    pub const fn strictly_contains(&self, frame: i64) -> bool {
        frame > self.start && frame < self.end
    }

    pub const fn shifted(&self, delta: i64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}
