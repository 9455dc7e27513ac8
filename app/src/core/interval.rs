use super::time::DateTime;

/// One calendar event as a pair of absolute instants. Nothing prevents `end < start`,
/// consumers treat such intervals as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: DateTime,
    pub end: DateTime,
}

impl Interval {
    pub fn new(start: DateTime, end: DateTime) -> Self {
        Self { start, end }
    }

    /// Exclusive on both ends
    pub fn strictly_contains(&self, at: DateTime) -> bool {
        self.start < at && at < self.end
    }

    pub fn overlaps(&self, start: DateTime, end: DateTime) -> bool {
        self.start < end && self.end > start
    }
}
