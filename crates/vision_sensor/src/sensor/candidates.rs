//! Bounded scratch buffer for spatial query results
//!
//! Mirrors the non-allocating overlap queries of game physics engines: the
//! caller owns a fixed array, the index fills it, and anything past capacity
//! is dropped. The cap is a resource bound, so overflow is counted rather
//! than treated as an error.

use crate::spatial::Candidate;

/// Hard cap on candidates considered per scan cycle
pub const MAX_CANDIDATES: usize = 50;

/// Fixed-capacity candidate buffer, reused across scan cycles
#[derive(Debug, Clone)]
pub struct CandidateBuffer {
    slots: Vec<Candidate>,
    capacity: usize,
    dropped: usize,
}

impl CandidateBuffer {
    /// Create a buffer holding at most [`MAX_CANDIDATES`] entries
    pub fn new() -> Self {
        Self::with_capacity(MAX_CANDIDATES)
    }

    /// Create a buffer with a custom hard cap
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Forget the previous cycle's contents; keeps the allocation
    pub fn clear(&mut self) {
        self.slots.clear();
        self.dropped = 0;
    }

    /// Append a result; returns false (and counts it) once the buffer is full
    ///
    /// The first `capacity` results pushed are the ones kept.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if self.slots.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.slots.push(candidate);
        true
    }

    /// True when no more results fit
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Number of valid entries, `n` in `0..=capacity`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the last query found nothing
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Hard cap
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Results discarded because the buffer was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// True if the last query returned more matches than fit
    pub fn truncated(&self) -> bool {
        self.dropped > 0
    }

    /// The valid entries, in index return order
    pub fn as_slice(&self) -> &[Candidate] {
        &self.slots
    }

    /// Iterate the valid entries
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.slots.iter()
    }
}

impl Default for CandidateBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a CandidateBuffer {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
