//! Monotonic prefixed id sequences.
//!
//! Every stream in this workspace mints ids of the shape `<prefix><number>`
//! ("E1042", "S1007", "A2003"). [`IdSequence`] owns the counter for one such
//! family and guarantees the numeric part is dense and strictly increasing
//! within a run.

/// A counter that formats ids as `<prefix><number>`.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    next: i64,
}

impl IdSequence {
    /// Sequence whose first minted id is `<prefix><start>`.
    pub fn new(prefix: impl Into<String>, start: i64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }

    /// Mint the next id and advance the counter.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Numeric part of the id `next_id` would mint, without minting it.
    pub fn peek(&self) -> i64 {
        self.next
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Move the counter past an already-persisted maximum so a resumed run
    /// never reissues an id. A `None` maximum (empty table) leaves the
    /// counter where it is.
    pub fn advance_past(&mut self, max_seen: Option<i64>) {
        if let Some(max) = max_seen {
            if max + 1 > self.next {
                self.next = max + 1;
            }
        }
    }
}
