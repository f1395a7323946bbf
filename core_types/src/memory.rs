//! # Memory Types
//!
//! Page reference model for the paging simulator.
//!
//! ## Key Types
//!
//! - [`PageTrace`]: frame capacity plus an ordered reference string
//! - [`FrameSet`]: the bounded, insertion-ordered set of resident pages
//! - [`PageAccess`]: one log entry per reference
//! - [`PagingReport`]: the full log with fault and hit counters

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Page trace errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("Frame count must be greater than zero")]
    ZeroFrames,
}

/// A page-access trace and the number of frames available to it
///
/// Read-only input to the paging algorithms. The frame count is always
/// positive, including for traces read through serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTrace<P> {
    num_frames: usize,
    pages: Vec<P>,
}

impl<P: Clone + Eq + Hash> PageTrace<P> {
    /// Creates a trace, rejecting a zero frame count
    pub fn new(num_frames: usize, pages: Vec<P>) -> Result<Self, TraceError> {
        if num_frames == 0 {
            return Err(TraceError::ZeroFrames);
        }
        Ok(Self { num_frames, pages })
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Returns the reference string in access order
    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[derive(Deserialize)]
struct RawPageTrace<P> {
    num_frames: usize,
    pages: Vec<P>,
}

impl<'de, P> Deserialize<'de> for PageTrace<P>
where
    P: Clone + Eq + Hash + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPageTrace::deserialize(deserializer)?;
        PageTrace::new(raw.num_frames, raw.pages).map_err(serde::de::Error::custom)
    }
}

/// Resident pages, oldest insertion first
///
/// Capacity is fixed at construction. The set never holds more than
/// `capacity` pages; callers evict before inserting when it is full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet<P> {
    capacity: usize,
    frames: VecDeque<P>,
}

impl<P: Clone + Eq> FrameSet<P> {
    /// Creates an empty frame set
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    pub fn contains(&self, page: &P) -> bool {
        self.frames.contains(page)
    }

    /// Appends a page at the tail (most recently inserted)
    ///
    /// Returns false without inserting if the set is already full.
    pub fn insert(&mut self, page: P) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push_back(page);
        true
    }

    /// Removes the page at `index` in insertion order
    pub fn remove_at(&mut self, index: usize) -> Option<P> {
        self.frames.remove(index)
    }

    /// Iterates resident pages, oldest insertion first
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.frames.iter()
    }

    /// Copies the resident pages, oldest insertion first
    pub fn snapshot(&self) -> Vec<P> {
        self.frames.iter().cloned().collect()
    }
}

/// Result of a single page reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessOutcome {
    /// Page was already resident
    Hit,
    /// Page was not resident and had to be loaded
    Fault,
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Hit => write!(f, "HIT"),
            AccessOutcome::Fault => write!(f, "FAULT"),
        }
    }
}

/// Log entry for one reference in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAccess<P> {
    pub page: P,
    pub outcome: AccessOutcome,
    /// Resident pages after the reference was handled
    pub frames: Vec<P>,
    /// Page removed to make room, if any
    pub evicted: Option<P>,
}

/// Output of a paging algorithm
///
/// `faults + hits` always equals the trace length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingReport<P> {
    pub log: Vec<PageAccess<P>>,
    pub faults: usize,
    pub hits: usize,
}

impl<P> PagingReport<P> {
    /// Creates an empty report
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            faults: 0,
            hits: 0,
        }
    }

    /// Appends an entry and bumps the matching counter
    pub fn record(&mut self, access: PageAccess<P>) {
        match access.outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Fault => self.faults += 1,
        }
        self.log.push(access);
    }

    /// Total references handled
    pub fn total(&self) -> usize {
        self.faults + self.hits
    }
}

impl<P> Default for PagingReport<P> {
    fn default() -> Self {
        Self::new()
    }
}
