//! Page replacement
//!
//! One simulation loop handles hit/fault detection and frame bookkeeping;
//! a [`ReplacementPolicy`] only decides which resident page to evict when
//! a fault happens with every frame occupied.

use core_types::{AccessOutcome, FrameSet, PageAccess, PageTrace, PagingReport};
use log::debug;
use std::collections::HashMap;
use std::hash::Hash;

/// Victim selection for a full frame set
pub trait ReplacementPolicy<P> {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the index (insertion order) of the resident page to evict
    ///
    /// Only called on a fault when `frames` is full. `position` is the
    /// index of the faulting reference in the trace.
    fn select_victim(&mut self, frames: &FrameSet<P>, position: usize) -> usize;
}

/// First-in first-out: evict the oldest insertion, regardless of use
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl<P> ReplacementPolicy<P> for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select_victim(&mut self, _frames: &FrameSet<P>, _position: usize) -> usize {
        0
    }
}

/// Clairvoyant policy: evict the page whose next use is furthest away
///
/// Pages never used again count as infinitely far. Ties go to the first
/// such page in the frame set's insertion order.
#[derive(Debug, Clone)]
pub struct Optimal<P> {
    /// Every trace position of each page, ascending
    occurrences: HashMap<P, Vec<usize>>,
}

impl<P: Clone + Eq + Hash> Optimal<P> {
    /// Indexes the trace once
    pub fn new(trace: &PageTrace<P>) -> Self {
        let mut occurrences: HashMap<P, Vec<usize>> = HashMap::new();
        for (position, page) in trace.pages().iter().enumerate() {
            occurrences.entry(page.clone()).or_default().push(position);
        }
        Self { occurrences }
    }

    /// Position of the next reference to `page` strictly after `position`
    pub fn next_use(&self, page: &P, position: usize) -> Option<usize> {
        let positions = self.occurrences.get(page)?;
        let idx = positions.partition_point(|&p| p <= position);
        positions.get(idx).copied()
    }
}

impl<P: Clone + Eq + Hash> ReplacementPolicy<P> for Optimal<P> {
    fn name(&self) -> &'static str {
        "Optimal"
    }

    fn select_victim(&mut self, frames: &FrameSet<P>, position: usize) -> usize {
        let mut victim = 0;
        let mut furthest = 0;

        for (index, page) in frames.iter().enumerate() {
            let distance = self.next_use(page, position).unwrap_or(usize::MAX);
            if index == 0 || distance > furthest {
                victim = index;
                furthest = distance;
            }
        }

        victim
    }
}

/// Runs `trace` through `policy`
pub fn simulate<P, R>(trace: &PageTrace<P>, policy: &mut R) -> PagingReport<P>
where
    P: Clone + Eq + Hash,
    R: ReplacementPolicy<P>,
{
    let mut frames = FrameSet::with_capacity(trace.num_frames());
    let mut report = PagingReport::new();

    for (position, page) in trace.pages().iter().enumerate() {
        if frames.contains(page) {
            report.record(PageAccess {
                page: page.clone(),
                outcome: AccessOutcome::Hit,
                frames: frames.snapshot(),
                evicted: None,
            });
            continue;
        }

        let evicted = if frames.is_full() {
            let victim = policy.select_victim(&frames, position);
            frames.remove_at(victim)
        } else {
            None
        };
        // PageTrace guarantees at least one frame, and a full set was just evicted from.
        let inserted = frames.insert(page.clone());
        debug_assert!(inserted, "faulting page must become resident");

        report.record(PageAccess {
            page: page.clone(),
            outcome: AccessOutcome::Fault,
            frames: frames.snapshot(),
            evicted,
        });
    }

    debug!(
        "{}: {} references, {} frames, {} faults, {} hits",
        policy.name(),
        trace.len(),
        trace.num_frames(),
        report.faults,
        report.hits
    );
    report
}

/// FIFO page replacement
pub fn fifo_paging<P: Clone + Eq + Hash>(trace: &PageTrace<P>) -> PagingReport<P> {
    simulate(trace, &mut Fifo)
}

/// Optimal (clairvoyant) page replacement
pub fn optimal_paging<P: Clone + Eq + Hash>(trace: &PageTrace<P>) -> PagingReport<P> {
    simulate(trace, &mut Optimal::new(trace))
}
