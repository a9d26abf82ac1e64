//! `Replacement`, `Coverage` and `Route` — the shared currency every
//! selector and planner passes between stages.
//!
//! Grounded on `TypeDefs.h` (`Replacement`, `CDWMap`, `Edge`, `Route`) and
//! `Compressor.C` (`isCovered`/`setCovered`, `sortRoute`).

use crate::cdw::Cdw;

/// One dictionary hit: `cdw` replaces the half-open bit range `[start, end)`,
/// saving `benefit` bits (`len - cdw.length()`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub cdw: Cdw,
    pub start: usize,
    pub end: usize,
    pub benefit: i16,
}

impl Replacement {
    pub fn new(cdw: Cdw, start: usize, end: usize, benefit: i16) -> Self {
        debug_assert!(start < end);
        Replacement {
            cdw,
            start,
            end,
            benefit,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Per-bit coverage map over the input window, `true` where a replacement
/// already claims that position (`isCovered`/`setCovered`).
#[derive(Clone, Debug)]
pub struct Coverage(bit_vec::BitVec);

impl Coverage {
    pub fn new(len: usize) -> Self {
        Coverage(bit_vec::BitVec::from_elem(len, false))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` if any position in `[start, end)` is already covered.
    pub fn is_covered(&self, start: usize, end: usize) -> bool {
        (start..end).any(|i| self.0.get(i).unwrap_or(true))
    }

    pub fn set_covered(&mut self, start: usize, end: usize) {
        for i in start..end {
            self.0.set(i, true);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|b| b)
    }

    pub fn fraction_covered(&self) -> f32 {
        if self.0.is_empty() {
            return 1.0;
        }
        let ones = self.0.iter().filter(|b| *b).count();
        ones as f32 / self.0.len() as f32
    }

    /// First uncovered position at or after `from`, if any.
    pub fn first_uncovered_from(&self, from: usize) -> Option<usize> {
        (from..self.0.len()).find(|&i| !self.0.get(i).unwrap())
    }
}

/// An ordered, non-overlapping, fully-covering sequence of replacements.
#[derive(Clone, Debug, Default)]
pub struct Route(Vec<Replacement>);

impl Route {
    pub fn new() -> Self {
        Route(Vec::new())
    }

    pub fn push(&mut self, repl: Replacement) {
        self.0.push(repl);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Replacement> {
        self.0.iter_mut()
    }

    /// Sort by start position (`sortRoute`): the contract every downstream
    /// consumer (emitter, P2S buffer, validator) relies on.
    pub fn sort_by_start(&mut self) {
        self.0.sort_by_key(|r| r.start);
    }

    /// V1 (no overlap) + V3 (sorted, `end_k <= start_{k+1}`). Assumes the
    /// route is already sorted by start.
    pub fn is_non_overlapping(&self) -> bool {
        self.0.windows(2).all(|w| w[0].end <= w[1].start)
    }

    /// V2: every position in `[0, len)` is covered by exactly one entry.
    pub fn covers_fully(&self, len: usize) -> bool {
        if self.0.is_empty() {
            return len == 0;
        }
        self.0[0].start == 0
            && self.0.last().unwrap().end == len
            && self.0.windows(2).all(|w| w[0].end == w[1].start)
    }

    /// Collapse runs of identical CDWs into `XXX` repetition markers
    /// (`mergeRoute`/`mergeRepl`): the first replacement of a run keeps its
    /// real CDW, every later one in the run is rewritten to `XXX` (never
    /// the other way around — an `XXX` at the head of a route has no
    /// predecessor to repeat). Comparison is always against the last
    /// non-`XXX` CDW seen, so a run of N identical CDWs collapses to one
    /// real entry followed by N-1 `XXX`s rather than alternating.
    /// Returns the number of replacements merged.
    pub fn merge_repetitions(&mut self) -> usize {
        let mut merges = 0;
        let mut last_real = self.0.first().map(|r| r.cdw);
        for i in 1..self.0.len() {
            if Some(self.0[i].cdw) == last_real {
                self.0[i].cdw = Cdw::Xxx;
                merges += 1;
            } else {
                last_real = Some(self.0[i].cdw);
            }
        }
        merges
    }

    pub fn total_benefit(&self) -> i64 {
        self.0.iter().map(|r| r.benefit as i64).sum()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
