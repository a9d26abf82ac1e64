//! Two-stage greedy route construction plus optional repetition merge.
//!
//! Grounded on `Compressor.C`'s `greedy()`/`calculateCDWByte()`/
//! `classifyCDW()`/`determineStart()`/`addToCoveredRoute()`/`fillGap()`.
//! The sort predicate in `determineStart` (`benefit_a > benefit_b AND
//! length_a > length_b`) is not a total order; per spec.md §9 this is
//! replaced with a lexicographic comparator (benefit desc, then length desc,
//! then start asc).

use crate::codebook::{is_udw_length, Codebook};
use crate::replacement::{Coverage, Replacement, Route};
use crate::trit::{serialize, Trit};
use std::collections::BTreeMap;

pub struct GreedyPlanner {
    pub permute: usize,
    pub ext_cdws: bool,
}

type CdwMap = BTreeMap<(usize, usize), Replacement>;

impl GreedyPlanner {
    /// Builds a complete, non-overlapping route over `bits` using `codebook`.
    pub fn plan(&self, bits: &[Trit], codebook: &mut Codebook) -> Route {
        let text = serialize(bits);
        let n = text.len();
        let cdw_map = self.build_cdw_map(&text, codebook);

        let mut route = Route::new();
        let mut coverage = Coverage::new(n);

        let mut edges: Vec<&Replacement> = cdw_map.values().filter(|r| r.benefit > 0).collect();
        edges.sort_by(|a, b| {
            b.benefit
                .cmp(&a.benefit)
                .then(b.len().cmp(&a.len()))
                .then(a.start.cmp(&b.start))
        });
        for repl in edges {
            Self::add_to_covered_route(&mut route, &mut coverage, *repl);
        }

        if !coverage.is_complete() {
            self.fill_gaps(&mut route, &mut coverage, &text, codebook, &cdw_map);
        }

        route.sort_by_start();
        route
    }

    fn build_cdw_map(&self, text: &str, codebook: &Codebook) -> CdwMap {
        let n = text.len();
        let permute = self.permute.max(1);
        let mut map = CdwMap::new();
        let lengths: &[usize] = if self.ext_cdws {
            &[1, 2, 3, 4, 8]
        } else {
            &[1, 4, 8]
        };

        let mut anchor = 0usize;
        while anchor < n {
            let window_end = (anchor + 8).min(n);
            for start in anchor..window_end {
                for &len in lengths {
                    let end = start + len;
                    if end > window_end || end > n {
                        continue;
                    }
                    if !is_udw_length(len, self.ext_cdws) {
                        continue;
                    }
                    let word = &text[start..end];
                    let cdw = codebook.lookup(word);
                    if cdw.is_valid() {
                        let benefit = len as i16 - cdw.length() as i16;
                        map.entry((start, end))
                            .or_insert_with(|| Replacement::new(cdw, start, end, benefit));
                    }
                }
            }
            anchor += permute;
        }
        map
    }

    fn add_to_covered_route(route: &mut Route, coverage: &mut Coverage, repl: Replacement) {
        if coverage.is_covered(repl.start, repl.end) {
            return;
        }
        coverage.set_covered(repl.start, repl.end);
        route.push(repl);
    }

    fn fill_gaps(
        &self,
        route: &mut Route,
        coverage: &mut Coverage,
        text: &str,
        codebook: &Codebook,
        cdw_map: &CdwMap,
    ) {
        let n = coverage.len();
        let mut pos = 0;
        while pos < n {
            if let Some(gap_start) = coverage.first_uncovered_from(pos) {
                let mut gap_end = gap_start;
                while gap_end < n && !coverage.is_covered(gap_end, gap_end + 1) {
                    gap_end += 1;
                }
                self.fill_gap(route, coverage, text, codebook, cdw_map, gap_start, gap_end);
                pos = gap_end;
            } else {
                break;
            }
        }
    }

    fn fill_gap(
        &self,
        route: &mut Route,
        coverage: &mut Coverage,
        text: &str,
        codebook: &Codebook,
        cdw_map: &CdwMap,
        start: usize,
        end: usize,
    ) {
        if start >= end || coverage.is_covered(start, end) {
            return;
        }
        if let Some(repl) = cdw_map.get(&(start, end)) {
            route.push(*repl);
            coverage.set_covered(start, end);
            return;
        }
        if end - start == 1 {
            let word = &text[start..end];
            let cdw = codebook.lookup(word);
            let benefit = 1 - cdw.length() as i16;
            route.push(Replacement::new(cdw, start, end, benefit));
            coverage.set_covered(start, end);
            return;
        }
        self.fill_gap(route, coverage, text, codebook, cdw_map, start, start + 1);
        self.fill_gap(route, coverage, text, codebook, cdw_map, start + 1, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trits(s: &str) -> Vec<Trit> {
        s.chars().map(|c| Trit::from_char(c).unwrap()).collect()
    }

    #[test]
    fn all_zero_byte_produces_a_complete_non_overlapping_route() {
        let bits = trits("00000000");
        let mut cb = Codebook::new(false, 8);
        let planner = GreedyPlanner {
            permute: 1,
            ext_cdws: false,
        };
        let route = planner.plan(&bits, &mut cb);
        assert!(route.covers_fully(8));
        assert!(route.is_non_overlapping());
    }

    #[test]
    fn repeating_nibble_uses_a_short_cdw() {
        let bits = trits("01010101");
        let mut cb = Codebook::new(false, 8);
        let planner = GreedyPlanner {
            permute: 1,
            ext_cdws: false,
        };
        let route = planner.plan(&bits, &mut cb);
        assert!(route.covers_fully(8));
        assert!(route.total_benefit() > 0);
    }
}
