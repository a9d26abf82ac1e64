//! Projects a PBO-extracted replacement list into the shared `Route`
//! representation. No heuristic choices: `Compressor::formal()`.

use crate::plan::finalize::RouteFinalizer;
use crate::replacement::{Coverage, Replacement, Route};
use crate::error::Result;

pub struct FormalPlanner {
    pub merging: bool,
}

impl FormalPlanner {
    pub fn plan(
        &self,
        replacements: &[Replacement],
        input_len: usize,
        partition: usize,
    ) -> Result<Route> {
        let mut route = Route::new();
        let mut coverage = Coverage::new(input_len);
        for repl in replacements {
            if coverage.is_covered(repl.start, repl.end) {
                continue;
            }
            coverage.set_covered(repl.start, repl.end);
            route.push(*repl);
        }
        let finalizer = RouteFinalizer {
            merging: self.merging,
        };
        finalizer.finalize(route, input_len, partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdw::Cdw;

    #[test]
    fn projects_non_overlapping_replacements_into_a_complete_route() {
        let repls = vec![
            Replacement::new(Cdw::Lll, 0, 3, 0),
            Replacement::new(Cdw::Hhh, 3, 6, 0),
        ];
        let planner = FormalPlanner { merging: false };
        let route = planner.plan(&repls, 6, 0).unwrap();
        assert_eq!(route.len(), 2);
    }
}
