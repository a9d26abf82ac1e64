//! Shared finalization: sort, assert complete coverage, optionally merge
//! runs of identical CDWs.
//!
//! Grounded on `Compressor.C`'s `finalizeRoute()`/`mergeRoute()`.

use crate::error::{Error, Result};
use crate::replacement::Route;

pub struct RouteFinalizer {
    pub merging: bool,
}

impl RouteFinalizer {
    pub fn finalize(&self, mut route: Route, input_len: usize, partition: usize) -> Result<Route> {
        route.sort_by_start();
        if !route.covers_fully(input_len) {
            let covered: usize = route.iter().map(|r| r.len()).sum();
            return Err(Error::IncompleteCoverage {
                partition,
                uncovered: input_len.saturating_sub(covered),
            });
        }
        if self.merging {
            route.merge_repetitions();
        }
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdw::Cdw;
    use crate::replacement::Replacement;

    #[test]
    fn rejects_incomplete_routes() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lxx, 0, 1, 0));
        let finalizer = RouteFinalizer { merging: false };
        assert!(matches!(
            finalizer.finalize(route, 8, 0),
            Err(Error::IncompleteCoverage { .. })
        ));
    }

    #[test]
    fn merges_adjacent_identical_cdws_when_enabled() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lll, 0, 3, 0));
        route.push(Replacement::new(Cdw::Lll, 3, 6, 0));
        let finalizer = RouteFinalizer { merging: true };
        let route = finalizer.finalize(route, 6, 0).unwrap();
        let cdws: Vec<_> = route.iter().map(|r| r.cdw).collect();
        assert_eq!(cdws, vec![Cdw::Lll, Cdw::Xxx]);
    }
}
