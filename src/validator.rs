//! Round-trip reconstruction check: re-expand every partition's route
//! against its own `cdw -> udw` preimage and compare to the golden input.
//!
//! Grounded on `Validator.C`'s `storeReplace`/`storeChunk`/`validate`.

use crate::cdw::Cdw;
use crate::error::{Error, Result};
use crate::replacement::Route;
use crate::trit::{serialize, Trit};
use std::collections::HashMap;

/// One partition's reconstruction inputs: the inverse of its `udw -> cdw`
/// map at the time the route was planned, plus the route itself.
pub struct PartitionRecord {
    pub cdw_to_udw: HashMap<Cdw, String>,
    pub route: Route,
}

impl PartitionRecord {
    pub fn new(udw_to_cdw: &HashMap<String, Cdw>, route: Route) -> Self {
        let cdw_to_udw = udw_to_cdw
            .iter()
            .map(|(udw, &cdw)| (cdw, udw.clone()))
            .collect();
        PartitionRecord { cdw_to_udw, route }
    }
}

pub struct Validator;

impl Validator {
    /// Reconstructs every partition's trits and compares the concatenation
    /// against `golden`. Returns the bit index of the first mismatch.
    pub fn validate(golden: &[Trit], partitions: &[PartitionRecord]) -> Result<()> {
        let golden_text = serialize(golden);
        let mut recalculated = String::with_capacity(golden_text.len());

        for part in partitions {
            let replacements: Vec<Cdw> = part.route.iter().map(|r| r.cdw).collect();
            for (j, &cdw) in replacements.iter().enumerate() {
                let resolved = if cdw == Cdw::Xxx {
                    let mut k = j;
                    loop {
                        if k == 0 {
                            break cdw;
                        }
                        k -= 1;
                        if replacements[k] != Cdw::Xxx {
                            break replacements[k];
                        }
                    }
                } else {
                    cdw
                };
                match part.cdw_to_udw.get(&resolved) {
                    Some(udw) => recalculated.push_str(udw),
                    None => return Err(Error::Validation(recalculated.len())),
                }
            }
        }

        if recalculated == golden_text {
            Ok(())
        } else {
            let mismatch = recalculated
                .bytes()
                .zip(golden_text.bytes())
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| recalculated.len().min(golden_text.len()));
            Err(Error::Validation(mismatch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacement::Replacement;

    fn trits(s: &str) -> Vec<Trit> {
        s.chars().map(|c| Trit::from_char(c).unwrap()).collect()
    }

    #[test]
    fn accepts_a_faithful_reconstruction() {
        let golden = trits("01010101");
        let mut map = HashMap::new();
        map.insert("0101".to_string(), Cdw::Lll);
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lll, 0, 4, 1));
        route.push(Replacement::new(Cdw::Lll, 4, 8, 1));
        let record = PartitionRecord::new(&map, route);
        assert!(Validator::validate(&golden, &[record]).is_ok());
    }

    #[test]
    fn resolves_xxx_by_repeating_the_last_non_xxx_cdw() {
        let golden = trits("01010101");
        let mut map = HashMap::new();
        map.insert("0101".to_string(), Cdw::Lll);
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lll, 0, 4, 1));
        route.push(Replacement::new(Cdw::Xxx, 4, 8, -3));
        let record = PartitionRecord::new(&map, route);
        assert!(Validator::validate(&golden, &[record]).is_ok());
    }

    #[test]
    fn rejects_a_mismatching_reconstruction() {
        let golden = trits("11110101");
        let mut map = HashMap::new();
        map.insert("0101".to_string(), Cdw::Lll);
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lll, 0, 4, 1));
        route.push(Replacement::new(Cdw::Lll, 4, 8, 1));
        let record = PartitionRecord::new(&map, route);
        assert!(Validator::validate(&golden, &[record]).is_err());
    }
}
