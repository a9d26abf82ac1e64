//! The no-op selector: leaves the codebook exactly at its preloaded default,
//! so planning runs against the static dictionary alone (`CFG::DYNAMIC`
//! disabled).

use crate::codebook::Codebook;

pub struct StaticDictionarySelector;

impl StaticDictionarySelector {
    /// Binds nothing; present so callers can treat "dynamic disabled" as
    /// just another selector rather than a special case.
    pub fn select(&self, _bits: &[crate::trit::Trit], _codebook: &mut Codebook) {}
}
