//! Frequency-driven dynamic dictionary selection.
//!
//! Grounded on `DynDecompressor.C`: permutation scan (`walk`/`extractData`)
//! -> byte-weighted scoring -> inner self-overlap filter
//! (`removeInternalIntersects`) -> outer greedy-covering filter
//! (`removeExternalsIntersects`), each selected UDW installed via
//! [`Codebook::store_dyn`] as soon as it is picked.
//!
//! The original recomputes candidate frequencies from a recursively
//! windowed permutation walk that overcounts alignments sharing a window;
//! here candidates are scored from a flat sliding-window count of length-4
//! and length-8 substrings, which preserves the same frequency -> weight ->
//! filter shape without the alignment-dependent overcounting (a heuristic
//! scoring detail, not an invariant the spec pins down).

use crate::codebook::Codebook;
use crate::trit::{serialize, Trit};
use std::collections::HashMap;

pub struct HeuristicDictionarySelector {
    pub inner_freq: u32,
    pub outer_freq: u32,
    pub byte_weight: u32,
    pub max_cdws: usize,
}

impl HeuristicDictionarySelector {
    /// Runs the full selection pipeline, binding chosen UDWs into
    /// `codebook` as a side effect, and returns them in pick order.
    pub fn select(&self, bits: &[Trit], codebook: &mut Codebook) -> Vec<String> {
        let text = serialize(bits);
        let mut data = self.score_candidates(&text);
        if data.is_empty() {
            return Vec::new();
        }
        data.sort_by(|a, b| b.0.cmp(&a.0));

        if self.inner_freq > 0 {
            self.remove_internal_intersects(&text, &mut data, codebook.num_tbcs());
        }
        data.sort_by(|a, b| b.0.cmp(&a.0));

        self.remove_external_intersects(&text, &mut data, codebook)
    }

    fn score_candidates(&self, text: &str) -> Vec<(u32, String)> {
        let bytes = text.as_bytes();
        let mut freq: HashMap<String, u32> = HashMap::new();
        for &len in &[4usize, 8usize] {
            if bytes.len() < len {
                continue;
            }
            for start in 0..=(bytes.len() - len) {
                let word = &text[start..start + len];
                *freq.entry(word.to_string()).or_insert(0) += 1;
            }
        }
        freq.into_iter()
            .filter(|(_, c)| *c > 0)
            .map(|(word, count)| {
                let weight = if word.len() == 8 { self.byte_weight } else { 0 };
                (count * (1 + weight), word)
            })
            .collect()
    }

    /// Non-overlapping self-occurrence count of `pattern` within `text`.
    fn non_overlapping_count(text: &str, pattern: &str) -> u32 {
        let mut count = 0u32;
        let mut idx = 0;
        while let Some(pos) = text[idx..].find(pattern) {
            count += 1;
            idx += pos + pattern.len();
        }
        count
    }

    /// Walks the score-sorted list while [`has_next_inner`](Self::has_next_inner)
    /// holds, rescoring each visited entry from its own non-overlapping
    /// count, then truncates the list at the last entry visited (matching
    /// `removeInternalIntersects`'s `resize(max + 1)` — entry 0 survives
    /// even when its own check fails, since `max` starts at 0 there).
    fn remove_internal_intersects(&self, text: &str, data: &mut Vec<(u32, String)>, num_det: usize) {
        let mut max_idx = 0usize;
        for i in 0..data.len() {
            if !self.has_next_inner(i, data.len(), num_det, data[i].0) {
                break;
            }
            let count = Self::non_overlapping_count(text, &data[i].1);
            let weight = if data[i].1.len() == 8 { self.byte_weight } else { 0 };
            data[i].0 = count * (1 + weight);
            max_idx = i;
        }
        data.truncate(max_idx + 1);
    }

    fn has_next_inner(&self, i: usize, len: usize, num_det: usize, freq_i: u32) -> bool {
        self.inner_freq > 0 && i < len && (num_det < self.max_cdws || freq_i >= self.inner_freq)
    }

    /// Non-overlapping occurrences of `pattern` not already covered by
    /// `covered`; does not mutate `covered` unless `commit` is set.
    fn remove_externals(
        text: &str,
        pattern: &str,
        covered: &mut bit_vec::BitVec,
        commit: bool,
    ) -> u32 {
        let mut count = 0u32;
        let mut idx = 0;
        let mut newly = Vec::new();
        while let Some(pos) = text[idx..].find(pattern) {
            let start = idx + pos;
            let end = start + pattern.len();
            idx = end;
            if !(start..end).any(|i| covered.get(i).unwrap_or(true)) {
                count += 1;
                newly.push((start, end));
            }
        }
        if commit {
            for (start, end) in newly {
                for i in start..end {
                    covered.set(i, true);
                }
            }
        }
        count
    }

    fn remove_external_intersects(
        &self,
        text: &str,
        data: &mut Vec<(u32, String)>,
        codebook: &mut Codebook,
    ) -> Vec<String> {
        let mut covered = bit_vec::BitVec::from_elem(text.len(), false);
        let mut selected = Vec::new();
        let mut num_det = 0usize;

        let weight = |w: &str| if w.len() == 8 { self.byte_weight } else { 0 };

        let first = data[0].1.clone();
        let first_count = Self::remove_externals(text, &first, &mut covered, true);
        data[0].0 = first_count * (1 + weight(&first));
        if codebook.store_dyn(&first).unwrap_or(false) {
            num_det += 1;
        }
        selected.push(first);

        let mut start_idx = 1usize;
        while num_det < self.max_cdws && start_idx < data.len() {
            for i in start_idx..data.len() {
                if !self.has_next_outer(i, data.len(), num_det, data[i].0) {
                    break;
                }
                let mut clone = covered.clone();
                let count = Self::remove_externals(text, &data[i].1, &mut clone, false);
                data[i].0 = count * (1 + weight(&data[i].1));
            }
            if start_idx + 1 < data.len() {
                data[start_idx + 1..].sort_by(|a, b| b.0.cmp(&a.0));
            }
            if start_idx >= data.len() {
                break;
            }
            let word = data[start_idx].1.clone();
            let count = Self::remove_externals(text, &word, &mut covered, true);
            data[start_idx].0 = count * (1 + weight(&word));
            if codebook.store_dyn(&word).unwrap_or(false) {
                num_det += 1;
            }
            selected.push(word);
            start_idx += 1;
        }
        selected
    }

    fn has_next_outer(&self, i: usize, len: usize, num_det: usize, freq_i: u32) -> bool {
        self.outer_freq > 0 && i < len && (num_det < self.max_cdws || freq_i >= self.outer_freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebook::Codebook;

    fn trits(s: &str) -> Vec<Trit> {
        s.chars().map(|c| Trit::from_char(c).unwrap()).collect()
    }

    #[test]
    fn picks_the_most_frequent_repeating_nibble() {
        let bits = trits(&"0101".repeat(16));
        let sel = HeuristicDictionarySelector {
            inner_freq: 1,
            outer_freq: 1,
            byte_weight: 0,
            max_cdws: 4,
        };
        let mut cb = Codebook::new(false, 8);
        let picks = sel.select(&bits, &mut cb);
        assert!(!picks.is_empty());
        assert!(picks.contains(&"0101".to_string()) || cb.num_tbcs() > 0);
    }

    #[test]
    fn respects_max_cdws_budget() {
        let bits = trits(&"0001".repeat(4).chars().chain("1110".repeat(4).chars()).collect::<String>());
        let sel = HeuristicDictionarySelector {
            inner_freq: 1,
            outer_freq: 1,
            byte_weight: 1,
            max_cdws: 2,
        };
        let mut cb = Codebook::new(false, 8);
        sel.select(&bits, &mut cb);
        assert!(cb.num_tbcs() <= 2);
    }

    #[test]
    fn truncates_after_the_last_entry_that_clears_the_inner_threshold() {
        let sel = HeuristicDictionarySelector {
            inner_freq: 3,
            outer_freq: 1,
            byte_weight: 0,
            max_cdws: 0,
        };
        let text = "0101010101010101";
        let mut data = vec![
            (10, "0101".to_string()),
            (1, "1010".to_string()),
            (1, "0000".to_string()),
        ];
        sel.remove_internal_intersects(text, &mut data, 0);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].1, "0101");
    }
}
