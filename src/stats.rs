//! Pipeline counters, one struct per stage, mirroring `Stats.h`.

use crate::cdw::Cdw;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Default, Clone)]
pub struct CompressorStats {
    pub num_sbf: u32,
    pub num_benefit: i64,
    pub num_bit: u32,
    pub num_replacements: u32,
    pub num_s1_repls: u32,
    pub num_s2_repls: u32,
    pub num_cdw_repetition: u32,
    pub num_red_repetition: u32,
    pub num_overall_bit: u64,
    pub num_overall_compressed_bit: u64,
    pub counter_cdws: BTreeMap<Cdw, i32>,
}

impl CompressorStats {
    pub fn record_replacement(&mut self, cdw: Cdw, benefit: i16) {
        self.num_replacements += 1;
        self.num_benefit += benefit as i64;
        *self.counter_cdws.entry(cdw).or_insert(0) += 1;
    }

    pub fn record_merge(&mut self, merged_cdw: Cdw, cdw_length: usize) {
        self.num_cdw_repetition += 1;
        self.num_red_repetition += cdw_length as u32;
        *self.counter_cdws.entry(merged_cdw).or_insert(0) -= 1;
        *self.counter_cdws.entry(Cdw::Xxx).or_insert(0) += 1;
    }

    pub fn print_stats(&self, title: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "--- CompressorStats {} ---", title)?;
        writeln!(out, "replacements: {}", self.num_replacements)?;
        writeln!(out, "stage1/stage2: {}/{}", self.num_s1_repls, self.num_s2_repls)?;
        writeln!(out, "single-bit fills: {}", self.num_sbf)?;
        writeln!(out, "net benefit (bits saved): {}", self.num_benefit)?;
        writeln!(out, "repetition merges: {}", self.num_cdw_repetition)?;
        for (cdw, count) in &self.counter_cdws {
            writeln!(out, "  {:?}: {}", cdw, count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct EmitterStats {
    pub cycles: u32,
    pub config_cycles: u32,
    pub tdi_resets: u32,
    pub compr_dr: u32,
    pub compr_exit: u32,
    pub compr_repeat: u32,
    pub multi_rep: u32,
}

impl EmitterStats {
    pub fn print_stats(&self, title: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "--- EmitterStats {} ---", title)?;
        writeln!(out, "COMPR_DR: {}", self.compr_dr)?;
        writeln!(out, "COMPR_EXIT: {}", self.compr_exit)?;
        writeln!(out, "COMPR_REPEAT: {}", self.compr_repeat)?;
        writeln!(out, "multi-rep runs: {}", self.multi_rep)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct DecompressorStats {
    pub config_bit: u32,
    pub overall_config_bit: u32,
}

impl DecompressorStats {
    pub fn print_stats(&self, title: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "--- DecompressorStats {} ---", title)?;
        writeln!(out, "config bits: {}", self.config_bit)
    }
}

#[derive(Debug, Default, Clone)]
pub struct FormalDecompressorStats {
    pub restarts: u32,
    pub constraints: u32,
    pub vars: u32,
    pub det_cdws: u32,
    pub det_static_cdws: u32,
    pub det_sbis: u32,
    pub merge_vars: u32,
    pub act_merges: u32,
    pub config_bit: u32,
}

impl FormalDecompressorStats {
    pub fn print_stats(&self, title: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "--- FormalDecompressorStats {} ---", title)?;
        writeln!(out, "vars/constraints: {}/{}", self.vars, self.constraints)?;
        writeln!(out, "dynamic CDWs: {} (static {})", self.det_cdws, self.det_static_cdws)?;
        writeln!(out, "SBIs: {}", self.det_sbis)?;
        writeln!(out, "merges: {}/{}", self.act_merges, self.merge_vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_replacement_tracks_counts_and_benefit() {
        let mut stats = CompressorStats::default();
        stats.record_replacement(Cdw::Lll, 1);
        stats.record_replacement(Cdw::Lll, 1);
        assert_eq!(stats.num_replacements, 2);
        assert_eq!(stats.num_benefit, 2);
        assert_eq!(stats.counter_cdws[&Cdw::Lll], 2);
    }

    #[test]
    fn record_merge_moves_count_into_xxx() {
        let mut stats = CompressorStats::default();
        stats.record_replacement(Cdw::Lll, 1);
        stats.record_replacement(Cdw::Lll, 1);
        stats.record_merge(Cdw::Lll, 3);
        assert_eq!(stats.counter_cdws[&Cdw::Lll], 1);
        assert_eq!(stats.counter_cdws[&Cdw::Xxx], 1);
    }
}
