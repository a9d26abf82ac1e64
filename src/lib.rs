//! # tdr-codec
//!
//! Dictionary-based compression of JTAG TDR bit streams.
//!
//! A TDR capture is a sequence of `{0,1,X}` scan-chain symbols
//! ([`trit::Trit`]). [`run_pipeline`] slices it into partitions, picks a
//! dynamic or static dictionary of uncompressed data words (UDWs) to bind
//! into a [`codebook::Codebook`] of compressed data words (CDWs), plans a
//! complete non-overlapping [`replacement::Route`] over each partition
//! (greedily or via a pseudo-boolean solver), analyzes the parallel-to-serial
//! buffer delay the decoder needs, and emits the shift-program event stream,
//! preload block and resync trace, validating the round trip along the way.
//!
//! ## Example
//!
//! ```rs
//! use tdr_codec::config::Config;
//! use tdr_codec::{run_pipeline, tdr};
//!
//! let bits = tdr::generate(256, false, 7);
//! let config = Config::default();
//! let partitions = run_pipeline(&bits, &config).expect("pipeline failed");
//! eprintln!("produced {} partition(s)", partitions.len());
//! ```

pub mod cdw;
pub mod codebook;
pub mod config;
pub mod emit;
pub mod error;
pub mod p2s;
pub mod pbo;
pub mod plan;
pub mod replacement;
pub mod select;
pub mod stats;
pub mod tdr;
pub mod trit;
pub mod validator;

pub use error::{DynErr, Error, Result};

use cdw::Cdw;
use codebook::Codebook;
use config::Config;
use emit::Event;
use plan::{FormalPlanner, GreedyPlanner, RouteFinalizer};
use replacement::Route;
use select::formal::FormalDictionarySelectorConfig;
use select::{FormalDictionarySelector, HeuristicDictionarySelector, StaticDictionarySelector};
use stats::{CompressorStats, EmitterStats};
use std::collections::HashMap;
use trit::Trit;
use validator::{PartitionRecord, Validator};

/// Everything one partition's run through the pipeline produced.
pub struct PartitionOutcome {
    pub route: Route,
    pub events: Vec<Event>,
    pub preload_bits: Vec<bool>,
    pub delay: usize,
    pub resync: String,
    pub compressor_stats: CompressorStats,
    pub emitter_stats: EmitterStats,
}

/// Runs selection, planning, P2S analysis and emission over `bits`, sliced
/// into `config.part_size`-trit partitions (the whole input is one partition
/// when `part_size == 0`). Each partition gets its own route, preload and
/// resync segment; the codebook's dynamic bindings persist across
/// partitions but its `TBR`/`TBC` bookkeeping is reset between them, per
/// [`Codebook::reset`].
pub fn run_pipeline(bits: &[Trit], config: &Config) -> Result<Vec<PartitionOutcome>> {
    let ext_cdws = config.effective_ext_cdws();
    let mut codebook = Codebook::new(ext_cdws, config.max_cdws);
    let part_size = if config.part_size == 0 {
        bits.len().max(1)
    } else {
        config.part_size
    };

    let mut outcomes = Vec::new();
    for (idx, chunk) in bits.chunks(part_size).enumerate() {
        if idx > 0 {
            codebook.reset(config.max_cdws);
        }
        outcomes.push(run_partition(chunk, config, &mut codebook, idx)?);
    }
    Ok(outcomes)
}

fn run_partition(
    bits: &[Trit],
    config: &Config,
    codebook: &mut Codebook,
    partition: usize,
) -> Result<PartitionOutcome> {
    let ext_cdws = config.effective_ext_cdws();
    let planner = GreedyPlanner {
        permute: config.heur_permute,
        ext_cdws,
    };

    let mut route = if !config.dynamic {
        StaticDictionarySelector.select(bits, codebook);
        planner.plan(bits, codebook)
    } else if config.sat {
        let selector = FormalDictionarySelector {
            cfg: FormalDictionarySelectorConfig {
                max_cdws: config.max_cdws,
                ext_cdws,
                two_pass: config.sat_sec,
                conflict_limit: config.sat_confl as u32,
            },
        };
        let result = selector.select(bits, codebook)?;
        log::debug!(
            "partition {}: formal selector installed {} UDW(s)",
            partition,
            result.installed.len()
        );
        let formal_planner = FormalPlanner { merging: false };
        formal_planner.plan(&result.replacements, bits.len(), partition)?
    } else {
        let selector = HeuristicDictionarySelector {
            inner_freq: config.heur_inner_freq,
            outer_freq: config.heur_outer_freq,
            byte_weight: config.heur_weight.max(0) as u32,
            max_cdws: config.max_cdws,
        };
        let picks = selector.select(bits, codebook);
        log::debug!("partition {}: heuristic selector picked {:?}", partition, picks);
        planner.plan(bits, codebook)
    };

    let finalizer = RouteFinalizer { merging: false };
    route = finalizer.finalize(route, bits.len(), partition)?;

    let mut compressor_stats = CompressorStats::default();
    for r in route.iter() {
        compressor_stats.record_replacement(r.cdw, r.benefit);
    }
    if config.merging {
        merge_with_stats(&mut route, &mut compressor_stats);
    }

    let p2s = p2s::P2SBuffer {
        max_cycles: bits.len() + 16,
    };
    let delay = if config.p2s_buffer {
        p2s.process_route(&route).0
    } else {
        0
    };
    let collector = p2s.collect(&route);
    let resync = emit::resync_string(&collector, delay);

    let events = emit::emit_route(&route);
    let mut emitter_stats = EmitterStats::default();
    for event in &events {
        match event {
            Event::Bit(_) => emitter_stats.compr_dr += 1,
            Event::ComprExit => emitter_stats.compr_exit += 1,
            Event::ComprRepeat => emitter_stats.compr_repeat += 1,
        }
    }
    let preload_bits = emit::preload_bits(codebook.tbcs());
    emitter_stats.config_cycles = preload_bits.len() as u32;

    if config.validate {
        let udw_to_cdw: HashMap<String, Cdw> = codebook
            .udw_map()
            .iter()
            .map(|(udw, &cdw)| (udw.clone(), cdw))
            .collect();
        let record = PartitionRecord::new(&udw_to_cdw, route.clone());
        Validator::validate(bits, &[record])?;
    }

    Ok(PartitionOutcome {
        route,
        events,
        preload_bits,
        delay,
        resync,
        compressor_stats,
        emitter_stats,
    })
}

/// Runs `Route::merge_repetitions` while attributing each merge to `stats`,
/// since the route's own merge pass only reports a count.
fn merge_with_stats(route: &mut Route, stats: &mut CompressorStats) {
    let snapshot: Vec<(Cdw, usize)> = route.iter().map(|r| (r.cdw, r.len())).collect();
    for i in 1..snapshot.len() {
        if snapshot[i - 1].0 == snapshot[i].0 {
            stats.record_merge(snapshot[i - 1].0, snapshot[i - 1].1);
        }
    }
    route.merge_repetitions();
}
