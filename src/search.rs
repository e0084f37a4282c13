//! The block-scanning loop: sample a prefix, sweep its suffixes across
//! worker threads, decide whether to continue.

use std::ops::RangeInclusive;
use std::panic;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use bitcoin::secp256k1::{All, Secp256k1};
use log::info;

use crate::derive::derive_all;
use crate::error::Result;
use crate::matching::{MatchEngine, MatchRecord, MatchSink};
use crate::partition::{Prefix, PrefixSampler, SUFFIX_COUNT, compose};
use crate::scalar::PrivateScalar;

/// Suffixes scanned between cancellation checks inside a worker.
const CANCEL_STRIDE: u16 = 256;

pub struct SearchConfig {
    /// Worker threads per block.
    pub threads: usize,
    /// Suffixes between status dumps (0 disables them).
    pub status_interval: u16,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            status_interval: 1000,
        }
    }
}

/// Explicit loop state, threaded through instead of global accumulators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub blocks_completed: u64,
    pub keys_scanned: u64,
    pub matches_found: u64,
}

/// Decides between blocks whether scanning goes on. Anything but an explicit
/// yes terminates the loop.
pub trait ContinueDecision {
    fn continue_scanning(&mut self, state: &SearchState) -> bool;
}

enum Phase {
    SamplingPrefix,
    ScanningSuffixes(Prefix),
    AwaitingContinueDecision,
    Terminated,
}

/// Runs the unbounded search: prefix blocks until the decision callback
/// declines or the cancellation flag is raised. The flag is observed between
/// suffix batches, so an interrupted block still emits its in-flight matches
/// before the workers stop.
pub fn run<S: MatchSink>(
    config: &SearchConfig,
    engine: &MatchEngine,
    sink: &mut S,
    cancel: &AtomicBool,
    decision: &mut dyn ContinueDecision,
) -> Result<SearchState> {
    let secp = Secp256k1::new();
    let sampler = PrefixSampler::new();
    let mut rng = rand::thread_rng();
    let mut state = SearchState::default();
    let sink = Mutex::new(sink as &mut dyn MatchSink);

    let mut phase = Phase::SamplingPrefix;
    loop {
        phase = match phase {
            Phase::SamplingPrefix => {
                if cancel.load(Ordering::SeqCst) {
                    Phase::Terminated
                } else {
                    Phase::ScanningSuffixes(sampler.sample(&mut rng))
                }
            }
            Phase::ScanningSuffixes(prefix) => {
                let stats = scan_block(&secp, config, engine, prefix, &sink, cancel)?;
                state.keys_scanned += stats.scanned;
                state.matches_found += stats.matched;
                if cancel.load(Ordering::SeqCst) {
                    Phase::Terminated
                } else {
                    state.blocks_completed += 1;
                    info!(
                        "finished suffix 0000-ffff for prefix {}..",
                        &prefix.to_hex()[..8]
                    );
                    Phase::AwaitingContinueDecision
                }
            }
            Phase::AwaitingContinueDecision => {
                if decision.continue_scanning(&state) {
                    Phase::SamplingPrefix
                } else {
                    Phase::Terminated
                }
            }
            Phase::Terminated => break,
        };
    }
    Ok(state)
}

pub struct RangeStats {
    pub scanned: u64,
    pub matched: u64,
}

/// Scans one full prefix block, splitting the suffix range over worker
/// threads. Workers share only the read-only engine and the mutex-guarded
/// sink; the first sink failure aborts the block.
pub fn scan_block(
    secp: &Secp256k1<All>,
    config: &SearchConfig,
    engine: &MatchEngine,
    prefix: Prefix,
    sink: &Mutex<&mut dyn MatchSink>,
    cancel: &AtomicBool,
) -> Result<RangeStats> {
    let threads = config.threads.max(1);
    let chunk = (SUFFIX_COUNT as usize).div_ceil(threads) as u32;

    let results = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for worker in 0..threads {
            let lo = worker as u32 * chunk;
            if lo >= SUFFIX_COUNT {
                break;
            }
            let hi = ((worker as u32 + 1) * chunk - 1).min(SUFFIX_COUNT - 1);
            // Only the lowest range reports status; one view of the block
            // is enough and the workers stay independent.
            let interval = if worker == 0 { config.status_interval } else { 0 };
            handles.push(scope.spawn(move || {
                scan_suffix_range(
                    secp,
                    engine,
                    prefix,
                    lo as u16..=hi as u16,
                    interval,
                    sink,
                    cancel,
                )
            }));
        }
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    let mut stats = RangeStats {
        scanned: 0,
        matched: 0,
    };
    for result in results {
        let part = result?;
        stats.scanned += part.scanned;
        stats.matched += part.matched;
    }
    Ok(stats)
}

/// Sweeps one contiguous suffix range: compose, validate, derive, match.
/// Every suffix in the range is visited exactly once, ascending, unless the
/// cancellation flag stops the sweep at a batch boundary.
pub fn scan_suffix_range(
    secp: &Secp256k1<All>,
    engine: &MatchEngine,
    prefix: Prefix,
    range: RangeInclusive<u16>,
    status_interval: u16,
    sink: &Mutex<&mut dyn MatchSink>,
    cancel: &AtomicBool,
) -> Result<RangeStats> {
    let mut stats = RangeStats {
        scanned: 0,
        matched: 0,
    };
    for suffix in range {
        if suffix % CANCEL_STRIDE == 0 && cancel.load(Ordering::Relaxed) {
            break;
        }
        let candidate = compose(&prefix, suffix);
        // The sampler guarantees the whole block is in range; a failure here
        // means broken partition math and must abort the search.
        let scalar = PrivateScalar::from_bytes(candidate)?;
        let bundle = derive_all(secp, &scalar)?;

        if status_interval != 0 && suffix % status_interval == 0 {
            info!("private key: {}", scalar.to_hex());
            for record in &bundle {
                let shown = if record.address.starts_with("0x") {
                    record.address.as_str()
                } else {
                    &record.address[..3]
                };
                info!("{}: {}", record.label, shown);
            }
        }

        for record in &bundle {
            if engine.is_match(&record.address) {
                let hit = MatchRecord::new(record.address.clone(), scalar.to_hex());
                info!("address found: {} ({})", hit.address, record.label);
                let mut guard = match sink.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.record(&hit)?;
                stats.matched += 1;
            }
        }
        stats.scanned += 1;
    }
    Ok(stats)
}
