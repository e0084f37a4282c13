//! Brute-force scanner over the secp256k1 private-key space.
//!
//! The key space is partitioned into randomly sampled 30-byte high-order
//! prefixes; each prefix block's 16-bit suffix range is swept exhaustively.
//! Every candidate key is expanded into eleven labeled addresses (nine
//! Bitcoin-family encodings plus Ethereum) and checked against a target set
//! under a configurable match policy. Hits are appended to a durable sink
//! with the recovered private key.

pub mod derive;
pub mod encode;
pub mod error;
pub mod hashes;
pub mod io;
pub mod keys;
pub mod matching;
pub mod partition;
pub mod scalar;
pub mod search;

pub use derive::{AddressRecord, derive_all};
pub use error::{Error, Result};
pub use matching::{MatchEngine, MatchPolicy, MatchRecord, MatchSink, TargetSet};
pub use partition::PrefixSampler;
pub use scalar::PrivateScalar;
pub use search::{ContinueDecision, SearchConfig, SearchState, run};
