//! Target lookup, match policy and the match sink capability.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;

/// How a derived address is compared against the target list.
///
/// `Prefix(n)` is the historical policy: both sides are truncated to their
/// first `n` characters and compared case-insensitively. It is a fast
/// approximate filter, not proof of a hit. A prefix match can be a false
/// positive; anyone needing certainty must compare the full strings
/// downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPolicy {
    Prefix(usize),
    Exact,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Prefix(4)
    }
}

/// Read-only set of target addresses, loaded once at startup.
#[derive(Debug)]
pub struct TargetSet {
    entries: HashSet<String>,
}

impl TargetSet {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compares derived addresses against a target set under one policy.
/// The lookup index is built once; membership checks are O(1) per address.
pub struct MatchEngine {
    policy: MatchPolicy,
    index: HashSet<String>,
}

impl MatchEngine {
    pub fn new(policy: MatchPolicy, targets: &TargetSet) -> Self {
        let index = targets
            .entries
            .iter()
            .map(|entry| policy_key(entry, policy))
            .collect();
        Self { policy, index }
    }

    pub fn is_match(&self, address: &str) -> bool {
        if self.index.is_empty() {
            return false;
        }
        self.index.contains(&policy_key(address, self.policy))
    }
}

fn policy_key(s: &str, policy: MatchPolicy) -> String {
    match policy {
        MatchPolicy::Exact => s.to_string(),
        MatchPolicy::Prefix(n) => {
            let end = s
                .char_indices()
                .nth(n)
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            s[..end].to_lowercase()
        }
    }
}

/// One detected hit, written exactly once per detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub timestamp: DateTime<Utc>,
    pub address: String,
    pub private_key_hex: String,
}

impl MatchRecord {
    pub fn new(address: String, private_key_hex: String) -> Self {
        Self {
            timestamp: Utc::now(),
            address,
            private_key_hex,
        }
    }

    /// `<ISO-8601 timestamp> <address> <private key hex>`
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.address,
            self.private_key_hex
        )
    }
}

/// Append-only destination for match records. At-least-once durability:
/// duplicate writes on retry are acceptable, lost writes are not.
pub trait MatchSink: Send {
    fn record(&mut self, record: &MatchRecord) -> Result<()>;
}

/// In-memory sink; mainly for tests and dry runs.
#[derive(Default)]
pub struct VecSink {
    pub records: Vec<MatchRecord>,
}

impl MatchSink for VecSink {
    fn record(&mut self, record: &MatchRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
