//! The Chain: the ordered, append-only sequence of records.
//!
//! Records sit behind a reader-writer lock. Appends hold the write half from
//! the moment they read the current length and tail hash until the new
//! record is pushed, so two appends can never link to the same predecessor.
//! The append time is read from the chain's clock under that same guard.
//! Lookups and validation share the read half.

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use starledger_core::{validate_records, Record, RecordHash, ValidationError};

use crate::clock::{SystemTimeSource, TimeSource};
use crate::config::ChainConfig;
use crate::error::{AppendError, ChainError, Result};

/// The ledger.
///
/// Construction appends the genesis record, so a `Chain` is never observed
/// empty. Height is always the length of the record sequence.
pub struct Chain {
    /// Append-only record sequence. Index == height.
    records: RwLock<Vec<Record>>,
    /// Configuration.
    config: ChainConfig,
    /// Clock for append times and challenge ages.
    time_source: Box<dyn TimeSource>,
}

impl Chain {
    /// Create a chain on the system clock, holding only its genesis record.
    pub fn new(config: ChainConfig) -> Self {
        Self::with_time_source(config, SystemTimeSource)
    }

    /// Create a chain that reads the time from `time_source`.
    pub fn with_time_source(config: ChainConfig, time_source: impl TimeSource + 'static) -> Self {
        let mut records = Vec::new();
        initialize_locked(&mut records, time_source.now_secs());
        Self {
            records: RwLock::new(records),
            config,
            time_source: Box::new(time_source),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Current time according to the chain's clock.
    pub fn now_secs(&self) -> u64 {
        self.time_source.now_secs()
    }

    /// Append the genesis record if the chain is empty.
    ///
    /// Returns whether a record was appended. `new` already does this, so on
    /// a constructed chain this is a no-op.
    pub async fn initialize(&self) -> bool {
        let mut records = self.records.write().await;
        initialize_locked(&mut records, self.now_secs()).is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Append Protocol
    // ─────────────────────────────────────────────────────────────────────────

    /// Run the append protocol on `record` and return the stored copy.
    pub(crate) async fn append(&self, record: Record) -> std::result::Result<Record, AppendError> {
        let mut records = self.records.write().await;
        let now = self.now_secs();
        let appended = append_locked(&mut records, record, now)?;
        drop(records);

        let hash = appended.hash.map(|h| h.to_hex()).unwrap_or_default();
        info!(height = appended.height, %hash, "appended record");
        Ok(appended)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of records, genesis included.
    pub async fn get_height(&self) -> u64 {
        self.records.read().await.len() as u64
    }

    /// A copy of every record. Mutating it does not touch the chain.
    pub async fn get_all_records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    /// First record whose identity hash is `hash` (hex).
    ///
    /// A string that is not a hash matches nothing.
    pub async fn get_by_hash(&self, hash: &str) -> Option<Record> {
        let Ok(wanted) = RecordHash::from_hex(hash) else {
            debug!(hash, "lookup with malformed hash");
            return None;
        };

        let records = self.records.read().await;
        records.iter().find(|r| r.hash == Some(wanted)).cloned()
    }

    /// Record at `index`, if the chain is that tall.
    pub async fn get_by_index(&self, index: u64) -> Option<Record> {
        let index = usize::try_from(index).ok()?;
        self.records.read().await.get(index).cloned()
    }

    /// Claim data of every record owned by `address`, in chain order.
    ///
    /// Genesis is skipped. Bodies that decode but carry no `address` are not
    /// claims and are skipped too. A body that fails to decode fails the
    /// whole lookup.
    pub async fn get_records_for_owner(&self, address: &str) -> Result<Vec<Value>> {
        let records = self.records.read().await;
        let mut claims = Vec::new();

        for record in records.iter().skip(1) {
            let payload = record.decode_payload().map_err(|source| {
                warn!(height = record.height, error = %source, "undecodable record body");
                ChainError::Decode {
                    height: record.height,
                    source,
                }
            })?;

            if payload.get("address").and_then(Value::as_str) == Some(address) {
                claims.push(payload.get("star").cloned().unwrap_or(Value::Null));
            }
        }

        debug!(address, count = claims.len(), "owner lookup");
        Ok(claims)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check every record and return one finding per tampered record.
    ///
    /// An empty result means the chain is intact.
    pub async fn validate_chain(&self) -> Vec<ValidationError> {
        let records = self.records.read().await;
        let findings = validate_records(&records, self.config.verify_linkage);
        drop(records);

        for finding in &findings {
            warn!(height = finding.height(), %finding, "validation finding");
        }
        findings
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

/// Append genesis to an empty sequence. Caller holds the write lock.
fn initialize_locked(records: &mut Vec<Record>, now: u64) -> Option<Record> {
    if !records.is_empty() {
        return None;
    }
    let genesis = seal(Record::genesis(), 0, None, now);
    records.push(genesis.clone());
    Some(genesis)
}

/// Link, stamp, hash, and push. Caller holds the write lock.
fn append_locked(
    records: &mut Vec<Record>,
    record: Record,
    now: u64,
) -> std::result::Result<Record, AppendError> {
    let previous_hash = match records.last() {
        Some(last) => Some(last.hash.ok_or(AppendError::MissingPredecessorHash {
            height: last.height,
        })?),
        None => None,
    };

    let sealed = seal(record, records.len() as u64, previous_hash, now);
    records.push(sealed.clone());
    Ok(sealed)
}

/// Fill in the append-time fields and the identity hash.
fn seal(mut record: Record, height: u64, previous_hash: Option<RecordHash>, now: u64) -> Record {
    record.height = height;
    record.time = now;
    record.previous_hash = previous_hash;
    record.hash = Some(record.compute_hash());
    record
}
