//! Record validation: self-consistency, position, and linkage checks.

use crate::error::ValidationError;
use crate::record::Record;

/// Check a record's stored hash against its content.
pub fn validate_record(record: &Record) -> Result<(), ValidationError> {
    let stored = record.hash.ok_or(ValidationError::MissingHash {
        height: record.height,
    })?;

    let computed = record.compute_hash();
    if stored != computed {
        return Err(ValidationError::HashMismatch {
            height: record.height,
            stored,
            computed,
        });
    }

    Ok(())
}

/// Check that `record` sits at `position` and links to `previous`.
///
/// `previous` is `None` only for the record at position 0, which must carry
/// a null previous hash.
pub fn validate_link(
    previous: Option<&Record>,
    record: &Record,
    position: u64,
) -> Result<(), ValidationError> {
    if record.height != position {
        return Err(ValidationError::HeightMismatch {
            position,
            height: record.height,
        });
    }

    let expected = previous.and_then(|p| p.hash);
    if record.previous_hash != expected {
        return Err(ValidationError::BrokenLink {
            height: record.height,
            expected,
            found: record.previous_hash,
        });
    }

    Ok(())
}

/// Validate a whole sequence, reporting at most one finding per record.
///
/// Self-consistency is always checked. With `check_links`, each record must
/// also sit at its own index and point at its predecessor's stored hash.
pub fn validate_records(records: &[Record], check_links: bool) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    for (index, record) in records.iter().enumerate() {
        // A failed self-check is the finding for this record; linkage is
        // only looked at for records that are internally consistent.
        if let Err(e) = validate_record(record) {
            findings.push(e);
            continue;
        }

        if check_links {
            let previous = index.checked_sub(1).and_then(|i| records.get(i));
            if let Err(e) = validate_link(previous, record, index as u64) {
                findings.push(e);
            }
        }
    }

    findings
}
