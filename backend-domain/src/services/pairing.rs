use std::collections::HashMap;

use crate::entities::MatchRecord;
use crate::services::fingerprint::Fingerprint;
use crate::value_objects::MatchResult;

/// The opponent's records keyed by fingerprint. One key can hold several
/// records when the same pairing recurs.
///
/// Pairing is consume-once: a record handed out by [`FingerprintIndex::claim_opposite`]
/// is never offered again, so repeated identical fingerprints pair up in
/// stored order instead of all landing on the first candidate.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    buckets: HashMap<Fingerprint, Vec<MatchRecord>>,
}

impl FingerprintIndex {
    pub fn build(records: Vec<MatchRecord>) -> Self {
        let mut buckets: HashMap<Fingerprint, Vec<MatchRecord>> = HashMap::new();
        for record in records {
            buckets.entry(record.fingerprint()).or_default().push(record);
        }
        Self { buckets }
    }

    /// First unclaimed candidate under `fingerprint` whose result is the exact
    /// opposite of `result`.
    pub fn claim_opposite(&mut self, fingerprint: &Fingerprint, result: MatchResult) -> Option<MatchRecord> {
        let bucket = self.buckets.get_mut(fingerprint)?;
        let position = bucket
            .iter()
            .position(|candidate| result.is_opposite_of(candidate.result))?;
        Some(bucket.remove(position))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
