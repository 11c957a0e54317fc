use blake3::Hasher;

use crate::condition::MedicalCondition;
use crate::scoring::IdentifiedFactors;

/// Memo key for one scoring request against one snapshot epoch.
///
/// Factors are hashed in sorted order so input order does not change the key.
/// Fields are separated by a `0x1f` byte, which normalized terms never contain
/// in practice.
pub fn hash_request(factors: &IdentifiedFactors, body_location: Option<&str>, epoch: u64) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&epoch.to_le_bytes());
    for term in factors.sorted() {
        hasher.update(term.as_bytes());
        hasher.update(&[0x1f]);
    }
    hasher.update(b"|");
    if let Some(loc) = body_location {
        hasher.update(loc.trim().to_lowercase().as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Content digest of a condition set, in iteration order.
pub fn hash_conditions(conditions: &[MedicalCondition]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    for condition in conditions {
        let bytes = serde_json::to_vec(condition).unwrap_or_default();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    *hasher.finalize().as_bytes()
}

/// Lowercase hex rendering used in logs and the readiness endpoint.
pub fn to_hex(hash: &[u8; 32]) -> String {
    blake3::Hash::from_bytes(*hash).to_hex().to_string()
}
