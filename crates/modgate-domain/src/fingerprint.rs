use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a complaint.
///
/// Identity fields:
/// - criterion_id
/// - module name
/// - complaint message
pub fn fingerprint_for_complaint(criterion_id: &str, module: &str, message: &str) -> String {
    let canonical = [criterion_id, module, message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
