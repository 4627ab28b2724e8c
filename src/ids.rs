//! Opaque identifiers handed out before the owning record is persisted.

use rand::{rngs::OsRng, RngCore};

pub const BENEFICIARY_ID_PREFIX: &str = "bf_";

// 10 random bytes => 20 hex chars
const BENEFICIARY_ID_BYTES: usize = 10;

/// Returns a fresh beneficiary id: `bf_` followed by 20 lowercase hex chars.
///
/// Collisions are as likely as two equal 80-bit random values, so storage
/// still carries a unique index on the field.
pub fn new_beneficiary_id() -> String {
    let mut bytes = [0u8; BENEFICIARY_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{}{}", BENEFICIARY_ID_PREFIX, hex::encode(bytes))
}

pub fn is_beneficiary_id(s: &str) -> bool {
    match s.strip_prefix(BENEFICIARY_ID_PREFIX) {
        Some(rest) => {
            rest.len() == BENEFICIARY_ID_BYTES * 2
                && rest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }
        None => false,
    }
}
