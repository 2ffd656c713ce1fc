//! Identifier generation for records and extra characters.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A random v4 UUID drawn from the OS generator. Falls back to a
/// time+random composite when the OS generator is unavailable.
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "os rng unavailable, using time-based id");
            time_random_id()
        }
    }
}

static FALLBACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Base-36 epoch milliseconds followed by base-36 pseudo-random digits.
pub fn time_random_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seq = FALLBACK_SEQ.fetch_add(1, Ordering::Relaxed);
    let seed = (now.as_nanos() as u64) ^ seq.rotate_left(32);
    let mut rng = StdRng::seed_from_u64(seed);
    let suffix: u64 = rng.gen();
    format!(
        "{}{}",
        to_base36(now.as_millis() as u64),
        to_base36(suffix)
    )
}

pub fn is_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
