use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

const REFERENCE_PREFIX: &str = "TFR";
const REFERENCE_LEN: usize = 8;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces client-side transaction references for channels that need one
/// before the server assigns its own. Format: `TFR` + 8 uppercase
/// alphanumeric characters, fresh on every call, never memoized.
pub trait ReferenceSource: Send + Sync {
    fn next_reference(&self) -> String;
}

/// Default source. Entropy is read fallibly: when the OS entropy source is
/// unavailable the process-wide counter takes over, so generating a
/// reference cannot fail.
#[derive(Debug, Default)]
pub struct RandomReferences;

impl ReferenceSource for RandomReferences {
    fn next_reference(&self) -> String {
        let mut bytes = [0u8; REFERENCE_LEN];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => from_entropy(bytes),
            Err(err) => {
                warn!("Entropy source unavailable, using counter references ===> {}", err);
                COUNTER_FALLBACK.next_reference()
            }
        }
    }
}

fn from_entropy(bytes: [u8; REFERENCE_LEN]) -> String {
    let suffix: String = bytes
        .iter()
        .map(|byte| CHARSET[*byte as usize % CHARSET.len()] as char)
        .collect();
    format!("{REFERENCE_PREFIX}{suffix}")
}

static COUNTER_FALLBACK: Lazy<CounterReferences> = Lazy::new(CounterReferences::new);

/// Monotonically increasing counter seeded from the clock at process start,
/// rendered into the same charset. Still yields distinct references without
/// any entropy.
#[derive(Debug)]
pub struct CounterReferences {
    next: AtomicU64,
}

impl CounterReferences {
    pub fn new() -> CounterReferences {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        CounterReferences {
            next: AtomicU64::new(seed),
        }
    }
}

impl Default for CounterReferences {
    fn default() -> CounterReferences {
        CounterReferences::new()
    }
}

impl ReferenceSource for CounterReferences {
    fn next_reference(&self) -> String {
        let mut value = self.next.fetch_add(1, Ordering::Relaxed);
        let mut suffix = [CHARSET[0]; REFERENCE_LEN];
        for slot in suffix.iter_mut().rev() {
            *slot = CHARSET[(value % CHARSET.len() as u64) as usize];
            value /= CHARSET.len() as u64;
        }
        let suffix: String = suffix.iter().map(|byte| *byte as char).collect();
        format!("{REFERENCE_PREFIX}{suffix}")
    }
}

/// Convenience for call sites that just need one fresh reference.
pub fn generate() -> String {
    RandomReferences.next_reference()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_well_formed(reference: &str) {
        assert!(reference.starts_with(REFERENCE_PREFIX));
        let suffix = &reference[REFERENCE_PREFIX.len()..];
        assert_eq!(suffix.len(), REFERENCE_LEN);
        assert!(suffix
            .bytes()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit()));
    }

    #[test]
    fn random_references_are_distinct_and_well_formed() {
        let source = RandomReferences;
        let references: HashSet<String> =
            (0..1000).map(|_| source.next_reference()).collect();
        assert_eq!(references.len(), 1000);
        for reference in &references {
            assert_well_formed(reference);
        }
    }

    #[test]
    fn every_entropy_byte_maps_into_the_charset() {
        assert_well_formed(&from_entropy([0; REFERENCE_LEN]));
        assert_well_formed(&from_entropy([255; REFERENCE_LEN]));
        assert_well_formed(&from_entropy([0, 35, 36, 71, 128, 200, 254, 7]));
    }

    #[test]
    fn counter_references_are_distinct_and_well_formed() {
        let source = CounterReferences::new();
        let references: HashSet<String> =
            (0..1000).map(|_| source.next_reference()).collect();
        assert_eq!(references.len(), 1000);
        for reference in &references {
            assert_well_formed(reference);
        }
    }

    #[test]
    fn the_shared_counter_fallback_keeps_producing_fresh_references() {
        // The path taken when the entropy read fails.
        let first = COUNTER_FALLBACK.next_reference();
        let second = COUNTER_FALLBACK.next_reference();
        assert_ne!(first, second);
        assert_well_formed(&first);
        assert_well_formed(&second);
    }

    #[test]
    fn generate_is_not_memoized() {
        assert_ne!(generate(), generate());
    }
}
