//! Request nonces.
//!
//! Bitfinex rejects a signed request whose `bfx-nonce` is not above the last
//! one it accepted for the key (error 10114, `nonce: small`). Nonces here are
//! milliseconds since the Unix epoch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of `bfx-nonce` values.
pub trait NonceProvider: Send + Sync {
    /// Return a nonce greater than every value this provider returned before.
    fn next_nonce(&self) -> u64;
}

/// Millisecond clock nonce that never repeats or goes backwards.
///
/// When the clock has not advanced past the last issued value (two requests in
/// one millisecond, or the clock stepping back) the last value plus one is
/// issued instead. A single instance may be shared across threads.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    last: AtomicU64,
}

impl IncreasingNonce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above a nonce already used with the same key, e.g. one persisted
    /// by a previous process whose clock ran ahead.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::now_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_tracks_wall_clock() {
        let before = IncreasingNonce::now_millis();
        let nonce = IncreasingNonce::new().next_nonce();
        let after = IncreasingNonce::now_millis();

        assert!((before..=after).contains(&nonce));
        assert_eq!(nonce.to_string().len(), 13);
    }

    #[test]
    fn test_burst_within_one_millisecond() {
        let nonces = IncreasingNonce::new();
        let issued: Vec<u64> = (0..1000).map(|_| nonces.next_nonce()).collect();
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_starting_after_clock() {
        let ahead = IncreasingNonce::now_millis() + 60_000;
        let nonces = IncreasingNonce::starting_after(ahead);

        assert_eq!(nonces.next_nonce(), ahead + 1);
        assert_eq!(nonces.next_nonce(), ahead + 2);
    }

    #[test]
    fn test_shared_between_threads() {
        let nonces = Arc::new(IncreasingNonce::new());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let nonces = Arc::clone(&nonces);
                thread::spawn(move || (0..1000).map(|_| nonces.next_nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for worker in workers {
            let issued = worker.join().unwrap();
            assert!(issued.windows(2).all(|w| w[0] < w[1]));
            for nonce in issued {
                assert!(seen.insert(nonce), "nonce {nonce} issued twice");
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
