//! OAuth pending-state store
//!
//! Single-use, expiring state tokens for the authorization redirect.
//! Process-local: this service is deployed single-instance; a shared
//! keyed store with TTL would replace this in a multi-instance setup.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::{distributions::Alphanumeric, Rng};

/// Entries older than this are treated as abandoned flows
const DEFAULT_TTL_MINUTES: i64 = 10;

/// Length of generated state tokens (~256 bits of alphanumeric entropy)
const STATE_TOKEN_LEN: usize = 43;

/// Concurrent-safe single-use store for OAuth state tokens
#[derive(Debug)]
pub struct StateStore {
    states: DashMap<String, DateTime<Utc>>,
    ttl: Duration,
}

impl StateStore {
    /// Create a store with the default 10-minute TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Create a store with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            states: DashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh unguessable state token and record it as pending
    pub fn issue(&self) -> String {
        self.sweep();

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_TOKEN_LEN)
            .map(char::from)
            .collect();

        self.states.insert(token.clone(), Utc::now());
        token
    }

    /// Consume a state token, returning whether it was valid
    ///
    /// Removal and check are a single map operation, so a token can never
    /// validate twice even under concurrent callbacks.
    pub fn consume(&self, state: &str) -> bool {
        match self.states.remove(state) {
            Some((_, issued_at)) => Utc::now() - issued_at <= self.ttl,
            None => false,
        }
    }

    /// Drop expired entries so abandoned flows don't accumulate
    fn sweep(&self) {
        let now = Utc::now();
        self.states.retain(|_, issued_at| now - *issued_at <= self.ttl);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
