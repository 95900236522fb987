// Time source and identity generation
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generates `<prefix>-<token>` identities.
///
/// Tokens are seeded from the clock's milliseconds and never repeat within
/// one generator, even when the clock stalls or goes backwards.
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    fn next_token(&self) -> u64 {
        let millis = self.clock.now().timestamp_millis().max(0) as u64;
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = millis.max(current + 1);
            match self
                .last
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Next identity for which `taken` is false
    pub fn unique<F>(&self, prefix: &str, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let candidate = format!("{}-{}", prefix, self.next_token());
            if !taken(&candidate) {
                return candidate;
            }
            tracing::debug!(candidate = %candidate, "generated id already taken, drawing again");
        }
    }
}
