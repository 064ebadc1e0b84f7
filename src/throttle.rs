//! Login attempt throttling: a global per-second cap and a per-admin-id cap.
//! Used by: handlers::auth, state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{lock_err, Error, Result};

const GLOBAL_WINDOW: Duration = Duration::from_secs(1);
const ADMIN_WINDOW: Duration = Duration::from_secs(60);
const PRUNE_EVERY: Duration = Duration::from_secs(300);

pub struct ThrottleConfig {
    pub global_per_sec: u32,
    pub per_admin_per_min: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            global_per_sec: 50,
            per_admin_per_min: 10,
        }
    }
}

/// Fixed-window hit counts keyed by `K`, all sharing one window length and limit.
struct Windows<K> {
    window: Duration,
    limit: u32,
    hits: HashMap<K, (Instant, u32)>,
}

impl<K: Eq + Hash> Windows<K> {
    fn new(window: Duration, limit: u32) -> Self {
        Self { window, limit, hits: HashMap::new() }
    }

    /// Records a hit for `key` at `now`; false once the window's limit is passed.
    fn hit(&mut self, key: K, now: Instant) -> bool {
        let (started, count) = self.hits.entry(key).or_insert((now, 0));
        if now.saturating_duration_since(*started) >= self.window {
            *started = now;
            *count = 0;
        }
        *count = count.saturating_add(1);
        *count <= self.limit
    }

    /// Drops keys whose window closed before `now`.
    fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.hits
            .retain(|_, (started, _)| now.saturating_duration_since(*started) < window);
    }

    fn len(&self) -> usize {
        self.hits.len()
    }
}

struct Counters {
    global: Windows<()>,
    per_admin: Windows<String>,
    pruned_at: Instant,
}

pub struct LoginThrottle {
    counters: Mutex<Counters>,
}

impl LoginThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            counters: Mutex::new(Counters {
                global: Windows::new(GLOBAL_WINDOW, config.global_per_sec),
                per_admin: Windows::new(ADMIN_WINDOW, config.per_admin_per_min),
                pruned_at: Instant::now(),
            }),
        }
    }

    /// Counts one login attempt for `admin_id`, failing once a limit is exceeded.
    pub fn check(&self, admin_id: &str) -> Result<()> {
        self.check_at(admin_id, Instant::now())
    }

    fn check_at(&self, admin_id: &str, now: Instant) -> Result<()> {
        let mut counters = self.counters.lock().map_err(lock_err("throttle"))?;

        if now.saturating_duration_since(counters.pruned_at) >= PRUNE_EVERY {
            counters.per_admin.prune(now);
            counters.pruned_at = now;
        }

        if !counters.global.hit((), now) {
            return Err(Error::RateLimited("too many login attempts".into()));
        }
        if !counters.per_admin.hit(admin_id.to_owned(), now) {
            return Err(Error::RateLimited(format!(
                "login limit: {} attempts per {}s",
                counters.per_admin.limit,
                ADMIN_WINDOW.as_secs()
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    fn tracked_admins(&self) -> usize {
        self.counters.lock().map(|c| c.per_admin.len()).unwrap_or(0)
    }
}
