//! Fixed-window request rate policy gate.
//!
//! Every request is classified into one of three operation classes and must
//! pass two per-client counters: the global counter (evaluated first) and
//! the class counter. Windows are fixed, anchored at the first request of
//! each window, and reset on expiry; the triggering request is counted even
//! when it is rejected.
//!
//! Counters live in process memory keyed by client IP, which holds for a
//! single-process deployment. Counters do not survive restarts and are not
//! shared across instances; a multi-instance deployment needs an external
//! counter store.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::AppError;
use serde_json::json;

/// Operation classes with independent quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyClass {
    /// Record creation.
    Create,
    /// Resolve and stats.
    Read,
    /// Update and delete.
    Modify,
}

/// A window length and the number of requests admitted within it.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub window: Duration,
    pub limit: u32,
}

/// Global quota applied to every request before its class quota.
pub const GLOBAL_QUOTA: Quota = Quota {
    window: Duration::from_secs(15 * 60),
    limit: 200,
};

/// Per-class quotas.
pub fn class_quota(class: PolicyClass) -> Quota {
    match class {
        PolicyClass::Create => Quota {
            window: Duration::from_secs(15 * 60),
            limit: 100,
        },
        PolicyClass::Read => Quota {
            window: Duration::from_secs(60),
            limit: 60,
        },
        PolicyClass::Modify => Quota {
            window: Duration::from_secs(15 * 60),
            limit: 30,
        },
    }
}

/// Time source seam so window expiry is testable without sleeping.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Counter bucket identity: the global counter or one class counter,
/// per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Bucket {
    Global,
    Class(PolicyClass),
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Sweep the counter map once it grows past this many entries.
const SWEEP_THRESHOLD: usize = 100_000;

/// Fixed-window rate gate keyed by client IP.
///
/// The check-and-increment for both counters happens under one lock, so two
/// concurrent requests from the same client can never both observe spare
/// capacity and both be admitted past the quota.
pub struct FixedWindowGate<C: Clock = SystemClock> {
    clock: C,
    counters: Mutex<HashMap<(Bucket, IpAddr), Window>>,
}

impl FixedWindowGate<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FixedWindowGate<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FixedWindowGate<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Admits or rejects a request of the given class from `client`.
    ///
    /// The global counter is evaluated first; when it rejects, the class
    /// counter is not touched (the gate short-circuits the same way the
    /// outermost limiter in a middleware chain would). Both counters count
    /// the triggering request even on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] when either counter is over quota.
    pub fn admit(&self, class: PolicyClass, client: IpAddr) -> Result<(), AppError> {
        let now = self.clock.now();
        // Counter updates can't leave the map inconsistent, so a poisoned
        // lock is safe to recover from and the gate keeps serving.
        let mut counters = self
            .counters
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if counters.len() > SWEEP_THRESHOLD {
            sweep(&mut counters, now);
        }

        if !bump(&mut counters, (Bucket::Global, client), now, GLOBAL_QUOTA) {
            return Err(rejection(
                "Too many requests from this IP, please try again later.",
                GLOBAL_QUOTA,
            ));
        }

        let quota = class_quota(class);
        if !bump(&mut counters, (Bucket::Class(class), client), now, quota) {
            return Err(rejection(
                "Request quota for this operation exceeded, please try again later.",
                quota,
            ));
        }

        Ok(())
    }
}

/// Increments one counter and reports whether it is within quota.
///
/// An expired window is replaced rather than carried over; the new window
/// starts at the current request.
fn bump(
    counters: &mut HashMap<(Bucket, IpAddr), Window>,
    key: (Bucket, IpAddr),
    now: Instant,
    quota: Quota,
) -> bool {
    let window = counters.entry(key).or_insert(Window {
        started: now,
        count: 0,
    });

    if now.duration_since(window.started) >= quota.window {
        window.started = now;
        window.count = 0;
    }

    window.count = window.count.saturating_add(1);
    window.count <= quota.limit
}

fn sweep(counters: &mut HashMap<(Bucket, IpAddr), Window>, now: Instant) {
    counters.retain(|(bucket, _), window| {
        let quota = match bucket {
            Bucket::Global => GLOBAL_QUOTA,
            Bucket::Class(class) => class_quota(*class),
        };
        now.duration_since(window.started) < quota.window
    });
}

fn rejection(message: &str, quota: Quota) -> AppError {
    AppError::rate_limited(
        message,
        json!({
            "limit": quota.limit,
            "windowSeconds": quota.window.as_secs(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock advanced manually by tests.
    struct ManualClock {
        base: Instant,
        offset_ms: AtomicU64,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset_ms: AtomicU64::new(0),
            }
        }

        fn advance(&self, d: Duration) {
            self.offset_ms
                .fetch_add(d.as_millis() as u64, Ordering::SeqCst);
        }
    }

    impl Clock for Arc<ManualClock> {
        fn now(&self) -> Instant {
            self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
        }
    }

    fn gate() -> (FixedWindowGate<Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (FixedWindowGate::with_clock(clock.clone()), clock)
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_quota_admits_100_rejects_101st() {
        let (gate, _clock) = gate();
        let client = ip("192.0.2.1");

        for _ in 0..100 {
            gate.admit(PolicyClass::Create, client).unwrap();
        }

        let rejected = gate.admit(PolicyClass::Create, client);
        assert!(matches!(
            rejected.unwrap_err(),
            AppError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_window_reset_readmits() {
        let (gate, clock) = gate();
        let client = ip("192.0.2.1");

        for _ in 0..100 {
            gate.admit(PolicyClass::Create, client).unwrap();
        }
        assert!(gate.admit(PolicyClass::Create, client).is_err());

        clock.advance(Duration::from_secs(15 * 60));

        assert!(gate.admit(PolicyClass::Create, client).is_ok());
    }

    #[test]
    fn test_read_window_is_one_minute() {
        let (gate, clock) = gate();
        let client = ip("192.0.2.1");

        for _ in 0..60 {
            gate.admit(PolicyClass::Read, client).unwrap();
        }
        assert!(gate.admit(PolicyClass::Read, client).is_err());

        clock.advance(Duration::from_secs(60));

        assert!(gate.admit(PolicyClass::Read, client).is_ok());
    }

    #[test]
    fn test_modify_quota_is_30() {
        let (gate, _clock) = gate();
        let client = ip("192.0.2.1");

        for _ in 0..30 {
            gate.admit(PolicyClass::Modify, client).unwrap();
        }
        assert!(gate.admit(PolicyClass::Modify, client).is_err());
    }

    #[test]
    fn test_global_quota_caps_across_classes() {
        let (gate, clock) = gate();
        let client = ip("192.0.2.1");

        // Reads alone reach the 200-request global cap by cycling windows:
        // 60 reads per minute for 3 minutes, then 20 more.
        for _ in 0..3 {
            for _ in 0..60 {
                gate.admit(PolicyClass::Read, client).unwrap();
            }
            clock.advance(Duration::from_secs(60));
        }
        for _ in 0..20 {
            gate.admit(PolicyClass::Read, client).unwrap();
        }

        // Global counter is exhausted even though a fresh create class has
        // quota to spare.
        assert!(gate.admit(PolicyClass::Create, client).is_err());
    }

    #[test]
    fn test_clients_are_independent() {
        let (gate, _clock) = gate();

        for _ in 0..100 {
            gate.admit(PolicyClass::Create, ip("192.0.2.1")).unwrap();
        }
        assert!(gate.admit(PolicyClass::Create, ip("192.0.2.1")).is_err());

        assert!(gate.admit(PolicyClass::Create, ip("192.0.2.2")).is_ok());
    }

    #[test]
    fn test_rejected_requests_still_count() {
        let (gate, clock) = gate();
        let client = ip("192.0.2.1");

        for _ in 0..60 {
            gate.admit(PolicyClass::Read, client).unwrap();
        }

        // Hammering past the limit must not extend capacity...
        for _ in 0..50 {
            assert!(gate.admit(PolicyClass::Read, client).is_err());
        }

        // ...and a fresh window admits again.
        clock.advance(Duration::from_secs(60));
        assert!(gate.admit(PolicyClass::Read, client).is_ok());
    }

    #[test]
    fn test_gate_survives_poisoned_lock() {
        let gate = Arc::new(FixedWindowGate::new());
        let client = ip("192.0.2.1");

        gate.admit(PolicyClass::Read, client).unwrap();

        // Poison the counter lock by panicking while holding it.
        let poisoner = gate.clone();
        std::thread::spawn(move || {
            let _guard = poisoner.counters.lock().unwrap();
            panic!("poison");
        })
        .join()
        .unwrap_err();

        // The gate keeps serving, with counter state intact.
        gate.admit(PolicyClass::Read, client).unwrap();
        for _ in 0..58 {
            gate.admit(PolicyClass::Read, client).unwrap();
        }
        assert!(gate.admit(PolicyClass::Read, client).is_err());
    }

    #[test]
    fn test_concurrent_admits_never_exceed_quota() {
        let gate = Arc::new(FixedWindowGate::new());
        let client = ip("192.0.2.1");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = gate.clone();
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..40 {
                    if gate.admit(PolicyClass::Create, client).is_ok() {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // 8 * 40 = 320 attempts against a create quota of 100.
        assert_eq!(total, 100);
    }
}
