//! Expiry policy for query string signing.

use std::sync::Arc;
use std::sync::RwLock;

/// Default relative expiry applied by freshly configured generators.
pub const DEFAULT_EXPIRES_IN: i64 = 60;

/// ExpiryPolicy tracks either a relative time-to-live or an absolute unix
/// timestamp. Setting one clears the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryPolicy {
    relative: Option<i64>,
    absolute: Option<i64>,
}

impl ExpiryPolicy {
    /// Create a policy that expires `seconds` after signing time.
    pub fn relative(seconds: i64) -> Self {
        Self {
            relative: Some(seconds),
            absolute: None,
        }
    }

    /// Create a policy that expires at the given unix timestamp.
    pub fn absolute(timestamp: i64) -> Self {
        Self {
            relative: None,
            absolute: Some(timestamp),
        }
    }

    /// Expire `seconds` after signing time, clearing any absolute expiry.
    pub fn set_relative(&mut self, seconds: i64) {
        self.relative = Some(seconds);
        self.absolute = None;
    }

    /// Expire at `timestamp`, clearing any relative expiry.
    pub fn set_absolute(&mut self, timestamp: i64) {
        self.absolute = Some(timestamp);
        self.relative = None;
    }

    /// Reset to the unset state.
    pub fn clear(&mut self) {
        self.relative = None;
        self.absolute = None;
    }

    /// Returns true if either expiry is set.
    pub fn is_set(&self) -> bool {
        self.relative.is_some() || self.absolute.is_some()
    }

    /// Resolve the policy into a unix timestamp.
    ///
    /// An unset policy resolves to `0`. A relative expiry past the range of
    /// `i64` saturates, use [`ExpiryPolicy::checked_resolve`] to detect it.
    pub fn resolve(&self, now: i64) -> i64 {
        match (self.relative, self.absolute) {
            (Some(relative), _) => now.saturating_add(relative),
            (None, Some(absolute)) => absolute,
            (None, None) => 0,
        }
    }

    /// Resolve the policy, returning `None` if `now + relative` overflows.
    pub fn checked_resolve(&self, now: i64) -> Option<i64> {
        match self.relative {
            Some(relative) => now.checked_add(relative),
            None => Some(self.resolve(now)),
        }
    }
}

/// What the query scheme does when the expiry policy is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsetExpiry {
    /// Fail with an expiry unset error.
    #[default]
    Reject,
    /// Sign with `Expires=0`.
    Zero,
}

/// ExpiryCell shares one [`ExpiryPolicy`] between clones of a generator.
///
/// Readers racing a setter observe either the old or the new policy.
#[derive(Debug, Clone, Default)]
pub struct ExpiryCell {
    policy: Arc<RwLock<ExpiryPolicy>>,
}

impl ExpiryCell {
    /// Create a cell holding `policy`.
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self {
            policy: Arc::new(RwLock::new(policy)),
        }
    }

    /// Take a copy of the current policy.
    pub fn get(&self) -> ExpiryPolicy {
        *self.policy.read().expect("lock poisoned")
    }

    /// Replace the whole policy.
    pub fn set(&self, policy: ExpiryPolicy) {
        *self.policy.write().expect("lock poisoned") = policy;
    }

    /// See [`ExpiryPolicy::set_relative`].
    pub fn set_relative(&self, seconds: i64) {
        self.policy.write().expect("lock poisoned").set_relative(seconds);
    }

    /// See [`ExpiryPolicy::set_absolute`].
    pub fn set_absolute(&self, timestamp: i64) {
        self.policy
            .write()
            .expect("lock poisoned")
            .set_absolute(timestamp);
    }

    /// See [`ExpiryPolicy::clear`].
    pub fn clear(&self) {
        self.policy.write().expect("lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_relative_then_absolute() {
        let mut policy = ExpiryPolicy::default();
        policy.set_relative(60);
        assert_eq!(policy.resolve(1000), 1060);

        policy.set_absolute(2000);
        assert_eq!(policy.resolve(1000), 2000);
        assert_eq!(policy.resolve(999_999), 2000);

        policy.set_relative(5);
        assert_eq!(policy.resolve(10), 15);
    }

    #[test]
    fn test_unset_resolves_to_zero() {
        let mut policy = ExpiryPolicy::relative(30);
        policy.clear();
        assert!(!policy.is_set());
        assert_eq!(policy.resolve(1000), 0);
    }

    #[test]
    fn test_relative_overflow() {
        let policy = ExpiryPolicy::relative(i64::MAX);
        assert_eq!(policy.checked_resolve(1000), None);
        assert_eq!(policy.resolve(1000), i64::MAX);

        let policy = ExpiryPolicy::relative(i64::MIN);
        assert_eq!(policy.checked_resolve(-1), None);
        assert_eq!(ExpiryPolicy::absolute(7).checked_resolve(i64::MAX), Some(7));
        assert_eq!(ExpiryPolicy::default().checked_resolve(1000), Some(0));
    }

    #[test]
    fn test_cell_is_shared_between_clones() {
        let cell = ExpiryCell::new(ExpiryPolicy::relative(DEFAULT_EXPIRES_IN));
        let other = cell.clone();

        let handle = thread::spawn(move || other.set_absolute(1234));
        handle.join().unwrap();

        assert_eq!(cell.get(), ExpiryPolicy::absolute(1234));
    }
}
