//! Matcher tuning parameters.

use std::time::Duration;
use thiserror::Error;

/// Default minimum queue residency before a report may be finalized.
pub const DEFAULT_MAX_REQUEST_SKEW: Duration = Duration::from_millis(3000);
/// Default maximum event-time difference for two reports to match.
pub const DEFAULT_MAX_CLOCK_SKEW: Duration = Duration::from_millis(100);
/// Default admission capacity.
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 1000;
/// Default maximum distance (meters, exclusive) for two reports to match.
pub const DEFAULT_MAX_DISTANCE: f64 = 100.0;
/// Default period between two scheduler passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(400);

/// Configuration for a [`Matcher`](crate::Matcher).
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Reports are only finalized once they have been queued for longer
    /// than this, so that late partners still get a chance to arrive.
    pub max_request_skew: Duration,
    /// Maximum allowed difference between two caller-supplied event times.
    pub max_clock_skew: Duration,
    /// Queue capacity. Admissions beyond it fail with `queue_full`.
    pub max_queue_size: usize,
    /// Maximum great-circle distance in meters. Comparison is strict.
    pub max_distance: f64,
    /// Scheduler tick period.
    pub interval: Duration,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_request_skew: DEFAULT_MAX_REQUEST_SKEW,
            max_clock_skew: DEFAULT_MAX_CLOCK_SKEW,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            max_distance: DEFAULT_MAX_DISTANCE,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Reasons a [`MatcherConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatcherConfigError {
    #[error("interval must be greater than zero")]
    ZeroInterval,
    #[error("max_queue_size must be greater than zero")]
    ZeroQueueSize,
    #[error("max_distance must be a positive finite number, got {0}")]
    InvalidDistance(f64),
}

impl MatcherConfig {
    /// Check that the configuration can drive a scheduler.
    pub fn validate(&self) -> Result<(), MatcherConfigError> {
        if self.interval.is_zero() {
            return Err(MatcherConfigError::ZeroInterval);
        }
        if self.max_queue_size == 0 {
            return Err(MatcherConfigError::ZeroQueueSize);
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(MatcherConfigError::InvalidDistance(self.max_distance));
        }
        Ok(())
    }

    /// Maximum clock skew in whole milliseconds, the unit of event times.
    pub(crate) fn max_clock_skew_ms(&self) -> u64 {
        u64::try_from(self.max_clock_skew.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.max_request_skew, Duration::from_secs(3));
        assert_eq!(config.max_clock_skew, Duration::from_millis(100));
        assert_eq!(config.max_queue_size, 1000);
        assert_eq!(config.max_distance, 100.0);
        assert_eq!(config.interval, Duration::from_millis(400));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unusable_values() {
        let config = MatcherConfig {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(MatcherConfigError::ZeroInterval));

        let config = MatcherConfig {
            max_queue_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(MatcherConfigError::ZeroQueueSize));

        let config = MatcherConfig {
            max_distance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MatcherConfigError::InvalidDistance(_))
        ));

        let config = MatcherConfig {
            max_distance: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
