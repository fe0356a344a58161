use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::{Action, ActionDecision, FraudDecision, Variant};

/// Metrics registry for the application.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total evaluations performed
    pub evaluations_total: AtomicU64,

    /// Tiered evaluations by action
    pub tiered_approve: AtomicU64,
    pub tiered_manual_review: AtomicU64,
    pub tiered_reject: AtomicU64,

    /// Fraud flag evaluations by verdict
    pub fraud_flagged: AtomicU64,
    pub fraud_clear: AtomicU64,

    /// Request bodies that failed to decode
    pub malformed_tiered: AtomicU64,
    pub malformed_fraud_flag: AtomicU64,

    /// Cumulative evaluation latency buckets (upper bound inclusive)
    pub latency_le_100us: AtomicU64,
    pub latency_le_1ms: AtomicU64,
    pub latency_le_10ms: AtomicU64,

    /// Observation count (the `+Inf` bucket) and sum in microseconds
    pub latency_count: AtomicU64,
    pub latency_sum_micros: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a tiered action decision.
    pub fn record_action(&self, decision: &ActionDecision) {
        self.evaluations_total.fetch_add(1, Ordering::Relaxed);

        match decision.action {
            Action::Approve => {
                self.tiered_approve.fetch_add(1, Ordering::Relaxed);
            }
            Action::ManualReview => {
                self.tiered_manual_review.fetch_add(1, Ordering::Relaxed);
            }
            Action::Reject => {
                self.tiered_reject.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record a fraud flag decision.
    pub fn record_fraud_flag(&self, decision: &FraudDecision) {
        self.evaluations_total.fetch_add(1, Ordering::Relaxed);

        if decision.is_fraud {
            self.fraud_flagged.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fraud_clear.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a request body that could not be decoded.
    pub fn record_malformed(&self, variant: Variant) {
        match variant {
            Variant::Tiered => self.malformed_tiered.fetch_add(1, Ordering::Relaxed),
            Variant::FraudFlag => self.malformed_fraud_flag.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Record evaluation latency.
    pub fn record_latency(&self, start: Instant) {
        self.observe_latency_micros(start.elapsed().as_micros() as u64);
    }

    /// Record a latency observation, bumping every bucket it falls under.
    pub fn observe_latency_micros(&self, micros: u64) {
        if micros <= 100 {
            self.latency_le_100us.fetch_add(1, Ordering::Relaxed);
        }
        if micros <= 1000 {
            self.latency_le_1ms.fetch_add(1, Ordering::Relaxed);
        }
        if micros <= 10000 {
            self.latency_le_10ms.fetch_add(1, Ordering::Relaxed);
        }
        self.latency_count.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_micros.fetch_add(micros, Ordering::Relaxed);
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP fraudshield_evaluations_total Total number of evaluations
# TYPE fraudshield_evaluations_total counter
fraudshield_evaluations_total {}

# HELP fraudshield_tiered_decisions Tiered evaluations by action
# TYPE fraudshield_tiered_decisions counter
fraudshield_tiered_decisions{{action="approve"}} {}
fraudshield_tiered_decisions{{action="manual_review"}} {}
fraudshield_tiered_decisions{{action="reject"}} {}

# HELP fraudshield_fraud_flag_decisions Fraud flag evaluations by verdict
# TYPE fraudshield_fraud_flag_decisions counter
fraudshield_fraud_flag_decisions{{is_fraud="true"}} {}
fraudshield_fraud_flag_decisions{{is_fraud="false"}} {}

# HELP fraudshield_malformed_requests_total Request bodies that failed to decode
# TYPE fraudshield_malformed_requests_total counter
fraudshield_malformed_requests_total{{variant="tiered"}} {}
fraudshield_malformed_requests_total{{variant="fraud-flag"}} {}

# HELP fraudshield_evaluation_latency_seconds Evaluation latency histogram
# TYPE fraudshield_evaluation_latency_seconds histogram
fraudshield_evaluation_latency_seconds_bucket{{le="0.0001"}} {}
fraudshield_evaluation_latency_seconds_bucket{{le="0.001"}} {}
fraudshield_evaluation_latency_seconds_bucket{{le="0.01"}} {}
fraudshield_evaluation_latency_seconds_bucket{{le="+Inf"}} {}
fraudshield_evaluation_latency_seconds_sum {}
fraudshield_evaluation_latency_seconds_count {}
"#,
            self.evaluations_total.load(Ordering::Relaxed),
            self.tiered_approve.load(Ordering::Relaxed),
            self.tiered_manual_review.load(Ordering::Relaxed),
            self.tiered_reject.load(Ordering::Relaxed),
            self.fraud_flagged.load(Ordering::Relaxed),
            self.fraud_clear.load(Ordering::Relaxed),
            self.malformed_tiered.load(Ordering::Relaxed),
            self.malformed_fraud_flag.load(Ordering::Relaxed),
            self.latency_le_100us.load(Ordering::Relaxed),
            self.latency_le_1ms.load(Ordering::Relaxed),
            self.latency_le_10ms.load(Ordering::Relaxed),
            self.latency_count.load(Ordering::Relaxed),
            self.latency_sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0,
            self.latency_count.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FraudReason, TransactionId};

    #[test]
    fn test_record_action() {
        let metrics = MetricsRegistry::new();
        let id = TransactionId::new("T1");

        metrics.record_action(&ActionDecision::new(id.clone(), Action::Approve));
        metrics.record_action(&ActionDecision::new(id.clone(), Action::Approve));
        metrics.record_action(&ActionDecision::new(id, Action::Reject));

        assert_eq!(metrics.evaluations_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.tiered_approve.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.tiered_reject.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_record_fraud_flag() {
        let metrics = MetricsRegistry::new();
        let id = TransactionId::new("T1");

        metrics.record_fraud_flag(&FraudDecision::new(id.clone(), FraudReason::InvalidAmount));
        metrics.record_fraud_flag(&FraudDecision::new(id, FraudReason::Ok));

        assert_eq!(metrics.fraud_flagged.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.fraud_clear.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_malformed_not_counted_as_evaluation() {
        let metrics = MetricsRegistry::new();

        metrics.record_malformed(Variant::FraudFlag);

        assert_eq!(metrics.malformed_fraud_flag.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.evaluations_total.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_timing_guard_records_on_drop() {
        let metrics = MetricsRegistry::new();

        {
            let _timer = TimingGuard::new(&metrics);
        }

        assert_eq!(metrics.latency_count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_latency_buckets_are_cumulative() {
        let metrics = MetricsRegistry::new();

        metrics.observe_latency_micros(50);
        metrics.observe_latency_micros(100); // bounds are inclusive
        metrics.observe_latency_micros(500);
        metrics.observe_latency_micros(5_000);
        metrics.observe_latency_micros(50_000);

        assert_eq!(metrics.latency_le_100us.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.latency_le_1ms.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.latency_le_10ms.load(Ordering::Relaxed), 4);
        assert_eq!(metrics.latency_count.load(Ordering::Relaxed), 5);
        assert_eq!(metrics.latency_sum_micros.load(Ordering::Relaxed), 55_650);

        let output = metrics.to_prometheus();
        assert!(output.contains("# TYPE fraudshield_evaluation_latency_seconds histogram"));
        assert!(output.contains("fraudshield_evaluation_latency_seconds_bucket{le=\"0.001\"} 3"));
        assert!(output.contains("fraudshield_evaluation_latency_seconds_bucket{le=\"+Inf\"} 5"));
        assert!(output.contains("fraudshield_evaluation_latency_seconds_count 5"));
        assert!(output.contains("fraudshield_evaluation_latency_seconds_sum 0.05565"));
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsRegistry::new();
        metrics.record_action(&ActionDecision::new(
            TransactionId::new("T1"),
            Action::ManualReview,
        ));

        let output = metrics.to_prometheus();

        assert!(output.contains("fraudshield_evaluations_total 1"));
        assert!(output.contains("fraudshield_tiered_decisions{action=\"manual_review\"} 1"));
    }
}
