//! Counters collected during a contrast run

use std::time::Duration;

/// Metrics collected during a contrast generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Lenses loaded from the store
    pub lenses_total: usize,

    /// Lenses already covered by an existing contrast
    pub covered_before: usize,

    /// Uncovered lenses queued for processing (after any limit)
    pub queued: usize,

    /// Sources that went through candidate search
    pub processed: usize,

    /// Sources for which no candidate was admitted
    pub without_candidate: usize,

    /// Contrasts generated
    pub generated: usize,

    /// Embedding lookups that found nothing
    pub embedding_misses: usize,

    /// Embedding lookups that failed
    pub embedding_failures: usize,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source that went through candidate search
    pub fn record_processed(&mut self, generated: bool) {
        self.processed += 1;
        if generated {
            self.generated += 1;
        } else {
            self.without_candidate += 1;
        }
    }

    /// Share of processed sources that produced a contrast
    pub fn hit_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.generated as f64 / self.processed as f64
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Contrast Run Summary".to_string(),
            "====================".to_string(),
            format!("Lenses: {} ({} already covered)", self.lenses_total, self.covered_before),
            format!("Queued: {}", self.queued),
            format!("Processed: {}", self.processed),
            format!("Generated: {} ({:.0}% of processed)", self.generated, self.hit_rate() * 100.0),
            format!("No suitable candidate: {}", self.without_candidate),
        ];
        if self.embedding_misses > 0 || self.embedding_failures > 0 {
            lines.push(format!(
                "Embedding lookups: {} missing, {} failed",
                self.embedding_misses, self.embedding_failures
            ));
        }
        lines.push(format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.processed, 0);
        assert_eq!(metrics.generated, 0);
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_processed() {
        let mut metrics = RunMetrics::new();
        metrics.record_processed(true);
        metrics.record_processed(false);
        metrics.record_processed(true);

        assert_eq!(metrics.processed, 3);
        assert_eq!(metrics.generated, 2);
        assert_eq!(metrics.without_candidate, 1);
        assert!((metrics.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary() {
        let mut metrics = RunMetrics::new();
        metrics.lenses_total = 10;
        metrics.covered_before = 4;
        metrics.queued = 6;
        metrics.record_processed(true);
        metrics.embedding_failures = 2;

        let summary = metrics.summary();
        assert!(summary.contains("Lenses: 10 (4 already covered)"));
        assert!(summary.contains("Generated: 1 (100% of processed)"));
        assert!(summary.contains("0 missing, 2 failed"));
    }
}
