//! Performance report generation.

use super::{LatencySummary, Metrics};
use std::fmt;

/// Performance report with formatted metrics.
pub struct PerformanceReport {
    title: String,
    metrics: Metrics,
}

impl PerformanceReport {
    /// Creates a new performance report.
    #[must_use]
    pub fn new(title: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            title: title.into(),
            metrics,
        }
    }

    /// Returns the metrics.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, label: &str, summary: &LatencySummary) -> fmt::Result {
    writeln!(f, "\n{label} wait (ns, {} samples):", summary.samples)?;
    writeln!(f, "  Min: {}", summary.min)?;
    writeln!(f, "  Avg: {:.0}", summary.avg)?;
    writeln!(f, "  Median: {}", summary.median)?;
    writeln!(f, "  P95: {}", summary.p95)?;
    writeln!(f, "  P99: {}", summary.p99)?;
    writeln!(f, "  Max: {}", summary.max)
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        writeln!(f, "Operations: {}", self.metrics.operations)?;
        writeln!(f, "Duration: {:?}", self.metrics.duration)?;
        writeln!(f, "Throughput: {:.2} ops/sec", self.metrics.throughput)?;

        if let Some(summary) = self.metrics.produce_summary() {
            write_summary(f, "Produce", &summary)?;
        }
        if let Some(summary) = self.metrics.consume_summary() {
            write_summary(f, "Consume", &summary)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn test_report_includes_latency_sections_when_recorded() {
        let metrics = Metrics::new(4, Duration::from_secs(1))
            .with_throughput()
            .with_latencies(vec![10, 20], Vec::new());
        let rendered = PerformanceReport::new("queue", metrics).to_string();

        assert!(rendered.starts_with("=== queue ==="));
        assert!(rendered.contains("Throughput: 4.00 ops/sec"));
        assert!(rendered.contains("Produce wait (ns, 2 samples)"));
        assert!(!rendered.contains("Consume wait"));
    }
}
