//! Parity metrics collection and reporting for CI.
//!
//! A parity run compares generated biomes with a reference corpus. The
//! report is exported as JSON so regressions can be tracked per version.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Top-level report written to `parity.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParityReport {
    /// Run identifier
    pub test_name: String,

    /// Timestamp when the run finished (ISO 8601)
    pub timestamp: String,

    /// Git commit hash (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,

    /// Overall result
    pub result: TestResult,

    /// Match counts
    pub parity: ParityMetrics,

    /// Run execution metrics
    pub test_execution: TestExecutionMetrics,
}

/// Overall test result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Every case matched
    Pass,
    /// At least one case mismatched or failed
    Fail,
    /// Nothing was checked
    Skip,
}

/// Match counts for one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionParity {
    /// Cases checked
    pub total: usize,
    /// Generated biome equal to the reference
    pub matched: usize,
    /// Generated biome differs
    pub mismatched: usize,
    /// Generator could not answer (unsupported version, missing tree)
    pub errors: usize,
}

impl VersionParity {
    /// Fraction of checked cases that matched, 0 when empty.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Aggregate and per-version match counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParityMetrics {
    /// Sum over versions
    pub overall: VersionParity,

    /// Overall match rate
    pub match_rate: f64,

    /// Counts keyed by version label
    pub per_version: BTreeMap<String, VersionParity>,
}

/// Outcome of one reference case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    #[allow(missing_docs)]
    Matched,
    #[allow(missing_docs)]
    Mismatched,
    #[allow(missing_docs)]
    Error,
}

/// Running tally of case outcomes.
#[derive(Debug, Default)]
pub struct ParityTally {
    per_version: BTreeMap<String, VersionParity>,
}

impl ParityTally {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one case for `version`.
    pub fn record(&mut self, version: &str, outcome: CaseOutcome) {
        let entry = self.per_version.entry(version.to_string()).or_default();
        entry.total += 1;
        match outcome {
            CaseOutcome::Matched => entry.matched += 1,
            CaseOutcome::Mismatched => entry.mismatched += 1,
            CaseOutcome::Error => entry.errors += 1,
        }
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: ParityTally) {
        for (version, counts) in other.per_version {
            let entry = self.per_version.entry(version).or_default();
            entry.total += counts.total;
            entry.matched += counts.matched;
            entry.mismatched += counts.mismatched;
            entry.errors += counts.errors;
        }
    }

    /// Final metrics with totals.
    pub fn into_metrics(self) -> ParityMetrics {
        let mut overall = VersionParity::default();
        for counts in self.per_version.values() {
            overall.total += counts.total;
            overall.matched += counts.matched;
            overall.mismatched += counts.mismatched;
            overall.errors += counts.errors;
        }
        ParityMetrics {
            match_rate: overall.match_rate(),
            overall,
            per_version: self.per_version,
        }
    }
}

/// Test execution and infrastructure metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestExecutionMetrics {
    /// Total run duration (seconds)
    pub duration_seconds: f64,

    /// Worker threads used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Cases checked per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases_per_second: Option<f64>,
}

/// Builder for constructing parity reports
pub struct ParityReportBuilder {
    report: ParityReport,
}

impl ParityReportBuilder {
    /// Create a new builder with run name
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            report: ParityReport {
                test_name: test_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                commit_hash: None,
                result: TestResult::Skip,
                parity: ParityMetrics::default(),
                test_execution: TestExecutionMetrics::default(),
            },
        }
    }

    /// Set commit hash
    pub fn commit_hash(mut self, hash: impl Into<String>) -> Self {
        self.report.commit_hash = Some(hash.into());
        self
    }

    /// Set parity counts; the result follows from them.
    pub fn parity(mut self, metrics: ParityMetrics) -> Self {
        let o = &metrics.overall;
        self.report.result = if o.total == 0 {
            TestResult::Skip
        } else if o.mismatched == 0 && o.errors == 0 {
            TestResult::Pass
        } else {
            TestResult::Fail
        };
        self.report.parity = metrics;
        self
    }

    /// Set test execution metrics
    pub fn execution(mut self, metrics: TestExecutionMetrics) -> Self {
        self.report.test_execution = metrics;
        self
    }

    /// Build the report
    pub fn build(self) -> ParityReport {
        self.report
    }
}

/// Sink for writing parity reports to JSON files
pub struct MetricsSink {
    path: std::path::PathBuf,
}

impl MetricsSink {
    /// Create a new metrics sink at the specified path
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Write the report to file
    pub fn write(&self, report: &ParityReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tally() -> ParityTally {
        let mut t = ParityTally::new();
        t.record("1.12", CaseOutcome::Matched);
        t.record("1.12", CaseOutcome::Matched);
        t.record("1.12", CaseOutcome::Mismatched);
        t.record("1.18", CaseOutcome::Error);
        t
    }

    #[test]
    fn tally_totals_per_version() {
        let metrics = tally().into_metrics();
        assert_eq!(metrics.overall.total, 4);
        assert_eq!(metrics.overall.matched, 2);
        assert_eq!(metrics.per_version["1.12"].mismatched, 1);
        assert_eq!(metrics.per_version["1.18"].errors, 1);
        assert!((metrics.match_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn merged_tallies_add_up() {
        let mut a = tally();
        a.merge(tally());
        assert_eq!(a.into_metrics().overall.total, 8);
    }

    #[test]
    fn result_follows_counts() {
        let failing = ParityReportBuilder::new("fail").parity(tally().into_metrics()).build();
        assert_eq!(failing.result, TestResult::Fail);

        let mut clean = ParityTally::new();
        clean.record("b1.7", CaseOutcome::Matched);
        let passing = ParityReportBuilder::new("pass").parity(clean.into_metrics()).build();
        assert_eq!(passing.result, TestResult::Pass);

        let empty = ParityReportBuilder::new("none").build();
        assert_eq!(empty.result, TestResult::Skip);
    }

    #[test]
    fn report_roundtrip() {
        let report = ParityReportBuilder::new("parity_example")
            .commit_hash("abc123")
            .parity(tally().into_metrics())
            .execution(TestExecutionMetrics {
                duration_seconds: 1.5,
                threads: Some(4),
                cases_per_second: Some(2.6),
            })
            .build();

        let path = std::env::temp_dir().join(format!(
            "parity-{}.json",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        MetricsSink::create(&path).unwrap().write(&report).unwrap();
        let parsed: ParityReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.test_name, "parity_example");
        assert_eq!(parsed.parity.per_version, report.parity.per_version);
        assert_eq!(parsed.result, TestResult::Fail);
    }
}
