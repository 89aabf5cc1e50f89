//! Rolling statistics and the read-only performance report.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::analysis::templates::{BeatboxStyle, PatternClass};
use crate::engine::core::RecognitionResult;

/// Results retained by the rolling history
pub const HISTORY_CAPACITY: usize = 10;

/// Results summarised in a performance report
pub const REPORT_RECENT: usize = 5;

/// Cumulative counters updated after every recognition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub total_recognitions: u64,
    pub average_confidence: f64,
    pub average_latency_ms: f64,
    pub pattern_distribution: BTreeMap<PatternClass, u64>,
}

impl PerformanceStats {
    /// Fold one result into the running averages and class counts
    pub fn record(&mut self, result: &RecognitionResult) {
        self.total_recognitions += 1;
        let n = self.total_recognitions as f64;

        self.average_confidence +=
            (f64::from(result.overall_confidence) - self.average_confidence) / n;
        self.average_latency_ms += (result.processing_time_ms - self.average_latency_ms) / n;

        for pattern in &result.patterns {
            *self.pattern_distribution.entry(pattern.class).or_insert(0) += 1;
        }
    }
}

/// Bounded FIFO of the most recent results, oldest evicted first
#[derive(Debug, Clone)]
pub struct RecognitionHistory {
    results: VecDeque<RecognitionResult>,
    capacity: usize,
}

impl Default for RecognitionHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl RecognitionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            results: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, result: RecognitionResult) {
        if self.capacity == 0 {
            return;
        }
        if self.results.len() == self.capacity {
            self.results.pop_front();
        }
        self.results.push_back(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &RecognitionResult> {
        self.results.iter()
    }

    /// Up to `n` newest results, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &RecognitionResult> {
        self.results.iter().skip(self.results.len().saturating_sub(n))
    }
}

/// Compact view of one historical result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentResultSummary {
    pub confidence: f32,
    pub processing_time_ms: f64,
    pub patterns_detected: usize,
    pub primary_style: BeatboxStyle,
    pub quality_score: f32,
}

impl From<&RecognitionResult> for RecentResultSummary {
    fn from(result: &RecognitionResult) -> Self {
        Self {
            confidence: result.overall_confidence,
            processing_time_ms: result.processing_time_ms,
            patterns_detected: result.patterns.len(),
            primary_style: result.primary_style,
            quality_score: result.quality_score,
        }
    }
}

/// Engine status at report time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub is_listening: bool,
    pub sample_rate: u32,
    /// Results currently held in the rolling history
    pub buffer_size: usize,
}

/// Snapshot returned by `get_performance_report`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub recognition_metrics: PerformanceStats,
    pub recent_results: Vec<RecentResultSummary>,
    pub system_status: SystemStatus,
}

impl PerformanceReport {
    pub fn build(
        stats: &PerformanceStats,
        history: &RecognitionHistory,
        system_status: SystemStatus,
    ) -> Self {
        Self {
            recognition_metrics: stats.clone(),
            recent_results: history
                .recent(REPORT_RECENT)
                .map(RecentResultSummary::from)
                .collect(),
            system_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::BeatboxPattern;

    fn result(confidence: f32, latency_ms: f64, classes: &[PatternClass]) -> RecognitionResult {
        RecognitionResult {
            patterns: classes
                .iter()
                .map(|&class| BeatboxPattern {
                    class,
                    confidence,
                    timestamp_secs: 0.0,
                    duration_secs: 1.0,
                    frequency_range: (0.0, 1.0),
                    intensity: 0.5,
                    style: BeatboxStyle::Classic,
                })
                .collect(),
            overall_confidence: confidence,
            processing_time_ms: latency_ms,
            bpm_detected: 120.0,
            primary_style: BeatboxStyle::Classic,
            quality_score: confidence,
            enhancement_suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_incremental_mean_matches_batch_mean() {
        let confidences = [0.9_f32, 0.1, 0.55, 0.3, 0.75, 0.0, 0.42];
        let latencies = [3.0_f64, 12.5, 7.25, 1.0, 40.0, 2.0, 9.5];

        let mut stats = PerformanceStats::default();
        for (&c, &l) in confidences.iter().zip(&latencies) {
            stats.record(&result(c, l, &[]));
        }

        let n = confidences.len() as f64;
        let batch_conf = confidences.iter().map(|&c| f64::from(c)).sum::<f64>() / n;
        let batch_latency = latencies.iter().sum::<f64>() / n;

        assert_eq!(stats.total_recognitions, 7);
        assert!((stats.average_confidence - batch_conf).abs() < 1e-9);
        assert!((stats.average_latency_ms - batch_latency).abs() < 1e-9);
    }

    #[test]
    fn test_pattern_distribution_counts_every_pattern() {
        let mut stats = PerformanceStats::default();
        stats.record(&result(0.5, 1.0, &[PatternClass::Kick, PatternClass::Bass]));
        stats.record(&result(0.5, 1.0, &[PatternClass::Kick]));
        stats.record(&result(0.0, 1.0, &[]));

        assert_eq!(stats.pattern_distribution.get(&PatternClass::Kick), Some(&2));
        assert_eq!(stats.pattern_distribution.get(&PatternClass::Bass), Some(&1));
        assert_eq!(stats.pattern_distribution.get(&PatternClass::Snare), None);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = RecognitionHistory::default();
        for i in 0..15 {
            history.push(result(0.0, i as f64, &[]));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let latencies: Vec<f64> = history.iter().map(|r| r.processing_time_ms).collect();
        assert_eq!(latencies, (5..15).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_report_summarises_last_five() {
        let mut stats = PerformanceStats::default();
        let mut history = RecognitionHistory::default();
        for i in 0..8 {
            let r = result(0.1 * i as f32, i as f64, &[PatternClass::HiHat]);
            stats.record(&r);
            history.push(r);
        }

        let status = SystemStatus {
            is_listening: true,
            sample_rate: 16_000,
            buffer_size: 8,
        };
        let report = PerformanceReport::build(&stats, &history, status.clone());

        assert_eq!(report.recent_results.len(), REPORT_RECENT);
        assert_eq!(report.recent_results[0].processing_time_ms, 3.0);
        assert_eq!(report.recent_results[4].processing_time_ms, 7.0);
        assert_eq!(report.recent_results[4].patterns_detected, 1);
        assert_eq!(report.system_status, status);
        assert_eq!(report.recognition_metrics.total_recognitions, 8);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut stats = PerformanceStats::default();
        stats.record(&result(0.5, 2.0, &[PatternClass::Kick]));
        let report = PerformanceReport::build(
            &stats,
            &RecognitionHistory::default(),
            SystemStatus {
                is_listening: false,
                sample_rate: 16_000,
                buffer_size: 0,
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recognition_metrics"]["pattern_distribution"]["kick"], 1);
        assert_eq!(json["system_status"]["sample_rate"], 16_000);
    }
}
