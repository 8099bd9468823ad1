// gcprof - GC profile log summarizer
//
// Copyright (c) 2025 gcprof contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end summarization tests over the shared fixtures.

use gcprof_core::{
    extract_heap_timeline, parse_profile, summarize_profile, Categories, MetricCategory,
    MetricValue, Metrics, ProfileError, RuntimeKey, Summarizer, SummaryOptions,
};
use gcprof_test::fixtures;
use gcprof_test::fixtures::builders::{NurseryCollection, ProfileLogBuilder};

fn value(metrics: &Metrics, name: &str) -> f64 {
    metrics
        .get(name)
        .unwrap_or_else(|| panic!("missing metric '{}'", name))
        .as_f64()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn only(categories: &[MetricCategory]) -> SummaryOptions {
    SummaryOptions::builder()
        .categories(categories.iter().copied().collect())
        .build()
}

// ==================== Whole-log metrics ====================

#[test]
fn test_single_runtime_all_categories() {
    let metrics = summarize_profile(&fixtures::single_runtime(), &SummaryOptions::default()).unwrap();

    assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(2)));
    assert_close(value(&metrics, "Major GC time"), 5.0);
    assert_close(value(&metrics, "Mean major GC slice time"), 2.5);
    assert_eq!(metrics.get("Major GC count"), Some(MetricValue::Count(2)));

    assert_eq!(metrics.get("Minor GC count"), Some(MetricValue::Count(3)));
    assert_close(value(&metrics, "Minor GC time"), 3.0);
    assert_close(value(&metrics, "Mean minor GC time"), 1.0);
    assert_close(value(&metrics, "Total GC time"), 8.0);

    assert_close(value(&metrics, "Max GC heap size / KB"), 1200.0);
    assert_close(value(&metrics, "Median GC heap size / KB"), 1000.0);
    assert_close(value(&metrics, "Max malloc heap size / KB"), 150.0);
    assert_close(value(&metrics, "Median malloc heap size / KB"), 120.0);
    assert_close(value(&metrics, "Max nursery size / KB"), 2048.0);
    assert_close(value(&metrics, "Median nursery size / KB"), 1024.0);

    assert_eq!(metrics.get("ALLOC_TRIGGER slices"), Some(MetricValue::Count(2)));
    assert_eq!(metrics.get("TOO_MUCH_MALLOC slices"), Some(MetricValue::Count(1)));
    assert_eq!(
        metrics.get("Full store buffer nursery collections"),
        Some(MetricValue::Count(1))
    );
    assert_close(value(&metrics, "Mean full nursery promotion rate"), 20.0);

    assert_close(value(&metrics, "Total major GC time in phase mark"), 3.0);
    assert_close(value(&metrics, "Total major GC time in phase prep"), 0.5);
    assert_close(value(&metrics, "Total major GC time in phase sweep"), 0.25);

    assert_close(value(&metrics, "Parallel marking donations per collection"), 4.0);
    assert_close(value(&metrics, "Geometric mean mark rate"), 100.0);

    // No test windows, so no windowed metrics.
    assert!(metrics.iter().all(|(name, _)| !name.ends_with(" in test")));
}

#[test]
fn test_category_selection() {
    let metrics = summarize_profile(&fixtures::single_runtime(), &only(&[MetricCategory::Minor]))
        .unwrap();

    assert!(metrics.get("Minor GC count").is_some());
    assert!(metrics.get("Major GC slices").is_none());
    assert!(metrics.get("Max nursery size / KB").is_none());
    assert!(metrics.get("Mean full nursery promotion rate").is_none());
    assert!(metrics.get("Total major GC time in phase mark").is_none());
    assert_close(value(&metrics, "Total GC time"), 8.0);
}

#[test]
fn test_phase_and_marking_can_be_disabled() {
    let options = SummaryOptions::builder()
        .phase_times(false)
        .parallel_marking(false)
        .build();
    let metrics = summarize_profile(&fixtures::single_runtime(), &options).unwrap();

    assert!(metrics.iter().all(|(name, _)| !name.contains("phase")));
    assert!(metrics.get("Geometric mean mark rate").is_none());
}

#[test]
fn test_first_major_gc() {
    let options = SummaryOptions::builder().first_major_gc(true).build();
    let metrics = summarize_profile(&fixtures::single_runtime(), &options).unwrap();

    assert_close(value(&metrics, "First major GC"), 0.5);
    assert_eq!(
        metrics.get("Heap size / KB at first major GC"),
        Some(MetricValue::Count(1000))
    );
}

#[test]
fn test_promotion_rate_mean_over_out_of_nursery() {
    let log = ProfileLogBuilder::new()
        .minor_header()
        .minor(NurseryCollection::new(10.0).promotion_rate(50.0))
        .minor(NurseryCollection::new(10.0).reason("OTHER").promotion_rate(10.0))
        .minor(NurseryCollection::new(10.0).promotion_rate(30.0))
        .build();
    let options = only(&[MetricCategory::Minor, MetricCategory::Reason]);
    let metrics = summarize_profile(&log, &options).unwrap();
    assert_close(value(&metrics, "Mean full nursery promotion rate"), 40.0);
}

#[test]
fn test_promotion_rate_without_matches_is_zero() {
    let log = ProfileLogBuilder::new()
        .minor_header()
        .minor(NurseryCollection::new(10.0).reason("OTHER").promotion_rate_text("oops"))
        .build();
    let options = only(&[MetricCategory::Minor, MetricCategory::Reason]);
    let metrics = summarize_profile(&log, &options).unwrap();
    assert_close(value(&metrics, "Mean full nursery promotion rate"), 0.0);
}

// ==================== Runtime selection ====================

#[test]
fn test_most_active_runtime_is_selected() {
    let metrics = summarize_profile(
        &fixtures::interleaved_runtimes(),
        &only(&[MetricCategory::Major]),
    )
    .unwrap();
    assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(10)));
    assert_close(value(&metrics, "Major GC time"), 10.0);
}

#[test]
fn test_runtime_filter_disabled() {
    let options = SummaryOptions::builder()
        .categories([MetricCategory::Major].into_iter().collect())
        .filter_most_active_runtime(false)
        .build();
    let metrics = summarize_profile(&fixtures::interleaved_runtimes(), &options).unwrap();
    assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(13)));
    assert_close(value(&metrics, "Major GC time"), 25.0);
}

#[test]
fn test_runtime_counts() {
    let data = parse_profile(&fixtures::interleaved_runtimes()).unwrap();
    let counts = gcprof_core::count_runtimes(data.all_records());
    assert_eq!(
        counts,
        vec![
            (RuntimeKey::new("2000", "0x2"), 3),
            (RuntimeKey::new("1000", "0x1"), 10),
        ]
    );
}

// ==================== Test windows ====================

#[test]
fn test_windowed_metrics() {
    let options = only(&[MetricCategory::Major, MetricCategory::Minor]);
    let metrics = summarize_profile(&fixtures::with_test_windows(), &options).unwrap();

    assert_close(value(&metrics, "Major GC time"), 15.0);
    assert_close(value(&metrics, "Major GC time in test"), 10.0);
    assert_close(value(&metrics, "Major GC time outside test"), 5.0);

    assert_close(value(&metrics, "Minor GC time"), 6.0);
    assert_close(value(&metrics, "Minor GC time in test"), 5.0);
    assert_close(value(&metrics, "Minor GC time outside test"), 1.0);

    assert_close(value(&metrics, "Total GC time in test"), 15.0);
    assert_close(value(&metrics, "Mean major GC slice time in test"), 5.0);
    assert_eq!(metrics.get("Major GC count outside test"), Some(MetricValue::Count(2)));
    assert_eq!(metrics.get("Major GC count in test"), Some(MetricValue::Count(0)));
}

#[test]
fn test_windowed_metrics_disabled() {
    let options = SummaryOptions::builder().windowed(false).build();
    let metrics = summarize_profile(&fixtures::with_test_windows(), &options).unwrap();
    assert!(metrics
        .iter()
        .all(|(name, _)| !name.ends_with(" in test") && !name.ends_with(" outside test")));
}

#[test]
fn test_custom_markers() {
    let log = fixtures::with_test_windows()
        .replace("Testing url", "BEGIN")
        .replace("PageCompleteCheck returned true", "DONE");
    let options = SummaryOptions::builder()
        .categories([MetricCategory::Major].into_iter().collect())
        .markers("BEGIN", "DONE")
        .build();
    let metrics = summarize_profile(&log, &options).unwrap();
    assert_close(value(&metrics, "Major GC time in test"), 10.0);
}

// ==================== Shutdown trimming ====================

#[test]
fn test_shutdown_tail_is_trimmed() {
    let options = only(&[MetricCategory::Major, MetricCategory::Minor]);
    let metrics = summarize_profile(&fixtures::shutdown_tail(), &options).unwrap();
    assert_close(value(&metrics, "Major GC time"), 7.0);
    assert_eq!(metrics.get("Major GC slices"), Some(MetricValue::Count(3)));
    assert_close(value(&metrics, "Minor GC time"), 2.0);
}

// ==================== Malformed input ====================

#[test]
fn test_malformed_lines_are_skipped() {
    let data = parse_profile(&fixtures::malformed_lines()).unwrap();
    assert_eq!(data.dropped_lines, 1);

    let options = SummaryOptions::builder().categories(Categories::none()).build();
    let metrics = Summarizer::new(&options).summarize(&data).unwrap();
    assert_close(value(&metrics, "Total GC time"), 3.0);
}

#[test]
fn test_bad_promotion_rate_is_fatal() {
    let err = summarize_profile(&fixtures::errors::bad_promotion_rate(), &SummaryOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        ProfileError::BadPromotionRate {
            value: "12.5".into()
        }
    );
}

#[test]
fn test_non_numeric_total_is_fatal() {
    let err = summarize_profile(&fixtures::errors::non_numeric_total(), &SummaryOptions::default())
        .unwrap_err();
    assert!(matches!(err, ProfileError::InvalidNumber { ref field, .. } if field == "total"));
}

#[test]
fn test_no_data_is_fatal() {
    let err = summarize_profile("", &SummaryOptions::default()).unwrap_err();
    assert_eq!(err, ProfileError::NoProfileData);
}

// ==================== Heap timeline ====================

#[test]
fn test_heap_timeline() {
    let timeline = extract_heap_timeline(&fixtures::multi_runtime_heap()).unwrap();
    assert_eq!(timeline.series().len(), 2);

    let second = timeline.get(&RuntimeKey::new("2000", "0x2")).unwrap();
    let points: Vec<(f64, u64)> = second
        .samples
        .iter()
        .map(|s| (s.timestamp, s.size_kb))
        .collect();
    assert_eq!(points, vec![(1.5, 0), (2.0, 50), (2.5, 60)]);
}

// ==================== Serialization ====================

#[cfg(feature = "serde")]
#[test]
fn test_options_from_json() {
    let options: SummaryOptions =
        serde_json::from_str(r#"{"categories": ["major", "reason"], "windowed": false}"#).unwrap();

    assert_eq!(
        options.categories,
        [MetricCategory::Major, MetricCategory::Reason].into_iter().collect::<Categories>()
    );
    assert!(!options.windowed);
    assert!(options.filter_most_active_runtime);
    assert_eq!(options.markers, SummaryOptions::default().markers);
}

#[cfg(feature = "serde")]
#[test]
fn test_metrics_to_json() {
    let metrics = summarize_profile(
        &fixtures::with_test_windows(),
        &only(&[MetricCategory::Major]),
    )
    .unwrap();
    let json = serde_json::to_value(&metrics).unwrap();

    assert_eq!(json["Major GC slices"], serde_json::json!(4));
    assert_eq!(json["Major GC time in test"], serde_json::json!(10.0));
}
