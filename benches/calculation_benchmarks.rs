//! Performance benchmarks for the Laytime Calculation Engine.
//!
//! This benchmark suite covers:
//! - Engine-only calculation over 10, 100 and 1000 events
//! - A single `/calculate` request through the router
//! - A batch of 100 requests against the SHEX preset
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use laytime_engine::api::{AppState, create_router};
use laytime_engine::calculation::calculate;
use laytime_engine::config::ConfigLoader;
use laytime_engine::models::{
    ExceptionRule, LaytimeDuration, RulePattern, SofEvent, SofEventKind, TermsConfig,
};
use laytime_engine::store::InMemoryClaimStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/charter_terms").expect("Failed to load config");
    AppState::new(config, InMemoryClaimStore::new())
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 20)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// Creates back-to-back three-hour events, every fourth one a rain stop.
fn create_events(count: usize) -> Vec<SofEvent> {
    (0..count)
        .map(|i| {
            let from = start() + Duration::hours(3 * i as i64);
            let to = from + Duration::hours(3);
            if i % 4 == 3 {
                SofEvent::new(
                    format!("sof_{:04}", i),
                    SofEventKind::WeatherInterruption,
                    "Rain",
                    from,
                    to,
                )
            } else {
                SofEvent::new(
                    format!("sof_{:04}", i),
                    SofEventKind::LoadingStart,
                    "Loading",
                    from,
                    to,
                )
            }
        })
        .collect()
}

fn create_terms() -> TermsConfig {
    let mut terms = TermsConfig::new(LaytimeDuration::from_days(Decimal::from(4)));
    terms.demurrage_rate = Some(Decimal::from(16_667));
    terms.despatch_rate = Some(Decimal::new(833_350, 2));
    terms.exception_rules = vec![
        ExceptionRule {
            pattern: RulePattern::Kind(SofEventKind::WeatherInterruption),
            rate: Decimal::ZERO,
            description: "Weather working days".to_string(),
        },
        ExceptionRule {
            pattern: RulePattern::Label("Sunday".to_string()),
            rate: Decimal::ZERO,
            description: "Sundays excepted".to_string(),
        },
    ];
    terms
}

fn create_request_body(event_count: usize) -> String {
    let events: Vec<serde_json::Value> = (0..event_count)
        .map(|i| {
            let from = start() + Duration::hours(3 * i as i64);
            serde_json::json!({
                "id": format!("sof_{:04}", i),
                "kind": if i % 4 == 3 { "weather_interruption" } else { "loading_start" },
                "label": if i % 4 == 3 { "Rain" } else { "Loading" },
                "from": from,
                "to": from + Duration::hours(3)
            })
        })
        .collect();

    serde_json::json!({
        "events": events,
        "terms": {
            "allowed_laytime_days": "4",
            "demurrage_rate": "16667",
            "despatch_rate": "8333.50",
            "preset": "wwd_shex"
        }
    })
    .to_string()
}

/// Benchmark: engine-only calculation at increasing event counts.
fn bench_engine_scaling(c: &mut Criterion) {
    let terms = create_terms();
    let mut group = c.benchmark_group("engine");

    for event_count in [10usize, 100, 1000].iter() {
        let events = create_events(*event_count);

        group.throughput(Throughput::Elements(*event_count as u64));
        group.bench_with_input(
            BenchmarkId::new("events", event_count),
            &events,
            |b, events| b.iter(|| black_box(calculate(black_box(events), &terms).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark: a single `/calculate` request with 20 events.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(20);

    c.bench_function("single_request_20_events", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 requests of varying length.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let requests: Vec<String> = (0..100).map(|i| create_request_body(1 + i % 40)).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_scaling,
    bench_single_request,
    bench_batch_100,
);
criterion_main!(benches);
