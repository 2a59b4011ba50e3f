//! Performance benchmarks for the Ferie Engine.
//!
//! This benchmark suite covers:
//! - A single worker with a full 18-year history, called directly
//! - The same worker through the `/calculate` endpoint
//! - Fleet aggregation at increasing worker counts
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashMap;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use ferie_engine::api::{AppState, CalculationRequest, create_router};
use ferie_engine::calculation::{calculate_entitlement, calculate_fleet};
use ferie_engine::config::ConfigLoader;
use ferie_engine::models::{MonthRecord, Profile, Worker, WorkerConfig, WorkerStatus};
use ferie_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use rust_decimal::Decimal;
use serde_json::json;
use tower::ServiceExt;

/// Creates a test state with loaded configuration and an empty store.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config, Arc::new(MemoryStore::new()))
}

/// Creates a worker with twelve months for every year from 2007 to 2024.
fn create_worker(id: u64) -> Worker {
    let months = (2007..=2024)
        .flat_map(|year| (0..12).map(move |month_index| (year, month_index)))
        .map(|(year, month_index)| {
            let mut record = MonthRecord::blank(year, month_index)
                .with_column("0152", json!(format!("{},{:02}", 800 + month_index * 15, id % 100)))
                .with_column("0421", json!(120 + id % 40))
                .with_column("0687", json!("35,50"));
            record.days_worked = Decimal::from(21);
            record.days_vacation = Decimal::from(if month_index == 7 { 15 } else { 2 });
            record.coeff_percepito = Decimal::new(1250, 2);
            record.coeff_ticket = Decimal::new(700, 2);
            record
        })
        .collect();

    Worker {
        id,
        first_name: format!("Nome{}", id),
        last_name: format!("Cognome{}", id),
        role: "Capotreno".to_string(),
        grade: "C".to_string(),
        profile: Profile::Rfi,
        accent_color: None,
        status: WorkerStatus::Trattativa,
        months,
    }
}

/// Benchmark: One worker's full history, calculated directly.
fn bench_single_worker(c: &mut Criterion) {
    let worker = create_worker(1);
    let config = WorkerConfig::default();

    c.bench_function("single_worker_216_months", |b| {
        b.iter(|| black_box(calculate_entitlement(black_box(&worker), &config)))
    });
}

/// Benchmark: One worker through the HTTP endpoint, including JSON parsing.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let request = CalculationRequest {
        worker: create_worker(1),
        config: None,
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("calculate_endpoint", |b| {
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

/// Benchmark: Fleet aggregation at various worker counts.
fn bench_fleet_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleet");
    // Reduce sample size for large fleets to keep benchmark time reasonable
    group.sample_size(20);

    for worker_count in [10u64, 100, 500].iter() {
        let workers: Vec<Worker> = (1..=*worker_count).map(create_worker).collect();
        let configs: HashMap<u64, WorkerConfig> = workers
            .iter()
            .filter(|worker| worker.id % 2 == 0)
            .map(|worker| {
                (
                    worker.id,
                    WorkerConfig {
                        include_ex_fest: true,
                        ..WorkerConfig::default()
                    },
                )
            })
            .collect();

        group.throughput(Throughput::Elements(*worker_count));
        group.bench_with_input(
            BenchmarkId::new("workers", worker_count),
            worker_count,
            |b, _| b.iter(|| black_box(calculate_fleet(&workers, &configs))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_worker,
    bench_calculate_endpoint,
    bench_fleet_scaling,
);
criterion_main!(benches);
