//! Benchmark utilities for the ECS.
//!
//! This crate provides the benchmarking infrastructure for `rusty_ecs`:
//!
//! - **Microbenchmarks**: Individual operations (entity churn, component add/remove with signature
//!   propagation, system updates, event publish/flush)
//! - **Scenario benchmarks**: Seeded game-like workloads (particles, physics)
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_ecs_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_ecs_bench -- churn
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
