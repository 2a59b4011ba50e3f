//! Core data models for the Ferie Engine.
//!
//! This module contains the worker records, their per-worker flags, and
//! the result types produced by the entitlement calculator.

mod entitlement;
pub(crate) mod lenient;
mod month_record;
mod worker;
mod worker_config;

pub use entitlement::{
    EntitlementTotals, FleetSummary, MonthEntitlement, RateSource, WorkerEntitlement,
    YearEntitlement,
};
pub use month_record::{MonthRecord, is_pay_code_column, month_label};
pub use worker::{NewWorker, Profile, Worker, WorkerStatus};
pub use worker_config::{
    DEFAULT_START_CLAIM_YEAR, EX_FESTIVITA_VACATION_CEILING, STANDARD_VACATION_CEILING,
    WorkerConfig,
};
