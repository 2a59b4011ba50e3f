//! Ferie Engine: vacation-pay entitlement calculator
//!
//! This crate computes the variable-pay component owed on paid vacation
//! days ("indennità feriale") for workers whose payslips were paid at base
//! rate only. Each year's vacation days are valued at the average daily
//! variable pay of the previous year, capped at the contractual ceiling,
//! net of what the employer already paid.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod store;
