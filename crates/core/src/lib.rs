//! Core types and shared functionality for vacstat.
//!
//! This crate provides:
//! - Salary normalization and vacancy aggregation
//! - Per-query result store with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod salary;

pub use analytics::{AnalyticsResult, RawVacancy, VacancySummary, aggregate};
pub use cache::CacheDb;
pub use config::AppConfig;
pub use error::Error;
pub use salary::{ParsedSalary, SalaryRules, format_rub, group_digits};
