//! # Converter Types
//!
//! Domain types and port traits for the currency conversion gateway.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `dto/` - Wire shapes exchanged with the upstream provider and our callers
//! - `validation/` - Pure request validation (no IO, never mutates input)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Application error types

pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use dto::{ExchangeRateResponse, SeriesResponse};
pub use error::AppError;
pub use ports::{RateProvider, ResponseCache, UpstreamResult};
pub use validation::{ConvertRequest, FieldViolation, HistoryRequest, LatestRequest};
