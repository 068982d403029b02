//! Forecast normalization and mock generation.
//!
//! This crate turns raw prediction payloads and offline mock data into the
//! canonical `ForecastResult` the dashboard renders. Both entry points are
//! pure, synchronous functions with no I/O.

pub mod mock;
pub mod normalize;

pub use mock::generate_mock;
pub use normalize::normalize;
