pub mod dates;
pub mod error;
pub mod forecast;
pub mod selection;
pub mod stats;
pub mod upload;

#[cfg(feature = "api")]
pub mod client;
