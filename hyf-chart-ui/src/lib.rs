//! Shared Dioxus components and D3.js bridge for the harvest dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (filter selectors, containers, etc.)
//! - `debug_log`: bounded ring buffer of recent log lines for the debug overlay

pub mod components;
pub mod debug_log;
pub mod js_bridge;
pub mod state;
