//! # Middleware
//!
//! Request tracing comes from `tower_http::trace::TraceLayer`; this module
//! adds the request counters.

pub mod metrics;
