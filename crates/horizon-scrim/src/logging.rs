//! Logging facilities for the presentation host.
//!
//! The crate is instrumented with the `tracing` crate. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Registration, teardown, silent presentation skips and key collisions are
//! all traced under the targets below.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=horizon_scrim::registry=trace`.
pub mod targets {
    /// Controller registry and payload cache operations.
    pub const REGISTRY: &str = "horizon_scrim::registry";
    /// Overlay controller insert/update/removal.
    pub const CONTROLLER: &str = "horizon_scrim::controller";
    /// Host bridge reconciliation passes.
    pub const HOST: &str = "horizon_scrim::host";
}
