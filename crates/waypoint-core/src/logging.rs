//! Logging facilities for Waypoint.
//!
//! Waypoint uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("waypoint=debug,waypoint_core=trace")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "waypoint_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "waypoint_core::signal";
    /// Observable value target.
    pub const OBSERVABLE: &str = "waypoint_core::observable";
    /// Wizard navigation state machine target.
    pub const NAVIGATOR: &str = "waypoint::navigator";
    /// Lifecycle and animation choreography target.
    pub const TRANSITION: &str = "waypoint::transition";
    /// Scope tree (navigator injection) target.
    pub const SCOPE: &str = "waypoint::scope";
}

