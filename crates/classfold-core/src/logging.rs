//! Tracing integration for the cover engine.
//!
//! The engine emits `tracing` events and spans but never installs a
//! subscriber. To see logs, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The incidence matrix and the discovered cover are dumped at `trace`
//! level under [`targets::BUILDER`] and [`targets::DECOMPOSE`].

/// Target names for log filtering.
///
/// Use these with `tracing` directives, e.g.
/// `RUST_LOG=classfold_core::decompose=trace`.
pub mod targets {
    /// Matrix builder target.
    pub const BUILDER: &str = "classfold_core::matrix";
    /// Rectangle cover decomposer target.
    pub const DECOMPOSE: &str = "classfold_core::decompose";
    /// Cover applier target.
    pub const APPLY: &str = "classfold_core::apply";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time the build, decompose and apply phases.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "classfold::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_span_enters_and_drops() {
        let _span = PerfSpan::new("test_operation");
    }
}
