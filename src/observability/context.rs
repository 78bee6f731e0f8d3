//! Thread-local render context for crash reports.
//!
//! Records which phase of a render is running and which data source is
//! being read, so a panic report can say where things went wrong. Guards
//! restore the previous context on drop.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RenderContext> = const { RefCell::new(RenderContext::new()) };
}

/// Context snapshot for the current render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub phase: Option<RenderPhase>,
    /// Description of the data source being rendered
    pub source: Option<String>,
}

impl RenderContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            source: None,
        }
    }
}

/// Stages of a render, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Resolving `.kpiboard.toml`
    ConfigLoading,
    /// Reading a snapshot from its data source
    DataLoading,
    /// Checking snapshot invariants
    Validation,
    /// Computing deltas, tiers and derived tables
    ViewBuilding,
    /// Writing the report
    OutputGeneration,
}

impl std::fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::DataLoading => write!(f, "data_loading"),
            Self::Validation => write!(f, "validation"),
            Self::ViewBuilding => write!(f, "view_building"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard restoring the previous render context on drop.
pub struct ContextGuard {
    previous: RenderContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn replace_context(update: impl FnOnce(&mut RenderContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        update(&mut *ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current render phase until the guard drops.
#[must_use]
pub fn set_phase(phase: RenderPhase) -> ContextGuard {
    replace_context(|ctx| ctx.phase = Some(phase))
}

/// Set the data source description until the guard drops.
#[must_use]
pub fn set_source(source: impl Into<String>) -> ContextGuard {
    let source = source.into();
    replace_context(|ctx| ctx.source = Some(source))
}

/// Snapshot of the current context, used by the panic hook.
#[must_use]
pub fn get_current_context() -> RenderContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_guard_restores_previous_phase() {
        let _outer = set_phase(RenderPhase::DataLoading);
        {
            let _inner = set_phase(RenderPhase::ViewBuilding);
            assert_eq!(
                get_current_context().phase,
                Some(RenderPhase::ViewBuilding)
            );
        }
        assert_eq!(get_current_context().phase, Some(RenderPhase::DataLoading));
    }

    #[test]
    fn source_and_phase_are_tracked_independently() {
        let _source = set_source("snapshot.json");
        let _phase = set_phase(RenderPhase::Validation);
        let ctx = get_current_context();
        assert_eq!(ctx.source.as_deref(), Some("snapshot.json"));
        assert_eq!(ctx.phase, Some(RenderPhase::Validation));
    }

    #[test]
    fn phase_display_is_snake_case() {
        assert_eq!(RenderPhase::OutputGeneration.to_string(), "output_generation");
    }
}
