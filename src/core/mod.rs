pub mod anchor;
pub mod convergence;
pub mod stability;
pub mod types;

pub use anchor::{ViewportAnchor, calculate_anchor, resolve_restore_target};
pub use convergence::{
    ConvergenceConfig, ConvergenceStep, converge_step, resolve_scroll_offset,
    resolve_scroll_target,
};
pub use stability::{StabilityConfig, StabilityTracker};
pub use types::{ItemId, ItemRect, MaterializedItem, ScrollMetrics};
