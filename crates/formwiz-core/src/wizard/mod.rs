//! Multi-step wizard over a compiled schema.
//!
//! The schema is an explicit constructor argument, so independent wizards
//! can coexist without shared state.

pub mod navigation;
pub mod progress;
pub mod validate;

pub use navigation::Wizard;
pub use progress::StepProgress;

/// Step count used when the schema has no sections.
pub const DEFAULT_STEP_COUNT: usize = 5;

/// Seconds a rejected-navigation message stays visible.
pub const DEFAULT_DISMISS_SECS: u64 = 5;
