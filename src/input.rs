//! Per-frame input snapshot
//!
//! The simulation is driven by plain boolean key states polled once per tick.
//! Whatever produces them (a windowing backend, the demo autopilot, a test)
//! is outside the core.

use serde::{Deserialize, Serialize};

/// Held-key states for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump while playing; confirm in the menu
    pub jump: bool,
    /// Reload the current stage (Play only)
    pub reload: bool,
}
