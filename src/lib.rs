//! creatorxp - creator progression engine
//!
//! Turns creator activity (content plans, posts, viral hits, daily streaks)
//! into XP, level transitions, and achievement unlocks.
//!
//! ## Layers
//!
//! 1. **Progression** (`progression`): catalogs, scoring functions, and the
//!    [`ProgressionEngine`], a pure transformation from
//!    `(record, award)` to `(updated record, report)`.
//!
//! 2. **Storage** (`store`): load/save of [`UserProgress`] records as JSON
//!    files, SQLite rows, or in memory.
//!
//! 3. **Service** (`service`): serializes load → apply → save per user.

pub mod config;
mod fsutil;
pub mod progression;
pub mod service;
pub mod store;

pub use progression::*;
pub use service::ProgressService;
pub use store::ProgressStore;
