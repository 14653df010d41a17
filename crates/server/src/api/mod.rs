//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.

mod health;
mod tools;

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by route registration.

pub use health::health;
pub use tools::{call_tool, list_tools};
