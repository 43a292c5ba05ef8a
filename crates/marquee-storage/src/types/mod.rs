//! Type definitions for marquee storage.

mod groups;
mod ids;
mod roles;
mod suggestions;
mod users;
mod votes;

// Re-export all types from submodules
pub use groups::*;
pub use ids::*;
pub use roles::*;
pub use suggestions::*;
pub use users::*;
pub use votes::*;
