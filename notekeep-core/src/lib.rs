//! notekeep Core - Entity Types
//!
//! Notes, rank entries, errors, field rules and the pure ordering
//! algorithms. All other crates depend on this one; nothing here does I/O.

mod draft;
mod entities;
mod enums;
mod error;
mod identity;
pub mod ordering;

pub use draft::*;
pub use entities::*;
pub use enums::*;
pub use error::*;
pub use identity::*;
pub use ordering::{
    attach_ranks, compare_ranked, plan_initialization, rank_index, resolve_order,
    InitializationPlan, ResolvedNote,
};
