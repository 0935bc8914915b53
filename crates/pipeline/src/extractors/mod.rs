//! Field extractor implementations.
//!
//! One per extraction rule: every name, the first N names, or names whose
//! role matches.

pub mod all_names;
pub mod by_role;
pub mod top_billed;

// Re-export for convenience
pub use all_names::AllNames;
pub use by_role::ByRole;
pub use top_billed::TopBilled;
