//! Sift IR - identifiers shared by every layer of the Sift matching engine.
//!
//! This crate provides:
//! - `Name`: a compact interned identifier used for capture names, type tags
//!   and field names
//! - `StringInterner` / `SharedInterner`: the sharded interner that owns the
//!   strings behind each `Name`
//! - `GuardId` / `BodyId`: opaque handles the host attaches to cases; the
//!   engine passes them back without interpreting them

mod ids;
mod interner;
mod name;

pub use ids::{BodyId, GuardId};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
