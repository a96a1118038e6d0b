//! Sift Value - the runtime values a match subject is built from.
//!
//! Values are a closed set: `Int`, `Float`, `Str`, `Bool`, `None`,
//! `Sequence`, `Mapping` and `Object`. They are immutable once built and
//! shared through `Heap<T>`, so a single subject can be matched from many
//! threads at once without copying.
//!
//! The matcher needs three predicates from this crate:
//! - [`Value::equals`]: structural equality with numeric cross-type equality
//! - [`Value::is_truthy`]: truthiness used for guard results
//! - [`Value::same_identity`]: identity for the `True`/`False`/`None` singletons

mod errors;
mod value;

pub use errors::ValueError;
pub use value::{Heap, ObjectValue, Value};
