//! Errors raised while constructing values.

/// Failure to build a well-formed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A mapping was given two keys that compare equal.
    #[error("duplicate mapping key {key}")]
    DuplicateKey {
        /// Rendering of the offending key.
        key: String,
    },
}
