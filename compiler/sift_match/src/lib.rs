//! Sift Match - structural pattern matching over Sift values.
//!
//! A host builds [`Pattern`] trees, registers its class types in a
//! [`TypeRegistry`], and compiles an ordered list of [`Case`]s into a
//! [`MatchStatement`]. Compilation rejects every malformed pattern up front
//! (see [`PatternErrorKind`] for the E3xxx codes); after that, matching is
//! infallible and either yields the first matching case with its bindings or
//! [`MatchOutcome::NoMatch`].
//!
//! # Architecture
//!
//! - `pattern`: host-facing, unvalidated pattern trees
//! - `registry`: class declarations, field-order lists and subtyping
//! - `compile`: validation and lowering to `CompiledPattern`
//! - `matcher`: `attempt_match` for a single pattern
//! - `select`: first-match-wins `select_case`
//! - `guard`: the `GuardEvaluator` callback through which guards run
//!
//! Compiled statements and values are immutable and `Send + Sync`; a
//! statement can be matched from many threads at once, each call with its
//! own guard evaluator.

mod bindings;
mod compile;
mod errors;
mod guard;
mod matcher;
mod pattern;
mod registry;
mod select;
mod stack;

use std::sync::Once;

pub use bindings::Bindings;
pub use compile::{CompiledCase, CompiledPattern, MatchCompiler, MatchStatement};
pub use errors::{PatternError, PatternErrorKind, RegistryError};
pub use guard::{GuardEvaluator, NoGuards};
pub use matcher::attempt_match;
pub use pattern::{Case, Pattern, SequenceRest};
pub use registry::{TypeDecl, TypeInfo, TypeRegistry};
pub use select::{select_case, MatchOutcome};

// Re-export the identifier and value types hosts need to build patterns.
pub use sift_ir::{BodyId, GuardId, Name, SharedInterner, StringLookup};
pub use sift_value::{Value, ValueError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Set `RUST_LOG` to enable output, e.g. `RUST_LOG=sift_match=trace` to see
/// every case tried and every guard evaluated. Without `RUST_LOG` this does
/// nothing. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
