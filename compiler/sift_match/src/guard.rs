//! Hook through which the host evaluates guard conditions.

use sift_ir::GuardId;
use sift_value::Value;

use crate::Bindings;

/// Evaluates guard conditions on behalf of the matcher.
///
/// Called exactly once per successful inner match of a guarded pattern, with
/// the bindings captured so far. The matcher only looks at the result through
/// [`Value::is_truthy`].
pub trait GuardEvaluator {
    /// Evaluate `guard` with `bindings` in scope.
    fn evaluate_guard(&mut self, guard: GuardId, bindings: &Bindings) -> Value;
}

impl<F> GuardEvaluator for F
where
    F: FnMut(GuardId, &Bindings) -> Value,
{
    fn evaluate_guard(&mut self, guard: GuardId, bindings: &Bindings) -> Value {
        self(guard, bindings)
    }
}

/// Evaluator for statements compiled without guards.
///
/// A guard reached anyway is treated as false.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGuards;

impl GuardEvaluator for NoGuards {
    fn evaluate_guard(&mut self, guard: GuardId, _bindings: &Bindings) -> Value {
        tracing::warn!(?guard, "guard reached with no guard evaluator; treating as false");
        Value::Bool(false)
    }
}
