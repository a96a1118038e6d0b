//! First-match-wins case selection.

use sift_ir::BodyId;
use sift_value::Value;

use crate::{attempt_match, Bindings, GuardEvaluator, MatchStatement};

/// Result of running a subject through a match statement.
///
/// `NoMatch` is an ordinary outcome: an unmatched subject falls through and
/// the host decides what that means.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    /// The first case whose pattern (and guard) matched.
    Matched {
        case_index: usize,
        body: BodyId,
        bindings: Bindings,
    },
    /// No case matched.
    NoMatch,
}

impl MatchOutcome {
    /// Whether a case matched.
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    /// Index of the matched case.
    pub fn case_index(&self) -> Option<usize> {
        match self {
            MatchOutcome::Matched { case_index, .. } => Some(*case_index),
            MatchOutcome::NoMatch => None,
        }
    }

    /// Body handle of the matched case.
    pub fn body(&self) -> Option<BodyId> {
        match self {
            MatchOutcome::Matched { body, .. } => Some(*body),
            MatchOutcome::NoMatch => None,
        }
    }

    /// Captures of the matched case.
    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            MatchOutcome::Matched { bindings, .. } => Some(bindings),
            MatchOutcome::NoMatch => None,
        }
    }
}

impl MatchStatement {
    /// Try each case in order against `subject`; the first that matches wins.
    ///
    /// Each case starts from an empty binding set, so captures from a case
    /// that failed (including one whose guard was false) never leak into a
    /// later case.
    #[tracing::instrument(level = "debug", skip_all, fields(cases = self.len()))]
    pub fn select_case<G>(&self, subject: &Value, guards: &mut G) -> MatchOutcome
    where
        G: GuardEvaluator + ?Sized,
    {
        let mut bindings = Bindings::new();
        for (case_index, case) in self.cases.iter().enumerate() {
            bindings.clear();
            tracing::trace!(case_index, "trying case");
            if attempt_match(case.pattern(), subject, &mut bindings, guards) {
                tracing::debug!(case_index, bound = bindings.len(), "case matched");
                return MatchOutcome::Matched {
                    case_index,
                    body: case.body(),
                    bindings,
                };
            }
        }
        tracing::debug!("no case matched");
        MatchOutcome::NoMatch
    }
}

/// Free-function form of [`MatchStatement::select_case`].
pub fn select_case<G>(statement: &MatchStatement, subject: &Value, guards: &mut G) -> MatchOutcome
where
    G: GuardEvaluator + ?Sized,
{
    statement.select_case(subject, guards)
}

#[cfg(test)]
mod tests;
