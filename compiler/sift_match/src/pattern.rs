//! Unvalidated pattern trees, as built by the host.
//!
//! A `Pattern` is plain data: the host assembles it once (the analogue of
//! writing a `case` clause) and hands a list of [`Case`]s to
//! [`MatchCompiler`](crate::MatchCompiler), which validates the tree and lowers
//! it to a [`CompiledPattern`](crate::CompiledPattern). Nothing here can be
//! matched directly.

use sift_ir::{BodyId, GuardId, Name};
use sift_value::Value;

/// One node of a pattern tree.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches by equality; `True`, `False` and `None` match by identity.
    Literal(Value),
    /// Always matches and binds the subject.
    Capture(Name),
    /// Always matches, binds nothing.
    Wildcard,
    /// Matches if any alternative matches, tried left to right.
    Or(Vec<Pattern>),
    /// Matches a `Sequence` value (never a string or mapping).
    ///
    /// `elements` are the fixed-position patterns only. With a `rest` slot,
    /// the slot sits before `elements[rest.index]` and absorbs zero or more
    /// subject elements.
    Sequence {
        elements: Vec<Pattern>,
        rest: Option<SequenceRest>,
    },
    /// Matches a `Mapping` value that has every listed key.
    ///
    /// Unlisted keys are ignored. `rest`, when present, captures them.
    Mapping {
        entries: Vec<(Value, Pattern)>,
        rest: Option<Name>,
    },
    /// Matches an `Object` of `type_tag` or a registered subtype.
    Class {
        type_tag: Name,
        positional: Vec<Pattern>,
        keyword: Vec<(Name, Pattern)>,
    },
    /// Matches when `inner` matches and the host's guard is truthy.
    Guarded { inner: Box<Pattern>, guard: GuardId },
    /// Matches when `inner` matches, also binding the whole subject to `name`.
    As { inner: Box<Pattern>, name: Name },
}

/// Position and target of a sequence rest slot (`*name`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SequenceRest {
    /// Number of fixed elements before the slot.
    pub index: usize,
    /// Name bound to the absorbed elements; `_` binds nothing.
    pub name: Name,
}

impl Pattern {
    /// `Literal(value)`.
    pub fn literal(value: Value) -> Self {
        Pattern::Literal(value)
    }

    /// `Capture(name)`.
    pub fn capture(name: Name) -> Self {
        Pattern::Capture(name)
    }

    /// `p1 | p2 | ...`.
    pub fn or(alternatives: Vec<Pattern>) -> Self {
        Pattern::Or(alternatives)
    }

    /// `[p1, p2, ...]` with exact length.
    pub fn sequence(elements: Vec<Pattern>) -> Self {
        Pattern::Sequence {
            elements,
            rest: None,
        }
    }

    /// `[before..., *rest, after...]`.
    pub fn sequence_with_rest(before: Vec<Pattern>, rest: Name, after: Vec<Pattern>) -> Self {
        let index = before.len();
        let mut elements = before;
        elements.extend(after);
        Pattern::Sequence {
            elements,
            rest: Some(SequenceRest { index, name: rest }),
        }
    }

    /// `{k1: p1, k2: p2, ...}`.
    pub fn mapping(entries: Vec<(Value, Pattern)>) -> Self {
        Pattern::Mapping {
            entries,
            rest: None,
        }
    }

    /// `{k1: p1, ..., **rest}`.
    pub fn mapping_with_rest(entries: Vec<(Value, Pattern)>, rest: Name) -> Self {
        Pattern::Mapping {
            entries,
            rest: Some(rest),
        }
    }

    /// `Tag(p1, ..., f1=q1, ...)`.
    pub fn class(type_tag: Name, positional: Vec<Pattern>, keyword: Vec<(Name, Pattern)>) -> Self {
        Pattern::Class {
            type_tag,
            positional,
            keyword,
        }
    }

    /// `Tag()`: a pure type test.
    pub fn instance_of(type_tag: Name) -> Self {
        Pattern::class(type_tag, Vec::new(), Vec::new())
    }

    /// `self if guard`.
    #[must_use]
    pub fn guarded(self, guard: GuardId) -> Self {
        Pattern::Guarded {
            inner: Box::new(self),
            guard,
        }
    }

    /// `self as name`.
    #[must_use]
    pub fn bind_as(self, name: Name) -> Self {
        Pattern::As {
            inner: Box::new(self),
            name,
        }
    }
}

/// One `case` clause: a pattern, an optional guard and the host's body handle.
#[derive(Clone, Debug)]
pub struct Case {
    pub pattern: Pattern,
    pub guard: Option<GuardId>,
    pub body: BodyId,
}

impl Case {
    /// An unguarded case.
    pub fn new(pattern: Pattern, body: BodyId) -> Self {
        Case {
            pattern,
            guard: None,
            body,
        }
    }

    /// Attach a case-level guard.
    #[must_use]
    pub fn with_guard(mut self, guard: GuardId) -> Self {
        self.guard = Some(guard);
        self
    }
}
