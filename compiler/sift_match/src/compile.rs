//! Construction-time validation and lowering of pattern trees.
//!
//! `MatchCompiler` walks each [`Pattern`] once, rejecting malformed trees
//! before any subject is seen, and lowers it to a [`CompiledPattern`]:
//!
//! - class positional sub-patterns are resolved to field names through the
//!   registered field-order list
//! - the set of type tags a class pattern accepts (the tag and its
//!   subtypes) is computed up front
//! - sequence patterns are split around their rest slot
//! - literal patterns record whether they compare by identity
//! - case-level guards become `Guarded` nodes
//!
//! The compiled form cannot be built any other way, so the matcher can rely
//! on every invariant checked here.

use rustc_hash::FxHashSet;
use sift_ir::{BodyId, GuardId, Name};
use sift_value::Value;

use crate::pattern::{Case, Pattern, SequenceRest};
use crate::registry::TypeRegistry;
use crate::stack::ensure_sufficient_stack;
use crate::{PatternError, PatternErrorKind};

/// What a rest slot does with the elements or entries it absorbs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RestBinding {
    /// `*_` / `**_`.
    Discard,
    /// `*name` / `**name`.
    Bind(Name),
}

/// Validated pattern node.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Literal {
        value: Value,
        by_identity: bool,
    },
    Capture(Name),
    Wildcard,
    Or(Vec<Node>),
    Sequence {
        prefix: Vec<Node>,
        rest: Option<RestBinding>,
        suffix: Vec<Node>,
    },
    Mapping {
        entries: Vec<(Value, Node)>,
        rest: Option<RestBinding>,
    },
    Class {
        type_tag: Name,
        accepts: FxHashSet<Name>,
        fields: Vec<(Name, Node)>,
    },
    Guarded {
        inner: Box<Node>,
        guard: GuardId,
    },
    As {
        inner: Box<Node>,
        name: Name,
    },
}

impl Node {
    /// Matches every subject without consulting a guard.
    fn is_irrefutable(&self) -> bool {
        match self {
            Node::Capture(_) | Node::Wildcard => true,
            Node::As { inner, .. } => inner.is_irrefutable(),
            Node::Or(alternatives) => alternatives.iter().any(Node::is_irrefutable),
            _ => false,
        }
    }
}

/// A validated pattern, ready for [`attempt_match`](crate::attempt_match).
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    pub(crate) root: Node,
    names: Vec<Name>,
}

impl CompiledPattern {
    /// Names a successful match binds, in binding order.
    pub fn bound_names(&self) -> &[Name] {
        &self.names
    }

    /// Whether this pattern matches every subject.
    pub fn is_irrefutable(&self) -> bool {
        self.root.is_irrefutable()
    }
}

/// A compiled `case` clause.
#[derive(Clone, Debug)]
pub struct CompiledCase {
    pattern: CompiledPattern,
    body: BodyId,
}

impl CompiledCase {
    /// The case's pattern, with any case-level guard folded in.
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// The host's body handle.
    pub fn body(&self) -> BodyId {
        self.body
    }
}

/// An ordered, validated list of cases.
///
/// Immutable once compiled and `Send + Sync`, so one statement can serve
/// concurrent [`select_case`](MatchStatement::select_case) calls.
///
/// Class patterns accept the subtypes registered when the statement was
/// compiled. A subtype registered afterwards is not accepted until the cases
/// are compiled again.
#[derive(Clone, Debug)]
pub struct MatchStatement {
    pub(crate) cases: Vec<CompiledCase>,
}

impl MatchStatement {
    /// Cases in evaluation order.
    pub fn cases(&self) -> &[CompiledCase] {
        &self.cases
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the statement has no cases (it then never matches).
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Validates and lowers pattern trees against a [`TypeRegistry`].
///
/// ```text
/// let statement = MatchCompiler::new(&registry)
///     .reject_unreachable(false)
///     .compile(cases)?;
/// ```
pub struct MatchCompiler<'a> {
    registry: &'a TypeRegistry,
    reject_unreachable: bool,
}

impl<'a> MatchCompiler<'a> {
    /// Create a compiler that rejects unreachable cases.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        MatchCompiler {
            registry,
            reject_unreachable: true,
        }
    }

    /// Whether an irrefutable case or or-alternative followed by more cases
    /// or alternatives is an error (`true`, the default) or only a warning.
    #[must_use]
    pub fn reject_unreachable(mut self, reject: bool) -> Self {
        self.reject_unreachable = reject;
        self
    }

    /// Compile an ordered list of cases into a statement.
    #[tracing::instrument(level = "debug", skip_all, fields(cases = cases.len()))]
    pub fn compile(&self, cases: Vec<Case>) -> Result<MatchStatement, PatternError> {
        let last = cases.len().saturating_sub(1);
        let mut compiled = Vec::with_capacity(cases.len());

        for (case_index, case) in cases.into_iter().enumerate() {
            let mut pattern = self
                .compile_pattern(&case.pattern)
                .map_err(|e| e.in_case(case_index))?;

            if let Some(guard) = case.guard {
                pattern.root = Node::Guarded {
                    inner: Box::new(pattern.root),
                    guard,
                };
            }

            if case_index < last && pattern.is_irrefutable() {
                self.unreachable(PatternErrorKind::UnreachableCase { case_index })
                    .map_err(|e| e.in_case(case_index))?;
            }

            compiled.push(CompiledCase {
                pattern,
                body: case.body,
            });
        }

        tracing::debug!(cases = compiled.len(), "compiled match statement");
        Ok(MatchStatement { cases: compiled })
    }

    /// Compile a single pattern.
    pub fn compile_pattern(&self, pattern: &Pattern) -> Result<CompiledPattern, PatternError> {
        let mut names = Vec::new();
        let root = self.lower(pattern, &mut names)?;
        Ok(CompiledPattern { root, names })
    }

    fn lower(&self, pattern: &Pattern, names: &mut Vec<Name>) -> Result<Node, PatternError> {
        ensure_sufficient_stack(|| self.lower_inner(pattern, names))
    }

    fn lower_inner(&self, pattern: &Pattern, names: &mut Vec<Name>) -> Result<Node, PatternError> {
        match pattern {
            Pattern::Literal(value) => Ok(Node::Literal {
                by_identity: matches!(value, Value::Bool(_) | Value::None),
                value: value.clone(),
            }),

            Pattern::Capture(name) => {
                self.bind_name(*name, names)?;
                Ok(Node::Capture(*name))
            }

            Pattern::Wildcard => Ok(Node::Wildcard),

            Pattern::Or(alternatives) => self.lower_or(alternatives, names),

            Pattern::Sequence { elements, rest } => self.lower_sequence(elements, *rest, names),

            Pattern::Mapping { entries, rest } => self.lower_mapping(entries, *rest, names),

            Pattern::Class {
                type_tag,
                positional,
                keyword,
            } => self.lower_class(*type_tag, positional, keyword, names),

            Pattern::Guarded { inner, guard } => Ok(Node::Guarded {
                inner: Box::new(self.lower(inner, names)?),
                guard: *guard,
            }),

            Pattern::As { inner, name } => {
                let inner = self.lower(inner, names)?;
                self.bind_name(*name, names)?;
                Ok(Node::As {
                    inner: Box::new(inner),
                    name: *name,
                })
            }
        }
    }

    fn lower_or(&self, alternatives: &[Pattern], names: &mut Vec<Name>) -> Result<Node, PatternError> {
        let mut lowered = Vec::with_capacity(alternatives.len());
        let mut expected: Option<Vec<Name>> = None;

        for (alternative, pattern) in alternatives.iter().enumerate() {
            let mut alt_names = Vec::new();
            let node = self.lower(pattern, &mut alt_names)?;

            if alternative + 1 < alternatives.len() && node.is_irrefutable() {
                self.unreachable(PatternErrorKind::UnreachableAlternative { alternative })?;
            }

            match &expected {
                None => expected = Some(alt_names),
                Some(first) => {
                    if !same_name_set(first, &alt_names) {
                        return Err(PatternErrorKind::InconsistentOrBindings {
                            alternative,
                            expected: self.sorted_strings(first),
                            found: self.sorted_strings(&alt_names),
                        }
                        .into());
                    }
                }
            }
            lowered.push(node);
        }

        for name in expected.unwrap_or_default() {
            self.bind_name(name, names)?;
        }
        Ok(Node::Or(lowered))
    }

    fn lower_sequence(
        &self,
        elements: &[Pattern],
        rest: Option<SequenceRest>,
        names: &mut Vec<Name>,
    ) -> Result<Node, PatternError> {
        let split = match rest {
            Some(SequenceRest { index, .. }) if index > elements.len() => {
                return Err(PatternErrorKind::RestIndexOutOfRange {
                    index,
                    len: elements.len(),
                }
                .into());
            }
            Some(SequenceRest { index, .. }) => index,
            None => elements.len(),
        };

        let prefix = elements[..split]
            .iter()
            .map(|p| self.lower(p, names))
            .collect::<Result<Vec<_>, _>>()?;

        let rest = match rest {
            Some(SequenceRest { name, .. }) => Some(self.rest_binding(name, names)?),
            None => None,
        };

        let suffix = elements[split..]
            .iter()
            .map(|p| self.lower(p, names))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node::Sequence {
            prefix,
            rest,
            suffix,
        })
    }

    fn lower_mapping(
        &self,
        entries: &[(Value, Pattern)],
        rest: Option<Name>,
        names: &mut Vec<Name>,
    ) -> Result<Node, PatternError> {
        let mut lowered: Vec<(Value, Node)> = Vec::with_capacity(entries.len());

        for (key, pattern) in entries {
            if !matches!(
                key,
                Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::Bool(_) | Value::None
            ) {
                return Err(PatternErrorKind::InvalidMappingKey {
                    key: key.display_with(self.registry.interner()),
                    type_name: key.type_name().to_string(),
                }
                .into());
            }
            if lowered.iter().any(|(seen, _)| seen.equals(key)) {
                return Err(PatternErrorKind::DuplicateMappingKey {
                    key: key.display_with(self.registry.interner()),
                }
                .into());
            }
            lowered.push((key.clone(), self.lower(pattern, names)?));
        }

        let rest = match rest {
            Some(name) => Some(self.rest_binding(name, names)?),
            None => None,
        };

        Ok(Node::Mapping {
            entries: lowered,
            rest,
        })
    }

    fn lower_class(
        &self,
        type_tag: Name,
        positional: &[Pattern],
        keyword: &[(Name, Pattern)],
        names: &mut Vec<Name>,
    ) -> Result<Node, PatternError> {
        let Some(info) = self.registry.get(type_tag) else {
            return Err(PatternErrorKind::UnknownType {
                type_name: self.string(type_tag),
            }
            .into());
        };

        let order = info.match_args();
        if positional.len() > order.len() {
            return Err(PatternErrorKind::TooManyPositional {
                type_name: self.string(type_tag),
                expected: order.len(),
                got: positional.len(),
            }
            .into());
        }

        let mut fields: Vec<(Name, Node)> = Vec::with_capacity(positional.len() + keyword.len());
        for (&field, pattern) in order.iter().zip(positional) {
            fields.push((field, self.lower(pattern, names)?));
        }

        for (field, pattern) in keyword {
            if !info.declares(*field) {
                return Err(PatternErrorKind::UnknownClassField {
                    type_name: self.string(type_tag),
                    field: self.string(*field),
                }
                .into());
            }
            if fields.iter().any(|(seen, _)| seen == field) {
                return Err(PatternErrorKind::DuplicateClassField {
                    type_name: self.string(type_tag),
                    field: self.string(*field),
                }
                .into());
            }
            fields.push((*field, self.lower(pattern, names)?));
        }

        Ok(Node::Class {
            type_tag,
            accepts: self.registry.accepting_tags(type_tag),
            fields,
        })
    }

    fn rest_binding(&self, name: Name, names: &mut Vec<Name>) -> Result<RestBinding, PatternError> {
        if self.registry.interner().is_wildcard_name(name) {
            return Ok(RestBinding::Discard);
        }
        self.bind_name(name, names)?;
        Ok(RestBinding::Bind(name))
    }

    /// Record that the pattern binds `name`.
    fn bind_name(&self, name: Name, names: &mut Vec<Name>) -> Result<(), PatternError> {
        if self.registry.interner().is_wildcard_name(name) {
            return Err(PatternErrorKind::WildcardCapture.into());
        }
        if names.contains(&name) {
            return Err(PatternErrorKind::DuplicateBinding {
                name: self.string(name),
            }
            .into());
        }
        names.push(name);
        Ok(())
    }

    fn unreachable(&self, kind: PatternErrorKind) -> Result<(), PatternError> {
        if self.reject_unreachable {
            return Err(kind.into());
        }
        tracing::warn!(code = kind.code(), "{kind}");
        Ok(())
    }

    fn string(&self, name: Name) -> String {
        self.registry.interner().lookup(name).to_string()
    }

    fn sorted_strings(&self, names: &[Name]) -> Vec<String> {
        let mut strings: Vec<String> = names.iter().map(|&n| self.string(n)).collect();
        strings.sort();
        strings
    }
}

fn same_name_set(a: &[Name], b: &[Name]) -> bool {
    a.len() == b.len() && a.iter().all(|n| b.contains(n))
}
