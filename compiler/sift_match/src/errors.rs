//! Construction-time errors.
//!
//! Everything here is raised while registering types or compiling cases,
//! never while matching. A subject that fails to match is an ordinary
//! outcome (`false` / `MatchOutcome::NoMatch`), not an error.
//!
//! Names are resolved to strings when the error is built so errors can be
//! displayed without the interner.

/// Typed category of a pattern compilation failure.
///
/// Each kind has a stable code in the E3xxx range (see [`PatternErrorKind::code`]).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternErrorKind {
    /// Alternatives of an or-pattern bind different names.
    #[error(
        "alternative {alternative} of or-pattern binds {{{}}} but the first alternative binds {{{}}}",
        .found.join(", "),
        .expected.join(", ")
    )]
    InconsistentOrBindings {
        alternative: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Class pattern names a type that was never registered.
    #[error("class pattern names unregistered type `{type_name}`")]
    UnknownType { type_name: String },

    /// More positional sub-patterns than the type's field-order list.
    #[error("`{type_name}` accepts {expected} positional sub-pattern(s) ({got} given)")]
    TooManyPositional {
        type_name: String,
        expected: usize,
        got: usize,
    },

    /// Capture or `as` target spelled `_`.
    #[error("`_` cannot be used as a capture name")]
    WildcardCapture,

    /// The same name is bound twice within one pattern.
    #[error("multiple assignments to name `{name}` in pattern")]
    DuplicateBinding { name: String },

    /// Sequence rest slot placed past the end of the fixed elements.
    #[error("sequence rest index {index} is out of range for {len} fixed element(s)")]
    RestIndexOutOfRange { index: usize, len: usize },

    /// Two mapping pattern keys compare equal.
    #[error("mapping pattern checks duplicate key {key}")]
    DuplicateMappingKey { key: String },

    /// Mapping pattern key is not a literal scalar.
    #[error("mapping pattern key must be a literal scalar, found {type_name} {key}")]
    InvalidMappingKey { key: String, type_name: String },

    /// Class pattern gives the same field more than once.
    #[error("class pattern for `{type_name}` gives multiple sub-patterns for field `{field}`")]
    DuplicateClassField { type_name: String, field: String },

    /// Keyword sub-pattern names a field the type does not declare.
    #[error("`{type_name}` has no declared field `{field}`")]
    UnknownClassField { type_name: String, field: String },

    /// An irrefutable case is followed by more cases.
    #[error("case {case_index} matches every subject and makes the remaining cases unreachable")]
    UnreachableCase { case_index: usize },

    /// An irrefutable or-alternative is followed by more alternatives.
    #[error("alternative {alternative} matches every subject and makes the remaining alternatives unreachable")]
    UnreachableAlternative { alternative: usize },
}

impl PatternErrorKind {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            PatternErrorKind::InconsistentOrBindings { .. } => "E3001",
            PatternErrorKind::UnknownType { .. } => "E3002",
            PatternErrorKind::TooManyPositional { .. } => "E3003",
            PatternErrorKind::WildcardCapture => "E3004",
            PatternErrorKind::DuplicateBinding { .. } => "E3005",
            PatternErrorKind::RestIndexOutOfRange { .. } => "E3006",
            PatternErrorKind::DuplicateMappingKey { .. } => "E3007",
            PatternErrorKind::InvalidMappingKey { .. } => "E3008",
            PatternErrorKind::DuplicateClassField { .. } => "E3009",
            PatternErrorKind::UnknownClassField { .. } => "E3010",
            PatternErrorKind::UnreachableCase { .. } => "E3011",
            PatternErrorKind::UnreachableAlternative { .. } => "E3012",
        }
    }
}

/// A pattern rejected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("error[{}]: {kind}{}", .kind.code(), .case_index.map(|i| format!(" (in case {i})")).unwrap_or_default())]
pub struct PatternError {
    /// What went wrong.
    pub kind: PatternErrorKind,
    /// Case the pattern belongs to, when compiled as part of a statement.
    pub case_index: Option<usize>,
}

impl PatternError {
    pub(crate) fn new(kind: PatternErrorKind) -> Self {
        PatternError {
            kind,
            case_index: None,
        }
    }

    pub(crate) fn in_case(mut self, case_index: usize) -> Self {
        self.case_index.get_or_insert(case_index);
        self
    }

    /// Stable error code of the underlying kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<PatternErrorKind> for PatternError {
    fn from(kind: PatternErrorKind) -> Self {
        PatternError::new(kind)
    }
}

/// Failure to register a type or build an instance of one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The tag is already registered.
    #[error("type `{type_name}` is already registered")]
    DuplicateType { type_name: String },

    /// The declared parent type is not registered (yet).
    #[error("type `{type_name}` extends unregistered type `{parent}`")]
    UnknownParent { type_name: String, parent: String },

    /// A field is declared twice.
    #[error("type `{type_name}` declares field `{field}` more than once")]
    DuplicateField { type_name: String, field: String },

    /// The field-order list names an undeclared field.
    #[error("match args of `{type_name}` name undeclared field `{field}`")]
    UnknownMatchArg { type_name: String, field: String },

    /// The field-order list repeats a field.
    #[error("match args of `{type_name}` repeat field `{field}`")]
    DuplicateMatchArg { type_name: String, field: String },

    /// Instantiating a type that was never registered.
    #[error("cannot instantiate unregistered type `{type_name}`")]
    UnknownType { type_name: String },

    /// Instance given a field the type does not declare.
    #[error("`{type_name}` has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    /// Instance is missing a declared field.
    #[error("`{type_name}` instance is missing field `{field}`")]
    MissingField { type_name: String, field: String },
}
