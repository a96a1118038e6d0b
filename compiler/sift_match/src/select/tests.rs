use super::*;
use crate::registry::{TypeDecl, TypeRegistry};
use crate::{Case, MatchCompiler, NoGuards, Pattern};
use pretty_assertions::assert_eq;
use sift_ir::{GuardId, Name, SharedInterner};

struct Fixture {
    registry: TypeRegistry,
    x: Name,
    n: Name,
}

fn fixture() -> Fixture {
    let interner = SharedInterner::new();
    let point = interner.intern("Point");
    let x = interner.intern("x");
    let mut registry = TypeRegistry::new(&interner);
    registry
        .register(TypeDecl::new(point).fields([x]).match_args([x]))
        .unwrap();
    Fixture {
        n: interner.intern("n"),
        registry,
        x,
    }
}

fn body(i: u32) -> BodyId {
    BodyId::new(i)
}

#[test]
fn first_matching_case_wins() {
    let f = fixture();
    let err = MatchCompiler::new(&f.registry)
        .compile(vec![
            Case::new(Pattern::literal(Value::Int(1)), body(10)),
            Case::new(Pattern::capture(f.n), body(11)),
            Case::new(Pattern::Wildcard, body(12)),
        ])
        .unwrap_err();
    // Case 1 is a catch-all followed by another case.
    assert_eq!(err.case_index, Some(1));

    let statement = MatchCompiler::new(&f.registry)
        .compile(vec![
            Case::new(Pattern::literal(Value::Int(1)), body(10)),
            Case::new(Pattern::literal(Value::Float(1.0)), body(11)),
            Case::new(Pattern::capture(f.n), body(12)),
        ])
        .unwrap();

    let outcome = statement.select_case(&Value::Float(1.0), &mut NoGuards);
    assert_eq!(outcome.case_index(), Some(0));
    assert_eq!(outcome.body(), Some(body(10)));
    assert!(outcome.bindings().is_some_and(Bindings::is_empty));

    let outcome = statement.select_case(&Value::Int(7), &mut NoGuards);
    assert_eq!(
        outcome,
        MatchOutcome::Matched {
            case_index: 2,
            body: body(12),
            bindings: [(f.n, Value::Int(7))].into_iter().collect(),
        }
    );
}

#[test]
fn no_match_is_an_outcome() {
    let f = fixture();
    let statement = MatchCompiler::new(&f.registry)
        .compile(vec![Case::new(Pattern::literal(Value::Int(1)), body(0))])
        .unwrap();
    let outcome = select_case(&statement, &Value::Int(2), &mut NoGuards);
    assert_eq!(outcome, MatchOutcome::NoMatch);
    assert!(!outcome.is_match());
    assert_eq!(outcome.case_index(), None);
    assert_eq!(outcome.body(), None);
    assert!(outcome.bindings().is_none());
}

#[test]
fn empty_statement_never_matches() {
    let f = fixture();
    let statement = MatchCompiler::new(&f.registry).compile(Vec::new()).unwrap();
    assert_eq!(statement.select_case(&Value::None, &mut NoGuards), MatchOutcome::NoMatch);
}

#[test]
fn false_guard_falls_through_without_leaking_bindings() {
    let f = fixture();
    let statement = MatchCompiler::new(&f.registry)
        .compile(vec![
            Case::new(Pattern::capture(f.n), body(0)).with_guard(GuardId::new(0)),
            Case::new(Pattern::capture(f.x), body(1)),
        ])
        .unwrap();

    let mut evaluated = Vec::new();
    let mut guards = |id: GuardId, bindings: &Bindings| {
        evaluated.push(id);
        bindings
            .get(f.n)
            .map_or(Value::Bool(false), |v| Value::Bool(v.as_int().is_some_and(|n| n > 0)))
    };

    let outcome = statement.select_case(&Value::Int(-3), &mut guards);
    assert_eq!(outcome.case_index(), Some(1));
    let bindings = outcome.bindings().unwrap();
    assert_eq!(bindings.len(), 1);
    assert!(!bindings.contains(f.n));
    assert_eq!(bindings.get(f.x), Some(&Value::Int(-3)));

    let outcome = statement.select_case(&Value::Int(4), &mut guards);
    assert_eq!(outcome.case_index(), Some(0));
    assert_eq!(evaluated, vec![GuardId::new(0), GuardId::new(0)]);
}

#[test]
fn guard_result_uses_truthiness() {
    let f = fixture();
    let statement = MatchCompiler::new(&f.registry)
        .compile(vec![
            Case::new(Pattern::Wildcard, body(0)).with_guard(GuardId::new(0)),
        ])
        .unwrap();

    for (result, matched) in [
        (Value::Int(0), false),
        (Value::string(""), false),
        (Value::None, false),
        (Value::sequence(vec![Value::None]), true),
        (Value::Float(f64::NAN), true),
    ] {
        let mut guards = |_: GuardId, _: &Bindings| result.clone();
        assert_eq!(
            statement.select_case(&Value::Int(1), &mut guards).is_match(),
            matched
        );
    }
}

#[test]
fn selection_is_repeatable() {
    let f = fixture();
    let statement = MatchCompiler::new(&f.registry)
        .compile(vec![
            Case::new(
                Pattern::sequence_with_rest(
                    vec![Pattern::capture(f.x)],
                    f.n,
                    Vec::new(),
                ),
                body(0),
            ),
        ])
        .unwrap();
    let subject = Value::sequence(vec![Value::Int(1), Value::Int(2)]);
    let first = statement.select_case(&subject, &mut NoGuards);
    let second = statement.select_case(&subject, &mut NoGuards);
    assert_eq!(first, second);
    assert!(first.is_match());
}
