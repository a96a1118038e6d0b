//! Matching a compiled pattern against a subject value.
//!
//! Every per-attempt failure (wrong shape, wrong length, missing key, false
//! guard) is a plain `false`. There is no error path here: anything that could
//! be malformed was rejected when the pattern was compiled.

use sift_value::Value;
use smallvec::SmallVec;

use crate::compile::{Node, RestBinding};
use crate::stack::ensure_sufficient_stack;
use crate::{Bindings, CompiledPattern, GuardEvaluator};

/// Match `pattern` against `subject`, writing captures into `bindings`.
///
/// On success every name in [`CompiledPattern::bound_names`] is bound. On
/// failure `bindings` may hold a partial set of captures and must be
/// discarded; [`MatchStatement::select_case`](crate::MatchStatement::select_case)
/// does this for each case.
///
/// `guards` is consulted once for each guarded node whose inner pattern
/// matched.
pub fn attempt_match<G>(
    pattern: &CompiledPattern,
    subject: &Value,
    bindings: &mut Bindings,
    guards: &mut G,
) -> bool
where
    G: GuardEvaluator + ?Sized,
{
    match_node(&pattern.root, subject, bindings, guards)
}

fn match_node<G>(node: &Node, subject: &Value, bindings: &mut Bindings, guards: &mut G) -> bool
where
    G: GuardEvaluator + ?Sized,
{
    ensure_sufficient_stack(|| match_node_inner(node, subject, bindings, guards))
}

fn match_node_inner<G>(node: &Node, subject: &Value, bindings: &mut Bindings, guards: &mut G) -> bool
where
    G: GuardEvaluator + ?Sized,
{
    match node {
        Node::Literal { value, by_identity } => {
            if *by_identity {
                value.same_identity(subject)
            } else {
                value.equals(subject)
            }
        }

        Node::Capture(name) => {
            bindings.bind(*name, subject.clone());
            true
        }

        Node::Wildcard => true,

        Node::Or(alternatives) => {
            // Each alternative starts from the outer captures, so nested
            // guards see them; a failed alternative leaves `bindings` as it was.
            let mut scratch = Bindings::new();
            for alternative in alternatives {
                scratch.clone_from(bindings);
                if match_node(alternative, subject, &mut scratch, guards) {
                    *bindings = scratch;
                    return true;
                }
            }
            false
        }

        Node::Sequence {
            prefix,
            rest,
            suffix,
        } => match_sequence(prefix, *rest, suffix, subject, bindings, guards),

        Node::Mapping { entries, rest } => match_mapping(entries, *rest, subject, bindings, guards),

        Node::Class {
            type_tag,
            accepts,
            fields,
        } => {
            let Some(object) = subject.as_object() else {
                return false;
            };
            if !accepts.contains(&object.type_tag()) {
                return false;
            }
            for (field, pattern) in fields {
                let Some(value) = object.field(*field) else {
                    tracing::trace!(?type_tag, ?field, "object lacks field named by class pattern");
                    return false;
                };
                if !match_node(pattern, value, bindings, guards) {
                    return false;
                }
            }
            true
        }

        Node::Guarded { inner, guard } => {
            if !match_node(inner, subject, bindings, guards) {
                return false;
            }
            let verdict = guards.evaluate_guard(*guard, bindings);
            tracing::trace!(?guard, %verdict, "guard evaluated");
            verdict.is_truthy()
        }

        Node::As { inner, name } => {
            if !match_node(inner, subject, bindings, guards) {
                return false;
            }
            bindings.bind(*name, subject.clone());
            true
        }
    }
}

fn match_sequence<G>(
    prefix: &[Node],
    rest: Option<RestBinding>,
    suffix: &[Node],
    subject: &Value,
    bindings: &mut Bindings,
    guards: &mut G,
) -> bool
where
    G: GuardEvaluator + ?Sized,
{
    // Strings and mappings are not sequences here, even though both iterate.
    let Some(items) = subject.as_sequence() else {
        return false;
    };

    let fixed = prefix.len() + suffix.len();
    let length_ok = match rest {
        None => items.len() == fixed,
        Some(_) => items.len() >= fixed,
    };
    if !length_ok {
        return false;
    }

    for (pattern, item) in prefix.iter().zip(items) {
        if !match_node(pattern, item, bindings, guards) {
            return false;
        }
    }

    let suffix_start = items.len() - suffix.len();
    for (pattern, item) in suffix.iter().zip(&items[suffix_start..]) {
        if !match_node(pattern, item, bindings, guards) {
            return false;
        }
    }

    if let Some(RestBinding::Bind(name)) = rest {
        let middle = items[prefix.len()..suffix_start].to_vec();
        bindings.bind(name, Value::sequence(middle));
    }
    true
}

fn match_mapping<G>(
    entries: &[(Value, Node)],
    rest: Option<RestBinding>,
    subject: &Value,
    bindings: &mut Bindings,
    guards: &mut G,
) -> bool
where
    G: GuardEvaluator + ?Sized,
{
    let Some(subject_entries) = subject.as_mapping() else {
        return false;
    };

    let mut consumed: SmallVec<[usize; 8]> = SmallVec::with_capacity(entries.len());
    for (key, pattern) in entries {
        let Some((index, value)) = subject.mapping_lookup(key) else {
            return false;
        };
        consumed.push(index);
        if !match_node(pattern, value, bindings, guards) {
            return false;
        }
    }

    if let Some(RestBinding::Bind(name)) = rest {
        let remaining = subject_entries
            .iter()
            .enumerate()
            .filter(|(index, _)| !consumed.contains(index))
            .map(|(_, entry)| entry);
        bindings.bind(name, Value::sub_mapping(remaining));
    }
    true
}
