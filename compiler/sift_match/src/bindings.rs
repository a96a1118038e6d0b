//! Captured names produced by a successful match.

use std::fmt;

use sift_ir::{Name, StringLookup};
use sift_value::Value;
use smallvec::SmallVec;

/// Name → value captures, in the order they were bound.
///
/// Compilation rejects patterns that bind a name twice, so within one
/// successful match every name appears once. Equality ignores order.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: SmallVec<[(Name, Value); 4]>,
}

impl Bindings {
    /// An empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing an earlier binding of the same name.
    pub fn bind(&mut self, name: Name, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Value bound to `name`.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: Name) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bindings in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Bound names in binding order.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Move every binding of `other` into `self`.
    pub fn extend_from(&mut self, other: Bindings) {
        for (name, value) in other.entries {
            self.bind(name, value);
        }
    }

    /// Drop every binding.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consume into a plain vector.
    pub fn into_vec(self) -> Vec<(Name, Value)> {
        self.entries.into_vec()
    }

    /// Render as `{name: value, ...}` in binding order.
    pub fn display_with<I: StringLookup>(&self, interner: &I) -> String {
        let inner: Vec<String> = self
            .entries
            .iter()
            .map(|(n, v)| format!("{}: {}", interner.lookup(*n), v.display_with(interner)))
            .collect();
        format!("{{{}}}", inner.join(", "))
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(n, v)| other.get(*n).is_some_and(|w| v.equals(w)))
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (Name, Value)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.bind(name, value);
        }
        bindings
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
