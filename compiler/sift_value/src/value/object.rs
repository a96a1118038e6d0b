//! Class instances: a type tag plus named fields.

use rustc_hash::FxHashMap;
use sift_ir::{Name, StringLookup};

use super::Value;

/// Instance of a registered class.
///
/// Field order is not stored here; positional class patterns are resolved
/// against the type's registered field-order list instead.
#[derive(Clone, Debug)]
pub struct ObjectValue {
    type_tag: Name,
    fields: FxHashMap<Name, Value>,
}

impl ObjectValue {
    pub(super) fn new(type_tag: Name, fields: FxHashMap<Name, Value>) -> Self {
        ObjectValue { type_tag, fields }
    }

    /// The instance's own (most derived) type tag.
    #[inline]
    pub fn type_tag(&self) -> Name {
        self.type_tag
    }

    /// Look up a field by name.
    #[inline]
    pub fn field(&self, name: Name) -> Option<&Value> {
        self.fields.get(&name)
    }

    /// Whether the instance carries `name`.
    pub fn has_field(&self, name: Name) -> bool {
        self.fields.contains_key(&name)
    }

    /// Iterate fields in unspecified order.
    pub fn fields(&self) -> impl Iterator<Item = (Name, &Value)> + '_ {
        self.fields.iter().map(|(&name, value)| (name, value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the instance has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as `Tag(a=1, b=2)`, fields sorted by name for stable output.
    pub fn display_with<I: StringLookup>(&self, interner: &I) -> String {
        let mut fields: Vec<(&str, &Value)> = self
            .fields
            .iter()
            .map(|(&name, value)| (interner.lookup(name), value))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        let inner: Vec<String> = fields
            .into_iter()
            .map(|(name, value)| format!("{name}={}", value.display_with(interner)))
            .collect();
        format!("{}({})", interner.lookup(self.type_tag), inner.join(", "))
    }
}
