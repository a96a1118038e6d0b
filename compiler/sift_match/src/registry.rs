//! Host-supplied class declarations.
//!
//! Class patterns resolve positional sub-patterns through a per-type
//! field-order list (the `__match_args__` analogue). Rather than reading that
//! off each value, the host declares its types here once:
//!
//! ```text
//! let mut registry = TypeRegistry::new(&interner);
//! registry.register(
//!     TypeDecl::new(interner.intern("Point"))
//!         .fields([x, y])
//!         .match_args([x, y]),
//! )?;
//! ```
//!
//! Registration is append-only and a parent must be registered before its
//! subtypes, so the subtype graph is a forest and `is_subtype` terminates.

use rustc_hash::{FxHashMap, FxHashSet};
use sift_ir::{Name, SharedInterner};
use sift_value::Value;

use crate::RegistryError;

/// Declaration of one class, consumed by [`TypeRegistry::register`].
#[derive(Clone, Debug)]
pub struct TypeDecl {
    tag: Name,
    fields: Vec<Name>,
    match_args: Option<Vec<Name>>,
    parent: Option<Name>,
}

impl TypeDecl {
    /// Start a declaration for `tag` with no fields.
    pub fn new(tag: Name) -> Self {
        TypeDecl {
            tag,
            fields: Vec::new(),
            match_args: None,
            parent: None,
        }
    }

    /// Fields declared by this type, in addition to inherited ones.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Name>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Field-order list for positional sub-patterns.
    ///
    /// When omitted, a subtype inherits its parent's list and a root type
    /// accepts no positional sub-patterns.
    #[must_use]
    pub fn match_args(mut self, order: impl IntoIterator<Item = Name>) -> Self {
        self.match_args = Some(order.into_iter().collect());
        self
    }

    /// Declare `parent` as the supertype.
    #[must_use]
    pub fn extends(mut self, parent: Name) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A registered class with inheritance already applied.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    tag: Name,
    fields: Vec<Name>,
    match_args: Vec<Name>,
    parent: Option<Name>,
}

impl TypeInfo {
    /// The type's tag.
    pub fn tag(&self) -> Name {
        self.tag
    }

    /// All fields, inherited ones first.
    pub fn fields(&self) -> &[Name] {
        &self.fields
    }

    /// Effective field-order list.
    pub fn match_args(&self) -> &[Name] {
        &self.match_args
    }

    /// Direct supertype, if any.
    pub fn parent(&self) -> Option<Name> {
        self.parent
    }

    /// Whether `field` is declared on this type or a supertype.
    pub fn declares(&self, field: Name) -> bool {
        self.fields.contains(&field)
    }
}

/// Table of registered classes, keyed by type tag.
#[derive(Clone)]
pub struct TypeRegistry {
    types: FxHashMap<Name, TypeInfo>,
    interner: SharedInterner,
}

impl TypeRegistry {
    /// Create an empty registry resolving names through `interner`.
    pub fn new(interner: &SharedInterner) -> Self {
        TypeRegistry {
            types: FxHashMap::default(),
            interner: interner.clone(),
        }
    }

    /// The interner used for this registry's names.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Register a class declaration.
    pub fn register(&mut self, decl: TypeDecl) -> Result<(), RegistryError> {
        let type_name = || self.interner.lookup(decl.tag).to_string();

        if self.types.contains_key(&decl.tag) {
            return Err(RegistryError::DuplicateType {
                type_name: type_name(),
            });
        }

        let parent = match decl.parent {
            Some(parent_tag) => Some(self.types.get(&parent_tag).ok_or_else(|| {
                RegistryError::UnknownParent {
                    type_name: type_name(),
                    parent: self.interner.lookup(parent_tag).to_string(),
                }
            })?),
            None => None,
        };

        let mut fields: Vec<Name> = parent.map(|p| p.fields.clone()).unwrap_or_default();
        let inherited = fields.len();
        for &field in &decl.fields {
            if fields[inherited..].contains(&field) {
                return Err(RegistryError::DuplicateField {
                    type_name: type_name(),
                    field: self.interner.lookup(field).to_string(),
                });
            }
            // Redeclaring an inherited field is allowed and changes nothing.
            if !fields[..inherited].contains(&field) {
                fields.push(field);
            }
        }

        let match_args = match decl.match_args {
            Some(order) => {
                for (i, &field) in order.iter().enumerate() {
                    if !fields.contains(&field) {
                        return Err(RegistryError::UnknownMatchArg {
                            type_name: type_name(),
                            field: self.interner.lookup(field).to_string(),
                        });
                    }
                    if order[..i].contains(&field) {
                        return Err(RegistryError::DuplicateMatchArg {
                            type_name: type_name(),
                            field: self.interner.lookup(field).to_string(),
                        });
                    }
                }
                order
            }
            None => parent.map(|p| p.match_args.clone()).unwrap_or_default(),
        };

        tracing::debug!(
            type_name = self.interner.lookup(decl.tag),
            fields = fields.len(),
            match_args = match_args.len(),
            "registered type"
        );

        self.types.insert(
            decl.tag,
            TypeInfo {
                tag: decl.tag,
                fields,
                match_args,
                parent: decl.parent,
            },
        );
        Ok(())
    }

    /// Look up a registered type.
    pub fn get(&self, tag: Name) -> Option<&TypeInfo> {
        self.types.get(&tag)
    }

    /// Whether `tag` is registered.
    pub fn contains(&self, tag: Name) -> bool {
        self.types.contains_key(&tag)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `sub` is `sup` or a (transitive) subtype of it.
    pub fn is_subtype(&self, sub: Name, sup: Name) -> bool {
        let mut current = Some(sub);
        while let Some(tag) = current {
            if tag == sup {
                return true;
            }
            current = self.types.get(&tag).and_then(TypeInfo::parent);
        }
        false
    }

    /// Every registered tag an instance of which satisfies a class pattern
    /// for `tag`: the tag itself plus all of its subtypes.
    pub fn accepting_tags(&self, tag: Name) -> FxHashSet<Name> {
        self.types
            .keys()
            .copied()
            .filter(|&candidate| self.is_subtype(candidate, tag))
            .collect()
    }

    /// Build an `Object` value, checking its fields against the declaration.
    ///
    /// Every declared (including inherited) field must be supplied and no
    /// undeclared field may be.
    pub fn instantiate(
        &self,
        tag: Name,
        fields: impl IntoIterator<Item = (Name, Value)>,
    ) -> Result<Value, RegistryError> {
        let type_name = || self.interner.lookup(tag).to_string();
        let info = self.types.get(&tag).ok_or_else(|| RegistryError::UnknownType {
            type_name: type_name(),
        })?;

        let mut values: FxHashMap<Name, Value> = FxHashMap::default();
        for (field, value) in fields {
            if !info.declares(field) {
                return Err(RegistryError::UnknownField {
                    type_name: type_name(),
                    field: self.interner.lookup(field).to_string(),
                });
            }
            values.insert(field, value);
        }

        if let Some(&missing) = info.fields.iter().find(|f| !values.contains_key(f)) {
            return Err(RegistryError::MissingField {
                type_name: type_name(),
                field: self.interner.lookup(missing).to_string(),
            });
        }

        Ok(Value::object(tag, values))
    }
}
