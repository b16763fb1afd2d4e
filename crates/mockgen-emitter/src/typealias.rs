//! Type alias bookkeeping.
//!
//! An alias redeclared with a different underlying type cannot be emitted
//! as a single `typealias`. Instead of picking one definition, every
//! conflicting name is kept with all of its underlying types so the
//! assembler (and the CLI report) can surface the ambiguity.

use indexmap::{IndexMap, IndexSet};
use mockgen_model::{Member, TypeExpr};

/// Every alias declaration seen so far: name to underlying types in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasRegistry {
    declarations: IndexMap<String, IndexSet<String>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one declaration. Types are compared in their normalized spelling.
    pub fn record(&mut self, name: &str, underlying: &str) {
        let normalized = TypeExpr::parse(underlying).to_string();
        self.declarations
            .entry(name.to_string())
            .or_default()
            .insert(normalized);
    }

    /// Record every type alias member of one interface.
    pub fn record_members(&mut self, members: &[Member]) {
        for member in members {
            if let Member::TypeAlias(alias) = member {
                self.record(&alias.common.name, &alias.common.type_name);
            }
        }
    }

    pub fn merge(&mut self, other: &AliasRegistry) {
        for (name, types) in &other.declarations {
            let entry = self.declarations.entry(name.clone()).or_default();
            for ty in types {
                entry.insert(ty.clone());
            }
        }
    }

    /// Names declared with more than one underlying type.
    pub fn conflicts(&self) -> TypeAliasWhitelist {
        let entries = self
            .declarations
            .iter()
            .filter(|(_, types)| types.len() > 1)
            .map(|(name, types)| (name.clone(), types.clone()))
            .collect();
        TypeAliasWhitelist { entries }
    }
}

/// Alias names with conflicting definitions and every definition seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAliasWhitelist {
    entries: IndexMap<String, IndexSet<String>>,
}

impl TypeAliasWhitelist {
    pub fn from_members(members: &[Member]) -> Self {
        let mut registry = AliasRegistry::new();
        registry.record_members(members);
        registry.conflicts()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&IndexSet<String>> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.entries.iter().map(|(name, types)| (name.as_str(), types))
    }
}
