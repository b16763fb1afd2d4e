//! Identifier Uniqueness Resolver.
//!
//! Every renderable member gets a case identifier that names its call-log
//! case and roots its handler, counter and history properties. Assignment
//! is a pure function of the ordered member list: it runs once, before any
//! text is produced, so emitted bodies never need to be patched afterwards.

use mockgen_common::capitalize_first_letter;
use mockgen_model::{Member, ParamModel};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::members::{method_stub_name, variable_storage_name};

/// Ordered history of every name already claimed in one generated type.
#[derive(Debug, Default, Clone)]
pub struct IdentifierResolver {
    history: Vec<String>,
}

impl IdentifierResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Claim a name verbatim, e.g. one already baked into custom member text.
    pub fn reserve(&mut self, name: &str) {
        if !self.history.iter().any(|h| h == name) {
            self.history.push(name.to_string());
        }
    }

    /// Produce an identifier distinct from every prior one and record it.
    ///
    /// `suffixes` lists the derived names the member will also occupy
    /// (`""` for the identifier itself, `"Getter"`/`"Setter"` for variables);
    /// a candidate is rejected when any derived name is taken.
    pub fn assign(&mut self, base: &str, params: &[ParamModel], suffixes: &[&str]) -> String {
        let mut candidate = base.to_string();
        let mut index = 0usize;
        while self.collides(&candidate, suffixes) {
            let previous = candidate.clone();
            match params.get(index) {
                Some(param) => candidate.push_str(&capitalize_first_letter(&param.name)),
                None => candidate.push_str(&index.to_string()),
            }
            index += 1;
            trace!(from = %previous, to = %candidate, "case identifier collision");
        }
        for suffix in suffixes {
            self.reserve(&format!("{candidate}{suffix}"));
        }
        self.reserve(&candidate);
        candidate
    }

    fn collides(&self, candidate: &str, suffixes: &[&str]) -> bool {
        self.history.iter().any(|h| h == candidate)
            || suffixes
                .iter()
                .any(|suffix| self.history.iter().any(|h| *h == format!("{candidate}{suffix}")))
    }
}

/// Names a member occupies besides its bare identifier.
pub fn derived_suffixes(member: &Member) -> &'static [&'static str] {
    match member {
        Member::Variable(_) => &["", "Getter", "Setter"],
        _ => &[""],
    }
}

/// Identifier a processed member already uses in its custom text.
///
/// Custom text records invocations as `append(.name(...))` or
/// `append(.name)`; the name between the dot and the first `(` or `)` is it.
pub fn identifier_in_description(description: &str) -> Option<&str> {
    let start = description.find("append(.")? + "append(.".len();
    let rest = &description[start..];
    let end = rest.find(['(', ')'])?;
    let name = rest[..end].trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Case identifiers for one interface, indexed like the member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseIdentifiers {
    ids: Vec<Option<String>>,
}

impl CaseIdentifiers {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).and_then(|id| id.as_deref())
    }

    /// Assigned identifiers in member-list order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ids
            .iter()
            .enumerate()
            .filter_map(|(i, id)| id.as_deref().map(|id| (i, id)))
    }
}

/// Assign identifiers to `members[i]` for every index in `order`.
///
/// `order` is the render order (source position ascending); `renderable`
/// decides which members get a case. Processed members contribute the
/// identifier found in their custom text to the history.
pub fn assign_case_identifiers(
    members: &[Member],
    order: &[usize],
    renderable: impl Fn(&Member) -> bool,
) -> CaseIdentifiers {
    let mut resolver = IdentifierResolver::new();
    let mut ids = vec![None; members.len()];

    for &index in order {
        let member = &members[index];
        if member.is_processed() {
            if let Some(existing) = member
                .common()
                .model_description
                .as_deref()
                .and_then(identifier_in_description)
            {
                resolver.reserve(existing);
            }
        }
    }

    for &index in order {
        let member = &members[index];
        if !renderable(member) {
            continue;
        }
        let id = resolver.assign(
            member.base_identifier(),
            member.params(),
            derived_suffixes(member),
        );
        ids[index] = Some(id);
    }

    CaseIdentifiers { ids }
}

/// Backing storage names of one generated type, free of collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubNames {
    by_identifier: FxHashMap<String, String>,
    by_variable: FxHashMap<String, String>,
}

impl StubNames {
    /// Stub of the member rendered under `identifier`.
    pub fn for_identifier(&self, identifier: &str) -> Option<&str> {
        self.by_identifier.get(identifier).map(String::as_str)
    }

    /// Storage of the variable called `name`.
    pub fn for_variable(&self, name: &str) -> Option<&str> {
        self.by_variable.get(name).map(String::as_str)
    }
}

/// Give every stub-carrying member its backing storage name.
///
/// Members claim names in source order. A member keeps the conventional
/// `stubbed<Name>...Result` name while it is free; later claimants fall back
/// to `stubbed<Identifier>Result`, then to a numbered variant of it.
pub fn assign_stub_names(members: &[Member], order: &[usize], ids: &CaseIdentifiers) -> StubNames {
    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut stubs = StubNames::default();

    for &index in order {
        let Some(identifier) = ids.get(index) else {
            continue;
        };
        let conventional = match &members[index] {
            Member::Variable(v) => variable_storage_name(&v.common.name),
            Member::Method(m) | Member::Subscript(m) if m.return_type().is_some() => {
                method_stub_name(m)
            }
            _ => continue,
        };

        let mut name = conventional.clone();
        if taken.contains(&name) {
            let root = format!("stubbed{}", capitalize_first_letter(identifier));
            name = format!("{root}Result");
            let mut n = 0usize;
            while taken.contains(&name) {
                name = format!("{root}{n}Result");
                n += 1;
            }
            trace!(from = %conventional, to = %name, "stub name collision");
        }
        taken.insert(name.clone());

        if let Member::Variable(v) = &members[index] {
            stubs
                .by_variable
                .insert(v.common.name.clone(), name.clone());
        }
        stubs.by_identifier.insert(identifier.to_string(), name);
    }

    stubs
}
