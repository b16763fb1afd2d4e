//! Reactive Alias Linker.
//!
//! A publisher member may declare that it mirrors a sibling property through
//! a property wrapper (`@Published var value` exposed as `valuePublisher`).
//! Linking resolves those references in one pass over the immutable member
//! list and produces an index the renderers read from; models are never
//! mutated.

use mockgen_model::{Member, VariableModel};
use rustc_hash::FxHashMap;
use tracing::debug;

/// How a publisher member is backed once linking is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactiveLink {
    /// Mirrors the projection of the named sibling's wrapper.
    Aliased {
        wrapper_kind: String,
        target: String,
    },
    /// The declared alias target does not exist; use a standalone subject.
    Standalone,
}

/// Resolved links, both directions, keyed by member name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasLinks {
    links: FxHashMap<String, ReactiveLink>,
    wrapped_by: FxHashMap<String, String>,
    unmatched: Vec<(String, String)>,
}

impl AliasLinks {
    /// Resolution for a publisher member that declared an alias.
    pub fn link_for(&self, name: &str) -> Option<&ReactiveLink> {
        self.links.get(name)
    }

    /// Wrapper kind applied to a member because some publisher aliases it.
    pub fn wrapper_of(&self, name: &str) -> Option<&str> {
        self.wrapped_by.get(name).map(String::as_str)
    }

    /// `(publisher, missing target)` pairs in member order.
    pub fn unmatched(&self) -> &[(String, String)] {
        &self.unmatched
    }
}

/// Link every alias-declaring variable to its sibling by name.
pub fn link(members: &[Member]) -> AliasLinks {
    let variables: Vec<&VariableModel> = members
        .iter()
        .filter_map(|m| match m {
            Member::Variable(v) => Some(v),
            _ => None,
        })
        .collect();

    let by_name: FxHashMap<&str, &VariableModel> = variables
        .iter()
        .map(|v| (v.common.name.as_str(), *v))
        .collect();

    let mut result = AliasLinks::default();
    for variable in &variables {
        let Some(descriptor) = &variable.reactive else {
            continue;
        };
        let name = variable.common.name.clone();
        match by_name.get(descriptor.aliased_member_name.as_str()) {
            Some(target) if target.common.name != name => {
                result.links.insert(
                    name,
                    ReactiveLink::Aliased {
                        wrapper_kind: descriptor.wrapper_kind.clone(),
                        target: target.common.name.clone(),
                    },
                );
                result
                    .wrapped_by
                    .insert(target.common.name.clone(), descriptor.wrapper_kind.clone());
            }
            _ => {
                debug!(
                    member = %name,
                    target = %descriptor.aliased_member_name,
                    "reactive alias target not found, falling back to a standalone subject"
                );
                result
                    .unmatched
                    .push((name.clone(), descriptor.aliased_member_name.clone()));
                result.links.insert(name, ReactiveLink::Standalone);
            }
        }
    }
    result
}
