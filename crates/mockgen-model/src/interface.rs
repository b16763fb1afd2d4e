use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::member::Member;
use mockgen_common::layout::MOCK_SUFFIX;

/// Kind of declaration being mocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    #[default]
    Protocol,
    Class,
}

/// Extra keyword placed in front of a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomModifier {
    Dynamic,
    Final,
}

impl CustomModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomModifier::Dynamic => "dynamic",
            CustomModifier::Final => "final",
        }
    }
}

/// One interface declaration and its members, as reported by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceModel {
    pub name: String,
    #[serde(default)]
    pub mock_name: Option<String>,
    #[serde(default)]
    pub access_level: String,
    /// Module the interface was declared in; qualifies the conformance.
    #[serde(default)]
    pub module: Option<String>,
    /// Attribute line placed inside the mock, e.g. `@available(iOS 13, *)`.
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub decl_kind: DeclKind,
    /// Generic parameter clause of the mock type, without angle brackets.
    #[serde(default)]
    pub generic_constraints: Option<String>,
    #[serde(default)]
    pub custom_modifiers: FxHashMap<String, CustomModifier>,
    /// Names of stored properties required at construction. Inferred when absent.
    #[serde(default)]
    pub init_param_candidates: Option<Vec<String>>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl InterfaceModel {
    pub fn new(name: &str, members: Vec<Member>) -> Self {
        Self {
            name: name.to_string(),
            mock_name: None,
            access_level: String::new(),
            module: None,
            attribute: None,
            decl_kind: DeclKind::Protocol,
            generic_constraints: None,
            custom_modifiers: FxHashMap::default(),
            init_param_candidates: None,
            members,
        }
    }

    /// Name of the generated mock type.
    pub fn mock_name(&self) -> String {
        match &self.mock_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}{MOCK_SUFFIX}", self.name),
        }
    }
}

/// Top-level input document: every interface found by the front end in one file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MockInput {
    #[serde(default)]
    pub interfaces: Vec<InterfaceModel>,
}

impl MockInput {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
