//! Member models.
//!
//! A `Member` is one declared requirement of an interface as reported by the
//! parsing front end. Models are plain data: the emitter never mutates them,
//! and every derived structure (identifiers, alias links, initializer plans)
//! lives on the emitter side.

use bitflags::bitflags;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;

use crate::param::ParamModel;
use crate::type_expr::TypeExpr;

bitflags! {
    /// Declaration modifiers that change how a member is emitted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u8 {
        const STATIC = 1 << 0;
        const OVERRIDE = 1 << 1;
        const REQUIRED = 1 << 2;
    }
}

impl<'de> Deserialize<'de> for MemberFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let words = Vec::<String>::deserialize(deserializer)?;
        let mut flags = MemberFlags::empty();
        for word in words {
            flags |= match word.as_str() {
                "static" | "class" => MemberFlags::STATIC,
                "override" => MemberFlags::OVERRIDE,
                "required" => MemberFlags::REQUIRED,
                other => {
                    return Err(D::Error::custom(format!(
                        "unknown member modifier '{other}'"
                    )));
                }
            };
        }
        Ok(flags)
    }
}

/// Fields shared by every member kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberCommon {
    pub name: String,
    /// Variable type, method/subscript return type, or alias target. Empty when unknown.
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub params: Vec<ParamModel>,
    #[serde(default)]
    pub generic_params: Vec<ParamModel>,
    #[serde(default)]
    pub access_level: String,
    #[serde(default)]
    pub modifiers: MemberFlags,
    /// Source offset of the declaration; orders the emitted output.
    #[serde(default)]
    pub offset: i64,
    /// The front end already rendered this member; `model_description` is used verbatim.
    #[serde(default)]
    pub processed: bool,
    #[serde(default)]
    pub model_description: Option<String>,
}

impl MemberCommon {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Self::default()
        }
    }
}

/// Declares that a publisher member mirrors another member through a property wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveWrapperDescriptor {
    /// Wrapper attribute name without `@`, e.g. `Published`.
    pub wrapper_kind: String,
    pub aliased_member_name: String,
}

/// Backing subject of a standalone publisher member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SubjectKind {
    #[default]
    Passthrough,
    CurrentValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableModel {
    #[serde(flatten)]
    pub common: MemberCommon,
    #[serde(default)]
    pub read_write: bool,
    #[serde(default)]
    pub reactive: Option<ReactiveWrapperDescriptor>,
    #[serde(default)]
    pub subject: Option<SubjectKind>,
}

impl VariableModel {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            common: MemberCommon::new(name, type_name),
            read_write: false,
            reactive: None,
            subject: None,
        }
    }

    pub fn read_write(mut self) -> Self {
        self.read_write = true;
        self
    }

    pub fn at(mut self, offset: i64) -> Self {
        self.common.offset = offset;
        self
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.common.modifiers |= flags;
        self
    }

    pub fn aliasing(mut self, wrapper_kind: &str, aliased_member_name: &str) -> Self {
        self.reactive = Some(ReactiveWrapperDescriptor {
            wrapper_kind: wrapper_kind.to_string(),
            aliased_member_name: aliased_member_name.to_string(),
        });
        self
    }

    pub fn with_subject(mut self, subject: SubjectKind) -> Self {
        self.subject = Some(subject);
        self
    }

    /// A publisher member backed by a subject or an aliased wrapper.
    pub fn is_publisher(&self) -> bool {
        self.reactive.is_some() || self.subject.is_some()
    }
}

/// Handler closure a test can set to intercept invocations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerDescriptor {
    /// Closure type text, without the trailing optional.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Cast applied to the handler result, e.g. `as! T`.
    #[serde(default)]
    pub cast: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentsHistoryDescriptor {
    #[serde(default)]
    pub enabled: bool,
}

impl ArgumentsHistoryDescriptor {
    /// Capture arguments when the member asks for it or the caller forces it.
    pub fn enable(&self, force: bool) -> bool {
        self.enabled || force
    }
}

/// Methods, subscripts and initializers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodModel {
    #[serde(flatten)]
    pub common: MemberCommon,
    /// Effect keywords after the parameter list: `async`, `throws`, `rethrows`.
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub where_clause: Option<String>,
    #[serde(default)]
    pub handler: Option<HandlerDescriptor>,
    #[serde(default)]
    pub args_history: Option<ArgumentsHistoryDescriptor>,
}

impl MethodModel {
    pub fn new(name: &str) -> Self {
        Self {
            common: MemberCommon::new(name, ""),
            suffix: String::new(),
            where_clause: None,
            handler: None,
            args_history: None,
        }
    }

    pub fn returning(mut self, type_name: &str) -> Self {
        self.common.type_name = type_name.to_string();
        self
    }

    pub fn with_params(mut self, params: Vec<ParamModel>) -> Self {
        self.common.params = params;
        self
    }

    pub fn with_generics(mut self, generic_params: Vec<ParamModel>) -> Self {
        self.common.generic_params = generic_params;
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.common.modifiers |= flags;
        self
    }

    pub fn at(mut self, offset: i64) -> Self {
        self.common.offset = offset;
        self
    }

    pub fn with_args_history(mut self) -> Self {
        self.args_history = Some(ArgumentsHistoryDescriptor { enabled: true });
        self
    }

    /// Return type, or `None` when the member returns nothing.
    pub fn return_type(&self) -> Option<TypeExpr> {
        if self.common.type_name.trim().is_empty() {
            return None;
        }
        let ty = TypeExpr::parse(&self.common.type_name);
        if ty.is_void() { None } else { Some(ty) }
    }

    pub fn has_throws_or_rethrows(&self) -> bool {
        self.suffix
            .split_whitespace()
            .any(|word| word.starts_with("throws") || word == "rethrows")
    }

    pub fn is_async(&self) -> bool {
        self.suffix.split_whitespace().any(|word| word == "async")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasModel {
    #[serde(flatten)]
    pub common: MemberCommon,
}

impl TypeAliasModel {
    pub fn new(name: &str, underlying: &str) -> Self {
        Self {
            common: MemberCommon::new(name, underlying),
        }
    }

    pub fn at(mut self, offset: i64) -> Self {
        self.common.offset = offset;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Variable,
    Method,
    Subscript,
    Initializer,
    TypeAlias,
}

/// `required` and `override` markers of a declared initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitKind {
    pub is_required: bool,
    pub is_override: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Member {
    Variable(VariableModel),
    Method(MethodModel),
    Subscript(MethodModel),
    Initializer(MethodModel),
    TypeAlias(TypeAliasModel),
}

impl Member {
    pub fn common(&self) -> &MemberCommon {
        match self {
            Member::Variable(v) => &v.common,
            Member::Method(m) | Member::Subscript(m) | Member::Initializer(m) => &m.common,
            Member::TypeAlias(t) => &t.common,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Variable(_) => MemberKind::Variable,
            Member::Method(_) => MemberKind::Method,
            Member::Subscript(_) => MemberKind::Subscript,
            Member::Initializer(_) => MemberKind::Initializer,
            Member::TypeAlias(_) => MemberKind::TypeAlias,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn offset(&self) -> i64 {
        self.common().offset
    }

    pub fn params(&self) -> &[ParamModel] {
        &self.common().params
    }

    pub fn is_static(&self) -> bool {
        self.common().modifiers.contains(MemberFlags::STATIC)
    }

    pub fn is_processed(&self) -> bool {
        self.common().processed
    }

    pub fn initializer_kind(&self) -> Option<InitKind> {
        match self {
            Member::Initializer(m) => Some(InitKind {
                is_required: m.common.modifiers.contains(MemberFlags::REQUIRED),
                is_override: m.common.modifiers.contains(MemberFlags::OVERRIDE),
            }),
            _ => None,
        }
    }

    /// Root of the call-log case name before collisions are resolved.
    pub fn base_identifier(&self) -> &str {
        match self {
            Member::Subscript(_) => "subscript",
            Member::Initializer(_) => "init",
            _ => self.name(),
        }
    }
}

impl From<VariableModel> for Member {
    fn from(model: VariableModel) -> Self {
        Member::Variable(model)
    }
}

impl From<MethodModel> for Member {
    fn from(model: MethodModel) -> Self {
        Member::Method(model)
    }
}

impl From<TypeAliasModel> for Member {
    fn from(model: TypeAliasModel) -> Self {
        Member::TypeAlias(model)
    }
}
