//! Member Body Renderer.
//!
//! Emits the stored bookkeeping and the body of every non-initializer
//! member, and registers each member's call-log case as it goes.
//!
//! Submodules:
//! - `method`: methods and subscripts (handler, counter, history, closure stubs)
//! - `variable`: properties, including subject- and wrapper-backed publishers

mod method;
mod variable;

use mockgen_common::{Diagnostic, safe_name};
use mockgen_model::{
    CustomModifier, InterfaceModel, Member, MemberFlags, MethodModel, ParamModel, TypeExpr,
    VariableModel,
};
use rustc_hash::FxHashMap;

use crate::alias_linker::AliasLinks;
use crate::call_log::CallLogSynthesizer;
use crate::error::RenderError;
use crate::identifiers::StubNames;
use crate::options::RenderOptions;
use crate::writer::SourceWriter;

/// Text of one member, positioned for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMember {
    pub offset: i64,
    pub text: String,
}

pub struct MemberRenderer<'a> {
    interface_name: &'a str,
    access_level: &'a str,
    custom_modifiers: &'a FxHashMap<String, CustomModifier>,
    options: &'a RenderOptions,
    links: &'a AliasLinks,
    variables: FxHashMap<&'a str, &'a VariableModel>,
    stubs: StubNames,
    call_log: CallLogSynthesizer,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> MemberRenderer<'a> {
    pub fn new(
        interface: &'a InterfaceModel,
        options: &'a RenderOptions,
        links: &'a AliasLinks,
    ) -> Self {
        let variables = interface
            .members
            .iter()
            .filter_map(|m| match m {
                Member::Variable(v) => Some((v.common.name.as_str(), v)),
                _ => None,
            })
            .collect();
        Self {
            interface_name: &interface.name,
            access_level: &interface.access_level,
            custom_modifiers: &interface.custom_modifiers,
            options,
            links,
            variables,
            stubs: StubNames::default(),
            call_log: CallLogSynthesizer::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Render one member under an already-assigned case identifier.
    pub fn render(&mut self, member: &Member, identifier: &str) -> Result<RenderedMember, RenderError> {
        if member.is_processed() {
            return Ok(self.render_processed(member));
        }
        match member {
            Member::Variable(variable) => Ok(self.render_variable(variable, identifier)),
            Member::Method(method) => Ok(self.render_method(method, identifier, false)),
            Member::Subscript(method) => Ok(self.render_method(method, identifier, true)),
            Member::TypeAlias(_) => Ok(self.render_typealias(member)),
            Member::Initializer(method) => Err(RenderError::InitializerInMemberRenderer {
                name: method.common.name.clone(),
            }),
        }
    }

    /// Custom text supplied by the front end, emitted verbatim.
    pub fn render_processed(&mut self, member: &Member) -> RenderedMember {
        let text = member
            .common()
            .model_description
            .as_deref()
            .unwrap_or_default()
            .trim_end()
            .to_string();
        RenderedMember {
            offset: member.offset(),
            text,
        }
    }

    pub fn render_typealias(&mut self, member: &Member) -> RenderedMember {
        let common = member.common();
        let mut writer = SourceWriter::with_indent(1);
        writer.line(&format!(
            "{}typealias {} = {}",
            self.acl(&common.access_level),
            common.name,
            common.type_name.trim()
        ));
        RenderedMember {
            offset: common.offset,
            text: writer.finish(),
        }
    }

    /// Use collision-free stub names instead of the conventional ones.
    pub fn with_stub_names(mut self, stubs: StubNames) -> Self {
        self.stubs = stubs;
        self
    }

    pub fn into_parts(self) -> (CallLogSynthesizer, Vec<Diagnostic>) {
        (self.call_log, self.diagnostics)
    }

    /// Access-level prefix: the member's own level, else the interface's.
    fn acl(&self, member_level: &str) -> String {
        let level = if member_level.is_empty() {
            self.access_level
        } else {
            member_level
        };
        if level.is_empty() {
            String::new()
        } else {
            format!("{level} ")
        }
    }

    /// `static`, `override` and custom modifier keywords of a declaration.
    fn modifiers(&self, name: &str, flags: MemberFlags) -> String {
        let mut text = String::new();
        if flags.contains(MemberFlags::STATIC) {
            text.push_str("static ");
        }
        if flags.contains(MemberFlags::OVERRIDE) {
            text.push_str("override ");
        }
        if let Some(custom) = self.custom_modifiers.get(name) {
            text.push_str(custom.as_str());
            text.push(' ');
        }
        text
    }

    /// Backing storage of the variable called `name`.
    fn variable_storage(&self, name: &str) -> String {
        self.stubs
            .for_variable(name)
            .map_or_else(|| variable_storage_name(name), str::to_string)
    }

    fn method_stub(&self, method: &MethodModel, identifier: &str) -> String {
        self.stubs
            .for_identifier(identifier)
            .map_or_else(|| method_stub_name(method), str::to_string)
    }

    fn push_diagnostic(&mut self, member: &str, code: u32, args: &[&str]) {
        self.diagnostics.push(Diagnostic::from_code(
            self.interface_name,
            member,
            code,
            args,
        ));
    }
}

/// Type of the value a parameter carries inside the body.
///
/// Passing specifiers are dropped, by-name parameters contribute the type
/// they evaluate to, and variadic parameters arrive as arrays.
pub(crate) fn value_type(param: &ParamModel) -> TypeExpr {
    let declared = param.type_expr();
    let stripped = declared.without_passing_specifiers();
    if param.is_by_name() {
        if let Some(shape) = declared.closure_shape() {
            return (*shape.function.result).clone();
        }
    }
    match stripped {
        TypeExpr::Variadic(inner) => TypeExpr::Array(inner),
        other => other,
    }
}

/// Type text usable in stored properties and enum payloads.
///
/// Method-level generic parameters are not in scope there, so any type that
/// mentions one is stored as `Any`.
pub(crate) fn storable_type(ty: &TypeExpr, generics: &[&str]) -> String {
    if generics.iter().any(|g| ty.mentions(g)) {
        "Any".to_string()
    } else {
        ty.to_string()
    }
}

/// Expression that reads a parameter's value inside the body.
pub(crate) fn argument_expression(param: &ParamModel) -> String {
    if param.is_by_name() {
        format!("{}()", param.safe_name())
    } else {
        param.safe_name()
    }
}

/// `var name: Type = default`, or an implicitly unwrapped declaration when no default exists.
pub(crate) fn stored_declaration(
    prefix: &str,
    name: &str,
    ty: &TypeExpr,
    default: Option<&str>,
) -> String {
    match default {
        Some(value) => format!("{prefix}var {name}: {ty} = {value}"),
        None if ty.is_optional() || matches!(ty, TypeExpr::ImplicitlyUnwrapped(_)) => {
            format!("{prefix}var {name}: {ty}")
        }
        None => {
            let unwrapped = TypeExpr::ImplicitlyUnwrapped(Box::new(ty.clone()));
            format!("{prefix}var {name}: {unwrapped}")
        }
    }
}

/// Backing storage a variable's accessors read and write.
pub(crate) fn variable_storage_name(name: &str) -> String {
    format!(
        "stubbed{}Result",
        mockgen_common::capitalize_first_letter(name)
    )
}

/// `stubbed<Name><Param1><Param2>...Result` for a method's return value.
pub(crate) fn method_stub_name(method: &MethodModel) -> String {
    let param_names: String = method
        .common
        .params
        .iter()
        .map(|p| mockgen_common::capitalize_first_letter(&p.name))
        .collect();
    format!(
        "stubbed{}{param_names}Result",
        mockgen_common::capitalize_first_letter(&method.common.name)
    )
}

/// Name used in `.case` position, escaped when it is a keyword.
pub(crate) fn case_reference(identifier: &str) -> String {
    safe_name(identifier)
}
