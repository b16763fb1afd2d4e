//! Template Assembler.
//!
//! Composes the final mock type for one interface: header, call-log
//! bookkeeping, initializers, member blocks, then the call-log type.
//!
//! The pipeline runs in phases over the immutable member list:
//! 1. validation
//! 2. alias linking and the type alias whitelist
//! 3. identifier assignment in source order
//! 4. member rendering, which also collects call-log cases
//! 5. initializer synthesis
//! 6. assembly

use mockgen_common::Diagnostic;
use mockgen_common::diagnostic_codes;
use mockgen_common::layout::{
    ELEMENTS_SUFFIX, HAS_BLANK_INIT, INVOKED_LIST, MOCK_IDENTIFIER, STATIC_INVOKED_LIST,
};
use mockgen_model::{DeclKind, InterfaceModel, Member, MemberFlags, MethodModel, VariableModel};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::alias_linker;
use crate::default_value;
use crate::error::RenderError;
use crate::identifiers::{StubNames, assign_case_identifiers, assign_stub_names};
use crate::initializers::{InitCandidate, InitializerSynthesizer};
use crate::members::{MemberRenderer, RenderedMember, variable_storage_name};
use crate::options::RenderOptions;
use crate::typealias::TypeAliasWhitelist;
use crate::writer::SourceWriter;

/// Everything produced for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMock {
    pub interface_name: String,
    pub mock_name: String,
    pub text: String,
    /// Aliases with conflicting definitions; none of them is emitted.
    pub whitelist: TypeAliasWhitelist,
    pub diagnostics: Vec<Diagnostic>,
}

/// Render the mock type for one interface.
#[tracing::instrument(level = "debug", skip_all, fields(interface = %interface.name))]
pub fn render_interface(
    interface: &InterfaceModel,
    options: &RenderOptions,
) -> Result<RenderedMock, RenderError> {
    validate(interface)?;
    let members = &interface.members;
    let order = source_order(members);

    let whitelist = TypeAliasWhitelist::from_members(members);
    let links = alias_linker::link(members);
    let ids = assign_case_identifiers(members, &order, is_case_renderable);
    let stubs = assign_stub_names(members, &order, &ids);

    let mut renderer =
        MemberRenderer::new(interface, options, &links).with_stub_names(stubs.clone());
    let mut rendered: Vec<RenderedMember> = Vec::new();
    let mut emitted_aliases = FxHashSet::default();
    for &index in &order {
        let member = &members[index];
        if is_bookkeeping(member) {
            continue;
        }
        if member.is_processed() {
            rendered.push(renderer.render_processed(member));
            continue;
        }
        match member {
            Member::Initializer(_) => {}
            Member::TypeAlias(alias) => {
                if whitelist.contains(&alias.common.name) {
                    continue;
                }
                if emitted_aliases.insert(alias.common.name.as_str()) {
                    rendered.push(renderer.render_typealias(member));
                }
            }
            _ => {
                let Some(identifier) = ids.get(index) else {
                    continue;
                };
                rendered.push(renderer.render(member, identifier)?);
            }
        }
    }
    rendered.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.text.cmp(&b.text)));

    let (call_log, member_diagnostics) = renderer.into_parts();

    let mut diagnostics = Vec::new();
    for (name, types) in whitelist.iter() {
        let listed = types.iter().cloned().collect::<Vec<_>>().join(", ");
        warn!(alias = name, types = %listed, "type alias declared with conflicting types");
        diagnostics.push(Diagnostic::from_code(
            &interface.name,
            name,
            diagnostic_codes::AMBIGUOUS_TYPE_ALIAS,
            &[name, &listed],
        ));
    }
    for (publisher, target) in links.unmatched() {
        diagnostics.push(Diagnostic::from_code(
            &interface.name,
            publisher,
            diagnostic_codes::UNMATCHED_REACTIVE_ALIAS,
            &[publisher, target],
        ));
    }
    diagnostics.extend(member_diagnostics);

    let initializer_blocks = synthesize_initializers(interface, &stubs);

    let mock_name = interface.mock_name();
    let has_static = members
        .iter()
        .any(|m| m.is_static() && is_case_renderable(m));
    let text = assemble(
        interface,
        &mock_name,
        has_static,
        &initializer_blocks,
        &rendered,
        &call_log.emit(&interface.access_level, &mock_name),
    );

    debug!(
        members = rendered.len(),
        cases = call_log.len(),
        diagnostics = diagnostics.len(),
        "rendered mock"
    );

    Ok(RenderedMock {
        interface_name: interface.name.clone(),
        mock_name,
        text,
        whitelist,
        diagnostics,
    })
}

/// Reject member models that violate rendering preconditions.
pub fn validate(interface: &InterfaceModel) -> Result<(), RenderError> {
    for member in &interface.members {
        let name = member.name();
        if name.trim().is_empty() {
            return Err(RenderError::MalformedMember {
                name: interface.name.clone(),
                reason: "member has no name",
            });
        }
        match member {
            Member::Variable(v) if v.common.type_name.trim().is_empty() => {
                return Err(RenderError::MalformedMember {
                    name: name.to_string(),
                    reason: "variable has no type",
                });
            }
            Member::Subscript(s) if !s.common.processed && s.common.params.is_empty() => {
                return Err(RenderError::MalformedMember {
                    name: name.to_string(),
                    reason: "subscript has no parameters",
                });
            }
            Member::Subscript(s) if !s.common.processed && s.return_type().is_none() => {
                return Err(RenderError::MalformedMember {
                    name: name.to_string(),
                    reason: "subscript has no return type",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Member indices by source position; ties keep list order.
fn source_order(members: &[Member]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..members.len()).collect();
    order.sort_by_key(|&i| (members[i].offset(), i));
    order
}

/// Names the mock declares for itself; members shadowing them are skipped.
fn is_bookkeeping(member: &Member) -> bool {
    let name = member.name();
    name.contains(MOCK_IDENTIFIER)
        || name.contains(INVOKED_LIST)
        || name.contains(STATIC_INVOKED_LIST)
        || matches!(member, Member::Variable(_) if name == HAS_BLANK_INIT)
}

fn is_case_renderable(member: &Member) -> bool {
    !member.is_processed()
        && !is_bookkeeping(member)
        && matches!(
            member,
            Member::Variable(_) | Member::Method(_) | Member::Subscript(_)
        )
}

fn renderable_variables(interface: &InterfaceModel) -> impl Iterator<Item = &VariableModel> {
    interface.members.iter().filter_map(|m| match m {
        Member::Variable(v) if !v.common.processed && !is_bookkeeping(m) => Some(v),
        _ => None,
    })
}

/// Initializer candidates: the explicit list, or every stored property
/// that cannot be defaulted.
fn initializer_candidates(interface: &InterfaceModel, stubs: &StubNames) -> Vec<InitCandidate> {
    let mut variables: Vec<&VariableModel> = renderable_variables(interface).collect();
    variables.sort_by_key(|v| v.common.offset);

    match &interface.init_param_candidates {
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let found = variables.iter().find(|v| &v.common.name == name);
                if found.is_none() {
                    debug!(candidate = %name, "initializer candidate names no stored property");
                }
                found
            })
            .map(|v| candidate_for(v, stubs))
            .collect(),
        None => variables
            .into_iter()
            .filter(|v| {
                !v.common.modifiers.contains(MemberFlags::STATIC)
                    && !v.is_publisher()
                    && default_value::resolve(&v.common.type_name).is_none()
            })
            .map(|v| candidate_for(v, stubs))
            .collect(),
    }
}

fn storage_of(variable: &VariableModel, stubs: &StubNames) -> String {
    stubs
        .for_variable(&variable.common.name)
        .map_or_else(|| variable_storage_name(&variable.common.name), str::to_string)
}

fn candidate_for(variable: &VariableModel, stubs: &StubNames) -> InitCandidate {
    InitCandidate::new(
        &variable.common.name,
        &variable.common.type_name,
        &storage_of(variable, stubs),
    )
}

fn synthesize_initializers(interface: &InterfaceModel, stubs: &StubNames) -> Vec<String> {
    let (mut processed, mut declared): (Vec<&MethodModel>, Vec<&MethodModel>) = interface
        .members
        .iter()
        .filter_map(|m| match m {
            Member::Initializer(init) => Some(init),
            _ => None,
        })
        .partition(|init| init.common.processed);
    declared.sort_by_key(|init| init.common.offset);
    processed.sort_by_key(|init| init.common.offset);

    let candidates = match interface.decl_kind {
        DeclKind::Protocol => initializer_candidates(interface, stubs),
        DeclKind::Class => Vec::new(),
    };
    let storage: FxHashMap<String, String> = renderable_variables(interface)
        .map(|v| {
            (
                mockgen_common::safe_name(&v.common.name),
                storage_of(v, stubs),
            )
        })
        .collect();

    let synthesizer = InitializerSynthesizer::new(
        &interface.access_level,
        interface.decl_kind,
        declared,
        candidates,
        storage,
    )
    .with_processed(processed);
    debug!(plan = ?synthesizer.plan(), "initializer plan");
    synthesizer.render()
}

fn assemble(
    interface: &InterfaceModel,
    mock_name: &str,
    has_static: bool,
    initializer_blocks: &[String],
    rendered: &[RenderedMember],
    call_log: &str,
) -> String {
    let acl = if interface.access_level.is_empty() {
        String::new()
    } else {
        format!("{} ", interface.access_level)
    };
    let conformance = match interface.module.as_deref().filter(|m| !m.is_empty()) {
        Some(module) => format!("{module}.{}", interface.name),
        None => interface.name.clone(),
    };
    let generics = match interface.generic_constraints.as_deref().map(str::trim) {
        Some(g) if g.starts_with('<') => g.to_string(),
        Some(g) if !g.is_empty() => format!("<{g}>"),
        _ => String::new(),
    };

    let mut writer = SourceWriter::new();
    let head = format!("{acl}final class {mock_name}{generics}: {conformance}, MockAssertable");
    writer.block(&head, |w| {
        if let Some(attribute) = interface.attribute.as_deref().filter(|a| !a.is_empty()) {
            w.line(attribute);
        }
        w.line(&format!(
            "{acl}typealias {MOCK_IDENTIFIER} = {mock_name}{ELEMENTS_SUFFIX}"
        ));
        w.line(&format!(
            "{acl}var {INVOKED_LIST}: [{mock_name}{ELEMENTS_SUFFIX}] = []"
        ));
        if has_static {
            w.line(&format!(
                "{acl}static var {STATIC_INVOKED_LIST}: [{mock_name}{ELEMENTS_SUFFIX}] = []"
            ));
        }
        for block in initializer_blocks.iter().map(String::as_str).chain(
            rendered
                .iter()
                .map(|r| r.text.as_str())
                .filter(|text| !text.is_empty()),
        ) {
            w.line("");
            w.raw(block);
        }
    });
    writer.line("");
    writer.raw(call_log);
    writer.finish()
}
