//! Properties and publishers.

use mockgen_common::diagnostic_codes;
use mockgen_common::layout::{INVOKED_LIST, STATIC_INVOKED_LIST, SUBJECT_SUFFIX};
use mockgen_model::{MemberFlags, SubjectKind, TypeExpr, VariableModel};
use tracing::trace;

use super::{MemberRenderer, RenderedMember, stored_declaration};
use crate::alias_linker::ReactiveLink;
use crate::default_value;
use crate::writer::SourceWriter;

/// `AnyPublisher<Output, Failure>` split into its arguments.
fn publisher_arguments(ty: &TypeExpr) -> Option<(&TypeExpr, &TypeExpr)> {
    match ty {
        TypeExpr::Named(segments) if segments.len() == 1 => {
            let segment = &segments[0];
            match (segment.name.as_str(), segment.args.as_slice()) {
                ("AnyPublisher", [output, failure]) => Some((output, failure)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_never(ty: &TypeExpr) -> bool {
    ty.simple_name() == Some("Never")
}

impl MemberRenderer<'_> {
    pub(super) fn render_variable(
        &mut self,
        variable: &VariableModel,
        identifier: &str,
    ) -> RenderedMember {
        let common = &variable.common;
        trace!(member = %common.name, identifier, "rendering variable");
        let ty = TypeExpr::parse(&common.type_name);
        let is_static = common.modifiers.contains(MemberFlags::STATIC);
        let log = if is_static {
            STATIC_INVOKED_LIST
        } else {
            INVOKED_LIST
        };
        let acl = self.acl(&common.access_level);
        let storage_prefix = format!("{acl}{}", if is_static { "static " } else { "" });
        let head = format!(
            "{acl}{}var {}: {}",
            self.modifiers(&common.name, common.modifiers),
            mockgen_common::safe_name(&common.name),
            common.type_name.trim()
        );

        let mut writer = SourceWriter::with_indent(1);
        let getter_case = format!("{identifier}Getter");
        let setter_case = format!("{identifier}Setter");

        let publisher = variable
            .is_publisher()
            .then(|| self.publisher_source(variable, &ty, &storage_prefix))
            .flatten();

        match publisher {
            Some(source) => {
                if let Some(declaration) = &source.declaration {
                    writer.line(declaration);
                }
                writer.block(&head, |w| {
                    w.block("get", |w| {
                        w.line(&format!("{log}.append(.{getter_case})"));
                        w.line(&format!("return {}", source.expression));
                    });
                    if variable.read_write {
                        w.block("set", |w| {
                            w.line(&format!("{log}.append(.{setter_case}(value: newValue))"));
                        });
                    }
                });
            }
            None => {
                let storage = self.variable_storage(&common.name);
                let default = self.storage_default(variable, &ty);
                let wrapper = self
                    .links
                    .wrapper_of(&common.name)
                    .map(|kind| format!("@{kind} "))
                    .unwrap_or_default();
                writer.line(&format!(
                    "{wrapper}{}",
                    stored_declaration(&storage_prefix, &storage, &ty, default.as_deref())
                ));
                writer.block(&head, |w| {
                    w.block("get", |w| {
                        w.line(&format!("{log}.append(.{getter_case})"));
                        w.line(&format!("return {storage}"));
                    });
                    if variable.read_write {
                        w.block("set", |w| {
                            w.line(&format!("{log}.append(.{setter_case}(value: newValue))"));
                            w.line(&format!("{storage} = newValue"));
                        });
                    }
                });
            }
        }

        let setter_payload = variable.read_write.then(|| ty.to_string());
        self.call_log
            .add_variable(common.offset, identifier, setter_payload.as_deref());

        RenderedMember {
            offset: common.offset,
            text: writer.finish(),
        }
    }

    /// Initial value of a variable's backing storage.
    ///
    /// Wrapper-backed storage of an optional type starts out `nil` unless
    /// Combine defaults are disabled. Unresolvable types are reported.
    fn storage_default(&mut self, variable: &VariableModel, ty: &TypeExpr) -> Option<String> {
        let wrapped = self.links.wrapper_of(&variable.common.name).is_some();
        if wrapped && self.options.disable_combine_default_values {
            return None;
        }
        let default = default_value::resolve_type(ty);
        if default.is_none() && !variable.is_publisher() {
            let storage = self.variable_storage(&variable.common.name);
            let ty_text = ty.to_string();
            self.push_diagnostic(
                &variable.common.name,
                diagnostic_codes::UNRESOLVED_DEFAULT_VALUE,
                &[&storage, &ty_text],
            );
        }
        default
    }

    /// Backing for a publisher: the aliased wrapper's projection or a subject.
    fn publisher_source(
        &self,
        variable: &VariableModel,
        ty: &TypeExpr,
        storage_prefix: &str,
    ) -> Option<PublisherSource> {
        let (output, failure) = publisher_arguments(ty)?;
        let name = &variable.common.name;

        if let Some(ReactiveLink::Aliased { target, .. }) = self.links.link_for(name) {
            let target_model = self.variables.get(target.as_str())?;
            let target_ty = TypeExpr::parse(&target_model.common.type_name);
            let target_default = if self.options.disable_combine_default_values {
                None
            } else {
                default_value::resolve_type(&target_ty)
            };
            let mut expression = format!("${}", self.variable_storage(target));
            if (target_ty.is_optional() || target_default.is_none()) && !output.is_optional() {
                expression.push_str(".compactMap { $0 }");
            }
            if !is_never(failure) {
                expression.push_str(&format!(".setFailureType(to: {failure}.self)"));
            }
            expression.push_str(".eraseToAnyPublisher()");
            return Some(PublisherSource {
                declaration: None,
                expression,
            });
        }

        let subject = format!("{name}{SUBJECT_SUFFIX}");
        let kind = match self.links.link_for(name) {
            Some(ReactiveLink::Standalone) => SubjectKind::Passthrough,
            _ => variable.subject.unwrap_or_default(),
        };
        let construction = match kind {
            SubjectKind::CurrentValue => default_value::resolve_type(output)
                .map(|initial| format!("CurrentValueSubject<{output}, {failure}>({initial})")),
            SubjectKind::Passthrough => None,
        }
        .unwrap_or_else(|| format!("PassthroughSubject<{output}, {failure}>()"));
        Some(PublisherSource {
            declaration: Some(format!("{storage_prefix}var {subject} = {construction}")),
            expression: format!("{subject}.eraseToAnyPublisher()"),
        })
    }
}

struct PublisherSource {
    declaration: Option<String>,
    expression: String,
}
