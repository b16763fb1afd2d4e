//! Methods and subscripts.

use mockgen_common::capitalize_first_letter;
use mockgen_common::diagnostic_codes;
use mockgen_common::layout::{
    ARG_VALUES_SUFFIX, CALL_COUNT_SUFFIX, HANDLER_SUFFIX, INVOKED_LIST, STATIC_INVOKED_LIST,
};
use mockgen_model::{HandlerDescriptor, MemberFlags, MethodModel, ParamModel, TupleElement, TypeExpr};
use tracing::trace;

use super::{
    MemberRenderer, RenderedMember, argument_expression, case_reference, storable_type,
    stored_declaration, value_type,
};
use crate::call_log::Payload;
use crate::default_value;
use crate::writer::SourceWriter;

/// Companion state for one closure-typed parameter.
struct ClosureStub {
    declaration: String,
    invocation: Vec<String>,
}

/// Names and types shared by the stored properties and the body.
struct MethodPlan<'m> {
    method: &'m MethodModel,
    generics: Vec<&'m str>,
    prefix: String,
    log: &'static str,
    stub_name: String,
    call_count: String,
    handler_name: String,
    return_type: Option<TypeExpr>,
    /// The return type mentions a method generic, so the stub is stored as `Any`.
    generic_return: bool,
    stub_default: Option<String>,
    handler: HandlerDescriptor,
}

impl MethodPlan<'_> {
    fn handler_arguments(&self) -> String {
        self.method
            .common
            .params
            .iter()
            .map(argument_expression)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Handler effects: `(throws, async)` as far as the method allows them.
    fn handler_effects(&self) -> (bool, bool) {
        let method_throws = throws_plainly(&self.method.suffix);
        let parsed = TypeExpr::parse(&self.handler.type_name);
        let (throws, is_async) = parsed
            .closure_shape()
            .map(|shape| (shape.function.is_throwing(), shape.function.is_async()))
            .unwrap_or((method_throws, self.method.is_async()));
        (throws && method_throws, is_async && self.method.is_async())
    }

    fn has_cast(&self) -> bool {
        self.handler.cast.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

/// `throws` or `throws(E)` among the suffix words; `rethrows` does not count.
fn throws_plainly(suffix: &str) -> bool {
    suffix.split_whitespace().any(|word| word.starts_with("throws"))
}

impl MemberRenderer<'_> {
    pub(super) fn render_method(
        &mut self,
        method: &MethodModel,
        identifier: &str,
        is_subscript: bool,
    ) -> RenderedMember {
        let plan = self.plan_method(method, identifier);
        let common = &method.common;
        trace!(member = %common.name, identifier, "rendering method");

        let closure_stubs: Vec<ClosureStub> = common
            .params
            .iter()
            .filter_map(|param| self.closure_stub(&plan, identifier, param))
            .collect();

        let args_history = method
            .args_history
            .map_or(self.options.enable_func_args_history, |h| {
                h.enable(self.options.enable_func_args_history)
            });
        let captured: Vec<&ParamModel> = common
            .params
            .iter()
            .filter(|p| p.is_by_name() || p.type_expr().closure_shape().is_none())
            .collect();

        let mut writer = SourceWriter::with_indent(1);

        // Stored bookkeeping.
        if let Some(return_type) = &plan.return_type {
            let (stub_type, default) = if plan.generic_return {
                (TypeExpr::named("Any"), None)
            } else {
                (return_type.clone(), plan.stub_default.as_deref())
            };
            writer.line(&stored_declaration(
                &plan.prefix,
                &plan.stub_name,
                &stub_type,
                default,
            ));
        }
        for stub in &closure_stubs {
            writer.line(&stub.declaration);
        }
        let setter_scope = if self.options.allow_set_call_count {
            ""
        } else {
            "private(set) "
        };
        writer.line(&format!(
            "{}{}var {} = 0",
            plan.prefix, setter_scope, plan.call_count
        ));
        writer.line(&format!(
            "{}var {}: ({})?",
            plan.prefix, plan.handler_name, plan.handler.type_name
        ));
        if args_history && !captured.is_empty() {
            let element = match captured.as_slice() {
                [single] => storable_type(&value_type(single), &plan.generics),
                many => format!(
                    "({})",
                    many.iter()
                        .map(|p| storable_type(&value_type(p), &plan.generics))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            };
            writer.line(&format!(
                "{}var {identifier}{ARG_VALUES_SUFFIX} = [{element}]()",
                plan.prefix
            ));
        }

        // Declaration and body.
        let head = self.method_head(method, is_subscript);
        writer.block(&head, |w| {
            if is_subscript {
                w.block("get", |w| {
                    self.write_body(w, &plan, identifier, &closure_stubs, args_history, &captured);
                });
                w.line("set { }");
            } else {
                self.write_body(w, &plan, identifier, &closure_stubs, args_history, &captured);
            }
        });

        let payload: Payload = common
            .params
            .iter()
            .map(|p| (p.name.clone(), storable_type(&value_type(p), &plan.generics)))
            .collect();
        self.call_log.add_invocation(common.offset, identifier, &payload);

        RenderedMember {
            offset: common.offset,
            text: writer.finish(),
        }
    }

    fn plan_method<'m>(&mut self, method: &'m MethodModel, identifier: &str) -> MethodPlan<'m> {
        let common = &method.common;
        let generics: Vec<&str> = common.generic_params.iter().map(|g| g.name.as_str()).collect();
        let prefix = format!(
            "{}{}",
            self.acl(&common.access_level),
            if common.modifiers.contains(MemberFlags::STATIC) {
                "static "
            } else {
                ""
            }
        );
        let log = if common.modifiers.contains(MemberFlags::STATIC) {
            STATIC_INVOKED_LIST
        } else {
            INVOKED_LIST
        };

        let stub_name = self.method_stub(method, identifier);

        let return_type = method.return_type();
        let generic_return = return_type
            .as_ref()
            .is_some_and(|ty| generics.iter().any(|g| ty.mentions(g)));
        let stub_default = match &return_type {
            Some(ty) if !generic_return => {
                let default = default_value::resolve_type(ty);
                if default.is_none() {
                    let ty_text = ty.to_string();
                    self.push_diagnostic(
                        &common.name,
                        diagnostic_codes::UNRESOLVED_DEFAULT_VALUE,
                        &[&stub_name, &ty_text],
                    );
                }
                default
            }
            _ => None,
        };

        let handler = method.handler.clone().unwrap_or_else(|| {
            synthesize_handler(method, &generics, return_type.as_ref(), generic_return)
        });

        MethodPlan {
            method,
            generics,
            prefix,
            log,
            stub_name,
            call_count: format!("{identifier}{CALL_COUNT_SUFFIX}"),
            handler_name: format!("{identifier}{HANDLER_SUFFIX}"),
            return_type,
            generic_return,
            stub_default,
            handler,
        }
    }

    fn method_head(&self, method: &MethodModel, is_subscript: bool) -> String {
        let common = &method.common;
        let modifiers = self.modifiers(&common.name, common.modifiers);
        let generics = if common.generic_params.is_empty() {
            String::new()
        } else {
            format!(
                "<{}>",
                common
                    .generic_params
                    .iter()
                    .map(ParamModel::generic_declaration)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        let params = common
            .params
            .iter()
            .map(ParamModel::declaration)
            .collect::<Vec<_>>()
            .join(", ");

        let mut head = format!("{}{modifiers}", self.acl(&common.access_level));
        if is_subscript {
            head.push_str(&format!("subscript{generics}({params})"));
        } else {
            head.push_str(&format!(
                "func {}{generics}({params})",
                mockgen_common::safe_name(&common.name)
            ));
            if !method.suffix.trim().is_empty() {
                head.push(' ');
                head.push_str(method.suffix.trim());
            }
        }
        if !common.type_name.trim().is_empty() && method.return_type().is_some() {
            head.push_str(&format!(" -> {}", common.type_name.trim()));
        }
        if let Some(clause) = method.where_clause.as_deref().filter(|c| !c.trim().is_empty()) {
            head.push(' ');
            head.push_str(clause.trim());
        }
        head
    }

    fn write_body(
        &self,
        w: &mut SourceWriter,
        plan: &MethodPlan<'_>,
        identifier: &str,
        closure_stubs: &[ClosureStub],
        args_history: bool,
        captured: &[&ParamModel],
    ) {
        let method = plan.method;
        let arguments = plan.handler_arguments();
        let template_func = self.options.use_template_func
            && !method.has_throws_or_rethrows()
            && !method.is_async()
            && !plan.has_cast()
            && !plan.generic_return;

        if template_func {
            let outcome = match (&plan.return_type, &plan.stub_default) {
                (None, _) => ".void".to_string(),
                (Some(_), Some(default)) => format!(".val({default})"),
                (Some(_), None) => ".error".to_string(),
            };
            let invocation = format!(
                "mockFunc(&{})(\"{}\", {}?({arguments}), {outcome})",
                plan.call_count, method.common.name, plan.handler_name
            );
            match plan.return_type {
                Some(_) => w.line(&format!("{} = {invocation}", plan.stub_name)),
                None => w.line(&invocation),
            }
        } else {
            w.line(&format!("{} += 1", plan.call_count));
            let (throws, is_async) = plan.handler_effects();
            let effects = format!(
                "{}{}",
                if throws { "try " } else { "" },
                if is_async { "await " } else { "" }
            );
            match plan.return_type {
                Some(_) => {
                    let cast = match plan.handler.cast.as_deref() {
                        Some(cast) if plan.has_cast() && !plan.generic_return => {
                            format!(" {}", cast.trim())
                        }
                        _ => String::new(),
                    };
                    w.block(
                        &format!("if let {0} = {0}", plan.handler_name),
                        |w| {
                            w.line(&format!(
                                "{} = {effects}{}({arguments}){cast}",
                                plan.stub_name, plan.handler_name
                            ));
                        },
                    );
                }
                None => w.line(&format!("{effects}{}?({arguments})", plan.handler_name)),
            }
        }

        if args_history && !captured.is_empty() {
            let value = match captured {
                [single] => argument_expression(single),
                many => format!(
                    "({})",
                    many.iter()
                        .map(|p| argument_expression(p))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            };
            w.line(&format!("{identifier}{ARG_VALUES_SUFFIX}.append({value})"));
        }

        let params = &method.common.params;
        if params.is_empty() {
            w.line(&format!("{}.append(.{})", plan.log, case_reference(identifier)));
        } else {
            let fields = params
                .iter()
                .map(|p| format!("{}: {}", p.name, argument_expression(p)))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(&format!(
                "{}.append(.{}({fields}))",
                plan.log,
                case_reference(identifier)
            ));
        }

        for stub in closure_stubs {
            for line in &stub.invocation {
                w.line(line);
            }
        }

        if let Some(return_type) = &plan.return_type {
            if plan.generic_return {
                let cast = plan
                    .handler
                    .cast
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| c.trim().to_string())
                    .unwrap_or_else(|| format!("as! {return_type}"));
                w.line(&format!("return {} {cast}", plan.stub_name));
            } else {
                w.line(&format!("return {}", plan.stub_name));
            }
        }
    }

    /// Stored stub and body invocation for a closure-typed parameter.
    fn closure_stub(
        &mut self,
        plan: &MethodPlan<'_>,
        identifier: &str,
        param: &ParamModel,
    ) -> Option<ClosureStub> {
        if param.is_by_name() {
            return None;
        }
        let declared = param.type_expr();
        let stub_root = format!(
            "{}{}",
            capitalize_first_letter(identifier),
            capitalize_first_letter(&param.name)
        );

        let Some(shape) = declared.closure_shape() else {
            if declared.is_opaque() && param.type_name.contains("->") {
                let text = param.type_name.replace("@escaping", "");
                let text = text.trim();
                self.push_diagnostic(
                    &plan.method.common.name,
                    diagnostic_codes::MALFORMED_CLOSURE_TYPE,
                    &[text, &param.name],
                );
                return Some(ClosureStub {
                    declaration: format!("{}var stubbed{stub_root}Result: ({text})?", plan.prefix),
                    invocation: Vec::new(),
                });
            }
            return None;
        };

        let function = shape.function;
        let closure_type = TypeExpr::Function(function.clone());
        if plan.generics.iter().any(|g| closure_type.mentions(g)) {
            return None;
        }
        let callable = !function.is_async() || plan.method.is_async();

        let mut call_prefix = String::new();
        if !function.result.is_void() || function.is_throwing() {
            call_prefix.push_str("_ = ");
        }
        if function.is_throwing() {
            call_prefix.push_str("try? ");
        }
        if function.is_async() {
            call_prefix.push_str("await ");
        }
        let optional_call = if shape.optional { "?" } else { "" };
        let callee = format!("{call_prefix}{}{optional_call}", param.safe_name());

        if function.params.is_empty() {
            let flag = format!("shouldInvoke{stub_root}");
            let invocation = if callable {
                vec![
                    format!("if {flag} {{"),
                    format!("    {callee}()"),
                    "}".to_string(),
                ]
            } else {
                Vec::new()
            };
            return Some(ClosureStub {
                declaration: format!("{}var {flag} = false", plan.prefix),
                invocation,
            });
        }

        let stub = format!("stubbed{stub_root}Result");
        let stored = match function.params.as_slice() {
            [single] => single.ty.without_passing_specifiers(),
            many => TypeExpr::Tuple(
                many.iter()
                    .map(|element| TupleElement {
                        label: None,
                        ty: element.ty.without_passing_specifiers(),
                    })
                    .collect(),
            ),
        };
        let stored = TypeExpr::Optional(Box::new(stored));
        let arguments = if function.params.len() == 1 {
            stub.clone()
        } else {
            (0..function.params.len())
                .map(|i| format!("{stub}.{i}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let invocation = if callable {
            vec![
                format!("if let {stub} = {stub} {{"),
                format!("    {callee}({arguments})"),
                "}".to_string(),
            ]
        } else {
            Vec::new()
        };
        Some(ClosureStub {
            declaration: format!("{}var {stub}: {stored}", plan.prefix),
            invocation,
        })
    }
}

/// Handler type mirroring the method signature.
///
/// Parameters carry their value types; anything mentioning a method generic
/// is widened to `Any`, in which case the caller casts the result back.
fn synthesize_handler(
    method: &MethodModel,
    generics: &[&str],
    return_type: Option<&TypeExpr>,
    generic_return: bool,
) -> HandlerDescriptor {
    let params = method
        .common
        .params
        .iter()
        .map(|p| storable_type(&value_type(p), generics))
        .collect::<Vec<_>>()
        .join(", ");
    let mut effects = String::new();
    if method.is_async() {
        effects.push_str(" async");
    }
    if throws_plainly(&method.suffix) {
        effects.push_str(" throws");
    }
    let result = match return_type {
        None => "Void".to_string(),
        Some(ty) => storable_type(ty, generics),
    };
    HandlerDescriptor {
        type_name: format!("({params}){effects} -> {result}"),
        cast: generic_return
            .then(|| return_type.map(|ty| format!("as! {ty}")))
            .flatten(),
    }
}
