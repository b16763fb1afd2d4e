//! Initializer Synthesizer.
//!
//! Decides which constructors the mock carries and renders them together
//! with any extra stored properties the declared initializers assign.
//!
//! | declared inits | candidates | result                          |
//! |----------------|------------|---------------------------------|
//! | none           | none       | blank only                      |
//! | none           | some       | blank and parameterized         |
//! | some           | none       | declared only                   |
//! | some           | some       | declared, plus parameterized    |
//! |                |            | unless one has the same params  |
//!
//! Class mocks inherit their superclass initializers and only get a blank
//! initializer when nothing else exists.

use mockgen_common::safe_name;
use mockgen_model::{DeclKind, MemberFlags, MethodModel, ParamModel, TypeExpr};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::default_value;
use crate::members::stored_declaration;
use crate::writer::SourceWriter;

/// A stored property the parameterized initializer assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitCandidate {
    pub name: String,
    pub type_name: String,
    /// Backing storage the parameter is assigned to.
    pub underlying_name: String,
}

impl InitCandidate {
    pub fn new(name: &str, type_name: &str, underlying_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            underlying_name: underlying_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerPlan {
    /// Only declared initializers, if any.
    None,
    BlankOnly,
    ParameterizedOnly,
    Both,
}

impl InitializerPlan {
    pub fn needs_blank(self) -> bool {
        matches!(self, InitializerPlan::BlankOnly | InitializerPlan::Both)
    }

    pub fn needs_parameterized(self) -> bool {
        matches!(self, InitializerPlan::ParameterizedOnly | InitializerPlan::Both)
    }
}

/// Sorted `(name, normalized type)` pairs; two inits with equal keys collide.
fn param_set_key<'p>(params: impl Iterator<Item = (&'p str, &'p str)>) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = params
        .map(|(name, ty)| (name.to_string(), TypeExpr::parse(ty).to_string()))
        .collect();
    key.sort();
    key
}

fn declared_key(init: &MethodModel) -> Vec<(String, String)> {
    param_set_key(
        init.common
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.type_name.as_str())),
    )
}

/// Apply the decision table.
pub fn plan(decl_kind: DeclKind, declared: &[&MethodModel], candidates: &[InitCandidate]) -> InitializerPlan {
    match decl_kind {
        DeclKind::Class => {
            if declared.is_empty() && candidates.is_empty() {
                InitializerPlan::BlankOnly
            } else {
                InitializerPlan::None
            }
        }
        DeclKind::Protocol => {
            if candidates.is_empty() {
                return if declared.is_empty() {
                    InitializerPlan::BlankOnly
                } else {
                    InitializerPlan::None
                };
            }
            if declared.is_empty() {
                return InitializerPlan::Both;
            }
            let candidate_key = param_set_key(
                candidates
                    .iter()
                    .map(|c| (c.name.as_str(), c.type_name.as_str())),
            );
            if declared.iter().any(|init| declared_key(init) == candidate_key) {
                debug!("a declared initializer already covers the candidates");
                InitializerPlan::None
            } else {
                InitializerPlan::ParameterizedOnly
            }
        }
    }
}

/// Renders every initializer block of one mock.
pub struct InitializerSynthesizer<'a> {
    access_level: &'a str,
    decl_kind: DeclKind,
    declared: Vec<&'a MethodModel>,
    /// Initializers emitted verbatim; they count for planning but are never rendered.
    processed: Vec<&'a MethodModel>,
    candidates: Vec<InitCandidate>,
    /// Safe member name to backing storage, for assignments in declared inits.
    storage: FxHashMap<String, String>,
}

impl<'a> InitializerSynthesizer<'a> {
    pub fn new(
        access_level: &'a str,
        decl_kind: DeclKind,
        declared: Vec<&'a MethodModel>,
        candidates: Vec<InitCandidate>,
        storage: FxHashMap<String, String>,
    ) -> Self {
        let mut seen = FxHashSet::default();
        let declared = declared
            .into_iter()
            .filter(|init| seen.insert(declared_key(init)))
            .collect();
        Self {
            access_level,
            decl_kind,
            declared,
            processed: Vec::new(),
            candidates,
            storage,
        }
    }

    /// Register initializers whose text is supplied verbatim.
    ///
    /// Declared initializers with the same parameter set are dropped.
    pub fn with_processed(mut self, processed: Vec<&'a MethodModel>) -> Self {
        let taken: FxHashSet<_> = processed.iter().map(|init| declared_key(init)).collect();
        self.declared.retain(|init| !taken.contains(&declared_key(init)));
        self.processed = processed;
        self
    }

    pub fn plan(&self) -> InitializerPlan {
        let all: Vec<&MethodModel> = self
            .declared
            .iter()
            .chain(&self.processed)
            .copied()
            .collect();
        plan(self.decl_kind, &all, &self.candidates)
    }

    /// Blocks in emission order: extra stored properties, blank init,
    /// parameterized init, then declared inits sorted by text.
    pub fn render(&self) -> Vec<String> {
        let plan = self.plan();
        let mut blocks = Vec::new();

        let extra = self.extra_stored_properties();
        if !extra.is_empty() {
            blocks.push(extra);
        }
        if plan.needs_blank() {
            let mut writer = SourceWriter::with_indent(1);
            writer.line(&format!("{}init() {{ }}", self.acl()));
            blocks.push(writer.finish());
        }
        if plan.needs_parameterized() {
            blocks.push(self.render_parameterized());
        }

        let mut declared: Vec<String> = self
            .declared
            .iter()
            .map(|init| self.render_declared(init))
            .collect();
        declared.sort();
        blocks.extend(declared);
        blocks
    }

    fn acl(&self) -> String {
        if self.access_level.is_empty() {
            String::new()
        } else {
            format!("{} ", self.access_level)
        }
    }

    fn render_parameterized(&self) -> String {
        let params = self
            .candidates
            .iter()
            .map(|c| {
                let ty = TypeExpr::parse(&c.type_name);
                match default_value::resolve_type(&ty) {
                    Some(default) => format!("{}: {} = {default}", c.name, c.type_name.trim()),
                    None => format!("{}: {}", c.name, c.type_name.trim()),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mut writer = SourceWriter::with_indent(1);
        writer.block(&format!("{}init({params})", self.acl()), |w| {
            for candidate in &self.candidates {
                w.line(&format!(
                    "self.{} = {}",
                    candidate.underlying_name,
                    safe_name(&candidate.name)
                ));
            }
        });
        writer.finish()
    }

    fn render_declared(&self, init: &MethodModel) -> String {
        let common = &init.common;
        let mut head = String::new();
        if common.modifiers.contains(MemberFlags::REQUIRED) {
            head.push_str("required ");
        }
        if common.modifiers.contains(MemberFlags::OVERRIDE) {
            head.push_str("override ");
        }
        head.push_str(&self.acl());
        let params = common
            .params
            .iter()
            .map(ParamModel::declaration)
            .collect::<Vec<_>>()
            .join(", ");
        head.push_str(&format!("init({params})"));
        if !init.suffix.trim().is_empty() {
            head.push(' ');
            head.push_str(init.suffix.trim());
        }

        let mut writer = SourceWriter::with_indent(1);
        if common.modifiers.contains(MemberFlags::OVERRIDE) {
            let arguments = common
                .params
                .iter()
                .map(ParamModel::forwarding_argument)
                .collect::<Vec<_>>()
                .join(", ");
            let call = if init.has_throws_or_rethrows() {
                format!("try super.init({arguments})")
            } else {
                format!("super.init({arguments})")
            };
            writer.block(&head, |w| w.line(&call));
        } else if common.params.is_empty() {
            writer.line(&format!("{head} {{ }}"));
        } else {
            writer.block(&head, |w| {
                for param in &common.params {
                    let target = self
                        .storage
                        .get(&param.safe_name())
                        .cloned()
                        .unwrap_or_else(|| safe_name(&param.underlying_name()));
                    w.line(&format!("self.{target} = {}", param.safe_name()));
                }
            });
        }
        writer.finish()
    }

    /// Stored properties for declared-init parameters that match no member.
    fn extra_stored_properties(&self) -> String {
        let mut seen = FxHashSet::default();
        let mut writer = SourceWriter::with_indent(1);
        for init in &self.declared {
            if init.common.modifiers.contains(MemberFlags::OVERRIDE) {
                continue;
            }
            for param in &init.common.params {
                if self.storage.contains_key(&param.safe_name()) {
                    continue;
                }
                let name = param.underlying_name();
                if !seen.insert(name.clone()) {
                    continue;
                }
                let ty = TypeExpr::parse(&param.type_name).without_passing_specifiers();
                let default = default_value::resolve_type(&ty);
                writer.line(&stored_declaration(
                    &self.acl(),
                    &safe_name(&name),
                    &ty,
                    default.as_deref(),
                ));
            }
        }
        writer.finish()
    }
}
