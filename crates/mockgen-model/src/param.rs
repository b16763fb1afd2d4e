use serde::Deserialize;

use crate::type_expr::TypeExpr;
use mockgen_common::safe_name;

/// One declared parameter (or generic parameter) of a member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamModel {
    pub name: String,
    /// External argument label when it differs from `name`; `_` for unlabeled.
    #[serde(default)]
    pub label: Option<String>,
    /// Declared type text. For generic parameters this is the constraint.
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// The argument is evaluated lazily (an autoclosure) and must be called to read it.
    #[serde(default)]
    pub by_name: bool,
}

impl ParamModel {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            type_name: type_name.to_string(),
            by_name: false,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn type_expr(&self) -> TypeExpr {
        TypeExpr::parse(&self.type_name)
    }

    /// Passed by name, either flagged by the front end or declared `@autoclosure`.
    pub fn is_by_name(&self) -> bool {
        self.by_name || self.type_expr().has_specifier("@autoclosure")
    }

    pub fn safe_name(&self) -> String {
        safe_name(&self.name)
    }

    /// Plain stored property that receives this parameter in an initializer.
    pub fn underlying_name(&self) -> String {
        self.name.clone()
    }

    /// Declaration text inside a parameter list, e.g. `for key: String`.
    pub fn declaration(&self) -> String {
        match self.label.as_deref() {
            Some(label) if label != self.name => {
                format!("{label} {}: {}", self.safe_name(), self.type_name)
            }
            _ => format!("{}: {}", self.safe_name(), self.type_name),
        }
    }

    /// Declaration text inside a generic parameter clause, e.g. `T: Codable`.
    pub fn generic_declaration(&self) -> String {
        if self.type_name.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.type_name)
        }
    }

    /// Argument text at a call site that forwards this parameter, e.g. `for: key`.
    pub fn forwarding_argument(&self) -> String {
        match self.label.as_deref() {
            Some("_") => self.safe_name(),
            Some(label) => format!("{label}: {}", self.safe_name()),
            None => format!("{}: {}", self.name, self.safe_name()),
        }
    }
}
