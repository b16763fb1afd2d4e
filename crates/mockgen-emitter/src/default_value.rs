//! Default Value Resolver.
//!
//! Maps a type to the literal a stub starts out with. `None` means the type
//! has no canonical empty value and tests must stub it explicitly.

use mockgen_model::TypeExpr;

const COLLECTION_NAMES: &[&str] = &["Array", "Dictionary", "Set", "ContiguousArray", "ArraySlice"];
const TEXT_NAMES: &[&str] = &["String", "Character"];
const NUMERIC_NAMES: &[&str] = &[
    "Int", "Int8", "Int16", "Int32", "Int64", "Double", "Float", "CGFloat",
];

/// Resolve the default literal for a type written as text.
pub fn resolve(type_text: &str) -> Option<String> {
    resolve_type(&TypeExpr::parse(type_text))
}

/// Resolve the default literal for a parsed type.
pub fn resolve_type(ty: &TypeExpr) -> Option<String> {
    if ty.is_optional() {
        return Some("nil".to_string());
    }
    match ty {
        TypeExpr::Array(_) | TypeExpr::Dictionary(_, _) => Some(format!("{ty}()")),
        TypeExpr::Named(segments) if segments.len() == 1 => {
            let name = segments[0].name.as_str();
            if COLLECTION_NAMES.contains(&name) {
                Some(format!("{ty}()"))
            } else if !segments[0].args.is_empty() {
                None
            } else if name == "Bool" {
                Some("false".to_string())
            } else if TEXT_NAMES.contains(&name) {
                Some("\"\"".to_string())
            } else if NUMERIC_NAMES.contains(&name) {
                Some("0".to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}
