use crate::default_value::{resolve, resolve_type};
use mockgen_model::TypeExpr;

#[test]
fn test_optional_types_default_to_nil() {
    assert_eq!(resolve("String?").as_deref(), Some("nil"));
    assert_eq!(resolve("Optional<Int>").as_deref(), Some("nil"));
    assert_eq!(resolve("((Int) -> Void)?").as_deref(), Some("nil"));
    assert_eq!(resolve("CustomThing?").as_deref(), Some("nil"));
}

#[test]
fn test_scalars() {
    assert_eq!(resolve("Bool").as_deref(), Some("false"));
    assert_eq!(resolve("String").as_deref(), Some("\"\""));
    assert_eq!(resolve("Character").as_deref(), Some("\"\""));
    for numeric in ["Int", "Int8", "Int64", "Double", "Float", "CGFloat"] {
        assert_eq!(resolve(numeric).as_deref(), Some("0"), "{numeric}");
    }
}

#[test]
fn test_collections_use_empty_constructor() {
    assert_eq!(resolve("[String]").as_deref(), Some("[String]()"));
    assert_eq!(resolve("[String:Int]").as_deref(), Some("[String: Int]()"));
    assert_eq!(resolve("Set<Int>").as_deref(), Some("Set<Int>()"));
    assert_eq!(resolve("Array<Int>").as_deref(), Some("Array<Int>()"));
}

#[test]
fn test_unknown_types_have_no_default() {
    assert_eq!(resolve("Widget"), None);
    assert_eq!(resolve("Result<Int, Error>"), None);
    assert_eq!(resolve("(Int) -> Void"), None);
    assert_eq!(resolve("Foundation.URL"), None);
}

#[test]
fn test_resolve_type_matches_text_resolution() {
    let ty = TypeExpr::parse("[Int]");
    assert_eq!(resolve_type(&ty), resolve("[Int]"));
}
