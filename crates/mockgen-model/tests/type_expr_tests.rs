use crate::type_expr::{TypeExpr, TupleElement};

#[test]
fn test_parse_named_and_generic() {
    let ty = TypeExpr::parse("Result<Data, Error>");
    assert_eq!(ty.to_string(), "Result<Data, Error>");
    assert_eq!(ty.simple_name(), Some("Result"));
    assert!(!ty.is_opaque());
}

#[test]
fn test_parse_optional_suffix_and_optional_generic() {
    assert!(TypeExpr::parse("String?").is_optional());
    assert!(TypeExpr::parse("Optional<Int>").is_optional());
    assert!(!TypeExpr::parse("String!").is_optional());
    assert!(!TypeExpr::parse("[String?]").is_optional());
}

#[test]
fn test_parse_collections_normalizes_spacing() {
    assert_eq!(TypeExpr::parse("[String]").to_string(), "[String]");
    assert_eq!(
        TypeExpr::parse("[String:Int]").to_string(),
        "[String: Int]"
    );
    assert!(matches!(
        TypeExpr::parse("[String: [Int]]"),
        TypeExpr::Dictionary(_, _)
    ));
}

#[test]
fn test_parse_escaping_closure() {
    let ty = TypeExpr::parse("@escaping (Data?, Error?) -> Void");
    assert!(ty.has_specifier("@escaping"));
    let shape = ty.closure_shape().expect("closure");
    assert!(!shape.optional);
    assert_eq!(shape.function.params.len(), 2);
    assert!(shape.function.result.is_void());
    assert_eq!(
        ty.without_passing_specifiers().to_string(),
        "(Data?, Error?) -> Void"
    );
}

#[test]
fn test_parse_optional_closure_keeps_parens() {
    let ty = TypeExpr::parse("((Int) -> Void)?");
    let shape = ty.closure_shape().expect("closure");
    assert!(shape.optional);
    assert_eq!(ty.to_string(), "((Int) -> Void)?");
}

#[test]
fn test_parse_function_effects() {
    let ty = TypeExpr::parse("(String) async throws -> [Int]");
    let shape = ty.closure_shape().expect("closure");
    assert!(shape.function.is_async());
    assert!(shape.function.is_throwing());
    assert_eq!(ty.to_string(), "(String) async throws -> [Int]");
}

#[test]
fn test_parse_labeled_tuple() {
    let ty = TypeExpr::parse("(data: Data, _ code: Int)");
    match ty {
        TypeExpr::Tuple(elems) => {
            assert_eq!(
                elems[0],
                TupleElement {
                    label: Some("data".to_string()),
                    ty: TypeExpr::named("Data"),
                }
            );
            assert_eq!(elems[1].label.as_deref(), Some("_ code"));
        }
        other => panic!("expected tuple, got {other:?}"),
    }
}

#[test]
fn test_parenthesized_single_type_is_unwrapped() {
    assert_eq!(TypeExpr::parse("(Int)"), TypeExpr::named("Int"));
}

#[test]
fn test_void_forms() {
    assert!(TypeExpr::parse("Void").is_void());
    assert!(TypeExpr::parse("()").is_void());
    assert!(!TypeExpr::parse("Void?").is_void());
}

#[test]
fn test_inout_and_autoclosure_are_passing_specifiers() {
    assert_eq!(
        TypeExpr::parse("inout [String]")
            .without_passing_specifiers()
            .to_string(),
        "[String]"
    );
    let lazy = TypeExpr::parse("@autoclosure () -> Bool");
    assert!(lazy.has_specifier("@autoclosure"));
    assert_eq!(lazy.without_passing_specifiers().to_string(), "() -> Bool");
}

#[test]
fn test_other_specifiers_survive_stripping() {
    let ty = TypeExpr::parse("@escaping @Sendable () -> Void");
    assert_eq!(
        ty.without_passing_specifiers().to_string(),
        "@Sendable () -> Void"
    );
}

#[test]
fn test_composition_and_paths() {
    assert_eq!(
        TypeExpr::parse("Codable & Hashable").to_string(),
        "Codable & Hashable"
    );
    assert_eq!(TypeExpr::parse("Foo.Type").to_string(), "Foo.Type");
    assert_eq!(TypeExpr::parse("Int...").to_string(), "Int...");
}

#[test]
fn test_malformed_text_becomes_opaque() {
    let ty = TypeExpr::parse("(Int -> ");
    assert_eq!(ty, TypeExpr::Opaque("(Int ->".to_string()));
    assert!(ty.closure_shape().is_none());
}

#[test]
fn test_mentions_generic_parameter() {
    let ty = TypeExpr::parse("[String: T]?");
    assert!(ty.mentions("T"));
    assert!(!ty.mentions("U"));
}
