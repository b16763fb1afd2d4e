use crate::names::{capitalize_first_letter, is_swift_keyword, safe_name};

#[test]
fn test_capitalize_first_letter() {
    assert_eq!(capitalize_first_letter("fetch"), "Fetch");
    assert_eq!(capitalize_first_letter("fetchItems"), "FetchItems");
    assert_eq!(capitalize_first_letter("URL"), "URL");
    assert_eq!(capitalize_first_letter(""), "");
}

#[test]
fn test_capitalize_keeps_non_ascii_tail() {
    assert_eq!(capitalize_first_letter("éclair"), "Éclair");
}

#[test]
fn test_safe_name_escapes_keywords() {
    assert_eq!(safe_name("in"), "`in`");
    assert_eq!(safe_name("default"), "`default`");
    assert_eq!(safe_name("value"), "value");
    assert!(is_swift_keyword("subscript"));
    assert!(!is_swift_keyword("Subscript"));
}
