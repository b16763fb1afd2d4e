use crate::interface::{DeclKind, MockInput};
use crate::member::{Member, MemberFlags, MemberKind, MethodModel, SubjectKind};
use crate::param::ParamModel;

#[test]
fn test_deserialize_member_kinds() {
    let input = MockInput::from_json(
        r#"{
            "interfaces": [{
                "name": "Counter",
                "members": [
                    {"kind": "variable", "name": "count", "type": "Int", "readWrite": true, "offset": 10},
                    {"kind": "method", "name": "reset", "modifiers": ["static"], "offset": 20},
                    {"kind": "initializer", "name": "init", "modifiers": ["required"],
                     "params": [{"name": "count", "type": "Int"}], "offset": 5},
                    {"kind": "typeAlias", "name": "Value", "type": "Int", "offset": 1}
                ]
            }]
        }"#,
    )
    .expect("valid document");

    let interface = &input.interfaces[0];
    assert_eq!(interface.mock_name(), "CounterMock");
    assert_eq!(interface.decl_kind, DeclKind::Protocol);
    let kinds: Vec<MemberKind> = interface.members.iter().map(Member::kind).collect();
    assert_eq!(
        kinds,
        vec![
            MemberKind::Variable,
            MemberKind::Method,
            MemberKind::Initializer,
            MemberKind::TypeAlias
        ]
    );
    assert!(interface.members[1].is_static());
    let init = interface.members[2].initializer_kind().expect("initializer");
    assert!(init.is_required);
    assert!(!init.is_override);
}

#[test]
fn test_unknown_modifier_is_rejected() {
    let result = MockInput::from_json(
        r#"{"interfaces": [{"name": "A", "members": [
            {"kind": "method", "name": "f", "modifiers": ["mutating"]}
        ]}]}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_reactive_and_subject_fields() {
    let input = MockInput::from_json(
        r#"{"interfaces": [{"name": "Feed", "members": [
            {"kind": "variable", "name": "valuePublisher", "type": "AnyPublisher<Int, Never>",
             "reactive": {"wrapperKind": "Published", "aliasedMemberName": "value"}},
            {"kind": "variable", "name": "events", "type": "AnyPublisher<String, Never>",
             "subject": "currentValue"}
        ]}]}"#,
    )
    .expect("valid document");
    let Member::Variable(wrapper) = &input.interfaces[0].members[0] else {
        panic!("expected variable");
    };
    assert_eq!(
        wrapper.reactive.as_ref().map(|r| r.aliased_member_name.as_str()),
        Some("value")
    );
    let Member::Variable(events) = &input.interfaces[0].members[1] else {
        panic!("expected variable");
    };
    assert_eq!(events.subject, Some(SubjectKind::CurrentValue));
}

#[test]
fn test_method_return_type_and_suffix() {
    let method = MethodModel::new("load").returning("Void").with_suffix("async throws");
    assert!(method.return_type().is_none());
    assert!(method.is_async());
    assert!(method.has_throws_or_rethrows());

    let method = MethodModel::new("load").returning("[String]");
    assert_eq!(
        method.return_type().map(|t| t.to_string()).as_deref(),
        Some("[String]")
    );
}

#[test]
fn test_param_declaration_and_forwarding() {
    let plain = ParamModel::new("id", "String");
    assert_eq!(plain.declaration(), "id: String");
    assert_eq!(plain.forwarding_argument(), "id: id");

    let labeled = ParamModel::new("key", "String").with_label("for");
    assert_eq!(labeled.declaration(), "for key: String");
    assert_eq!(labeled.forwarding_argument(), "for: key");

    let unlabeled = ParamModel::new("value", "Int").with_label("_");
    assert_eq!(unlabeled.declaration(), "_ value: Int");
    assert_eq!(unlabeled.forwarding_argument(), "value");

    let keyword = ParamModel::new("in", "Int");
    assert_eq!(keyword.declaration(), "`in`: Int");
}

#[test]
fn test_by_name_detection() {
    assert!(ParamModel::new("flag", "@autoclosure () -> Bool").is_by_name());
    assert!(!ParamModel::new("flag", "Bool").is_by_name());
}

#[test]
fn test_builder_flags() {
    let method = MethodModel::new("f").with_flags(MemberFlags::STATIC | MemberFlags::OVERRIDE);
    let member = Member::from(method);
    assert!(member.is_static());
    assert_eq!(member.base_identifier(), "f");
}
