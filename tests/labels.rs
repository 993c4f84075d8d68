use caseful::{caseful, CaseAccess};

#[caseful]
#[derive(Debug, Clone)]
enum Mock {
    NoPayload,
    AnonymousPayload(String),
    NamedPayload { payload: String },
    AnInt(i32),
}

#[caseful]
#[derive(Debug, Clone)]
struct Wrapper {
    payload: u32,
}

#[test]
fn labels_follow_the_active_case() {
    assert_eq!(Mock::NoPayload.case_label(), "NoPayload");
    assert_eq!(Mock::AnonymousPayload("x".into()).case_label(), "AnonymousPayload");
    assert_eq!(
        Mock::NamedPayload {
            payload: "x".into()
        }
        .case_label(),
        "NamedPayload"
    );
}

#[test]
fn labels_are_stable_across_instances() {
    let first = Mock::AnInt(1).case_label();
    let second = Mock::AnInt(2).case_label();
    assert_eq!(first, second);
    assert_ne!(first, Mock::NoPayload.case_label());
}

#[test]
fn wrapper_structs_label_their_field() {
    let wrapper = Wrapper { payload: 9 };
    assert_eq!(wrapper.case_label(), "payload");
    assert_eq!(wrapper.associated_value::<u32>(), Some(9));
}
