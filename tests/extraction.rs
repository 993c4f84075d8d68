use caseful::{caseful, CaseAccess};

#[caseful]
#[derive(Debug, Clone, PartialEq)]
enum Mock {
    NoPayload,
    AnonymousPayload(String),
    NamedPayload { payload: String },
    AnInt(i32),
    Pair(i32, String),
    List(Vec<String>),
}

#[test]
fn extracts_anonymous_payload() {
    let case = Mock::AnonymousPayload("Freddy".into());
    assert_eq!(case.associated_value::<String>(), Some("Freddy".to_string()));
}

#[test]
fn extracts_named_payload() {
    let case = Mock::NamedPayload {
        payload: "David".into(),
    };
    assert_eq!(case.associated_value::<String>(), Some("David".to_string()));
}

#[test]
fn extracts_integer_payload() {
    assert_eq!(Mock::AnInt(10).associated_value::<i32>(), Some(10));
}

#[test]
fn extracts_collection_payload() {
    let case = Mock::List(vec!["a".into(), "b".into()]);
    assert_eq!(
        case.associated_value::<Vec<String>>(),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn presents_multiple_fields_as_tuple() {
    let case = Mock::Pair(1, "one".into());
    assert_eq!(
        case.associated_value::<(i32, String)>(),
        Some((1, "one".to_string()))
    );
}

#[test]
fn fails_extraction_on_wrong_payload_type() {
    assert_eq!(Mock::AnInt(10).associated_value::<String>(), None);
    assert_eq!(Mock::NoPayload.associated_value::<String>(), None);
}

#[test]
fn extracts_value_matching_constructor() {
    let case = Mock::AnInt(10);
    assert_eq!(case.value_matching(Mock::AnInt), Some(10));
}

#[test]
fn extracts_value_matching_closure_pattern() {
    let case = Mock::NamedPayload {
        payload: "David".into(),
    };
    let named = |payload| Mock::NamedPayload { payload };
    assert_eq!(case.value_matching(named), Some("David".to_string()));
}

#[test]
fn fails_extraction_on_mismatched_pattern() {
    // Same payload type on both sides; the decomposition paths diverge at
    // the case label, so the pattern must not match.
    let case = Mock::AnonymousPayload("David".into());
    let named = |payload| Mock::NamedPayload { payload };
    assert_eq!(case.value_matching(named), None);
    assert_eq!(Mock::AnInt(5).value_matching(Mock::AnonymousPayload), None);
}

#[test]
fn falls_back_to_default_value() {
    assert_eq!(Mock::AnInt(10).value_or(Mock::AnInt, 0), 10);
    assert_eq!(Mock::NoPayload.value_or(Mock::AnInt, 0), 0);
}

#[test]
fn maps_matching_payload() {
    let case = Mock::AnInt(10);
    assert_eq!(case.map_case(Mock::AnInt, |n| n.to_string()), Some("10".to_string()));
    assert_eq!(case.map_case(Mock::AnonymousPayload, |s: String| s.len()), None);
}

#[test]
fn flat_map_lets_transform_decline() {
    let case = Mock::AnonymousPayload("42".into());
    assert_eq!(
        case.flat_map_case(Mock::AnonymousPayload, |s| s.parse::<i32>().ok()),
        Some(42)
    );
    let case = Mock::AnonymousPayload("not a number".into());
    assert_eq!(
        case.flat_map_case(Mock::AnonymousPayload, |s| s.parse::<i32>().ok()),
        None
    );
}

#[test]
fn try_map_propagates_transform_failure() {
    let case = Mock::AnonymousPayload("not a number".into());
    let result = case.try_map_case(Mock::AnonymousPayload, |s| s.parse::<i32>());
    assert!(result.is_err());

    // Non-match stays a silent success, distinct from a failed transform.
    let result = Mock::AnInt(1).try_map_case(Mock::AnonymousPayload, |s| s.parse::<i32>());
    assert_eq!(result, Ok(None));

    let case = Mock::AnonymousPayload("42".into());
    let result = case.try_map_case(Mock::AnonymousPayload, |s| s.parse::<i32>());
    assert_eq!(result, Ok(Some(42)));
}

#[test]
fn exposes_decomposition_path() {
    let (path, value) = Mock::AnInt(10).decompose::<i32>().unwrap();
    assert_eq!(value, 10);
    assert_eq!(path.segments().len(), 2);
    assert_eq!(path.segments()[0], "AnInt");

    let (other, _) = Mock::AnInt(20).decompose::<i32>().unwrap();
    assert_eq!(path, other);
}
