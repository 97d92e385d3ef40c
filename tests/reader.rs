use livestyle::ast::{Argument, AstReader, CallNode, Literal, Value};
use livestyle::errors::WireError;

#[test]
fn reads_member_access_with_selector_and_labeled_argument() {
    let node = AstReader::read_str(
        r#"[null, {"file": "app.ex", "line": 3}, ["system", {"label": "size", "value": 17}]]"#,
    )
    .unwrap();

    assert!(node.is_member_access());
    assert_eq!(node.selector.as_deref(), Some("system"));
    assert_eq!(node.annotations.line, Some(3));
    assert_eq!(
        node.arguments,
        vec![Argument::labeled("size", Value::Literal(Literal::Int(17)))]
    );
}

#[test]
fn reads_empty_node_as_own_type_member_access() {
    let node = AstReader::read_str("[null, null, []]").unwrap();
    assert_eq!(node, CallNode::member(None, vec![]));
}

#[test]
fn null_selector_is_not_an_argument() {
    let node = AstReader::read_str(r#"[null, null, [null, "red"]]"#).unwrap();
    assert_eq!(node.selector, None);
    assert_eq!(
        node.arguments,
        vec![Argument::positional(Value::Literal(Literal::String("red".into())))]
    );
}

#[test]
fn non_string_first_argument_leaves_no_selector_slot() {
    let node = AstReader::read_str("[null, null, [1.5, 2]]").unwrap();
    assert_eq!(node.selector, None);
    assert_eq!(node.arguments.len(), 2);
    assert_eq!(node.arguments[0].value, Value::Literal(Literal::Float(1.5)));
    assert_eq!(node.arguments[1].value, Value::Literal(Literal::Int(2)));
}

#[test]
fn reads_nested_nodes_lists_and_attribute_references() {
    let node = AstReader::read_str(
        r#"[null, null, ["gradient", {"label": "stops", "value": [
            [null, null, ["red"]],
            ["__attr__", null, "accent"]
        ]}]]"#,
    )
    .unwrap();

    let Value::List(items) = &node.arguments[0].value else {
        panic!("expected a list, got {:?}", node.arguments[0].value);
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], Value::Node(CallNode::member(Some("red"), vec![])));
    assert!(matches!(&items[1], Value::Attribute { name, .. } if name == "accent"));
}

#[test]
fn modifier_tag_is_kept() {
    let node = AstReader::read_str(r#"["frame", {}, [null, {"label": "width", "value": 82}]]"#).unwrap();
    assert_eq!(node.tag, "frame");
    assert!(!node.is_member_access());
    assert_eq!(node.to_string(), "frame(width: 82)");
}

#[test]
fn missing_argument_container_is_malformed() {
    let err = AstReader::read_str(r#"[null, null, "red"]"#).unwrap_err();
    match err {
        WireError::MalformedNode { path, message } => {
            assert_eq!(path, "$[2]");
            assert!(message.contains("missing nested argument container"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_arity_and_bad_tags_are_malformed() {
    assert!(matches!(
        AstReader::read_str("[null, null]"),
        Err(WireError::MalformedNode { .. })
    ));
    assert!(matches!(
        AstReader::read_str("[5, null, []]"),
        Err(WireError::MalformedNode { .. })
    ));
    assert!(matches!(
        AstReader::read_str(r#"["__attr__", null, "width"]"#),
        Err(WireError::MalformedNode { .. })
    ));
}

#[test]
fn malformed_path_points_into_nested_arguments() {
    let err = AstReader::read_str(r#"[null, null, ["solid", [null, null, [{"bogus": 1}]]]]"#).unwrap_err();
    match err {
        WireError::MalformedNode { path, .. } => assert_eq!(path, "$[2][1][2][0]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_json_is_a_wire_error() {
    assert!(matches!(AstReader::read(b"[null, "), Err(WireError::Json(_))));
}
