use super::*;

fn sample() -> (Root, NodeId, NodeId, NodeId) {
    let mut root = Root::new();
    let media = root.append(None, Node::at_rule("media", "screen")).unwrap();
    let rule = root.append(Some(media), Node::rule("a")).unwrap();
    let decl = root.append(Some(rule), Node::decl("color", "black")).unwrap();
    (root, media, rule, decl)
}

#[test]
fn test_append_and_navigate() {
    let (root, media, rule, decl) = sample();

    assert_eq!(root.first(), Some(media));
    assert_eq!(root.last(), Some(media));
    assert_eq!(root.first_child(media), Some(rule));
    assert_eq!(root.last_child(rule), Some(decl));
    assert_eq!(root.parent(decl), Some(rule));
    assert_eq!(root.parent(media), None);
    assert_eq!(root.len(), 3);
}

#[test]
fn test_depth() {
    let (root, media, rule, decl) = sample();
    assert_eq!(root.depth(media), 0);
    assert_eq!(root.depth(rule), 1);
    assert_eq!(root.depth(decl), 2);
}

#[test]
fn test_leaf_cannot_have_children() {
    let (mut root, _, _, decl) = sample();
    let err = root.append(Some(decl), Node::comment("x")).unwrap_err();
    assert_eq!(err, TreeError::LeafParent { kind: "decl" });
    assert_eq!(err.to_string(), "a decl cannot have children");
    assert!(root[decl].children().is_empty());
}

#[test]
fn test_walk_is_document_order() {
    let mut root = Root::new();
    let a = root.append(None, Node::rule("a")).unwrap();
    root.append(Some(a), Node::decl("color", "red")).unwrap();
    let b = root.append(Some(a), Node::rule("b")).unwrap();
    root.append(Some(b), Node::decl("top", "0")).unwrap();
    root.append(None, Node::comment("end")).unwrap();

    let kinds: Vec<_> = root.walk().map(|id| root[id].kind.type_name()).collect();
    assert_eq!(kinds, ["rule", "decl", "rule", "decl", "comment"]);
}

#[test]
fn test_raw_value_resolution() {
    let raw = RawValue::new("b", "b ");
    assert_eq!(RawValue::resolve(Some(&raw), "b"), "b ");
    assert_eq!(RawValue::resolve(Some(&raw), "c"), "c");
    assert_eq!(RawValue::resolve(None, "c"), "c");
}

#[test]
fn test_mutation_through_index() {
    let (mut root, _, _, decl) = sample();
    root[decl].kind.as_decl_mut().unwrap().value = "white".to_string();
    assert_eq!(root[decl].kind.as_decl().unwrap().value, "white");
}

#[test]
fn test_debug_shape() {
    let mut root = Root::new();
    root.append(None, Node::decl("a", "1").with_before("\n")).unwrap();
    insta::assert_debug_snapshot!(root[root.first().unwrap()].kind, @r#"
    Decl(
        Declaration {
            prop: "a",
            value: "1",
            raws: DeclRaws {
                between: None,
                value: None,
            },
        },
    )
    "#);
}
