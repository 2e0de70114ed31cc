use super::{parse, TemplateNode};
use crate::error::TemplateError;

fn lit(text: &str) -> TemplateNode {
    TemplateNode::Literal(text.to_string())
}

fn sym(name: &str) -> TemplateNode {
    TemplateNode::Symbol(name.to_string())
}

#[test]
fn test_root_path() {
    let tree = parse("/").unwrap();
    assert_eq!(tree, TemplateNode::Sequence(vec![lit("/")]));
    assert!(tree.names().is_empty());
}

#[test]
fn test_empty_template() {
    assert_eq!(parse("").unwrap(), TemplateNode::Sequence(vec![]));
}

#[test]
fn test_literals_fold_together() {
    let tree = parse("/messages/new.html").unwrap();
    assert_eq!(tree, TemplateNode::Sequence(vec![lit("/messages/new.html")]));
}

#[test]
fn test_symbols_and_splat() {
    let tree = parse("/files/:bucket/*path").unwrap();
    assert_eq!(
        tree,
        TemplateNode::Sequence(vec![
            lit("/files/"),
            sym("bucket"),
            lit("/"),
            TemplateNode::Splat("path".to_string()),
        ])
    );
    assert_eq!(tree.names(), vec!["bucket", "path"]);
}

#[test]
fn test_nested_groups() {
    let tree = parse("/:controller(/:action(/:id))").unwrap();
    assert_eq!(
        tree,
        TemplateNode::Sequence(vec![
            lit("/"),
            sym("controller"),
            TemplateNode::Group(vec![
                lit("/"),
                sym("action"),
                TemplateNode::Group(vec![lit("/"), sym("id")]),
            ]),
        ])
    );
    assert_eq!(tree.names(), vec!["controller", "action", "id"]);
    assert_eq!(tree.required_names(), vec!["controller"]);
}

#[test]
fn test_name_stops_at_non_identifier() {
    let tree = parse("/:id.:format").unwrap();
    assert_eq!(
        tree,
        TemplateNode::Sequence(vec![lit("/"), sym("id"), lit("."), sym("format")])
    );
}

#[test]
fn test_display_round_trips_source() {
    for source in [
        "/",
        "/messages(.:format)",
        "/messages/:id/edit(.:format)",
        "/:controller(/:action(/:id))",
        "/*path",
    ] {
        assert_eq!(parse(source).unwrap().to_string(), source);
    }
}

#[test]
fn test_unclosed_group() {
    let err = parse("/foo(/:id").unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnclosedGroup {
            template: "/foo(/:id".to_string(),
            position: 4,
        }
    );
}

#[test]
fn test_unexpected_close() {
    let err = parse("/foo)/:id").unwrap_err();
    assert!(matches!(
        err,
        TemplateError::UnexpectedGroupClose { position: 4, .. }
    ));
}

#[test]
fn test_sigil_without_name() {
    assert!(matches!(
        parse("/foo/:").unwrap_err(),
        TemplateError::InvalidName { position: 5, .. }
    ));
    assert!(matches!(
        parse("/foo/*/bar").unwrap_err(),
        TemplateError::InvalidName { position: 5, .. }
    ));
    assert!(matches!(
        parse("/foo/:1abc").unwrap_err(),
        TemplateError::InvalidName { .. }
    ));
}

#[test]
fn test_duplicate_name() {
    let err = parse("/:id(/:id)").unwrap_err();
    assert_eq!(
        err,
        TemplateError::DuplicateName {
            template: "/:id(/:id)".to_string(),
            name: "id".to_string(),
        }
    );
}
