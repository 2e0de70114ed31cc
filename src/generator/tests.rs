use std::cell::RefCell;

use super::{generate, GenerateConfig};
use crate::error::RoutingError;
use crate::pattern::Pattern;
use crate::route::{Params, Route};

fn route(template: &str) -> Route<()> {
    route_with(Pattern::new(template).unwrap(), Params::new())
}

fn route_with(pattern: Pattern, defaults: Params) -> Route<()> {
    Route::new(pattern, (), defaults, None, Vec::new(), None)
}

fn params(pairs: &[(&str, Option<&str>)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect()
}

fn path_for(route: &Route<()>, options: &Params, recall: &Params) -> String {
    generate(route, options, recall, &GenerateConfig::default())
        .unwrap()
        .0
}

#[test]
fn test_generate_fills_nested_groups() {
    let r = route("/:controller(/:action(/:id))");
    let options = params(&[("controller", Some("tasks")), ("action", Some("show"))]);
    assert_eq!(path_for(&r, &options, &Params::new()), "/tasks/show");
}

#[test]
fn test_missing_optional_drops_only_innermost_group() {
    let r = route("/:controller(/:action(.:format))");
    let options = params(&[("controller", Some("books")), ("action", Some("list"))]);
    assert_eq!(path_for(&r, &options, &Params::new()), "/books/list");
}

#[test]
fn test_nil_options_are_not_rendered() {
    let r = route("/:controller(/:action(.:format))");
    let options = params(&[("controller", Some("tasks")), ("format", None)]);
    let recall = params(&[("action", Some("lol"))]);
    assert_eq!(path_for(&r, &options, &recall), "/tasks");
}

#[test]
fn test_recall_fills_gap_before_supplied_name() {
    let r = route("/:controller(/:action(/:id))");
    let options = params(&[("controller", Some("tasks")), ("id", Some("10"))]);
    let recall = params(&[("action", Some("index"))]);
    let (path, leftover) = generate(&r, &options, &recall, &GenerateConfig::new()).unwrap();
    assert_eq!(path, "/tasks/index/10");
    assert!(leftover.is_empty());
}

#[test]
fn test_recall_does_not_extend_past_supplied_names() {
    let r = route("/:controller(/:action)");
    let options = params(&[("controller", Some("tasks"))]);
    let recall = params(&[("controller", Some("tasks")), ("action", Some("index"))]);
    let (path, leftover) = generate(&r, &options, &recall, &GenerateConfig::new()).unwrap();
    assert_eq!(path, "/tasks");
    assert!(leftover.is_empty());
}

#[test]
fn test_required_names_come_from_recall() {
    let r = route("/messages/:a/:b");
    let options = params(&[("a", Some("a"))]);
    let recall = params(&[("b", Some("b"))]);
    assert_eq!(path_for(&r, &options, &recall), "/messages/a/b");

    let splat = route("/*path");
    let recall = params(&[("path", Some("b"))]);
    assert_eq!(path_for(&splat, &Params::new(), &recall), "/b");
}

#[test]
fn test_defaults_fill_required_names() {
    let r = route_with(
        Pattern::new("/:controller/:action").unwrap(),
        params(&[("action", Some("index"))]),
    );
    let options = params(&[("controller", Some("tasks"))]);
    assert_eq!(path_for(&r, &options, &Params::new()), "/tasks/index");
}

#[test]
fn test_static_template_ignores_options() {
    let r = route("/");
    let options = params(&[("controller", Some("tasks")), ("action", Some("show"))]);
    assert_eq!(path_for(&r, &options, &Params::new()), "/");
}

#[test]
fn test_values_are_not_escaped() {
    let r = route("/:controller(/:action)");
    let options = params(&[("controller", Some("tasks")), ("action", Some("show me"))]);
    assert_eq!(path_for(&r, &options, &Params::new()), "/tasks/show me");
}

#[test]
fn test_leftovers_are_non_path_options() {
    let r = route("/:controller(/:action)");
    let options = params(&[
        ("id", Some("1")),
        ("controller", Some("tasks")),
        ("action", Some("show")),
        ("relative_url_root", None),
    ]);
    let (path, leftover) = generate(&r, &options, &Params::new(), &GenerateConfig::new()).unwrap();
    assert_eq!(path, "/tasks/show");
    assert_eq!(
        leftover,
        params(&[("id", Some("1")), ("relative_url_root", None)])
    );
}

#[test]
fn test_leftovers_exclude_default_values() {
    let r = route_with(
        Pattern::new("/books(/:action)").unwrap(),
        params(&[("controller", Some("books"))]),
    );
    let options = params(&[("controller", Some("books")), ("page", Some("2"))]);
    let (path, leftover) = generate(&r, &options, &Params::new(), &GenerateConfig::new()).unwrap();
    assert_eq!(path, "/books");
    assert_eq!(leftover, params(&[("page", Some("2"))]));
}

#[test]
fn test_parameterize_sees_every_rendered_pair() {
    let r = route("/:controller(/:action)");
    let options = params(&[("controller", Some("tasks")), ("action", Some("show"))]);
    let seen = RefCell::new(Vec::new());
    let config = GenerateConfig::new().parameterize(|name, value| {
        seen.borrow_mut().push((name.to_string(), value.to_string()));
        value.to_uppercase()
    });

    let (path, _) = generate(&r, &options, &Params::new(), &config).unwrap();
    assert_eq!(path, "/TASKS/SHOW");
    drop(config);

    let mut seen = seen.into_inner();
    seen.sort();
    assert_eq!(
        seen,
        vec![
            ("action".to_string(), "show".to_string()),
            ("controller".to_string(), "tasks".to_string()),
        ]
    );
}

#[test]
fn test_parameterize_skips_collapsed_groups() {
    let r = route("/:controller(/:action/:id)");
    let options = params(&[("controller", Some("tasks")), ("action", Some("show"))]);
    let seen = RefCell::new(Vec::new());
    let config = GenerateConfig::new().parameterize(|name, value| {
        seen.borrow_mut().push((name.to_string(), value.to_string()));
        value.to_string()
    });

    let (path, _) = generate(&r, &options, &Params::new(), &config).unwrap();
    assert_eq!(path, "/tasks");
    drop(config);

    assert_eq!(
        seen.into_inner(),
        vec![("controller".to_string(), "tasks".to_string())]
    );
}

#[test]
fn test_missing_required_keys_are_reported_together() {
    let r = route("/messages/:a/:b");
    let err = generate(&r, &Params::new(), &Params::new(), &GenerateConfig::new()).unwrap_err();
    match err {
        RoutingError::MissingKeys { template, keys } => {
            assert_eq!(template, "/messages/:a/:b");
            assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_nil_option_for_required_name_is_missing() {
    let r = route("/messages/:id");
    let options = params(&[("id", None)]);
    let recall = params(&[("id", Some("1"))]);
    let err = generate(&r, &options, &recall, &GenerateConfig::new()).unwrap_err();
    assert!(matches!(err, RoutingError::MissingKeys { .. }));
}

#[test]
fn test_required_requirement_must_match_whole_value() {
    let pattern = Pattern::builder("/foo/:id")
        .requirement("id", r"\d")
        .anchored(false)
        .build()
        .unwrap();
    let r = route_with(pattern, Params::new());
    let options = params(&[("id", Some("10"))]);
    let err = generate(&r, &options, &Params::new(), &GenerateConfig::new()).unwrap_err();
    match err {
        RoutingError::RequirementMismatch {
            name,
            value,
            requirement,
        } => {
            assert_eq!(name, "id");
            assert_eq!(value, "10");
            assert_eq!(requirement, r"\d");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_required_requirement_accepts_matching_value() {
    let pattern = Pattern::builder("/foo/:id")
        .requirement("id", r"\d+")
        .build()
        .unwrap();
    let r = route_with(pattern, Params::new());
    assert_eq!(
        path_for(&r, &params(&[("id", Some("10"))]), &Params::new()),
        "/foo/10"
    );
    let bad = params(&[("id", Some("aa"))]);
    assert!(generate(&r, &bad, &Params::new(), &GenerateConfig::new()).is_err());
}

#[test]
fn test_optional_requirements_are_not_checked() {
    let pattern = Pattern::builder("/foo(/:id)")
        .requirement("id", r"\d")
        .build()
        .unwrap();
    let r = route_with(pattern, Params::new());
    let none = Params::new();
    assert_eq!(path_for(&r, &params(&[("id", Some("10"))]), &none), "/foo/10");
    assert_eq!(path_for(&r, &none, &none), "/foo");
    assert_eq!(path_for(&r, &params(&[("id", Some("aa"))]), &none), "/foo/aa");
}
