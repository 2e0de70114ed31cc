mod common;

use common::temp_files::create_temp_table;
use serde_json::Value;
use waymark::cli::{generate_command, load_router, recognize_command, routes_command};

const TABLE: &str = r#"
routes:
  - path: /books(/:action(.:format))
    name: books
    handler: books#index
    verb: POST
    defaults:
      controller: books
  - path: /status
    handler: status#api
    conditions:
      http_host: ^api\.
  - path: /:controller(/:action(/:id))
    name: default
    handler: fallback
"#;

fn nil(key: &str) -> (String, Option<String>) {
    (key.to_string(), None)
}

fn pair(key: &str, value: &str) -> (String, Option<String>) {
    (key.to_string(), Some(value.to_string()))
}

#[test]
fn test_recognize_command_reports_match() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let output = recognize_command(&router, "post", &[], "/books/list.rss").unwrap();
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["handler"], "books#index");
    assert_eq!(report["name"], "books");
    assert_eq!(report["pattern"], "/books(/:action(.:format))");
    assert_eq!(report["params"]["controller"], "books");
    assert_eq!(report["params"]["action"], "list");
    assert_eq!(report["params"]["format"], "rss");
    assert_eq!(report["path_info"], "/books/list.rss");
    assert_eq!(report["script_name"], "");
}

#[test]
fn test_recognize_command_uses_fields() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let fields = vec![("HTTP_HOST".to_string(), "api.example.org".to_string())];
    let output = recognize_command(&router, "GET", &fields, "/status").unwrap();
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["handler"], "status#api");

    // Without the host the predicate fails and the catch-all answers
    let output = recognize_command(&router, "GET", &[], "/status").unwrap();
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["handler"], "fallback");
    assert_eq!(report["params"]["controller"], "status");
}

#[test]
fn test_recognize_command_reports_pass_through() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let err = recognize_command(&router, "GET", &[], "/a/b/c/d").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("404"), "{}", message);
    assert!(message.contains("X-Cascade: pass"), "{}", message);
}

#[test]
fn test_recognize_command_rejects_bad_method() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();
    assert!(recognize_command(&router, "BAD METHOD", &[], "/status").is_err());
}

#[test]
fn test_generate_command_scored() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let output = generate_command(
        &router,
        None,
        false,
        &[pair("controller", "tasks"), pair("id", "10"), nil("format")],
        &[pair("action", "index")],
    )
    .unwrap();
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["path"], "/tasks/index/10");
    assert_eq!(report["leftover"]["format"], Value::Null);
}

#[test]
fn test_generate_command_escapes_values() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let params = [pair("controller", "tasks"), pair("action", "show me")];
    let plain = generate_command(&router, Some("default"), false, &params, &[]).unwrap();
    let plain: Value = serde_json::from_str(&plain).unwrap();
    assert_eq!(plain["path"], "/tasks/show me");

    let escaped = generate_command(&router, Some("default"), true, &params, &[]).unwrap();
    let escaped: Value = serde_json::from_str(&escaped).unwrap();
    assert_eq!(escaped["path"], "/tasks/show%20me");
}

#[test]
fn test_generate_command_unknown_name() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();
    let err = generate_command(&router, Some("nope"), false, &[], &[]).unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_routes_command_lists_priority_order() {
    let file = create_temp_table(TABLE, "yaml");
    let router = load_router(file.path()).unwrap();

    let output = routes_command(&router);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "[routes] count=3");
    assert!(lines[1].contains("books") && lines[1].contains("POST"));
    assert!(lines[1].ends_with("/books(/:action(.:format)) -> books#index"));
    assert!(lines[2].contains("ANY") && lines[2].contains("-> status#api"));
    assert!(lines[3].contains("default") && lines[3].ends_with("-> fallback"));
}
