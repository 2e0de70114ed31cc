use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::StatusCode;

use super::{Dispatch, Router, RouterBuilder, CASCADE_HEADER};
use crate::config::RouterConfig;
use crate::error::RoutingError;
use crate::request::{AdapterFactory, RequestAdapter, RequestEnv};
use crate::route::{Conditions, Params};

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}

fn table(templates: &[&'static str]) -> Router<&'static str> {
    let mut builder = RouterBuilder::new();
    for template in templates {
        builder
            .add_route(*template, Conditions::new(*template), Params::new(), None)
            .unwrap();
    }
    builder.build()
}

struct SharedCounter(Arc<AtomicUsize>);

struct Fixed;

impl RequestAdapter for Fixed {
    fn get_field(&self, _name: &str) -> Option<String> {
        None
    }

    fn evaluate(&self, _name: &str) -> anyhow::Result<String> {
        Ok("api".to_string())
    }
}

impl AdapterFactory for SharedCounter {
    fn adapt<'a>(&self, _env: &'a RequestEnv) -> Box<dyn RequestAdapter + 'a> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Box::new(Fixed)
    }
}

#[test]
fn test_first_registered_match_wins() {
    let router = table(&["/:controller(/:action)", "/books/list"]);
    let mut env = RequestEnv::new("/books/list");
    let recognized = router.recognize(&mut env).unwrap().unwrap();
    assert_eq!(*recognized.handler, "/:controller(/:action)");
    assert_eq!(recognized.params, params(&[("controller", "books"), ("action", "list")]));
}

#[test]
fn test_adapter_built_once_per_recognize() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut builder =
        RouterBuilder::new().request_adapter(SharedCounter(Arc::clone(&counter)));
    builder
        .add_route(
            "www",
            Conditions::new("/foo").predicate("subdomain", "^www$"),
            Params::new(),
            None,
        )
        .unwrap();
    builder
        .add_route(
            "api",
            Conditions::new("/foo").predicate("subdomain", "^api$"),
            Params::new(),
            None,
        )
        .unwrap();
    let router = builder.build();

    let mut env = RequestEnv::new("/foo");
    let recognized = router.recognize(&mut env).unwrap().unwrap();
    assert_eq!(*recognized.handler, "api");
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let mut miss = RequestEnv::new("/bar");
    assert!(router.recognize(&mut miss).unwrap().is_none());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_builder_config_applies_to_templates() {
    let mut builder = RouterBuilder::new().with_config(RouterConfig::default().with_anchored(false));
    builder
        .add_route("foo", Conditions::new("/foo"), Params::new(), None)
        .unwrap();
    let router = builder.build();
    assert!(!router.routes()[0].pattern().is_anchored());

    let mut env = RequestEnv::new("/foo/bar");
    assert!(router.recognize(&mut env).unwrap().is_some());
    assert_eq!(env.script_name, "/foo");
    assert_eq!(env.path_info, "/bar");
}

#[test]
fn test_last_registration_owns_the_name() {
    let mut builder = RouterBuilder::new();
    builder
        .add_route("first", Conditions::new("/first"), Params::new(), Some("home"))
        .unwrap();
    builder
        .add_route("second", Conditions::new("/second"), Params::new(), Some("home"))
        .unwrap();
    let router = builder.build();

    assert_eq!(router.len(), 2);
    assert_eq!(*router.route("home").unwrap().handler(), "second");
    let (path, _) = router
        .generate(Some("home"), &Params::new(), &Params::new())
        .unwrap();
    assert_eq!(path, "/second");
}

#[test]
fn test_score_ties_prefer_later_routes() {
    let router = table(&["/a/:id", "/b/:id"]);
    let (path, _) = router
        .generate(None, &params(&[("id", "1")]), &Params::new())
        .unwrap();
    assert_eq!(path, "/b/1");
}

#[test]
fn test_higher_score_beats_later_route() {
    let router = table(&["/:controller/:action", "/:controller"]);
    let options = params(&[("controller", "tasks"), ("action", "show")]);
    let (path, _) = router.generate(None, &options, &Params::new()).unwrap();
    assert_eq!(path, "/tasks/show");
}

#[test]
fn test_unknown_name_is_an_error() {
    let router = table(&["/:controller(/:action)"]);
    let err = router
        .generate(Some("tasks"), &Params::new(), &Params::new())
        .unwrap_err();
    assert_eq!(
        err,
        RoutingError::UnknownRoute {
            name: "tasks".to_string()
        }
    );
}

#[test]
fn test_empty_table_cannot_generate() {
    let router: Router<()> = Router::builder().build();
    assert!(router.is_empty());
    let err = router
        .generate(None, &Params::new(), &Params::new())
        .unwrap_err();
    assert_eq!(err, RoutingError::NoRoutes);
}

#[test]
fn test_call_passes_when_nothing_matches() {
    let router = table(&["/messages(.:format)"]);
    let mut env = RequestEnv::new("/lol");
    match router.call(&mut env).unwrap() {
        Dispatch::Pass(response) => {
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(response.headers()[CASCADE_HEADER], "pass");
            assert!(response.body().is_empty());
        }
        Dispatch::Matched(_) => panic!("nothing should match /lol"),
    }

    let mut env = RequestEnv::new("/messages.json");
    assert!(matches!(router.call(&mut env).unwrap(), Dispatch::Matched(_)));
}
