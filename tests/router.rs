use radix_router::{Dispatch, HttpRequest, InsertError, MatchError, Method, Router};

use http::StatusCode;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<String>>>;

// Registers a handler that records its name and the captured parameters.
fn recording(router: &mut Router, calls: &Calls, method: Method, pattern: &'static str) {
    let calls = calls.clone();
    router
        .add_route(method, pattern, move |req: &HttpRequest| {
            let params = req
                .params()
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            calls.lock().unwrap().push(format!("{pattern} [{params}]"));
            Ok(())
        })
        .unwrap();
}

fn router() -> (Router, Calls) {
    let calls = Calls::default();
    let mut router = Router::new();

    recording(&mut router, &calls, Method::Get, "/");
    recording(&mut router, &calls, Method::Get, "/search");
    recording(&mut router, &calls, Method::Get, "/users/:id");
    recording(&mut router, &calls, Method::Post, "/post/:id");
    recording(&mut router, &calls, Method::Get, "/users/:id/post/:post_id");

    (router, calls)
}

fn take(calls: &Calls) -> Vec<String> {
    std::mem::take(&mut *calls.lock().unwrap())
}

#[test]
fn dispatch_invokes_matching_handler() {
    let (router, calls) = router();

    assert_eq!(router.dispatch(Method::Get, "/"), Dispatch::Handled);
    assert_eq!(router.dispatch(Method::Get, "/?debug=true"), Dispatch::Handled);
    assert_eq!(router.dispatch(Method::Get, "/search?q=radix+tree&page=2"), Dispatch::Handled);
    assert_eq!(router.dispatch(Method::Get, "/users/123"), Dispatch::Handled);
    assert_eq!(
        router.dispatch(Method::Get, "/users/123/post/456?user_id=1&user_id=2"),
        Dispatch::Handled
    );
    assert_eq!(router.dispatch(Method::Post, "/post/2"), Dispatch::Handled);

    assert_eq!(
        take(&calls),
        vec![
            "/ []",
            "/ []",
            "/search []",
            "/users/:id [id=123]",
            "/users/:id/post/:post_id [id=123,post_id=456]",
            "/post/:id [id=2]",
        ]
    );
}

#[test]
fn dispatch_reports_not_found() {
    let (router, calls) = router();

    for (method, path) in [
        (Method::Get, "/users"),
        (Method::Get, "/invalid/path"),
        (Method::Get, "/users/1/post"),
        (Method::Get, "/post/2"),
        (Method::Post, "/users/1"),
        (Method::Delete, "/"),
    ] {
        let outcome = router.dispatch(method, path);
        assert_eq!(outcome, Dispatch::NotFound, "{method} {path}");
        assert_eq!(outcome.status(), StatusCode::NOT_FOUND);
    }

    assert!(take(&calls).is_empty());
}

#[test]
fn handler_errors_are_contained() {
    let (mut router, calls) = router();
    router
        .get("/fail", |_| Err("database unavailable".into()))
        .unwrap();

    let outcome = router.dispatch(Method::Get, "/fail");
    assert_eq!(outcome, Dispatch::Handled);
    assert_eq!(outcome.status(), StatusCode::OK);

    // the router keeps serving
    assert_eq!(router.dispatch(Method::Get, "/users/9"), Dispatch::Handled);
    assert_eq!(take(&calls), vec!["/users/:id [id=9]"]);
}

#[test]
fn handler_panics_are_contained() {
    let (mut router, calls) = router();
    router.get("/panic", |_| panic!("handler bug")).unwrap();
    router
        .get("/panic/:n", |req| panic!("handler bug {}", req.param_or("n", "")))
        .unwrap();

    assert!(router.catch_panics);
    assert_eq!(router.dispatch(Method::Get, "/panic"), Dispatch::Handled);
    assert_eq!(router.dispatch(Method::Get, "/panic/2"), Dispatch::Handled);

    assert_eq!(router.dispatch(Method::Get, "/search"), Dispatch::Handled);
    assert_eq!(take(&calls), vec!["/search []"]);
}

#[test]
#[should_panic(expected = "handler bug")]
fn panics_propagate_when_disabled() {
    let mut router = Router::new();
    router.catch_panics = false;
    router.get("/panic", |_| panic!("handler bug")).unwrap();

    router.dispatch(Method::Get, "/panic");
}

#[test]
fn static_route_wins() {
    let calls = Calls::default();
    let mut router = Router::new();
    recording(&mut router, &calls, Method::Get, "/users/:id");
    recording(&mut router, &calls, Method::Get, "/users/123");

    router.dispatch(Method::Get, "/users/123");
    router.dispatch(Method::Get, "/users/1234");

    assert_eq!(take(&calls), vec!["/users/123 []", "/users/:id [id=1234]"]);
}

#[test]
fn split_routes_do_not_mix() {
    let calls = Calls::default();
    let mut router = Router::new();
    recording(&mut router, &calls, Method::Get, "/post/:id");
    recording(&mut router, &calls, Method::Get, "/users/:id/post/:post_id");

    router.dispatch(Method::Get, "/post/2");
    assert_eq!(take(&calls), vec!["/post/:id [id=2]"]);
}

#[test]
fn registration_errors() {
    let (mut router, calls) = router();

    assert_eq!(
        router.get("nope", |_| Ok(())),
        Err(InsertError::InvalidPattern {
            pattern: "nope".into(),
            reason: "must begin with '/'",
        })
    );
    assert_eq!(
        router.put("/users/:uid", |_| Ok(())),
        Err(InsertError::Conflict {
            with: "/users/:id".into()
        })
    );

    // previously registered routes are unaffected
    assert_eq!(router.dispatch(Method::Get, "/users/5"), Dispatch::Handled);
    assert_eq!(router.dispatch(Method::Put, "/users/5"), Dispatch::NotFound);
    assert_eq!(take(&calls), vec!["/users/:id [id=5]"]);
}

#[test]
fn lookup_without_invoking() {
    let (router, calls) = router();

    let (_, req) = router.lookup(Method::Get, "/users/7?tab=posts").unwrap();
    assert_eq!(req.path(), "/users/7");
    assert_eq!(req.param("id"), Some("7"));
    assert_eq!(req.query_param("tab"), Some("posts"));

    assert_eq!(
        router.lookup(Method::Get, "/nothing").map(|(_, req)| req),
        Err(MatchError::NotFound)
    );
    assert!(take(&calls).is_empty());
}

#[test]
fn replaced_handler() {
    let calls = Calls::default();
    let mut router = Router::new();
    router.get("/a", |_| Err("old".into())).unwrap();
    recording(&mut router, &calls, Method::Get, "/a");

    router.dispatch(Method::Get, "/a/");
    assert_eq!(take(&calls), vec!["/a []"]);
}

#[test]
fn allowed_methods() {
    let mut router = Router::new();
    router.get("/items/:id", |_| Ok(())).unwrap();
    router.delete("/items/:id", |_| Ok(())).unwrap();
    router.post("/items", |_| Ok(())).unwrap();

    assert_eq!(router.allowed("/items/3"), vec![Method::Get, Method::Delete]);
    assert_eq!(router.allowed("/items?x=1"), vec![Method::Post]);
    assert!(router.allowed("/other").is_empty());
}

#[test]
fn shared_between_threads() {
    let (router, calls) = router();
    let router = Arc::new(router);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || router.dispatch(Method::Get, &format!("/users/{i}")))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Dispatch::Handled);
    }
    assert_eq!(take(&calls).len(), 4);
}
