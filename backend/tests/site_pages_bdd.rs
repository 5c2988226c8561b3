//! Behaviour tests for the page resolution endpoint.
//!
//! Only the helpers from `actix_web::test` are imported: bringing the module
//! into scope also imports its `test` attribute, which would replace the
//! built-in one on the generated scenario tests.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;

use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
use actix_web::{App, web};
use rstest::fixture;
use rstest_bdd_macros::{scenario, then, when};
use serde_json::Value;
use site_backend::Trace;
use site_backend::inbound::http::pages::resolve_page;

#[derive(Default)]
struct PagesWorld {
    body: RefCell<Option<Value>>,
}

impl PagesWorld {
    fn field(&self, name: &str) -> Value {
        self.body
            .borrow()
            .as_ref()
            .expect("path must be resolved first")
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }
}

#[fixture]
fn world() -> PagesWorld {
    PagesWorld::default()
}

#[when("the path {path} is resolved")]
fn the_path_is_resolved(world: &PagesWorld, path: String) {
    let body = actix_rt::System::new().block_on(async move {
        let app = init_service(
            App::new()
                .wrap(Trace)
                .service(web::scope("/api/v1").service(resolve_page)),
        )
        .await;
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("path", &path)
            .finish();
        let req = TestRequest::get()
            .uri(&format!("/api/v1/pages/resolve?{query}"))
            .to_request();
        let res = call_service(&app, req).await;
        assert!(res.status().is_success(), "status: {}", res.status());
        read_body_json::<Value, _>(res).await
    });
    *world.body.borrow_mut() = Some(body);
}

#[then("the page is {page}")]
fn the_page_is(world: &PagesWorld, page: String) {
    assert_eq!(world.field("page"), Value::from(page));
}

#[then("the canonical path is {path}")]
fn the_canonical_path_is(world: &PagesWorld, path: String) {
    assert_eq!(world.field("canonicalPath"), Value::from(path));
}

#[then("the page status is {status}")]
fn the_page_status_is(world: &PagesWorld, status: u16) {
    assert_eq!(world.field("status"), Value::from(status));
}

#[then("the path is flagged as a legacy alias")]
fn the_path_is_a_legacy_alias(world: &PagesWorld) {
    assert_eq!(world.field("legacyAlias"), Value::Bool(true));
}

#[scenario(
    path = "tests/features/site_pages.feature",
    name = "Known pages resolve to themselves"
)]
fn known_pages_resolve_to_themselves(world: PagesWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/site_pages.feature",
    name = "The legacy case studies path reaches the projects page"
)]
fn the_legacy_case_studies_path_reaches_the_projects_page(world: PagesWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/site_pages.feature",
    name = "Trailing slashes and query strings are ignored"
)]
fn trailing_slashes_and_query_strings_are_ignored(world: PagesWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/site_pages.feature",
    name = "Unknown paths fall through to the not found page"
)]
fn unknown_paths_fall_through_to_the_not_found_page(world: PagesWorld) {
    drop(world);
}
