//! End-to-end tests over real HTTP against a local mock server.

use mockito::Matcher;
use serde_json::json;

use remotely::sources::DefaultHeaders;
use remotely::{AssociationOptions, Attributes, Error, Fetched, GlobalContext, Model, ModelClass};

fn context(server: &mockito::ServerGuard) -> GlobalContext {
    let mut ctx = GlobalContext::new();
    ctx.register_app("adventure_app", &server.url()).unwrap();
    define_classes(&mut ctx);
    ctx
}

fn define_classes(ctx: &mut GlobalContext) {
    ctx.define(
        ModelClass::new("Adventure")
            .with_uri("/adventures")
            .has_many("members", AssociationOptions::new()),
    );
    ctx.define(
        ModelClass::new("Member")
            .with_uri("/members")
            .belongs_to("adventure", AssociationOptions::new()),
    );
}

fn adventure(ctx: &GlobalContext, id: i64) -> Model {
    let attributes: Attributes = [("id", json!(id)), ("name", json!("Ice Kingdom"))]
        .into_iter()
        .collect();
    Model::new(ctx.class("Adventure").unwrap(), attributes)
}

#[test]
fn test_association_fetched_once_until_reload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/1/members")
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "Finn"}, {"id": 2, "name": "Jake"}]"#)
        .expect(2)
        .create();

    let ctx = context(&server);
    let mut model = adventure(&ctx, 1);

    let members = model.association(&ctx, "members", false).unwrap();
    assert_eq!(members.as_collection().unwrap().len(), 2);

    model.association(&ctx, "members", false).unwrap();
    model.association(&ctx, "members", false).unwrap();
    model.association(&ctx, "members", true).unwrap();

    mock.assert();
}

#[test]
fn test_collection_elements_carry_parent_key() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/adventures/1/members")
        .with_body(r#"[{"id": 1, "name": "Finn"}]"#)
        .create();

    let ctx = context(&server);
    let mut model = adventure(&ctx, 1);

    let members = model.association(&ctx, "members", false).unwrap();
    let collection = members.as_collection().unwrap();
    assert_eq!(collection.class().name(), "Member");
    assert_eq!(collection.parent().unwrap().foreign_key, "adventure_id");
    assert_eq!(collection[0].attribute("name"), Some(&json!("Finn")));
}

#[test]
fn test_belongs_to_follows_foreign_key() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/7")
        .with_body(r#"{"id": 7, "name": "Candy Kingdom"}"#)
        .create();

    let ctx = context(&server);
    let attributes: Attributes = [("id", json!(1)), ("adventure_id", json!(7))]
        .into_iter()
        .collect();
    let mut member = Model::new(ctx.class("Member").unwrap(), attributes);

    let adventure = member.association(&ctx, "adventure", false).unwrap();
    assert_eq!(
        adventure.as_model().unwrap().attribute("name"),
        Some(&json!("Candy Kingdom"))
    );
    mock.assert();
}

#[test]
fn test_not_found_is_failure() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/adventures/404/members").with_status(404).create();

    let ctx = context(&server);
    let mut model = adventure(&ctx, 404);

    let members = model.association(&ctx, "members", false).unwrap();
    assert!(members.is_failure());
    assert_eq!(members.to_json_value(), json!(false));
}

#[test]
fn test_html_body_is_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/adventures/1/members")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<!DOCTYPE html>\n<html><body>Maintenance</body></html>")
        .create();

    let ctx = context(&server);
    let mut model = adventure(&ctx, 1);

    let err = model.association(&ctx, "members", false).unwrap_err();
    assert!(matches!(err, Error::NonJsonResponse { status: 200, .. }));
    assert!(!model.is_association_cached("members"));
}

#[test]
fn test_basic_auth_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/1")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .with_body(r#"{"id": 1}"#)
        .create();

    let mut ctx = GlobalContext::new();
    let url = server.url();
    ctx.register_app_with("adventure_app", |app| {
        app.set_url(&url)?.basic_auth("user", "pass");
        Ok(())
    })
    .unwrap();
    define_classes(&mut ctx);

    let found = ctx.resource("Adventure").unwrap().find(1).unwrap();
    assert!(found.as_model().is_some());
    mock.assert();
}

#[test]
fn test_bearer_auth_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/1")
        .match_header("authorization", "Bearer abc123")
        .with_body(r#"{"id": 1}"#)
        .create();

    let mut ctx = GlobalContext::new();
    let url = server.url();
    ctx.register_app_with("adventure_app", |app| {
        app.set_url(&url)?.bearer_auth("abc123");
        Ok(())
    })
    .unwrap();
    define_classes(&mut ctx);

    ctx.resource("Adventure").unwrap().find(1).unwrap();
    mock.assert();
}

#[test]
fn test_token_auth_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/1")
        .match_header("authorization", r#"Token token="secret""#)
        .with_body(r#"{"id": 1}"#)
        .create();

    let mut ctx = GlobalContext::new();
    let url = server.url();
    ctx.register_app_with("adventure_app", |app| {
        app.set_url(&url)?.token_auth("secret");
        Ok(())
    })
    .unwrap();
    define_classes(&mut ctx);

    ctx.resource("Adventure").unwrap().find(1).unwrap();
    mock.assert();
}

#[test]
fn test_default_headers_middleware() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures")
        .match_header("x-api-key", "abc")
        .with_body("[]")
        .create();

    let mut ctx = GlobalContext::new();
    let url = server.url();
    ctx.register_app_with("adventure_app", |app| {
        app.set_url(&url)?
            .use_middleware(DefaultHeaders::new().header("X-Api-Key", "abc"));
        Ok(())
    })
    .unwrap();
    define_classes(&mut ctx);

    let all = ctx.resource("Adventure").unwrap().all().unwrap();
    assert!(all.as_collection().unwrap().is_empty());
    mock.assert();
}

#[test]
fn test_post_sends_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/adventures")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "Quest"})))
        .with_status(201)
        .with_body(r#"{"id": 9, "name": "Quest"}"#)
        .create();

    let ctx = context(&server);
    let attributes: Attributes = [("name", json!("Quest"))].into_iter().collect();
    let mut model = Model::new(ctx.class("Adventure").unwrap(), attributes);

    assert!(model.save(&ctx).unwrap());
    assert_eq!(model.id(), Some(&json!(9)));
    mock.assert();
}

#[test]
fn test_put_and_delete_report_acceptance() {
    let mut server = mockito::Server::new();
    let put = server.mock("PUT", "/adventures/1").with_status(204).create();
    let delete = server.mock("DELETE", "/adventures/1").with_status(422).create();

    let ctx = context(&server);
    let mut model = adventure(&ctx, 1);

    assert!(model.save(&ctx).unwrap());
    assert!(!model.destroy(&ctx).unwrap());
    put.assert();
    delete.assert();
}

#[test]
fn test_search_sends_query() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/adventures/search")
        .match_query(Matcher::UrlEncoded("name".into(), "Ice Kingdom".into()))
        .with_body(r#"[{"id": 1, "name": "Ice Kingdom"}]"#)
        .create();

    let ctx = context(&server);
    let criteria: Attributes = [("name", json!("Ice Kingdom"))].into_iter().collect();
    let found = ctx.resource("Adventure").unwrap().where_(&criteria).unwrap();

    assert!(matches!(found, Fetched::Collection(ref c) if c.len() == 1));
    mock.assert();
}
