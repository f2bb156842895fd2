//! Test fixtures for common test scenarios.
//!
//! A small adventure-themed API: adventures have members, members belong
//! to an adventure and have one weapon. `CustomAdventure` and `CustomMember`
//! override association paths.

use std::sync::Arc;

use crate::core::association::AssociationOptions;
use crate::core::model_class::ModelClass;
use crate::sources::transport::Method;
use crate::util::context::GlobalContext;

use super::{MockResponse, MockTransport, RoutePattern};

/// Name of the fixture application.
pub const ADVENTURE_APP: &str = "adventure_app";

/// URL of the fixture application.
pub const ADVENTURE_URL: &str = "localhost:1234";

/// A context with the fixture application and classes, without access to
/// the transport.
pub fn adventure_context() -> GlobalContext {
    adventure_context_with_transport().0
}

/// A context with the fixture application and classes, and the mock
/// transport answering for it.
pub fn adventure_context_with_transport() -> (GlobalContext, Arc<MockTransport>) {
    let mut ctx = GlobalContext::new();
    let transport = mock_app(&mut ctx, ADVENTURE_APP);
    stub_adventure_routes(&transport);
    define_adventure_classes(&mut ctx);
    (ctx, transport)
}

/// Register an application served by a fresh mock transport.
pub fn mock_app(ctx: &mut GlobalContext, name: &str) -> Arc<MockTransport> {
    let transport = Arc::new(MockTransport::new());
    let shared = Arc::clone(&transport);
    ctx.register_app_with(name, move |app| {
        app.set_url(ADVENTURE_URL)?;
        app.set_transport(shared);
        Ok(())
    })
    .expect("fixture application is valid");
    transport
}

/// Register Adventure, Member, Weapon, CustomAdventure and CustomMember.
pub fn define_adventure_classes(ctx: &mut GlobalContext) {
    ctx.define(
        ModelClass::new("Adventure")
            .with_app(ADVENTURE_APP)
            .with_uri("/adventures")
            .has_many("members", AssociationOptions::new()),
    );
    ctx.define(
        ModelClass::new("Member")
            .with_app(ADVENTURE_APP)
            .with_uri("/members")
            .belongs_to("adventure", AssociationOptions::new())
            .has_one("weapon", AssociationOptions::new()),
    );
    ctx.define(
        ModelClass::new("Weapon")
            .with_app(ADVENTURE_APP)
            .with_uri("/weapons"),
    );
    ctx.define_subclass("Adventure", "CustomAdventure", |class| {
        class.has_many(
            "members",
            AssociationOptions::new().path("/custom/members"),
        )
    })
    .expect("Adventure is registered");
    ctx.define(
        ModelClass::new("CustomMember")
            .with_app(ADVENTURE_APP)
            .with_uri("/members")
            .belongs_to(
                "adventure",
                AssociationOptions::new().path("/custom/:name/adventures"),
            ),
    );
}

/// Canned answers for the fixture API.
pub fn stub_adventure_routes(transport: &MockTransport) {
    let get = |path: &str, body: &str| {
        transport.stub(
            Method::Get,
            RoutePattern::Exact(path.to_string()),
            MockResponse::json(body),
        );
    };

    get(
        "/adventures/1",
        r#"{"id":1,"name":"Marceline Quest","type":"MATHEMATICAL!"}"#,
    );
    get(
        "/adventures/1/members",
        r#"[{"id":1,"name":"Finn","adventure_id":1},{"id":2,"name":"Jake","adventure_id":1}]"#,
    );
    get(
        "/adventures/search",
        r#"[{"id":1,"name":"Marceline Quest","type":"MATHEMATICAL!"},{"id":2,"name":"Ice King","type":"MATHEMATICAL!"}]"#,
    );
    get(
        "/adventures",
        r#"[{"id":1,"name":"Marceline Quest"},{"id":2,"name":"Ice King"}]"#,
    );
    get("/members/1", r#"{"id":1,"name":"Finn","adventure_id":1}"#);
    get("/members/1/weapon", r#"{"id":1,"name":"Demon Blood Sword","member_id":1}"#);
    get("/custom/members", "[]");
    get("/custom/Finn/adventures", r#"{"id":1,"name":"Marceline Quest"}"#);
    get("/users/2", r#"{"id":2,"name":"Princess Bubblegum"}"#);

    transport.stub(
        Method::Get,
        RoutePattern::Regex(r"(^|/)404(/|$)".to_string()),
        MockResponse::json(r#"{"error":"not found"}"#).with_status(404),
    );
}
