use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_is_served_at_root() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version_reports_package_version() {
    let ctx = TestContext::new();

    let body = ctx.server.get("/version").await.json::<Value>();
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    ctx.server.get("/api/v2/groups").await.assert_status_not_found();
}
