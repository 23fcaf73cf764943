//! Simple example demonstrating declarative resource routing

use axum::Json;
use resourceful::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    println!("🚀 Resourceful Router Simple Example\n");

    // A before filter that logs every request except plain listings
    let audit = ActionFilter::new(filter_fn(|ctx| async move {
        tracing::info!("{} {}", ctx.request.method(), ctx.request.uri());
        FilterFlow::Continue(ctx)
    }))
    .except(["list"]);

    // An after filter stamping a response header on mutations only
    let stamp = ActionFilter::new(filter_fn(|mut ctx| async move {
        if let Some(response) = ctx.response.as_mut() {
            response
                .headers_mut()
                .insert("x-mutated", axum::http::HeaderValue::from_static("true"));
        }
        FilterFlow::Continue(ctx)
    }))
    .only(["create", "remove"]);

    let users = HandlerModule::new()
        .before(audit)
        .after(stamp)
        .action(
            "list",
            action(|_req| async { Json(json!({ "users": ["alice", "bob"] })) }),
        )
        .action(
            "get",
            action(|_req| async { Json(json!({ "name": "alice" })) }),
        )
        .action(
            "create",
            action(|_req| async { Json(json!({ "created": true })) }),
        )
        .action(
            "remove",
            action(|_req| async { Json(json!({ "removed": true })) }),
        );

    let collection = ResourceCollection::new()
        .global_path_prefix("/api")
        .resource(
            "users",
            Resource::new(users)
                .endpoint(Endpoint::new(ActionMethod::Get, "", "list"))
                .endpoint(Endpoint::new(ActionMethod::Get, "/{id}", "get"))
                .endpoint(Endpoint::new(ActionMethod::Post, "", "create"))
                .endpoint(Endpoint::new(ActionMethod::Delete, "/{id}", "remove")),
        );

    println!("📋 Mounted routes:");
    println!("   GET    /api/users");
    println!("   GET    /api/users/{{id}}");
    println!("   POST   /api/users");
    println!("   DELETE /api/users/{{id}}\n");

    ResourcefulRouterBuilder::new()
        .serve(&collection, "127.0.0.1:3000")
        .await
}
