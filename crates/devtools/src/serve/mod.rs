mod cli;
mod handlers;

pub use cli::App;

use crate::prelude::{eprintln, *};
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Prefix every utility route is mounted under
pub const API_PREFIX: &str = "/api/v1/utils";

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", app.host, app.port);

    let router = router().layer(cors_layer(&app.cors_origins)?);

    if global.verbose {
        eprintln!("CORS origins: {}", app.cors_origins.join(", "));
        eprintln!("Color endpoints: http://{addr}{API_PREFIX}/color/{{convert,palette}}");
        eprintln!("Password endpoints: http://{addr}{API_PREFIX}/password/{{check,generate}}");
        eprintln!("JSON endpoints: http://{addr}{API_PREFIX}/json/{{validate,diff}}");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("REST server listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// All routes, without the CORS layer
pub fn router() -> Router {
    let utils = Router::new()
        .route("/color/convert", post(handlers::convert_color))
        .route("/color/palette", post(handlers::generate_palette))
        .route("/password/check", post(handlers::check_password))
        .route("/password/generate", post(handlers::generate_password))
        .route("/json/validate", post(handlers::validate_json))
        .route("/json/diff", post(handlers::diff_json));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, utils)
        .layer(middleware::from_fn(log_request))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins: Vec<&str> = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(layer.allow_origin(Any));
    }

    let values = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| eyre!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(values)))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    log::debug!(
        "{method} {path} -> {} in {}ms",
        response.status(),
        start.elapsed().as_millis()
    );

    response
}
