//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use envelope::doc::ApiDoc;
use envelope::inbound::http::{ApiState, api_scope};
use envelope::{Boundary, Trace};

/// Route serving Swagger UI.
pub const DOCS_PATH: &str = "/api/docs";
/// Route serving the raw OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

#[derive(Clone)]
struct AppDependencies {
    state: ApiState,
    boundary: Boundary,
    serve_docs: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        state,
        boundary,
        serve_docs,
    } = deps;

    let mut app = App::new().wrap(Trace);
    // The API scope has an empty prefix and must come last.
    if serve_docs {
        app = app.service(
            SwaggerUi::new(format!("{DOCS_PATH}/{{_:.*}}"))
                .url(OPENAPI_JSON_PATH, ApiDoc::openapi()),
        );
    }
    app.service(api_scope(state, boundary))
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        serve_docs,
        sink,
        users,
    } = config;
    let deps = AppDependencies {
        state: ApiState::new(users),
        boundary: Boundary::new(sink),
        serve_docs,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, serve_docs, "server listening");
    Ok(server)
}
