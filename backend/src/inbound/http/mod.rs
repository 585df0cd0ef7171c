//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every API route is registered inside [`api_scope`], which applies the
//! response boundary exactly once: successes leave as the success envelope and
//! failures as the error envelope.

pub mod classifier;
pub mod failure;
pub mod index;
pub mod schemas;
pub mod transformer;
pub mod users;
pub mod validation;

pub use failure::{ApiResult, Failure};

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{HttpRequest, HttpResponse, Scope, web};

use crate::domain::UserDirectory;
use crate::middleware::Boundary;

use self::failure::RequestFailure;

/// Shared state the API handlers extract.
#[derive(Clone)]
pub struct ApiState {
    /// User lookups.
    pub users: web::Data<UserDirectory>,
}

impl ApiState {
    /// Bundle the handler dependencies.
    #[must_use]
    pub fn new(users: UserDirectory) -> Self {
        Self {
            users: web::Data::new(users),
        }
    }
}

/// Build the API scope: every route, extractor configuration, the
/// not-found fallback, and the [`Boundary`] around all of them.
///
/// The scope has an empty prefix, so it must be registered after any service
/// that should bypass the boundary.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use envelope::domain::UserDirectory;
/// use envelope::inbound::http::{ApiState, api_scope};
/// use envelope::middleware::Boundary;
/// use envelope::outbound::TracingDiagnosticSink;
///
/// let boundary = Boundary::new(Arc::new(TracingDiagnosticSink));
/// let _app = App::new().service(api_scope(ApiState::new(UserDirectory::default()), boundary));
/// ```
pub fn api_scope(
    state: ApiState,
    boundary: Boundary,
) -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("")
        .app_data(state.users)
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(index::index)
        .service(users::list_users)
        .service(users::get_user)
        .default_service(web::to(route_not_found))
        .wrap(boundary)
}

async fn route_not_found(request: HttpRequest) -> ApiResult<HttpResponse> {
    Err(RequestFailure::route_not_found(request.method().as_str(), request.path()).into())
}
