//! Users API handlers.
//!
//! ```text
//! GET /users?limit=20&offset=0
//! GET /users/{id}
//! ```

use actix_web::{get, web};

use crate::domain::{SuccessEnvelope, User, UserDirectory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema};
use crate::inbound::http::validation::ListUsersQuery;

/// Message sent with a user listing.
pub const USERS_FETCHED_MESSAGE: &str = "Users fetched successfully";

/// List known users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use envelope::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users", body = UserListEnvelopeSchema),
        (status = 400, description = "Invalid pagination", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    directory: web::Data<UserDirectory>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<SuccessEnvelope<Vec<User>>> {
    let page = query.validate()?;
    let users = directory.list(page.offset, page.limit);
    Ok(SuccessEnvelope::ok(users).with_message(USERS_FETCHED_MESSAGE))
}

/// Fetch one user. The plain JSON body is wrapped by the boundary.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed identifier", body = ErrorEnvelopeSchema),
        (status = 404, description = "Unknown user", body = ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    directory: web::Data<UserDirectory>,
    id: web::Path<u32>,
) -> ApiResult<web::Json<User>> {
    let user = directory.find(id.into_inner())?;
    Ok(web::Json(user))
}
