//! Account handlers: registration and login.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"secret1","role":"donor","bloodType":"A+"}
//! POST /api/auth/login {"email":"ada@example.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccessToken, AuthSession, CredentialsValidationError, Error, LoginCredentials, Registration,
    RegistrationParts, User, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrorCode, FieldName, field_error};

/// Registration body. Missing strings are treated as empty and rejected by
/// validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1", min_length = 6)]
    pub password: String,
    #[schema(example = "donor")]
    pub role: String,
    #[schema(example = "A+")]
    pub blood_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Body returned by both register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[schema(value_type = String)]
    pub token: AccessToken,
    pub user: User,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            success: true,
            token: session.token,
            user: session.user,
        }
    }
}

fn field_for(err: &CredentialsValidationError) -> Option<FieldName> {
    match err {
        CredentialsValidationError::MissingCredentials => None,
        CredentialsValidationError::PasswordTooShort { .. } => Some(FieldName::new("password")),
        CredentialsValidationError::UnknownBloodType(_) => Some(FieldName::new("bloodType")),
        CredentialsValidationError::User(inner) => match inner {
            UserValidationError::EmptyName | UserValidationError::NameTooLong { .. } => {
                Some(FieldName::new("name"))
            }
            UserValidationError::InvalidEmail => Some(FieldName::new("email")),
            UserValidationError::UnknownRole => Some(FieldName::new("role")),
            UserValidationError::InvalidId => None,
        },
    }
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match field_for(&err) {
        Some(field) => field_error(field, err.to_string(), FieldErrorCode::InvalidValue, None),
        None => Error::invalid_request(err.to_string()),
    }
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid registration", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let registration = Registration::try_from_parts(RegistrationParts {
        name: &body.name,
        email: &body.email,
        password: &body.password,
        role: &body.role,
        blood_type: body.blood_type.as_deref(),
    })
    .map_err(map_credentials_error)?;

    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = AuthResponse),
        (status = 400, description = "Missing credentials", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(AuthResponse::from(session)))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
