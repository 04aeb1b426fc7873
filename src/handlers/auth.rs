use axum::{extract::State, response::Json, Extension, Form};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::accounts::{self, Registration};
use crate::state::AppState;

// Fields default to empty so an absent field reaches presence validation
// instead of failing form deserialization.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login - authenticate a customer and mint a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Value>, ApiError> {
    let token = accounts::login(&state, &form.email, &form.password).await?;

    Ok(Json(json!({
        "status": "success",
        "code": 200,
        "token": token,
    })))
}

/// POST /register - create a customer account.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Json<Value>, ApiError> {
    accounts::register(
        &state,
        Registration {
            name: form.name,
            email: form.email,
            phone: form.phone,
            password: form.password,
        },
    )
    .await?;

    Ok(Json(json!({
        "status": "success",
        "code": 200,
        "message": "User registered successfully",
    })))
}

/// GET /api/me - echo the verified claims back to the caller.
pub async fn whoami(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "code": 200,
        "email": user.email,
        "admin": user.admin,
    }))
}
