//! JSON/HTTP facade.
//!
//! Decodes request bodies, validates that required string fields are
//! non-empty, invokes the aggregation facade, and maps results and errors
//! to JSON responses. This is the only layer allowed to collapse error
//! detail into a generic client-facing message; the full cause is logged
//! first.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::processor::Processor;

/// Upper bound applied when buffering request bodies.
const BODY_LIMIT: usize = 64 * 1024;

/// Shared handler state.
#[derive(Clone)]
struct AppState {
    processor: Arc<dyn Processor>,
}

/// Builds the gateway router with timeout and trace layers applied.
///
/// The timeout layer carries the inbound deadline: when it fires, the
/// handler future is dropped and any in-flight backend call is cancelled
/// with it.
pub fn router(processor: Arc<dyn Processor>, http_timeout: Duration) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(AppState { processor })
        .layer(TimeoutLayer::new(http_timeout))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegisterRequest {
    email: String,
    password: String,
    login: String,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    user_id: i64,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    login: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn register(State(state): State<AppState>, req: Request<Body>) -> Response {
    let correlation_id = Uuid::new_v4();

    let body = match to_bytes(req.into_body(), BODY_LIMIT).await {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, %correlation_id, "failed to read request body");
            return respond_error(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    let req: RegisterRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(err) => {
            error!(error = %err, %correlation_id, "failed to decode register request");
            return respond_error(StatusCode::BAD_REQUEST, "Invalid JSON payload");
        }
    };

    if req.email.is_empty() || req.password.is_empty() || req.login.is_empty() {
        warn!(login = %req.login, %correlation_id, "missing required fields for registration");
        return respond_error(
            StatusCode::BAD_REQUEST,
            "Email, password, and login are required",
        );
    }

    match state
        .processor
        .register_user(&req.email, &req.password, &req.login)
        .await
    {
        Ok(user_id) => {
            info!(user_id, %correlation_id, "user registered");
            respond_json(
                StatusCode::CREATED,
                &RegisterResponse {
                    user_id,
                    message: "User registered successfully".to_string(),
                },
            )
        }
        Err(err) => {
            error!(error = %err, %correlation_id, "failed to register user");
            respond_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to register user")
        }
    }
}

async fn login(State(state): State<AppState>, req: Request<Body>) -> Response {
    let correlation_id = Uuid::new_v4();

    let body = match to_bytes(req.into_body(), BODY_LIMIT).await {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, %correlation_id, "failed to read request body");
            return respond_error(StatusCode::BAD_REQUEST, "Failed to read request body");
        }
    };

    let req: LoginRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(err) => {
            error!(error = %err, %correlation_id, "failed to decode login request");
            return respond_error(StatusCode::BAD_REQUEST, "Invalid JSON payload");
        }
    };

    if req.login.is_empty() || req.password.is_empty() {
        warn!(login = %req.login, %correlation_id, "missing required fields for login");
        return respond_error(StatusCode::BAD_REQUEST, "Login and password are required");
    }

    match state.processor.login_user(&req.login, &req.password).await {
        Ok(token) => {
            info!(login = %req.login, %correlation_id, "user logged in");
            respond_json(
                StatusCode::OK,
                &LoginResponse {
                    token,
                    message: "Login successful".to_string(),
                },
            )
        }
        // Credential rejection and backend unavailability both map to 401;
        // the client is not told which it was.
        Err(err) => {
            error!(error = %err, login = %req.login, %correlation_id, "failed to log in user");
            respond_error(StatusCode::UNAUTHORIZED, "Login failed. Check credentials.")
        }
    }
}

fn respond_json<T: Serialize>(code: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (
            code,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to marshal JSON response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error":"failed to marshal response"}"#,
            )
                .into_response()
        }
    }
}

fn respond_error(code: StatusCode, message: &str) -> Response {
    respond_json(
        code,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}
