use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use security::Authenticator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::email_verification::request_verification_email;
use super::handlers::email_verification::verify_email;
use super::handlers::magic_link::login_with_magic_link;
use super::handlers::magic_link::request_magic_link;
use super::handlers::official_contact_email::confirm_contact_email;
use super::handlers::official_contact_email::request_contact_email_verification;
use super::handlers::password_reset::request_password_reset;
use super::handlers::password_reset::reset_password;
use super::handlers::personal_information::update_personal_information;
use super::handlers::register_account::register_account;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::service::AccountService;
use crate::outbound::directory::HttpDirectoryClient;
use crate::outbound::email::SmtpMailer;
use crate::outbound::repositories::account::PostgresAccountRepository;
use crate::outbound::repositories::organization::PostgresOrganizationRepository;

/// Fully wired service type used by the HTTP layer.
pub type WiredAccountService = AccountService<
    PostgresAccountRepository,
    PostgresOrganizationRepository,
    SmtpMailer,
    HttpDirectoryClient,
>;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<WiredAccountService>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(
    account_service: Arc<WiredAccountService>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
        jwt_expiration_hours,
    };

    let public_routes = Router::new()
        .route("/api/accounts", post(register_account))
        .route("/api/auth/login", post(authenticate))
        .route("/api/auth/magic-link", post(request_magic_link))
        .route("/api/auth/magic-link/login", post(login_with_magic_link))
        .route(
            "/api/accounts/verification-email",
            post(request_verification_email),
        )
        .route("/api/accounts/verify-email", post(verify_email))
        .route("/api/auth/password-reset", post(request_password_reset))
        .route("/api/auth/password-reset/confirm", post(reset_password))
        .route(
            "/api/organizations/official-contact/confirm",
            post(confirm_contact_email),
        );

    let protected_routes = Router::new()
        .route(
            "/api/organizations/:organization_id/official-contact/verification",
            post(request_contact_email_verification),
        )
        .route(
            "/api/accounts/:account_id/personal-information",
            patch(update_personal_information),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
