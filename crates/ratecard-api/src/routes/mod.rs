//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, dashboard, health, ports, rates, shipping_lines, users};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, api_v1_routes())
}

/// Health check routes, kept outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new().nest(
        API_PREFIX,
        Router::new()
            .route("/health", get(health::health_check))
            .route("/health/ready", get(health::readiness_check)),
    )
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(rate_routes())
        .merge(port_routes())
        .merge(shipping_line_routes())
        .merge(user_routes())
        .merge(dashboard_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

fn rate_routes() -> Router<AppState> {
    Router::new()
        // Public
        .route("/rates/search", get(rates::search_rates))
        // Admin
        .route("/rates", get(rates::list_rates).post(rates::create_rates))
        .route(
            "/rates/:id",
            get(rates::get_rate)
                .put(rates::update_rate)
                .delete(rates::delete_rate),
        )
        .route("/rates/:id/history", get(rates::rate_history))
        .route("/rates/:id/notes", get(rates::list_notes).post(rates::add_note))
}

fn port_routes() -> Router<AppState> {
    Router::new()
        .route("/ports", get(ports::list_ports).post(ports::create_port))
        .route("/ports/search", get(ports::search_ports))
        .route(
            "/ports/:id",
            get(ports::get_port)
                .put(ports::update_port)
                .delete(ports::delete_port),
        )
}

fn shipping_line_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shipping-lines",
            get(shipping_lines::list_shipping_lines).post(shipping_lines::create_shipping_line),
        )
        .route("/shipping-lines/search", get(shipping_lines::search_shipping_lines))
        .route(
            "/shipping-lines/:id",
            get(shipping_lines::get_shipping_line)
                .put(shipping_lines::update_shipping_line)
                .delete(shipping_lines::delete_shipping_line),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/recent-activity", get(dashboard::recent_activity))
        .route("/dashboard/historical-activity", get(dashboard::historical_activity))
}
