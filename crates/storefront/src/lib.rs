//! Eliminator VIT Service storefront library.
//!
//! This crate provides the storefront as a library so the binary and the
//! integration tests build the exact same router.
//!
//! # Architecture
//!
//! - Axum web framework, server-rendered pages, no client-side scripts
//! - Askama templates for the page shell and views
//! - tower-sessions (in-memory) for page-session state: visitor and cart
//! - Long-lived cookies for the remembered visitor name
//! - Checkout and support handed off to WhatsApp click-to-chat links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    extract::Request,
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory holding stylesheets and images.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the full storefront router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(routes::health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(routes::not_found)
        .layer(session_layer)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_lock_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
