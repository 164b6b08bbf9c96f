//! Storefront error type.
//!
//! Handlers return [`Result`]. Visitor mistakes map to 4xx responses with a
//! short message; session store failures are reported to Sentry and shown
//! as a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use eliminator_core::ProductId;

/// Errors a storefront request can end in.
#[derive(Debug, Error)]
pub enum AppError {
    /// Page session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A form referenced a product the catalog does not have.
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnknownProduct(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Text safe to show the visitor.
    fn public_message(&self) -> String {
        match self {
            Self::Session(_) => "Something went wrong, please try again".to_string(),
            Self::UnknownProduct(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a visitor action as a Sentry breadcrumb.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "2")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let data = data
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        })
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_failure() -> AppError {
        AppError::Session(tower_sessions::session::Error::Store(
            tower_sessions::session_store::Error::Backend("down".to_string()),
        ))
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let err = AppError::UnknownProduct(ProductId::new(9));
        assert_eq!(err.to_string(), "Unknown product 9");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_session_failure_hides_details() {
        let err = session_failure();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("down"));
    }
}
