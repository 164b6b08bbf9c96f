//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Name-only sign-in and silent resume
//! - `messaging` - WhatsApp click-to-chat links for checkout and support
//! - `session_store` - Durable visitor memory (`username`, `registered`)

pub mod auth;
pub mod messaging;
pub mod session_store;

pub use auth::{AuthService, AuthState, LoginRejection};
pub use messaging::MessagingLink;
pub use session_store::{CookieStorage, DurableStorage, MemoryStorage, SavedSession, SessionStore};
