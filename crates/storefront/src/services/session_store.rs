//! Durable visitor memory.
//!
//! The storefront remembers a visitor's display name across visits in the
//! browser, using two string keys:
//!
//! - `username` - the display name
//! - `registered` - the literal string `"true"` once the visitor has signed in
//!
//! In the Rust model `registered` is a real `bool`; it is only turned into
//! (and decoded from) a string at the storage boundary. Any stored value
//! other than exactly `"true"` decodes as "not registered".

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use eliminator_core::DisplayName;

use crate::state::AppState;

/// Storage keys.
pub mod keys {
    /// Key for the remembered display name.
    pub const USERNAME: &str = "username";

    /// Key for the registered flag.
    pub const REGISTERED: &str = "registered";
}

/// Stored value meaning "registered".
const REGISTERED_TRUE: &str = "true";

/// Lifetime of durable cookies (ten years; effectively no expiry).
const DURABLE_COOKIE_DAYS: i64 = 3650;

/// Longest percent-encoded value a durable cookie may carry.
///
/// Browsers drop cookies over 4096 bytes counting name, value and
/// attributes; the attributes written here take well under 96 bytes.
pub const MAX_ENCODED_VALUE_LEN: usize = 4000;

/// Percent-encode a value for a durable cookie.
fn encode_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Whether `value` is small enough to be stored durably.
#[must_use]
pub fn fits_durable_storage(value: &str) -> bool {
    encode_value(value).len() <= MAX_ENCODED_VALUE_LEN
}

/// String-keyed, string-valued persistent storage.
pub trait DurableStorage {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a value.
    fn remove(&mut self, key: &str);
}

// =============================================================================
// Cookie Storage
// =============================================================================

/// Durable storage kept in long-lived browser cookies.
///
/// Extracted from the request `Cookie` header. Writes are queued and sent
/// back as `Set-Cookie` headers when the storage is returned from a handler
/// as part of the response.
///
/// ```rust,ignore
/// async fn handler(mut storage: CookieStorage) -> impl IntoResponse {
///     storage.set("username", "Alice");
///     (storage, Redirect::to("/"))
/// }
/// ```
#[derive(Debug, Default)]
pub struct CookieStorage {
    values: HashMap<String, String>,
    pending: Vec<Cookie<'static>>,
    secure: bool,
}

impl CookieStorage {
    /// Build storage from a raw `Cookie` header value.
    #[must_use]
    pub fn from_header(header: &str, secure: bool) -> Self {
        let values = Cookie::split_parse(header.to_owned())
            .filter_map(Result::ok)
            .filter_map(|cookie| {
                let value = urlencoding::decode(cookie.value()).ok()?.into_owned();
                Some((cookie.name().to_owned(), value))
            })
            .collect();

        Self {
            values,
            pending: Vec::new(),
            secure,
        }
    }

    /// `Set-Cookie` values queued by writes, in order.
    #[must_use]
    pub fn pending_headers(&self) -> Vec<String> {
        self.pending.iter().map(ToString::to_string).collect()
    }

    fn queue(&mut self, key: &str, value: String, max_age: Duration) {
        let cookie = Cookie::build((key.to_owned(), value))
            .path("/")
            .max_age(max_age)
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.secure)
            .build();
        self.pending.retain(|c| c.name() != key);
        self.pending.push(cookie);
    }
}

impl DurableStorage for CookieStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
        self.queue(key, encode_value(value), Duration::days(DURABLE_COOKIE_DAYS));
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.queue(key, String::new(), Duration::ZERO);
    }
}

impl FromRequestParts<AppState> for CookieStorage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Ok(Self::from_header(&header, state.config().is_secure()))
    }
}

impl IntoResponseParts for CookieStorage {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.pending {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(cookie = cookie.name(), "Unencodable cookie: {e}"),
            }
        }
        Ok(res)
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage, used where no browser is involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// What durable storage remembers about the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSession {
    /// Remembered display name, if any.
    pub name: Option<DisplayName>,
    /// Whether the visitor has signed in before.
    pub registered: bool,
}

impl SavedSession {
    /// The name to sign in with silently, if the visitor is registered.
    #[must_use]
    pub fn remembered_user(&self) -> Option<&DisplayName> {
        self.registered.then_some(self.name.as_ref()).flatten()
    }
}

/// Decode the stored registered flag.
#[must_use]
pub fn decode_registered(value: Option<&str>) -> bool {
    value == Some(REGISTERED_TRUE)
}

/// Encode the registered flag for storage.
#[must_use]
pub const fn encode_registered(registered: bool) -> &'static str {
    if registered { REGISTERED_TRUE } else { "false" }
}

/// Typed access to the visitor's remembered session.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: DurableStorage> SessionStore<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the remembered name and registered flag.
    ///
    /// Never fails; a first visit simply yields an empty [`SavedSession`].
    /// A stored name that no longer validates is treated as absent.
    pub fn load(&self) -> SavedSession {
        let name = self
            .storage
            .get(keys::USERNAME)
            .and_then(|raw| DisplayName::parse(&raw).ok());
        let registered = decode_registered(self.storage.get(keys::REGISTERED).as_deref());

        SavedSession { name, registered }
    }

    /// Remember `name` and mark the visitor as registered.
    pub fn save(&mut self, name: &DisplayName) {
        self.storage.set(keys::USERNAME, name.as_str());
        self.storage
            .set(keys::REGISTERED, encode_registered(true));
    }

    /// Forget the visitor.
    pub fn clear(&mut self) {
        self.storage.remove(keys::USERNAME);
        self.storage.remove(keys::REGISTERED);
    }

    /// Borrow the underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Return the underlying storage, e.g. to emit queued cookies.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
