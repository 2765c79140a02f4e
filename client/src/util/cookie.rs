//! `document.cookie` token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser's cookie jar is the persistence medium for the operator's
//! bearer token; it also enforces the seven-day expiry. Outside the browser
//! (native tests) every call is a no-op and the jar reads as empty.

use std::time::Duration;

use session::{StoreError, TokenStore};

/// Token store backed by the page's cookies under [`session::TOKEN_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieTokenStore;

#[cfg(feature = "csr")]
fn html_document() -> Result<web_sys::HtmlDocument, StoreError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StoreError::Unavailable("no html document".to_owned()))
}

#[cfg(feature = "csr")]
fn write_cookie(value: &str) -> Result<(), StoreError> {
    html_document()?
        .set_cookie(value)
        .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let cookies = html_document().ok()?.cookie().ok()?;
            session::store::read_cookie(&cookies, session::TOKEN_KEY)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str, ttl: Duration) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            write_cookie(&session::store::set_cookie_value(token, ttl))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, ttl);
            Ok(())
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            write_cookie(&session::store::clear_cookie_value())
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
