//! Backend location for the browser build.
//!
//! The backend is assumed to run on the page's host at port 5000 unless the
//! build sets `APP_BACKEND_HOST` (e.g. `https://api.example.org`) and/or
//! `APP_BACKEND_PORT`.

use session::ApiConfig;

/// Resolve the API base for the current page.
pub fn api_config() -> ApiConfig {
    ApiConfig::resolve(
        &page_hostname(),
        option_env!("APP_BACKEND_HOST"),
        option_env!("APP_BACKEND_PORT"),
    )
}

fn page_hostname() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|window| window.location().hostname().ok())
            .unwrap_or_else(|| "localhost".to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        "localhost".to_owned()
    }
}
