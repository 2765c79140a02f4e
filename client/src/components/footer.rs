//! Copyright line linking the API root.

#[cfg(test)]
#[path = "footer_test.rs"]
mod footer_test;

use leptos::prelude::*;
use session::ApiConfig;

fn current_year() -> Option<u32> {
    #[cfg(feature = "csr")]
    {
        Some(js_sys::Date::new_0().get_full_year())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn year_prefix(year: Option<u32>) -> String {
    year.map(|year| format!("{year} ")).unwrap_or_default()
}

#[component]
pub fn Copyright() -> impl IntoView {
    let root = expect_context::<ApiConfig>().root();
    let href = root.clone();
    let year = year_prefix(current_year());

    view! {
        <p class="copyright">
            " Copyright © "
            {year}
            <a href=href>{root}</a>
        </p>
    }
}
