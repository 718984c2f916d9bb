//! PageFrame: root wrapper of every screen.
//!
//! Sets `id` (`"{entity}--{view}"`, e.g. `"a001_application--detail"`) and
//! `data-page-category` on the root element.

use leptos::prelude::*;

pub const PAGE_CAT_DETAIL: &str = "detail";
pub const PAGE_CAT_POPUP: &str = "popup";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_POPUP => "page page--popup",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
