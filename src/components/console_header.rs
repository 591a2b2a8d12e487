//! Top bar shared by every signed-in page: branding, section links, the
//! current user and sign-out.

#[cfg(test)]
#[path = "console_header_test.rs"]
mod console_header_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::{translate, use_app, use_session, use_site};

/// Section links as `(path, label key)`. Admin-only links are appended last.
pub(crate) fn nav_items(is_admin: bool) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![
        ("/certificates", "nav.certificates"),
        ("/workspaces", "nav.workspaces"),
        ("/profile", "nav.profile"),
    ];
    if is_admin {
        items.push(("/users", "nav.users"));
    }
    items
}

#[component]
pub fn ConsoleHeader() -> impl IntoView {
    let app = use_app();
    let site = use_site();
    let session = use_session();

    let logout_label = translate(app, "nav.logout");

    // Logging out notifies the session mirror, and the guard redirects.
    let on_logout = move |_: leptos::ev::MouseEvent| {
        app.with_value(|ctx| ctx.session().logout());
    };

    view! {
        <header class="console-header">
            <div class="console-header__brand">
                <span class="console-header__title">{move || site.get().title}</span>
                <span class="console-header__subtitle">{move || site.get().subtitle}</span>
            </div>
            <nav class="console-header__nav">
                {move || {
                    nav_items(session.with(|s| s.is_admin()))
                        .into_iter()
                        .map(|(href, key)| {
                            let label = translate(app, key);
                            view! { <A href=href>{label}</A> }
                        })
                        .collect_view()
                }}
            </nav>
            <div class="console-header__user">
                <span>
                    {move || {
                        session.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default())
                    }}
                </span>
                <button class="btn" on:click=on_logout>{logout_label}</button>
            </div>
        </header>
    }
}
