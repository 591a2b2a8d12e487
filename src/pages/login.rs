//! Username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::app::{translate, use_app, use_site};
use crate::net::types::Credentials;

/// Trim the username and require both fields. Passwords are sent verbatim.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials::new(username, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let site = use_site();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let title_label = translate(app, "login.title");
    let username_label = translate(app, "login.username");
    let password_label = translate(app, "login.password");
    let submit_label = translate(app, "login.submit");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match ctx.session().login(ctx.api(), &credentials).await {
                    Ok(_) => navigate(crate::routes::HOME_PATH, leptos_router::NavigateOptions::default()),
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || site.get().title}</h1>
                <Show when=move || !site.get().subtitle.is_empty()>
                    <p class="login-card__subtitle">{move || site.get().subtitle}</p>
                </Show>
                <h2 class="login-card__heading">{title_label}</h2>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder=username_label
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder=password_label
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {submit_label}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
