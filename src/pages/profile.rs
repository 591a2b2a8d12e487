//! Profile editing and password change for the signed-in user.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::app::{translate, use_app, use_session};
use crate::components::console_header::ConsoleHeader;
use crate::net::types::{ProfileUpdate, User};

/// Minimum password length the backend accepts.
const MIN_PASSWORD_LEN: usize = 6;

/// Changed, non-blank fields relative to `current`, or `None` when nothing
/// would change.
pub(crate) fn profile_update(current: Option<&User>, nickname: &str, email: &str) -> Option<ProfileUpdate> {
    let changed = |value: &str, existing: Option<&str>| {
        let value = value.trim();
        (!value.is_empty() && Some(value) != existing).then(|| value.to_owned())
    };
    let update = ProfileUpdate {
        nickname: changed(nickname, current.map(|u| u.nickname.as_str())),
        email: changed(email, current.map(|u| u.email.as_str())),
    };
    (update.nickname.is_some() || update.email.is_some()).then_some(update)
}

pub(crate) fn validate_password_change(old_password: &str, new_password: &str) -> Result<(), &'static str> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err("Enter both the current and the new password.");
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err("New password must be at least 6 characters.");
    }
    Ok(())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let app = use_app();
    let session = use_session();

    let current = session.get_untracked().user;
    let nickname = RwSignal::new(current.as_ref().map(|u| u.nickname.clone()).unwrap_or_default());
    let email = RwSignal::new(current.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let profile_info = RwSignal::new(String::new());
    let password_info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(update) = session.with(|s| profile_update(s.user.as_ref(), &nickname.get(), &email.get())) else {
            return;
        };
        busy.set(true);
        profile_info.set(String::new());

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                match ctx.api().update_profile(&update).await {
                    Ok(user) => {
                        ctx.session().set_user(user);
                        profile_info.set(translate(app, "profile.saved"));
                    }
                    Err(e) => profile_info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = update;
            busy.set(false);
        }
    };

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let old_value = old_password.get();
        let new_value = new_password.get();
        if let Err(message) = validate_password_change(&old_value, &new_value) {
            password_info.set(message.to_owned());
            return;
        }
        busy.set(true);
        password_info.set(String::new());

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                match ctx.api().change_password(&old_value, &new_value).await {
                    Ok(()) => {
                        old_password.set(String::new());
                        new_password.set(String::new());
                        password_info.set(translate(app, "profile.password_changed"));
                    }
                    Err(e) => password_info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (old_value, new_value);
            busy.set(false);
        }
    };

    view! {
        <div class="console-page">
            <ConsoleHeader/>
            <main class="console-page__body">
                <h2>{translate(app, "nav.profile")}</h2>
                <p class="profile-username">
                    {move || session.with(|s| s.user.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
                </p>
                <form class="profile-form" on:submit=on_save_profile>
                    <label>
                        {translate(app, "profile.nickname")}
                        <input
                            type="text"
                            prop:value=move || nickname.get()
                            on:input=move |ev| nickname.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {translate(app, "profile.email")}
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {translate(app, "profile.save")}
                    </button>
                    <Show when=move || !profile_info.get().is_empty()>
                        <p class="profile-message">{move || profile_info.get()}</p>
                    </Show>
                </form>
                <form class="profile-form" on:submit=on_change_password>
                    <label>
                        {translate(app, "profile.old_password")}
                        <input
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || old_password.get()
                            on:input=move |ev| old_password.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {translate(app, "profile.new_password")}
                        <input
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        {translate(app, "profile.change_password")}
                    </button>
                    <Show when=move || !password_info.get().is_empty()>
                        <p class="profile-message">{move || password_info.get()}</p>
                    </Show>
                </form>
            </main>
        </div>
    }
}
