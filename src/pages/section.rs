//! Shell for the console sections: certificates, workspaces and users.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::{translate, use_app, use_site};
use crate::components::console_header::ConsoleHeader;
use crate::routes;

/// Label key for the section a path belongs to.
pub(crate) fn section_label_key(path: &str) -> Option<&'static str> {
    let entry = routes::match_route(path)?;
    let key = match entry.name {
        "CertificateList" | "CertificateCreate" | "CertificateDetail" => "nav.certificates",
        "WorkspaceList" | "WorkspaceDetail" => "nav.workspaces",
        "UserList" => "nav.users",
        "Profile" => "nav.profile",
        _ => return None,
    };
    Some(key)
}

/// Trimmed non-empty form values, `None` for fields left blank.
pub(crate) fn settings_fields(title: &str, subtitle: &str) -> (Option<String>, Option<String>) {
    let field = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    };
    (field(title), field(subtitle))
}

#[component]
pub fn SectionPage() -> impl IntoView {
    let app = use_app();
    let location = use_location();

    let heading = move || {
        let path = location.pathname.get();
        section_label_key(&path).map(|key| translate(app, key)).unwrap_or_default()
    };
    let is_users = move || location.pathname.with(|path| path == "/users");

    view! {
        <div class="console-page">
            <ConsoleHeader/>
            <main class="console-page__body">
                <h2>{heading}</h2>
                <Show when=is_users>
                    <SiteSettingsForm/>
                </Show>
            </main>
        </div>
    }
}

/// Admin form for the console branding.
#[component]
fn SiteSettingsForm() -> impl IntoView {
    let app = use_app();
    let site = use_site();

    let title = RwSignal::new(site.get_untracked().title);
    let subtitle = RwSignal::new(site.get_untracked().subtitle);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (title_value, subtitle_value) = settings_fields(&title.get(), &subtitle.get());
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                match ctx.api().update_site_settings(title_value.as_deref(), subtitle_value.as_deref()).await {
                    Ok(_) => {
                        site.set(ctx.site().update(title_value.as_deref(), subtitle_value.as_deref()));
                        info.set(translate(app, "settings.saved"));
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (app, title_value, subtitle_value);
            busy.set(false);
        }
    };

    view! {
        <form class="settings-form" on:submit=on_save>
            <input
                class="settings-input"
                type="text"
                placeholder=translate(app, "settings.title")
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <input
                class="settings-input"
                type="text"
                placeholder=translate(app, "settings.subtitle")
                prop:value=move || subtitle.get()
                on:input=move |ev| subtitle.set(event_target_value(&ev))
            />
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {translate(app, "profile.save")}
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </form>
    }
}
