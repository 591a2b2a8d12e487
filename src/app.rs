//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::context::AppContext;
use crate::pages::{login::LoginPage, profile::ProfilePage, section::SectionPage};
use crate::routes;
use crate::state::session::Session;
use crate::state::site::Site;

/// Context handle for components. `AppContext` is `Rc`-based, so it is kept
/// in local storage and only the `Copy` handle crosses into view closures.
pub type AppHandle = StoredValue<AppContext, LocalStorage>;

/// Root application component.
///
/// Mirrors the session and site stores into signals, provides them along
/// with the context handle, and sets up client-side routing.
#[component]
pub fn App(context: AppContext) -> impl IntoView {
    let session = RwSignal::new(context.session().snapshot());
    let site = RwSignal::new(context.site().snapshot());

    let weak = Rc::downgrade(context.session());
    context.session().subscribe(move || {
        if let Some(state) = weak.upgrade() {
            session.set(state.snapshot());
        }
    });

    #[cfg(feature = "csr")]
    {
        let load = context.site().load();
        leptos::task::spawn_local(async move {
            site.set(load.await);
        });
    }

    provide_context::<AppHandle>(StoredValue::new_local(context));
    provide_context(session);
    provide_context(site);

    view! {
        <Router>
            <NavigationGuard/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::LANDING_PATH/> }/>
                <Route path=StaticSegment("certificates") view=SectionPage/>
                <Route path=(StaticSegment("certificates"), StaticSegment("new")) view=SectionPage/>
                <Route path=(StaticSegment("certificates"), ParamSegment("id")) view=SectionPage/>
                <Route path=StaticSegment("workspaces") view=SectionPage/>
                <Route path=(StaticSegment("workspaces"), ParamSegment("id")) view=SectionPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=StaticSegment("users") view=SectionPage/>
            </Routes>
        </Router>
    }
}

/// Re-run the route guard on every path change and every session change.
#[component]
fn NavigationGuard() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move || {
        let path = location.pathname.get();
        let target = session.with(|s| routes::redirect_for(&path, s));
        if let Some(target) = target {
            log::debug!("guard redirected {path} to {target}");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Mirror of the site store for components that render branding.
pub fn use_site() -> RwSignal<Site> {
    expect_context::<RwSignal<Site>>()
}

/// Mirror of the session store for components that render identity.
pub fn use_session() -> RwSignal<Session> {
    expect_context::<RwSignal<Session>>()
}

pub fn use_app() -> AppHandle {
    expect_context::<AppHandle>()
}

/// Translate `key` in the active locale.
pub fn translate(app: AppHandle, key: &str) -> String {
    app.with_value(|ctx| ctx.i18n().t(key).to_owned())
}
