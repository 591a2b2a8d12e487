//! Application context built once at startup.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router, the pages and the API client all need the same session and
//! site state. Instead of module-level globals, `AppContext` is constructed
//! once and handed to the root component, which provides it to the tree.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::rc::Rc;

use crate::config::ApiConfig;
use crate::i18n::I18n;
use crate::net::client::ApiClient;
use crate::net::transport::Transport;
use crate::state::session::SessionState;
use crate::state::site::SiteState;
use crate::util::navigator::Navigator;
use crate::util::storage::{CredentialStore, KeyValueStore};

#[derive(Clone)]
pub struct AppContext {
    session: Rc<SessionState>,
    api: ApiClient,
    site: Rc<SiteState>,
    i18n: Rc<I18n>,
}

impl AppContext {
    /// Wire the stores and the API client over the given platform seams.
    pub fn new(
        config: ApiConfig,
        storage: Rc<dyn KeyValueStore>,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
        browser_language: Option<&str>,
    ) -> Self {
        let session = Rc::new(SessionState::restore(CredentialStore::new(Rc::clone(&storage))));
        let api = ApiClient::new(config, transport, Rc::clone(&session), navigator);
        let site = Rc::new(SiteState::new(Rc::new(api.clone())));
        let i18n = Rc::new(I18n::bootstrap(storage, browser_language));
        Self { session, api, site, i18n }
    }

    /// Context backed by `localStorage`, `fetch` and `location`.
    #[cfg(feature = "csr")]
    pub fn browser() -> Self {
        use crate::net::transport::GlooTransport;
        use crate::util::navigator::BrowserNavigator;
        use crate::util::storage::BrowserStorage;

        let language = crate::i18n::browser_language();
        Self::new(
            ApiConfig::from_build_env(),
            Rc::new(BrowserStorage),
            Rc::new(GlooTransport),
            Rc::new(BrowserNavigator),
            language.as_deref(),
        )
    }

    pub fn session(&self) -> &Rc<SessionState> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn site(&self) -> &Rc<SiteState> {
        &self.site
    }

    pub fn i18n(&self) -> &Rc<I18n> {
        &self.i18n
    }
}
