//! Site branding state (console title and subtitle).
//!
//! DESIGN
//! ======
//! The settings fetch is single-flight: the first `load` memoizes a shared
//! future and every later caller gets a clone of it, so concurrent callers
//! observe one fetch and one result. The memo outlives completion; only
//! `reload` discards it. A failed fetch is never surfaced: defaults stay in
//! place and the store still reports itself loaded.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::net::error::ApiError;
use crate::net::types::SiteSettings;
use crate::util::document;

pub const DEFAULT_TITLE: &str = "ACME Console";

/// Whatever serves the public site settings.
#[async_trait(?Send)]
pub trait SiteSource {
    async fn fetch_site(&self) -> Result<SiteSettings, ApiError>;
}

/// Branding currently in effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    pub title: String,
    pub subtitle: String,
    pub loaded: bool,
}

impl Default for Site {
    fn default() -> Self {
        Self { title: DEFAULT_TITLE.to_owned(), subtitle: String::new(), loaded: false }
    }
}

/// Memoized in-flight (or finished) settings load.
pub type SiteLoad = Shared<LocalBoxFuture<'static, Site>>;

pub struct SiteState {
    site: Rc<RefCell<Site>>,
    source: Rc<dyn SiteSource>,
    pending: RefCell<Option<SiteLoad>>,
}

impl SiteState {
    pub fn new(source: Rc<dyn SiteSource>) -> Self {
        Self { site: Rc::new(RefCell::new(Site::default())), source, pending: RefCell::new(None) }
    }

    /// Load settings once; concurrent and later callers share the same load.
    pub fn load(&self) -> SiteLoad {
        let mut pending = self.pending.borrow_mut();
        if let Some(load) = pending.as_ref() {
            return load.clone();
        }

        let site = Rc::clone(&self.site);
        let source = Rc::clone(&self.source);
        let load = async move {
            match source.fetch_site().await {
                Ok(settings) => {
                    apply_settings(&mut site.borrow_mut(), settings);
                    document::set_title(&site.borrow().title);
                }
                Err(e) => {
                    log::warn!("site settings unavailable, keeping defaults: {e}");
                    site.borrow_mut().loaded = true;
                }
            }
            site.borrow().clone()
        }
        .boxed_local()
        .shared();

        *pending = Some(load.clone());
        load
    }

    /// Drop the memo and start one fresh fetch.
    pub fn reload(&self) -> SiteLoad {
        self.pending.borrow_mut().take();
        self.load()
    }

    /// Override title and/or subtitle locally (after an admin edit).
    pub fn update(&self, title: Option<&str>, subtitle: Option<&str>) -> Site {
        let snapshot = {
            let mut site = self.site.borrow_mut();
            if let Some(title) = title {
                title.clone_into(&mut site.title);
            }
            if let Some(subtitle) = subtitle {
                subtitle.clone_into(&mut site.subtitle);
            }
            site.clone()
        };
        document::set_title(&snapshot.title);
        snapshot
    }

    pub fn title(&self) -> String {
        self.site.borrow().title.clone()
    }

    pub fn subtitle(&self) -> String {
        self.site.borrow().subtitle.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.site.borrow().loaded
    }

    pub fn snapshot(&self) -> Site {
        self.site.borrow().clone()
    }
}

/// Non-empty server values replace the current ones.
fn apply_settings(site: &mut Site, settings: SiteSettings) {
    if !settings.title.is_empty() {
        site.title = settings.title;
    }
    if !settings.subtitle.is_empty() {
        site.subtitle = settings.subtitle;
    }
    site.loaded = true;
}
