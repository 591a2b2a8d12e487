//! Forced client-side navigation.
//!
//! The API client uses this to leave the current page after an intercepted
//! 401. In the browser it is a full `location.href` assignment so no stale
//! view state survives the sign-out.

pub trait Navigator {
    fn navigate(&self, path: &str);
}

#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "csr")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::warn!("navigation to {path} failed: {e:?}");
            }
        }
    }
}
