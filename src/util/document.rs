//! `<html>` document tweaks. No-ops outside the browser.

/// Set `document.title`.
pub fn set_title(title: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = title;
    }
}

/// Set the `lang` attribute on the root `<html>` element.
pub fn set_lang(lang: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("lang", lang);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = lang;
    }
}
