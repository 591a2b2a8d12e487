//! Locale bootstrap and the shell's message catalog.
//!
//! SYSTEM CONTEXT
//! ==============
//! The saved choice wins, then the browser language, then English. Only the
//! strings the application shell renders live here; view-specific catalogs
//! belong to the views.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::util::document;
use crate::util::storage::KeyValueStore;

/// Storage entry remembering the chosen locale.
pub const LOCALE_KEY: &str = "locale";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    ZhCn,
    #[default]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::EnUs];
    pub const FALLBACK: Locale = Locale::EnUs;

    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Exact tag match against the supported locales.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }
}

/// Pick the startup locale from the saved tag and the browser language.
pub fn default_locale(saved: Option<&str>, browser_language: Option<&str>) -> Locale {
    if let Some(locale) = saved.and_then(Locale::from_tag) {
        return locale;
    }
    match browser_language {
        Some(lang) if lang.starts_with("zh") => Locale::ZhCn,
        _ => Locale::FALLBACK,
    }
}

/// `navigator.language`, when running in a browser.
pub fn browser_language() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.navigator().language())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    let text = match (locale, key) {
        (Locale::EnUs, "login.title") => "Sign in",
        (Locale::EnUs, "login.username") => "Username",
        (Locale::EnUs, "login.password") => "Password",
        (Locale::EnUs, "login.submit") => "Sign in",
        (Locale::EnUs, "nav.certificates") => "Certificates",
        (Locale::EnUs, "nav.workspaces") => "Workspaces",
        (Locale::EnUs, "nav.users") => "Users",
        (Locale::EnUs, "nav.profile") => "Profile",
        (Locale::EnUs, "nav.logout") => "Sign out",
        (Locale::EnUs, "profile.nickname") => "Nickname",
        (Locale::EnUs, "profile.email") => "Email",
        (Locale::EnUs, "profile.save") => "Save",
        (Locale::EnUs, "profile.saved") => "Profile updated",
        (Locale::EnUs, "profile.old_password") => "Current password",
        (Locale::EnUs, "profile.new_password") => "New password",
        (Locale::EnUs, "profile.change_password") => "Change password",
        (Locale::EnUs, "profile.password_changed") => "Password changed",
        (Locale::EnUs, "settings.title") => "Console title",
        (Locale::EnUs, "settings.subtitle") => "Console subtitle",
        (Locale::EnUs, "settings.saved") => "Site settings saved",
        (Locale::ZhCn, "login.title") => "登录",
        (Locale::ZhCn, "login.username") => "用户名",
        (Locale::ZhCn, "login.password") => "密码",
        (Locale::ZhCn, "login.submit") => "登录",
        (Locale::ZhCn, "nav.certificates") => "证书",
        (Locale::ZhCn, "nav.workspaces") => "工作空间",
        (Locale::ZhCn, "nav.users") => "用户管理",
        (Locale::ZhCn, "nav.profile") => "个人资料",
        (Locale::ZhCn, "nav.logout") => "退出登录",
        (Locale::ZhCn, "profile.nickname") => "昵称",
        (Locale::ZhCn, "profile.email") => "邮箱",
        (Locale::ZhCn, "profile.save") => "保存",
        (Locale::ZhCn, "profile.saved") => "资料已更新",
        (Locale::ZhCn, "profile.old_password") => "当前密码",
        (Locale::ZhCn, "profile.new_password") => "新密码",
        (Locale::ZhCn, "profile.change_password") => "修改密码",
        (Locale::ZhCn, "profile.password_changed") => "密码已修改",
        (Locale::ZhCn, "settings.title") => "站点标题",
        (Locale::ZhCn, "settings.subtitle") => "站点副标题",
        (Locale::ZhCn, "settings.saved") => "站点设置已保存",
        _ => return None,
    };
    Some(text)
}

/// Active locale plus persistence of the user's choice.
pub struct I18n {
    locale: Cell<Locale>,
    store: Rc<dyn KeyValueStore>,
}

impl I18n {
    /// Resolve the startup locale and apply it to the document.
    pub fn bootstrap(store: Rc<dyn KeyValueStore>, browser_language: Option<&str>) -> Self {
        let saved = store.get(LOCALE_KEY);
        let locale = default_locale(saved.as_deref(), browser_language);
        document::set_lang(locale.tag());
        Self { locale: Cell::new(locale), store }
    }

    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    /// Switch locale. Unsupported tags are ignored and reported as `false`.
    pub fn set_locale(&self, tag: &str) -> bool {
        let Some(locale) = Locale::from_tag(tag) else {
            return false;
        };
        self.locale.set(locale);
        self.store.set(LOCALE_KEY, locale.tag());
        document::set_lang(locale.tag());
        true
    }

    /// Translate `key`, falling back to English and then to the key itself.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.locale.get(), key)
            .or_else(|| lookup(Locale::FALLBACK, key))
            .unwrap_or(key)
    }
}
