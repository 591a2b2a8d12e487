//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard and the authorizing API client; mutated only
//! through `login`, `logout` and `set_user`, each of which writes the
//! persisted credential mirror in the same call.
//!
//! DESIGN
//! ======
//! Token and user are an independently settable pair rather than one
//! optional struct: `set_user` replaces the profile after an edit while the
//! token stays as it is. `login` and `logout` always move both together, and
//! a persisted record whose profile cannot be read restores as signed out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;

use async_trait::async_trait;

use crate::net::error::ApiError;
use crate::net::types::{Credentials, LoginResponse, ROLE_USER, User};
use crate::util::storage::CredentialStore;

/// Whatever exchanges credentials for a token and profile.
#[async_trait(?Send)]
pub trait Authenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
}

/// Current token and profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn role(&self) -> &str {
        self.user.as_ref().map_or(ROLE_USER, |u| u.role.as_str())
    }
}

type Listener = Box<dyn Fn()>;

/// Process-wide session store, shared through `Rc`.
pub struct SessionState {
    session: RefCell<Session>,
    store: CredentialStore,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionState {
    /// Seed the session from persisted credentials.
    ///
    /// A malformed persisted profile discards the whole record: the session
    /// starts unauthenticated and both entries are removed.
    pub fn restore(store: CredentialStore) -> Self {
        let persisted = store.load();
        let session = if persisted.user_malformed {
            log::warn!("persisted profile unreadable; starting signed out");
            store.clear();
            Session::default()
        } else {
            Session { token: persisted.token, user: persisted.user }
        };
        if session.is_authenticated() {
            log::info!("restored session for {}", session.user.as_ref().map_or("unknown user", |u| u.username.as_str()));
        }
        Self { session: RefCell::new(session), store, listeners: RefCell::new(Vec::new()) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.borrow().is_admin()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user.clone()
    }

    /// Role of the current user, or `user` when no profile is loaded.
    pub fn role(&self) -> String {
        self.session.borrow().role().to_owned()
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Exchange credentials for a session.
    ///
    /// On success token and user are replaced together and persisted. On
    /// failure the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Propagates the authenticator's error for display by the caller.
    pub async fn login<A>(&self, authenticator: &A, credentials: &Credentials) -> Result<User, ApiError>
    where
        A: Authenticator + ?Sized,
    {
        let LoginResponse { token, user, .. } = authenticator.authenticate(credentials).await?;

        self.store.save(&token, &user);
        {
            let mut session = self.session.borrow_mut();
            session.token = Some(token);
            session.user = Some(user.clone());
        }
        log::info!("signed in as {} ({})", user.username, user.role);
        self.notify();
        Ok(user)
    }

    /// Clear token and user in memory and in storage. Idempotent.
    pub fn logout(&self) {
        let was_authenticated = {
            let mut session = self.session.borrow_mut();
            let was = session.token.is_some() || session.user.is_some();
            *session = Session::default();
            was
        };
        self.store.clear();
        if was_authenticated {
            log::info!("signed out");
        }
        self.notify();
    }

    /// Replace the profile without touching the token.
    pub fn set_user(&self, user: User) {
        self.store.save_user(&user);
        self.session.borrow_mut().user = Some(user);
        self.notify();
    }

    /// Register a callback run after every mutation.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }
}
