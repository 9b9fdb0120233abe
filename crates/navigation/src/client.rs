//! Identity SDK boundary.
//!
//! The SDK itself is an external collaborator; this module only owns the
//! contract we call through and the process-wide client instance.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use taskflow_access::SessionUser;
use thiserror::Error;

pub const PROJECT_ID_VAR: &str = "APPER_PROJECT_ID";
pub const PUBLIC_KEY_VAR: &str = "APPER_PUBLIC_KEY";

/// Failure reported by the identity SDK. The SDK's errors are opaque to us.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("identity sdk error: {0}")]
pub struct SdkError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("missing client configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("identity sdk is not loaded yet")]
    SdkNotLoaded,

    #[error("identity client is already being initialized")]
    InitInProgress,

    #[error("failed to construct identity client: {0}")]
    Construction(String),
}

/// Operations the navigation layer needs from the identity SDK.
pub trait IdentitySdk {
    /// Current session, `None` when signed out.
    fn get_session(&self) -> Result<Option<SessionUser>, SdkError>;

    fn login(&self) -> Result<SessionUser, SdkError>;

    fn logout(&self) -> Result<(), SdkError>;
}

/// Project credentials handed to the SDK client on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project_id: String,
    pub public_key: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (environment, test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = lookup(PROJECT_ID_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ClientError::MissingConfig(PROJECT_ID_VAR))?;
        let public_key = lookup(PUBLIC_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ClientError::MissingConfig(PUBLIC_KEY_VAR))?;

        Ok(Self {
            project_id,
            public_key,
        })
    }
}

/// Lazily constructed, exclusively owned SDK client.
///
/// Single-threaded: an in-flight flag (not a lock) guards construction, so a
/// re-entrant call made while the client is being built is rejected.
#[derive(Debug)]
pub struct ClientSlot<C> {
    client: RefCell<Option<Rc<C>>>,
    initializing: Cell<bool>,
}

impl<C> Default for ClientSlot<C> {
    fn default() -> Self {
        Self {
            client: RefCell::new(None),
            initializing: Cell::new(false),
        }
    }
}

impl<C> ClientSlot<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the client, constructing it with `init` on first use.
    ///
    /// A re-entrant call made during construction gets
    /// [`ClientError::InitInProgress`]. Construction failures are logged and
    /// returned; the next call tries again.
    pub fn get_or_init<F>(&self, init: F) -> Result<Rc<C>, ClientError>
    where
        F: FnOnce() -> Result<C, ClientError>,
    {
        if let Some(client) = self.client.borrow().as_ref() {
            return Ok(Rc::clone(client));
        }

        if self.initializing.get() {
            return Err(ClientError::InitInProgress);
        }

        self.initializing.set(true);
        let result = init();
        self.initializing.set(false);

        match result {
            Ok(client) => {
                let client = Rc::new(client);
                *self.client.borrow_mut() = Some(Rc::clone(&client));
                Ok(client)
            }
            Err(err @ ClientError::SdkNotLoaded) => {
                tracing::warn!("identity sdk not loaded yet");
                Err(err)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to initialize identity client");
                Err(err)
            }
        }
    }

    /// [`ClientSlot::get_or_init`] with credentials read from the environment
    /// (`APPER_PROJECT_ID`, `APPER_PUBLIC_KEY`).
    pub fn get_or_init_from_env<F>(&self, build: F) -> Result<Rc<C>, ClientError>
    where
        F: FnOnce(ClientConfig) -> Result<C, ClientError>,
    {
        self.get_or_init(|| build(ClientConfig::from_env()?))
    }

    /// The client if it has already been constructed.
    pub fn get(&self) -> Option<Rc<C>> {
        self.client.borrow().clone()
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing.get()
    }

    /// Drop the client so the next access constructs a fresh one.
    pub fn reset(&self) {
        self.client.borrow_mut().take();
        self.initializing.set(false);
    }
}
