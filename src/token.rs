// Token lifecycle: decide whether the cached token is still usable and,
// when it is not, ask the user for a new one and persist it together with
// the static account fields.

use crate::config::ConfigStore;
use crate::error::{CredentialError, CredentialResult};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::io;

pub const TOKEN_KEY: &str = "myapp_token";
pub const EXPIRE_DATE_KEY: &str = "expire_date";
pub const RESOURCE_NAME_KEY: &str = "RESOURCE_NAME";
pub const CLIENT_ID_KEY: &str = "CLIENT_ID";
pub const SERVICE_URL_KEY: &str = "myapp_URL";

pub const RESOURCE_NAME: &str = "APP-DYNAMIC-myapp-RESOOURE";
pub const SERVICE_URL: &str = "https://myapp-prod.com";

/// Environment variable holding the account name stored as `CLIENT_ID`.
pub const ACCOUNT_ENV: &str = "USERNAME";

/// Tokens with less than this many minutes left are refreshed.
pub const EXPIRY_BUFFER_MINUTES: i64 = 57;
/// Lifetime assumed for a freshly entered token.
pub const TOKEN_LIFETIME_HOURS: i64 = 1;

/// The cached credential as it appears in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    pub token: String,
    /// RFC3339 timestamp
    pub expires_at: String,
    pub resource_name: String,
    pub client_id: String,
    pub service_url: String,
}

impl CredentialRecord {
    pub fn from_store(store: &ConfigStore) -> Self {
        CredentialRecord {
            token: store.get(TOKEN_KEY),
            expires_at: store.get(EXPIRE_DATE_KEY),
            resource_name: store.get(RESOURCE_NAME_KEY),
            client_id: store.get(CLIENT_ID_KEY),
            service_url: store.get(SERVICE_URL_KEY),
        }
    }

    pub fn apply_to(&self, store: &mut ConfigStore) {
        store.set(TOKEN_KEY, self.token.as_str());
        store.set(EXPIRE_DATE_KEY, self.expires_at.as_str());
        store.set(RESOURCE_NAME_KEY, self.resource_name.as_str());
        store.set(CLIENT_ID_KEY, self.client_id.as_str());
        store.set(SERVICE_URL_KEY, self.service_url.as_str());
    }
}

/// True when `expires_at` does not parse as RFC3339 or is less than
/// `EXPIRY_BUFFER_MINUTES` after `now`.
pub fn is_expired_at(expires_at: &str, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(expires_at) {
        Ok(expiry) => {
            expiry.with_timezone(&Utc) - now < Duration::minutes(EXPIRY_BUFFER_MINUTES)
        }
        Err(err) => {
            tracing::debug!(expires_at, %err, "unparseable expiration date");
            true
        }
    }
}

pub fn is_expired(expires_at: &str) -> bool {
    is_expired_at(expires_at, Utc::now())
}

/// Where a cached record stands before any refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoRecord,
    Valid,
    /// Expired, expiring within the buffer, or with an unreadable expiry.
    Expired,
}

impl TokenState {
    pub fn of(record: &CredentialRecord, now: DateTime<Utc>) -> Self {
        if record.token.is_empty() {
            TokenState::NoRecord
        } else if is_expired_at(&record.expires_at, now) {
            TokenState::Expired
        } else {
            TokenState::Valid
        }
    }
}

/// Result of a successful `ensure_valid_token` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// The cached token was still valid; nothing was written.
    Existing(CredentialRecord),
    /// A new token was entered and persisted.
    Refreshed(CredentialRecord),
}

impl TokenOutcome {
    pub fn record(&self) -> &CredentialRecord {
        match self {
            TokenOutcome::Existing(record) | TokenOutcome::Refreshed(record) => record,
        }
    }

    pub fn was_refreshed(&self) -> bool {
        matches!(self, TokenOutcome::Refreshed(_))
    }
}

/// Source of a new token value, normally an interactive terminal prompt.
pub trait TokenPrompt {
    fn prompt_for_token(&mut self) -> CredentialResult<String>;
}

/// Keeps a usable token in the config store, prompting when needed.
pub struct TokenLifecycleManager<P> {
    store: ConfigStore,
    prompt: P,
    account: Option<String>,
}

impl<P: TokenPrompt> TokenLifecycleManager<P> {
    /// Build a manager whose account name comes from `USERNAME`.
    pub fn new(store: ConfigStore, prompt: P) -> Self {
        let account = std::env::var(ACCOUNT_ENV).ok();
        Self::with_account(store, prompt, account)
    }

    pub fn with_account(store: ConfigStore, prompt: P, account: Option<String>) -> Self {
        TokenLifecycleManager {
            store,
            prompt,
            account,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Make sure a non-expired token is cached, refreshing it if necessary.
    ///
    /// A config file that cannot be read is logged and treated as empty.
    /// Prompt, environment and write failures are returned as-is and leave
    /// both the file and the in-memory store untouched.
    pub fn ensure_valid_token(&mut self) -> CredentialResult<TokenOutcome> {
        self.store.ensure_exists()?;
        if let Err(err) = self.store.load() {
            if !err.is_soft() {
                return Err(err);
            }
            tracing::warn!(error = ?err, "continuing with an empty config");
        }

        let now = Utc::now();
        let record = CredentialRecord::from_store(&self.store);
        match TokenState::of(&record, now) {
            TokenState::Valid => {
                tracing::info!(expires_at = %record.expires_at, "cached token is valid");
                Ok(TokenOutcome::Existing(record))
            }
            state => {
                tracing::info!(?state, "refreshing token");
                self.refresh(now).map(TokenOutcome::Refreshed)
            }
        }
    }

    fn refresh(&mut self, now: DateTime<Utc>) -> CredentialResult<CredentialRecord> {
        let client_id = self
            .account
            .clone()
            .ok_or(CredentialError::MissingEnvironment(ACCOUNT_ENV))?;

        let token = self.prompt.prompt_for_token()?.trim().to_string();
        if token.is_empty() {
            return Err(CredentialError::PromptAborted(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no token entered",
            )));
        }

        let record = CredentialRecord {
            token,
            expires_at: (now + Duration::hours(TOKEN_LIFETIME_HOURS))
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            resource_name: RESOURCE_NAME.to_string(),
            client_id,
            service_url: SERVICE_URL.to_string(),
        };

        // Stage on a copy so a failed write leaves the loaded state as it was.
        let mut staged = self.store.clone();
        record.apply_to(&mut staged);
        staged.write()?;
        self.store = staged;

        tracing::info!(path = %self.store.path().display(), "new token written");
        Ok(record)
    }
}
