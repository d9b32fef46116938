// Library root
// -----------
// Shared code for the `myapp` and `serving` binaries.
//
// Module responsibilities:
// - `config`: the JSON key-value file holding the cached token.
// - `token`: expiry check and the refresh-by-prompt lifecycle.
// - `ui`: terminal prompt and status output.
// - `api`: blocking client for the random-user demo API.
// - `cli`: argument parsing, logging setup and command dispatch for `myapp`.
// - `serving`: the CRUD-named stub commands of `serving`.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod serving;
pub mod token;
pub mod ui;

pub use config::ConfigStore;
pub use error::{CredentialError, CredentialResult};
pub use token::{CredentialRecord, TokenLifecycleManager, TokenOutcome, TokenPrompt};
