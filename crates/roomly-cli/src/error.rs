use std::io;

use roomly_core::views::FormError;
use roomly_core::{BackendError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] roomly_core::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("No available room matches '{0}' for this slot")]
    RoomNotFound(String),
    #[error(
        "Backend is not configured. Run `roomly config init --supabase-url <URL> --supabase-anon-key <KEY>`, or set SUPABASE_URL and SUPABASE_ANON_KEY."
    )]
    NotConfigured,
}
