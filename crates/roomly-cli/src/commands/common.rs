use std::env;
use std::sync::Arc;

use roomly_core::config::{normalize_text_option, resolve_optional_backend_config};
use roomly_core::views::{RoomCard, RoomListView};
use roomly_core::{
    BackendConfig, BookingBackend, DisplayConfig, Room, RoomStore, SupabaseBackend, SystemClock,
};
use serde::Serialize;

use crate::config_profiles::{default_config_path, CliProfilesConfig, PROFILE_ENV};
use crate::error::CliError;

pub const SUPABASE_URL_ENV: [&str; 2] = ["ROOMLY_SUPABASE_URL", "SUPABASE_URL"];
pub const SUPABASE_ANON_KEY_ENV: [&str; 2] = ["ROOMLY_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];
pub const DISPLAY_UTC_OFFSET_ENV: &str = "ROOMLY_DISPLAY_UTC_OFFSET";

/// Settings passed as global flags.
#[derive(Debug, Clone, Default)]
pub struct GlobalFlags {
    pub profile: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub utc_offset: Option<i32>,
}

/// Settings after merging flags, environment and the selected profile.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub profile_name: String,
    pub backend: Option<BackendConfig>,
    pub display: DisplayConfig,
}

impl ResolvedSettings {
    pub fn require_backend(&self) -> Result<&BackendConfig, CliError> {
        self.backend.as_ref().ok_or(CliError::NotConfigured)
    }
}

pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn first_env(env: &dyn Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| normalize_text_option(env(name)))
}

/// Display offset from the environment, rejecting values that are not whole minutes.
pub fn env_utc_offset(env: &dyn Fn(&str) -> Option<String>) -> Result<Option<i32>, CliError> {
    first_env(env, &[DISPLAY_UTC_OFFSET_ENV])
        .map(|raw| {
            raw.parse::<i32>().map_err(|_| {
                CliError::Config(format!(
                    "{DISPLAY_UTC_OFFSET_ENV} must be a whole number of minutes, got '{raw}'"
                ))
            })
        })
        .transpose()
}

pub fn resolve_settings(
    flags: &GlobalFlags,
    config: &CliProfilesConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedSettings, CliError> {
    let profile_name =
        config.resolve_profile_name(flags.profile.as_deref(), env(PROFILE_ENV).as_deref());
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let supabase_url = normalize_text_option(flags.supabase_url.clone())
        .or_else(|| first_env(env, &SUPABASE_URL_ENV))
        .or_else(|| profile.supabase_url());
    let supabase_anon_key = normalize_text_option(flags.supabase_anon_key.clone())
        .or_else(|| first_env(env, &SUPABASE_ANON_KEY_ENV))
        .or_else(|| profile.supabase_anon_key());
    let backend = resolve_optional_backend_config(supabase_url, supabase_anon_key)?;

    let env_offset = env_utc_offset(env)?;
    let utc_offset = flags
        .utc_offset
        .or(env_offset)
        .or(profile.display_utc_offset_minutes)
        .unwrap_or_default();
    let display = DisplayConfig::with_utc_offset_minutes(utc_offset)?;

    Ok(ResolvedSettings {
        profile_name,
        backend,
        display,
    })
}

/// Resolve settings from the process environment and the on-disk profiles.
pub fn load_settings(flags: &GlobalFlags) -> Result<ResolvedSettings, CliError> {
    let path = default_config_path().map_err(CliError::Config)?;
    let config = CliProfilesConfig::load_from_path(&path).map_err(CliError::Config)?;
    resolve_settings(flags, &config, &process_env)
}

pub fn open_store(settings: &ResolvedSettings) -> Result<RoomStore<SupabaseBackend>, CliError> {
    let backend = SupabaseBackend::new(settings.require_backend()?)?;
    tracing::debug!(profile = %settings.profile_name, "Opened Supabase backend");
    Ok(RoomStore::new(Arc::new(backend), Arc::new(SystemClock)))
}

/// Fail with the store's error if the last action set one.
pub fn ensure_no_store_error<B: BookingBackend>(store: &RoomStore<B>) -> Result<(), CliError> {
    match store.error() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

pub fn room_cards(rooms: &[Room]) -> Vec<RoomCard> {
    rooms.iter().map(RoomCard::from).collect()
}

pub fn render_room_lines(rooms: &[Room]) -> Vec<String> {
    RoomListView::Rooms(room_cards(rooms)).render_lines()
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
