use std::path::Path;

use roomly_core::config::{is_http_url, normalize_text_option};
use roomly_core::DisplayConfig;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::commands::common::{
    env_utc_offset, process_env, render_json, resolve_settings, GlobalFlags,
    SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV,
};
use crate::config_profiles::{default_config_path, CliProfilesConfig, PROFILE_ENV};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, flags: &GlobalFlags) -> Result<Vec<String>, CliError> {
    let path = default_config_path().map_err(CliError::Config)?;
    match command {
        ConfigCommands::Init {
            profile,
            no_activate,
        } => config_init(
            &path,
            profile.as_deref().or(flags.profile.as_deref()),
            flags,
            no_activate,
            &process_env,
        ),
        ConfigCommands::Show { json } => config_show(&path, flags, json, &process_env),
    }
}

/// Write flag and environment values into a profile, keeping what is already
/// stored for anything not given.
pub fn config_init(
    path: &Path,
    profile_name: Option<&str>,
    flags: &GlobalFlags,
    no_activate: bool,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Vec<String>, CliError> {
    let mut config = CliProfilesConfig::load_from_path(path).map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name, env(PROFILE_ENV).as_deref());
    let existing = config.profile(&profile_name).cloned().unwrap_or_default();

    let supabase_url = normalize_text_option(flags.supabase_url.clone())
        .or_else(|| SUPABASE_URL_ENV.iter().find_map(|name| normalize_text_option(env(name))))
        .or_else(|| existing.supabase_url());
    let supabase_anon_key = normalize_text_option(flags.supabase_anon_key.clone())
        .or_else(|| {
            SUPABASE_ANON_KEY_ENV
                .iter()
                .find_map(|name| normalize_text_option(env(name)))
        })
        .or_else(|| existing.supabase_anon_key());
    let utc_offset = match flags.utc_offset {
        Some(minutes) => Some(minutes),
        None => env_utc_offset(env)?.or(existing.display_utc_offset_minutes),
    };

    if let Some(url) = supabase_url.as_deref() {
        if !is_http_url(url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    if let Some(minutes) = utc_offset {
        DisplayConfig::with_utc_offset_minutes(minutes)?;
    }

    let profile = config.profile_mut_or_default(&profile_name);
    profile.supabase_url = supabase_url;
    profile.supabase_anon_key = supabase_anon_key;
    profile.display_utc_offset_minutes = utc_offset;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    config.save_to_path(path).map_err(CliError::Config)?;
    tracing::info!(profile = %profile_name, "Saved CLI profile");

    let mut lines = vec![format!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    )];
    let saved = config.profile(&profile_name).cloned().unwrap_or_default();
    let mut missing_fields = Vec::new();
    if saved.supabase_url().is_none() {
        missing_fields.push("supabase_url");
    }
    if saved.supabase_anon_key().is_none() {
        missing_fields.push("supabase_anon_key");
    }
    if missing_fields.is_empty() {
        lines.push(format!(
            "Profile '{profile_name}' is ready. Try `roomly rooms`."
        ));
    } else {
        lines.push(format!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        ));
    }
    Ok(lines)
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub profile: String,
    pub rest_url: Option<String>,
    pub anon_key_set: bool,
    pub display_utc_offset_minutes: i32,
}

/// Show the effective settings. The anon key itself is never printed.
pub fn config_show(
    path: &Path,
    flags: &GlobalFlags,
    as_json: bool,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Vec<String>, CliError> {
    let config = CliProfilesConfig::load_from_path(path).map_err(CliError::Config)?;
    let settings = resolve_settings(flags, &config, env)?;
    let summary = ConfigSummary {
        profile: settings.profile_name.clone(),
        rest_url: settings
            .backend
            .as_ref()
            .map(|backend| backend.rest_url().to_string()),
        anon_key_set: settings.backend.is_some(),
        display_utc_offset_minutes: settings.display.utc_offset_minutes,
    };

    if as_json {
        return Ok(vec![render_json(&summary)?]);
    }

    Ok(vec![
        format!("profile: {}", summary.profile),
        format!("config file: {}", path.display()),
        format!(
            "rest url: {}",
            summary.rest_url.as_deref().unwrap_or("(not configured)")
        ),
        format!(
            "anon key: {}",
            if summary.anon_key_set { "set" } else { "missing" }
        ),
        format!(
            "display offset: {} minutes",
            summary.display_utc_offset_minutes
        ),
    ])
}
