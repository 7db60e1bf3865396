use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default tailer data directory: ~/.tailer
pub fn get_tailer_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".tailer"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.tailer/config.toml
    let user_config = get_tailer_data_dir()
        .map(|dir| dir.join("config.toml"))
        .ok()
        .filter(|p| p.exists());

    // Priority 2: ./tailer.toml (current directory)
    let local_config = Path::new("tailer.toml");

    let mut cfg = match user_config {
        Some(path) => load_from_path(&path)?,
        None if local_config.exists() => load_from_path(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {}: {e}", path.display()))?;
    Ok(cfg)
}

/// Environment variable overrides (priority 0: above any file).
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = get("TAILER_AFTER").filter(|v| !v.trim().is_empty()) {
        cfg.tailer.after = v.trim().to_string();
    }
    if let Some(v) = get("TAILER_DASH").filter(|v| !v.is_empty()) {
        cfg.tailer.dash = v;
    }
    if let Some(v) = get("TAILER_NO_COLOR") {
        let v = v.trim();
        cfg.tailer.no_color = v == "1" || v.eq_ignore_ascii_case("true");
    }
    if let Some(v) = get("TAILER_LOG").filter(|v| !v.trim().is_empty()) {
        cfg.logging.level = v;
    }
}
