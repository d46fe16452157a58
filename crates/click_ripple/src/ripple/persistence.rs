//! 配置的保存/读取（RON）。

use std::path::Path;

use bevy::prelude::*;

use super::types::ClickRippleConfig;

pub fn save_config_to_file(config: &ClickRippleConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(|e| e.to_string())?;
    std::fs::write(path, text).map_err(|e| e.to_string())?;
    Ok(())
}

/// 文件不存在时返回默认配置。
pub fn load_config_from_file(path: &Path) -> Result<ClickRippleConfig, String> {
    if !path.exists() {
        return Ok(ClickRippleConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    ron::from_str::<ClickRippleConfig>(&text).map_err(|e| e.to_string())
}

/// 配置文件不存在时写一份默认配置，方便手动修改后按 R 重新读取。
pub fn seed_config_file(path: &Path) {
    if path.exists() {
        return;
    }
    match save_config_to_file(&ClickRippleConfig::default(), path) {
        Ok(()) => info!("wrote default config to {}", path.display()),
        Err(err) => warn!("config seed failed ({}): {err}", path.display()),
    }
}

/// 读取失败时记录警告并使用默认配置。
pub fn load_config_or_default(path: &Path) -> ClickRippleConfig {
    match load_config_from_file(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("config load failed ({}): {err}", path.display());
            ClickRippleConfig::default()
        }
    }
}
