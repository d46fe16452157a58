//! 与 workspace/assets 路径相关的工具函数。

use std::path::PathBuf;

use super::types::DEFAULT_CONFIG_PATH;

/// workspace 的 `assets/` 目录绝对路径。
///
/// `CARGO_MANIFEST_DIR` 指向 `crates/click_ripple`，因此向上两级即可到 workspace 根。
pub fn workspace_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

/// 默认配置文件的绝对路径。
pub fn default_config_path() -> PathBuf {
    workspace_assets_dir().join(DEFAULT_CONFIG_PATH)
}
