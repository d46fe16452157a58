use std::path::PathBuf;

use bevy::prelude::*;

use super::{
    material::RippleMaterial,
    paths::default_config_path,
    persistence::{load_config_or_default, seed_config_file},
    types::{ClickRippleTriggered, ConfigPath},
    world,
};

/// 注册波纹材质、配置与点击标记系统。
///
/// 依赖 `DefaultPlugins`（窗口、输入、网格拾取、渲染）。
pub struct ClickRipplePlugin {
    pub config_path: PathBuf,
}

impl Default for ClickRipplePlugin {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
        }
    }
}

impl Plugin for ClickRipplePlugin {
    fn build(&self, app: &mut App) {
        seed_config_file(&self.config_path);
        let config = load_config_or_default(&self.config_path);

        app.add_plugins(MaterialPlugin::<RippleMaterial>::default())
            .insert_resource(config)
            .insert_resource(ConfigPath(self.config_path.clone()))
            .add_message::<ClickRippleTriggered>()
            .add_systems(
                Update,
                (
                    world::sync_click_marker_activation,
                    world::apply_config_to_markers,
                    world::update_click_markers,
                    world::reset_removed_click_markers,
                )
                    .chain(),
            );
    }
}
