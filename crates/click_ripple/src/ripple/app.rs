//! 演示应用装配（Bevy App 构建与系统注册）。

use bevy::prelude::*;

use super::{ClickRipplePlugin, paths::workspace_assets_dir, world};

const CLEAR_COLOR: Color = Color::srgb(0.08, 0.08, 0.1);

/// 运行演示：左键点物体触发一次波纹，H 隐藏/显示复位，R 重新读取配置。
pub fn run() {
    let assets_dir = workspace_assets_dir();

    App::new()
        .insert_resource(ClearColor(CLEAR_COLOR))
        .add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    // 用绝对路径避免 cwd 差异导致找不到 shader
                    file_path: assets_dir.to_string_lossy().to_string(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Click Ripple".to_string(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ClickRipplePlugin::default())
        .add_systems(Startup, world::setup_demo_scene)
        .add_systems(Update, world::demo_shortcuts)
        .run();
}
