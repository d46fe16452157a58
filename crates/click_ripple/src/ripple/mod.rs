//! Click Ripple：点击物体后由 shader 从点击点播放一次波纹。
//!
//! 组成：
//! - `ripple_core`：点击状态机（不依赖引擎）
//! - 本 crate：波纹材质、`ClickMarker` 组件、每帧驱动状态机的系统、演示场景
//!
//! 说明：
//! - 本 crate 使用 Bevy 0.18。
//! - 射线命中必须是挂了 `ClickMarker` 的实体本身（带 `Mesh3d`），命中子实体不算。
//! - 鼠标拾取只使用带 `WorldCamera` 标记的相机。

mod paths;
mod persistence;
mod types;
mod material;
mod plugin;
mod world;

mod app;

pub use app::run;
pub use material::{MaterialOverride, RippleExtension, RippleMaterial, RippleUniform, ripple_material};
pub use persistence::{
    load_config_from_file, load_config_or_default, save_config_to_file, seed_config_file,
};
pub use plugin::ClickRipplePlugin;
pub use types::{
    ClickMarker, ClickRippleConfig, ClickRippleTriggered, ConfigPath, PointerButton, WorldCamera,
};
pub use world::CameraScene;
