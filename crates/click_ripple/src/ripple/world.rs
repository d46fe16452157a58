//! 世界（World）侧逻辑：点击标记的激活 / 逐帧点击 / 复位，以及演示场景。
//!
//! 关键点：
//! - 屏幕坐标 → 世界射线需要一个明确的“世界相机”（`WorldCamera`）。
//! - 同一帧内所有标记共享一次射线检测结果（见 `CameraScene`）。

mod demo;
mod markers;
mod scene;

pub use demo::{demo_shortcuts, setup_demo_scene};
pub use markers::{
    apply_config_to_markers, reset_removed_click_markers, sync_click_marker_activation,
    update_click_markers,
};
pub use scene::CameraScene;
