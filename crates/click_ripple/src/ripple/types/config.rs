use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl From<PointerButton> for MouseButton {
    fn from(b: PointerButton) -> Self {
        match b {
            PointerButton::Left => MouseButton::Left,
            PointerButton::Right => MouseButton::Right,
            PointerButton::Middle => MouseButton::Middle,
        }
    }
}

/// 波纹配置（`assets/config/click_ripple.ron`）。
///
/// - `unique_material_per_marker`：激活时把材质复制一份，避免共用材质的物体互相串点击状态
/// - `ripple_*`：只影响 shader 的表现，不影响点击逻辑
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClickRippleConfig {
    pub button: PointerButton,
    pub unique_material_per_marker: bool,
    pub ripple_speed: f32,
    pub ripple_width: f32,
    pub ripple_duration: f32,
    pub ripple_color: [f32; 4],
}

impl Default for ClickRippleConfig {
    fn default() -> Self {
        Self {
            button: PointerButton::Left,
            unique_material_per_marker: true,
            ripple_speed: 2.0,
            ripple_width: 0.35,
            ripple_duration: 2.5,
            ripple_color: [0.4, 0.8, 1.0, 1.0],
        }
    }
}
