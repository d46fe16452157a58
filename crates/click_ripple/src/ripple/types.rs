//! 资源（Resource）、组件（Component）与消息（Message）的集中定义。

use std::path::PathBuf;

use bevy::ecs::message::Message;
use bevy::prelude::*;

use ripple_core::{ClickState, ObjectId};

mod config;

pub use config::{ClickRippleConfig, PointerButton};

/// 相对 workspace `assets/` 的配置文件路径。
pub const DEFAULT_CONFIG_PATH: &str = "config/click_ripple.ron";
pub const RIPPLE_SHADER_PATH: &str = "shaders/click_ripple.wgsl";

/// 配置文件的绝对路径（用于运行时重新读取）。
#[derive(Resource, Clone, Debug)]
pub struct ConfigPath(pub PathBuf);

/// 标记“世界相机”（用于屏幕点 → 世界射线）。
///
/// 注意：UI 可能会创建/使用自己的相机，若用 `Query<(&Camera, &GlobalTransform)>::single()`
/// 在多相机时会直接失败，导致点击无效。
#[derive(Component)]
pub struct WorldCamera;

/// 挂在带 `Mesh3d` + `MeshMaterial3d<RippleMaterial>` 的实体上：第一次被左键点中时
/// 把点击点与时间写入该实体的材质。
///
/// 激活 = 实体可见；实体隐藏或移除本组件时复位。
#[derive(Component, Default, Clone, Debug)]
pub struct ClickMarker {
    /// 首次被同步系统看到时才创建（需要实体 id 作为命中目标）。
    pub(crate) state: Option<ripple_core::ClickMarker>,
}

impl ClickMarker {
    pub fn is_active(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_active())
    }

    pub fn has_clicked(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.has_clicked())
    }

    /// 尚未点击时为 `None`。
    pub fn click(&self) -> Option<&ClickState> {
        self.state
            .as_ref()
            .map(|s| s.state())
            .filter(|s| s.has_clicked)
    }
}

/// 实体 → 射线命中目标 id。
pub fn object_id(entity: Entity) -> ObjectId {
    ObjectId(entity.to_bits())
}

/// 某个 `ClickMarker` 被触发（每次激活最多一次）。
#[derive(Message, Clone, Debug)]
pub struct ClickRippleTriggered {
    pub entity: Entity,
    pub position: Vec3,
    pub start_time: f32,
}
