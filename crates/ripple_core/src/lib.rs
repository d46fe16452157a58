#![forbid(unsafe_code)]

// 纯逻辑 crate：点击标记（ClickMarker）状态机与宿主接缝。
//
// 不依赖任何引擎：
// - 输入 / 相机 / 时钟通过 `FrameContext` 显式传入
// - 射线检测通过 `SceneQuery` 注入
// - 渲染状态覆盖（per-object 的 shader 参数）通过 `RenderStateOverride` 读写

mod marker;
mod property_block;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use marker::{ClickMarker, FrameOutcome, publish_idle};
pub use property_block::{PropertyBlock, ShaderValue};

/// shader 侧点击位置参数名（4 分量：x, y, z, 1）。
pub const CLICK_POS: &str = "_ClickPos";
/// shader 侧起始时间参数名（标量，引擎时间秒数）。
pub const START_TIME: &str = "_StartTime";

/// 复位后的 `_ClickPos`。
pub const IDLE_CLICK_POS: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
/// 复位后的 `_StartTime`。
pub const IDLE_START_TIME: f32 = 0.0;

/// 世界坐标中的点（或方向）。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 齐次坐标（w = 1），即 `_ClickPos` 的取值。
    #[inline]
    pub fn to_homogeneous(self) -> [f32; 4] {
        [self.x, self.y, self.z, 1.0]
    }
}

/// 屏幕（视口）坐标，单位为逻辑像素。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: WorldPoint,
    pub direction: WorldPoint,
}

/// 可被射线命中的对象标识。宿主负责保证同一对象的 id 稳定。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub target: ObjectId,
    /// 世界坐标中的接触点。
    pub point: WorldPoint,
}

/// 一次点击记录。`has_clicked == false` 时另外两个字段无意义。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickState {
    pub has_clicked: bool,
    pub click_position: WorldPoint,
    pub click_time: f32,
}

/// 单帧指针采样。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// 仅在按键从松开变为按下的那一帧为 true（边沿触发）。
    pub pressed_this_frame: bool,
    pub screen_pos: ScreenPoint,
}

/// 宿主的相机 + 空间查询能力。
pub trait SceneQuery {
    /// 屏幕点 → 世界射线。没有可用相机时返回 `None`。
    fn screen_point_to_ray(&mut self, screen: ScreenPoint) -> Option<Ray>;

    /// 返回射线命中的第一个对象（最近者）。
    fn raycast(&mut self, ray: &Ray) -> Option<RaycastHit>;
}

/// 每个对象独有的渲染状态覆盖（命名 shader 参数表）。
///
/// 只支持“取快照 → 修改副本 → 整体提交”的读改写；不支持多个写者并发写同一对象。
pub trait RenderStateOverride {
    fn get_property_block(&self) -> PropertyBlock;

    fn set_property_block(&mut self, block: PropertyBlock);
}

/// `on_frame` 的输入：替代隐式的全局输入 / 相机 / 时钟。
pub struct FrameContext<'a> {
    pub pointer: PointerSample,
    /// 当前引擎时间（秒）。
    pub time: f32,
    pub scene: &'a mut dyn SceneQuery,
}

#[cfg(feature = "bevy")]
mod bevy_glue {
    use bevy::math::{Ray3d, Vec2, Vec3};

    use super::{Ray, ScreenPoint, WorldPoint};

    impl From<Vec3> for WorldPoint {
        fn from(v: Vec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<WorldPoint> for Vec3 {
        fn from(p: WorldPoint) -> Self {
            Vec3::new(p.x, p.y, p.z)
        }
    }

    impl From<Vec2> for ScreenPoint {
        fn from(v: Vec2) -> Self {
            Self::new(v.x, v.y)
        }
    }

    impl From<ScreenPoint> for Vec2 {
        fn from(p: ScreenPoint) -> Self {
            Vec2::new(p.x, p.y)
        }
    }

    impl From<Ray3d> for Ray {
        fn from(r: Ray3d) -> Self {
            Self {
                origin: r.origin.into(),
                direction: Vec3::from(r.direction).into(),
            }
        }
    }
}
