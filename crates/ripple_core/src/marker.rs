//! 点击标记状态机：{未点击, 已点击} 两态。
//!
//! - 未点击 → 已点击：激活期间第一次命中本对象的按下事件
//! - 已点击 → 未点击：只能通过 `on_deactivate`

use super::{
    CLICK_POS, ClickState, FrameContext, IDLE_CLICK_POS, IDLE_START_TIME, ObjectId,
    RenderStateOverride, START_TIME,
};

/// 单帧处理结果。除 `Triggered` 外都没有任何状态变化。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Inactive,
    NoPointerDown,
    AlreadyClicked,
    /// 宿主给不出相机射线。
    NoCamera,
    Missed,
    HitOther(ObjectId),
    Triggered(ClickState),
}

#[derive(Clone, Debug)]
pub struct ClickMarker {
    owner: ObjectId,
    active: bool,
    state: ClickState,
}

impl ClickMarker {
    /// 新建的标记处于未激活状态，需要宿主调用 `on_activate`。
    pub fn new(owner: ObjectId) -> Self {
        Self {
            owner,
            active: false,
            state: ClickState::default(),
        }
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_clicked(&self) -> bool {
        self.state.has_clicked
    }

    pub fn state(&self) -> &ClickState {
        &self.state
    }

    pub fn on_activate(&mut self) {
        self.active = true;
        self.state = ClickState::default();
    }

    pub fn on_frame(
        &mut self,
        ctx: &mut FrameContext<'_>,
        render_state: &mut dyn RenderStateOverride,
    ) -> FrameOutcome {
        if !self.active {
            return FrameOutcome::Inactive;
        }
        if !ctx.pointer.pressed_this_frame {
            return FrameOutcome::NoPointerDown;
        }
        // 已点击时不再做射线检测：结果不会改变任何状态。
        if self.state.has_clicked {
            return FrameOutcome::AlreadyClicked;
        }

        let Some(ray) = ctx.scene.screen_point_to_ray(ctx.pointer.screen_pos) else {
            return FrameOutcome::NoCamera;
        };
        let Some(hit) = ctx.scene.raycast(&ray) else {
            return FrameOutcome::Missed;
        };
        if hit.target != self.owner {
            return FrameOutcome::HitOther(hit.target);
        }

        self.state = ClickState {
            has_clicked: true,
            click_position: hit.point,
            click_time: ctx.time,
        };

        let mut block = render_state.get_property_block();
        block.set_vector(CLICK_POS, self.state.click_position.to_homogeneous());
        block.set_float(START_TIME, self.state.click_time);
        render_state.set_property_block(block);

        FrameOutcome::Triggered(self.state)
    }

    /// 无条件复位：可重复调用。
    pub fn on_deactivate(&mut self, render_state: &mut dyn RenderStateOverride) {
        self.active = false;
        self.state = ClickState::default();
        publish_idle(render_state);
    }
}

/// 把两个参数写回空闲值（`_StartTime = 0`，`_ClickPos = 0`）。
pub fn publish_idle(render_state: &mut dyn RenderStateOverride) {
    let mut block = render_state.get_property_block();
    block.set_float(START_TIME, IDLE_START_TIME);
    block.set_vector(CLICK_POS, IDLE_CLICK_POS);
    render_state.set_property_block(block);
}
