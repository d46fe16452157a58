//! 波纹材质：在 `StandardMaterial` 上扩展一组 uniform。
//!
//! `click_pos` / `start_time` 即 shader 侧的 `_ClickPos` / `_StartTime`，
//! 通过 `MaterialOverride` 以“参数表”的形式暴露给 `ripple_core`。

use bevy::{
    pbr::{ExtendedMaterial, MaterialExtension},
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderType},
    shader::ShaderRef,
};

use ripple_core::{CLICK_POS, PropertyBlock, RenderStateOverride, START_TIME, ShaderValue};

use super::types::{ClickRippleConfig, RIPPLE_SHADER_PATH};

/// 与 WGSL 中的 `RippleUniform` 一一对应。
#[derive(ShaderType, Clone, Copy, Debug, PartialEq)]
pub struct RippleUniform {
    /// (x, y, z, 1)；未点击 / 复位后为全 0。
    pub click_pos: Vec4,
    pub color: Vec4,
    /// 点击时的引擎时间（秒）；未点击 / 复位后为 0。
    pub start_time: f32,
    pub speed: f32,
    pub width: f32,
    pub duration: f32,
}

impl Default for RippleUniform {
    fn default() -> Self {
        Self::from_config(&ClickRippleConfig::default())
    }
}

impl RippleUniform {
    pub fn from_config(config: &ClickRippleConfig) -> Self {
        let mut uniform = Self {
            click_pos: Vec4::ZERO,
            color: Vec4::ZERO,
            start_time: 0.0,
            speed: 0.0,
            width: 0.0,
            duration: 0.0,
        };
        uniform.apply_config(config);
        uniform
    }

    /// 只覆盖表现参数，不动点击状态。宽度与时长不取负值。
    pub fn apply_config(&mut self, config: &ClickRippleConfig) {
        self.color = Vec4::from_array(config.ripple_color);
        self.speed = config.ripple_speed;
        self.width = config.ripple_width.max(0.0);
        self.duration = config.ripple_duration.max(0.0);
    }
}

#[derive(Asset, AsBindGroup, TypePath, Debug, Clone, Default)]
pub struct RippleExtension {
    #[uniform(100)]
    pub uniform: RippleUniform,
}

impl MaterialExtension for RippleExtension {
    fn fragment_shader() -> ShaderRef {
        RIPPLE_SHADER_PATH.into()
    }
}

pub type RippleMaterial = ExtendedMaterial<StandardMaterial, RippleExtension>;

pub fn ripple_material(base: StandardMaterial, config: &ClickRippleConfig) -> RippleMaterial {
    ExtendedMaterial {
        base,
        extension: RippleExtension {
            uniform: RippleUniform::from_config(config),
        },
    }
}

/// 单个实体材质上的渲染状态覆盖。
///
/// 快照只包含 `_ClickPos` / `_StartTime`；提交时其他键被忽略。
pub struct MaterialOverride<'a> {
    materials: &'a mut Assets<RippleMaterial>,
    handle: &'a Handle<RippleMaterial>,
}

impl<'a> MaterialOverride<'a> {
    pub fn new(materials: &'a mut Assets<RippleMaterial>, handle: &'a Handle<RippleMaterial>) -> Self {
        Self { materials, handle }
    }
}

impl RenderStateOverride for MaterialOverride<'_> {
    fn get_property_block(&self) -> PropertyBlock {
        let mut block = PropertyBlock::new();
        let Some(material) = self.materials.get(self.handle) else {
            return block;
        };
        let uniform = &material.extension.uniform;
        block.set_vector(CLICK_POS, uniform.click_pos.to_array());
        block.set_float(START_TIME, uniform.start_time);
        block
    }

    fn set_property_block(&mut self, block: PropertyBlock) {
        let Some(material) = self.materials.get_mut(self.handle) else {
            warn!("ripple material missing: {:?}", self.handle.id());
            return;
        };
        let uniform = &mut material.extension.uniform;
        for (name, value) in block.iter() {
            match (name, value) {
                (CLICK_POS, ShaderValue::Vector(v)) => uniform.click_pos = Vec4::from_array(v),
                (START_TIME, ShaderValue::Float(t)) => uniform.start_time = t,
                _ => debug!("ripple material: ignored property {name} = {value:?}"),
            }
        }
    }
}
