use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderValue {
    Float(f32),
    Vector([f32; 4]),
}

/// 命名 shader 参数的快照。
///
/// 与材质默认值相互独立：只记录被覆盖的键。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBlock {
    values: BTreeMap<String, ShaderValue>,
}

impl PropertyBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), ShaderValue::Float(value));
    }

    pub fn set_vector(&mut self, name: &str, value: [f32; 4]) {
        self.values.insert(name.to_string(), ShaderValue::Vector(value));
    }

    /// 键不存在或类型不是标量时返回 `None`。
    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(ShaderValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_vector(&self, name: &str) -> Option<[f32; 4]> {
        match self.values.get(name) {
            Some(ShaderValue::Vector(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<ShaderValue> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ShaderValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getters_respect_value_shape() {
        let mut block = PropertyBlock::new();
        block.set_float("_StartTime", 2.0);
        block.set_vector("_ClickPos", [1.0, 2.0, 3.0, 1.0]);

        assert_eq!(block.get_float("_StartTime"), Some(2.0));
        assert_eq!(block.get_vector("_ClickPos"), Some([1.0, 2.0, 3.0, 1.0]));
        assert_eq!(block.get_vector("_StartTime"), None);
        assert_eq!(block.get_float("_ClickPos"), None);
        assert_eq!(block.get_float("_Missing"), None);
    }

    #[test]
    fn setting_a_key_twice_replaces_its_shape() {
        let mut block = PropertyBlock::new();
        block.set_float("_Value", 1.0);
        block.set_vector("_Value", [0.0; 4]);

        assert_eq!(block.len(), 1);
        assert_eq!(block.get_float("_Value"), None);
        assert_eq!(block.get("_Value"), Some(ShaderValue::Vector([0.0; 4])));

        block.clear();
        assert!(block.is_empty());
    }
}
