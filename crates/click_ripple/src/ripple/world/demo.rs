use bevy::prelude::*;

use crate::ripple::material::{RippleMaterial, ripple_material};
use crate::ripple::persistence::load_config_or_default;
use crate::ripple::types::{ClickMarker, ClickRippleConfig, ConfigPath, WorldCamera};

/// 演示场景：地面 + 两个共用同一份材质的物体 + 一个不可点击的遮挡物。
pub fn setup_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut ripple_materials: ResMut<Assets<RippleMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ClickRippleConfig>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 6.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
        WorldCamera,
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground = ripple_materials.add(ripple_material(
        StandardMaterial::from(Color::srgb(0.25, 0.3, 0.35)),
        &config,
    ));
    commands.spawn((
        Name::new("ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(10.0, 10.0))),
        MeshMaterial3d(ground),
        ClickMarker::default(),
    ));

    // 两个物体共用一份材质；激活时会各自复制（见 `unique_material_per_marker`）
    let shared = ripple_materials.add(ripple_material(
        StandardMaterial::from(Color::srgb(0.8, 0.55, 0.3)),
        &config,
    ));
    commands.spawn((
        Name::new("cube"),
        Mesh3d(meshes.add(Cuboid::new(1.5, 1.5, 1.5))),
        MeshMaterial3d(shared.clone()),
        Transform::from_xyz(-2.0, 0.75, 0.0),
        ClickMarker::default(),
    ));
    commands.spawn((
        Name::new("sphere"),
        Mesh3d(meshes.add(Sphere::new(0.9).mesh().uv(48, 24))),
        MeshMaterial3d(shared),
        Transform::from_xyz(2.0, 0.9, 0.0),
        ClickMarker::default(),
    ));

    commands.spawn((
        Name::new("blocker"),
        Mesh3d(meshes.add(Cuboid::new(0.4, 2.5, 0.4))),
        MeshMaterial3d(standard_materials.add(Color::srgb(0.5, 0.5, 0.5))),
        Transform::from_xyz(0.0, 1.25, 2.0),
    ));
}

/// 演示快捷键：
/// - H：切换所有标记的可见性（隐藏即复位，重新显示后可再次点击）
/// - R：从磁盘重新读取配置
pub fn demo_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    path: Res<ConfigPath>,
    mut config: ResMut<ClickRippleConfig>,
    mut markers: Query<&mut Visibility, With<ClickMarker>>,
) {
    if keys.just_pressed(KeyCode::KeyH) {
        for mut vis in &mut markers {
            *vis = match *vis {
                Visibility::Hidden => Visibility::Inherited,
                _ => Visibility::Hidden,
            };
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        let loaded = load_config_or_default(&path.0);
        if *config != loaded {
            *config = loaded;
            info!("reloaded config: {}", path.0.display());
        }
    }
}
