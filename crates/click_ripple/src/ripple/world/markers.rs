use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use ripple_core::{FrameContext, FrameOutcome, PointerSample, publish_idle};

use crate::ripple::material::{MaterialOverride, RippleMaterial};
use crate::ripple::types::{
    ClickMarker, ClickRippleConfig, ClickRippleTriggered, PointerButton, WorldCamera, object_id,
};

/// 参与点击判定的标记。
pub type MarkerQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut ClickMarker,
        &'static MeshMaterial3d<RippleMaterial>,
    ),
>;

/// 激活 / 复位：实体可见即激活，隐藏即复位。
///
/// 首次看到某个标记时创建状态机，并按配置把材质复制成该实体独有的一份。
/// 标记与材质可能分帧插入，因此两者任一新加入都会触发。
pub fn sync_click_marker_activation(
    config: Res<ClickRippleConfig>,
    mut materials: ResMut<Assets<RippleMaterial>>,
    mut markers: Query<
        (
            Entity,
            &mut ClickMarker,
            &mut MeshMaterial3d<RippleMaterial>,
            &InheritedVisibility,
        ),
        Or<(
            Added<ClickMarker>,
            Added<MeshMaterial3d<RippleMaterial>>,
            Changed<InheritedVisibility>,
        )>,
    >,
) {
    for (entity, mut marker, mut material, visibility) in &mut markers {
        if marker.state.is_none() {
            if config.unique_material_per_marker {
                if let Some(source) = materials.get(&material.0).cloned() {
                    material.0 = materials.add(source);
                    // 源材质可能已被别的标记点过，复制品从空闲状态开始
                    publish_idle(&mut MaterialOverride::new(&mut materials, &material.0));
                }
            }
            marker.state = Some(ripple_core::ClickMarker::new(object_id(entity)));
        }
        let Some(state) = marker.state.as_mut() else {
            continue;
        };

        let visible = visibility.get();
        if visible && !state.is_active() {
            state.on_activate();
            debug!("click marker {entity} activated");
        } else if !visible && state.is_active() {
            state.on_deactivate(&mut MaterialOverride::new(&mut materials, &material.0));
            info!("click marker {entity} deactivated -> ripple reset");
        }
    }
}

/// 移除 `ClickMarker` 但实体仍在：把材质复位到空闲值。
pub fn reset_removed_click_markers(
    mut removed: RemovedComponents<ClickMarker>,
    materials_q: Query<&MeshMaterial3d<RippleMaterial>>,
    mut materials: ResMut<Assets<RippleMaterial>>,
) {
    for entity in removed.read() {
        // 实体已 despawn 时材质随之释放，无需处理
        let Ok(material) = materials_q.get(entity) else {
            continue;
        };
        publish_idle(&mut MaterialOverride::new(&mut materials, &material.0));
        info!("click marker removed from {entity} -> ripple reset");
    }
}

/// 配置变化（包括启动时首次插入）时，把波纹表现参数写入所有标记材质。
pub fn apply_config_to_markers(
    config: Res<ClickRippleConfig>,
    markers: Query<&MeshMaterial3d<RippleMaterial>, With<ClickMarker>>,
    mut materials: ResMut<Assets<RippleMaterial>>,
) {
    if !config.is_changed() {
        return;
    }
    for material in &markers {
        if let Some(m) = materials.get_mut(&material.0) {
            m.extension.uniform.apply_config(&config);
        }
    }
}

#[derive(SystemParam)]
pub struct ClickFrameParams<'w, 's> {
    pub buttons: Res<'w, ButtonInput<MouseButton>>,
    pub config: Res<'w, ClickRippleConfig>,
    pub time: Res<'w, Time>,
    pub windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera_q: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<WorldCamera>>,
    pub markers: MarkerQuery<'w, 's>,
    pub materials: ResMut<'w, Assets<RippleMaterial>>,
    pub triggered: MessageWriter<'w, ClickRippleTriggered>,
}

/// 配置的按键在本帧按下、且光标在主窗口内时才有采样。
pub fn sample_pointer(
    buttons: &ButtonInput<MouseButton>,
    button: PointerButton,
    window: Option<&Window>,
) -> Option<PointerSample> {
    let cursor = window?.cursor_position()?;
    buttons.just_pressed(button.into()).then(|| PointerSample {
        pressed_this_frame: true,
        screen_pos: cursor.into(),
    })
}

/// 逐帧点击：按下的那一帧做一次射线检测，交给每个标记的状态机判断。
pub fn update_click_markers(mut p: ClickFrameParams, mut ray_cast: MeshRayCast) {
    let Some(pointer) = sample_pointer(&p.buttons, p.config.button, p.windows.single().ok()) else {
        return;
    };
    let mut scene = super::CameraScene::new(p.camera_q.single().ok(), &mut ray_cast);
    let mut ctx = FrameContext {
        pointer,
        // 与 shader 的 globals.time 使用同一时钟
        time: p.time.elapsed_secs_wrapped(),
        scene: &mut scene,
    };

    step_click_markers(&mut ctx, &mut p.markers, &mut p.materials, &mut p.triggered);
}

/// 让每个标记处理同一帧的点击；触发时写出 `ClickRippleTriggered`。
pub fn step_click_markers(
    ctx: &mut FrameContext<'_>,
    markers: &mut MarkerQuery,
    materials: &mut Assets<RippleMaterial>,
    triggered: &mut MessageWriter<ClickRippleTriggered>,
) {
    for (entity, mut marker, material) in markers.iter_mut() {
        let Some(state) = marker.state.as_mut() else {
            continue;
        };
        let mut render_state = MaterialOverride::new(materials, &material.0);
        match state.on_frame(ctx, &mut render_state) {
            FrameOutcome::Triggered(click) => {
                info!(
                    "click marker {entity} triggered at {:?}, t={:.3}",
                    click.click_position, click.click_time
                );
                triggered.write(ClickRippleTriggered {
                    entity,
                    position: click.click_position.into(),
                    start_time: click.click_time,
                });
            }
            FrameOutcome::HitOther(target) => {
                debug!("click on {target:?} ignored by marker {entity}");
            }
            FrameOutcome::NoCamera => {
                warn!("click ignored: no WorldCamera");
                return;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::MessageReader;
    use bevy::ecs::system::RunSystemOnce;

    use ripple_core::{Ray, RaycastHit, SceneQuery, ScreenPoint, WorldPoint};

    use super::*;
    use crate::ripple::material::ripple_material;

    fn spawn_marker(app: &mut App, visibility: InheritedVisibility) -> (Entity, Handle<RippleMaterial>) {
        let handle = app
            .world_mut()
            .resource_mut::<Assets<RippleMaterial>>()
            .add(ripple_material(StandardMaterial::default(), &ClickRippleConfig::default()));
        let entity = app
            .world_mut()
            .spawn((ClickMarker::default(), MeshMaterial3d(handle.clone()), visibility))
            .id();
        (entity, handle)
    }

    fn test_app(config: ClickRippleConfig) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<RippleMaterial>>()
            .insert_resource(config)
            .add_message::<ClickRippleTriggered>()
            .add_systems(
                Update,
                (
                    sync_click_marker_activation,
                    apply_config_to_markers,
                    reset_removed_click_markers,
                )
                    .chain(),
            );
        app
    }

    fn marker(app: &App, entity: Entity) -> &ClickMarker {
        app.world().get::<ClickMarker>(entity).unwrap()
    }

    fn material_handle(app: &App, entity: Entity) -> Handle<RippleMaterial> {
        app.world()
            .get::<MeshMaterial3d<RippleMaterial>>(entity)
            .unwrap()
            .0
            .clone()
    }

    fn uniform(app: &App, entity: Entity) -> crate::ripple::material::RippleUniform {
        let handle = material_handle(app, entity);
        app.world()
            .resource::<Assets<RippleMaterial>>()
            .get(&handle)
            .unwrap()
            .extension
            .uniform
    }

    fn fake_click(app: &mut App, entity: Entity) {
        let handle = material_handle(app, entity);
        let mut materials = app.world_mut().resource_mut::<Assets<RippleMaterial>>();
        if let Some(m) = materials.get_mut(&handle) {
            m.extension.uniform.click_pos = Vec4::new(1.0, 2.0, 3.0, 1.0);
            m.extension.uniform.start_time = 5.25;
        }
    }

    /// 固定命中结果的场景。
    struct FixedHit(Option<RaycastHit>);

    impl SceneQuery for FixedHit {
        fn screen_point_to_ray(&mut self, _screen: ScreenPoint) -> Option<Ray> {
            Some(Ray {
                origin: WorldPoint::new(0.0, 0.0, 10.0),
                direction: WorldPoint::new(0.0, 0.0, -1.0),
            })
        }

        fn raycast(&mut self, _ray: &Ray) -> Option<RaycastHit> {
            self.0
        }
    }

    /// 用给定的命中结果跑一帧按下。
    fn press_with_hit(app: &mut App, hit: Option<RaycastHit>, time: f32) {
        app.world_mut()
            .run_system_once(
                move |mut markers: MarkerQuery,
                      mut materials: ResMut<Assets<RippleMaterial>>,
                      mut triggered: MessageWriter<ClickRippleTriggered>| {
                    let mut scene = FixedHit(hit);
                    let mut ctx = FrameContext {
                        pointer: PointerSample {
                            pressed_this_frame: true,
                            screen_pos: ScreenPoint::new(10.0, 10.0),
                        },
                        time,
                        scene: &mut scene,
                    };
                    step_click_markers(&mut ctx, &mut markers, &mut materials, &mut triggered);
                },
            )
            .unwrap();
    }

    fn triggered(app: &mut App) -> Vec<ClickRippleTriggered> {
        app.world_mut()
            .run_system_once(|mut reader: MessageReader<ClickRippleTriggered>| {
                reader.read().cloned().collect::<Vec<_>>()
            })
            .unwrap()
    }

    /// 主窗口 + 光标 + 按下的鼠标键，跑完整的 `update_click_markers`。
    fn pointer_app(config: ClickRippleConfig, pressed: MouseButton) -> App {
        let mut app = test_app(config);
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(pressed);
        app.insert_resource(buttons)
            .init_resource::<Time>()
            .init_resource::<Assets<Mesh>>()
            .add_systems(PostUpdate, update_click_markers);

        let mut window = Window::default();
        window.set_cursor_position(Some(Vec2::new(10.0, 10.0)));
        app.world_mut().spawn((window, PrimaryWindow));
        app
    }

    #[test]
    fn visible_marker_activates_with_its_own_material() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, shared) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);

        app.update();

        assert!(marker(&app, entity).is_active());
        assert!(!marker(&app, entity).has_clicked());
        assert_ne!(material_handle(&app, entity), shared);
    }

    #[test]
    fn shared_material_kept_when_configured() {
        let config = ClickRippleConfig {
            unique_material_per_marker: false,
            ..Default::default()
        };
        let mut app = test_app(config);
        let (entity, shared) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);

        app.update();

        assert_eq!(material_handle(&app, entity), shared);
    }

    #[test]
    fn hidden_marker_stays_inactive_until_shown() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::HIDDEN);

        app.update();
        assert!(!marker(&app, entity).is_active());

        app.world_mut().entity_mut(entity).insert(InheritedVisibility::VISIBLE);
        app.update();
        assert!(marker(&app, entity).is_active());
    }

    #[test]
    fn hiding_resets_published_values() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        app.update();
        fake_click(&mut app, entity);

        app.world_mut().entity_mut(entity).insert(InheritedVisibility::HIDDEN);
        app.update();

        assert!(!marker(&app, entity).is_active());
        let u = uniform(&app, entity);
        assert_eq!(u.click_pos, Vec4::ZERO);
        assert_eq!(u.start_time, 0.0);

        app.world_mut().entity_mut(entity).insert(InheritedVisibility::VISIBLE);
        app.update();
        assert!(marker(&app, entity).is_active());
        assert!(!marker(&app, entity).has_clicked());
    }

    #[test]
    fn removing_marker_resets_material() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        app.update();
        fake_click(&mut app, entity);

        app.world_mut().entity_mut(entity).remove::<ClickMarker>();
        app.update();

        let u = uniform(&app, entity);
        assert_eq!(u.click_pos, Vec4::ZERO);
        assert_eq!(u.start_time, 0.0);
    }

    #[test]
    fn config_change_updates_ripple_params_only() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        app.update();
        fake_click(&mut app, entity);

        app.world_mut().resource_mut::<ClickRippleConfig>().ripple_speed = 7.0;
        app.update();

        let u = uniform(&app, entity);
        assert_eq!(u.speed, 7.0);
        assert_eq!(u.start_time, 5.25);
    }

    #[test]
    fn material_added_after_marker_still_activates() {
        let mut app = test_app(ClickRippleConfig::default());
        let entity = app
            .world_mut()
            .spawn((ClickMarker::default(), InheritedVisibility::VISIBLE))
            .id();
        app.update();
        assert!(!marker(&app, entity).is_active());

        let handle = app
            .world_mut()
            .resource_mut::<Assets<RippleMaterial>>()
            .add(ripple_material(StandardMaterial::default(), &ClickRippleConfig::default()));
        app.world_mut().entity_mut(entity).insert(MeshMaterial3d(handle));
        app.update();

        assert!(marker(&app, entity).is_active());
    }

    #[test]
    fn cloned_material_starts_idle_even_if_source_was_clicked() {
        let mut app = test_app(ClickRippleConfig::default());
        let (first, shared) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        // 源材质残留了别人的点击
        {
            let mut materials = app.world_mut().resource_mut::<Assets<RippleMaterial>>();
            let m = materials.get_mut(&shared).unwrap();
            m.extension.uniform.click_pos = Vec4::new(1.0, 2.0, 3.0, 1.0);
            m.extension.uniform.start_time = 5.25;
        }

        app.update();

        let u = uniform(&app, first);
        assert_eq!(u.click_pos, Vec4::ZERO);
        assert_eq!(u.start_time, 0.0);
        let source = app
            .world()
            .resource::<Assets<RippleMaterial>>()
            .get(&shared)
            .unwrap()
            .extension
            .uniform;
        assert_eq!(source.start_time, 5.25);
    }

    #[test]
    fn hit_on_marker_publishes_once_and_writes_message() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        let (bystander, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        app.update();

        let hit = RaycastHit {
            target: object_id(entity),
            point: WorldPoint::new(1.0, 2.0, 3.0),
        };
        press_with_hit(&mut app, Some(hit), 5.25);
        press_with_hit(&mut app, Some(hit), 6.0);

        assert!(marker(&app, entity).has_clicked());
        assert!(!marker(&app, bystander).has_clicked());
        let u = uniform(&app, entity);
        assert_eq!(u.click_pos, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(u.start_time, 5.25);
        assert_eq!(uniform(&app, bystander).click_pos, Vec4::ZERO);

        let messages = triggered(&mut app);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].entity, entity);
        assert_eq!(messages[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(messages[0].start_time, 5.25);
    }

    #[test]
    fn miss_writes_nothing() {
        let mut app = test_app(ClickRippleConfig::default());
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);
        app.update();

        press_with_hit(&mut app, None, 1.0);

        assert!(!marker(&app, entity).has_clicked());
        assert!(triggered(&mut app).is_empty());
    }

    #[test]
    fn only_the_configured_button_samples_a_click() {
        let mut window = Window::default();
        window.set_cursor_position(Some(Vec2::new(10.0, 20.0)));
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Right);

        assert_eq!(sample_pointer(&buttons, PointerButton::Left, Some(&window)), None);
        let sample = sample_pointer(&buttons, PointerButton::Right, Some(&window)).unwrap();
        assert!(sample.pressed_this_frame);
        assert_eq!(sample.screen_pos, ScreenPoint::new(10.0, 20.0));

        // 按住不算新的按下
        buttons.clear();
        assert_eq!(sample_pointer(&buttons, PointerButton::Right, Some(&window)), None);
    }

    #[test]
    fn no_cursor_or_window_means_no_click() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let mut window = Window::default();
        window.set_cursor_position(None);

        assert_eq!(sample_pointer(&buttons, PointerButton::Left, None), None);
        assert_eq!(sample_pointer(&buttons, PointerButton::Left, Some(&window)), None);
    }

    #[test]
    fn other_button_press_leaves_markers_untouched() {
        let mut app = pointer_app(ClickRippleConfig::default(), MouseButton::Right);
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);

        app.update();

        assert!(marker(&app, entity).is_active());
        assert!(!marker(&app, entity).has_clicked());
        assert!(triggered(&mut app).is_empty());
    }

    #[test]
    fn click_without_world_camera_changes_nothing() {
        let mut app = pointer_app(ClickRippleConfig::default(), MouseButton::Left);
        let (entity, _) = spawn_marker(&mut app, InheritedVisibility::VISIBLE);

        app.update();
        app.update();

        assert!(marker(&app, entity).is_active());
        assert!(!marker(&app, entity).has_clicked());
        assert_eq!(uniform(&app, entity).click_pos, Vec4::ZERO);
        assert!(triggered(&mut app).is_empty());
    }
}
