use bevy::prelude::*;

use ripple_core::{Ray, RaycastHit, SceneQuery, ScreenPoint};

use crate::ripple::types::object_id;

/// 世界相机 + 网格射线检测，作为 `ripple_core` 的空间查询。
///
/// 每个系统运行构建一次；命中结果按帧缓存，多个标记只发一次射线。
pub struct CameraScene<'a, 'w, 's> {
    camera: Option<(&'a Camera, &'a GlobalTransform)>,
    ray_cast: &'a mut MeshRayCast<'w, 's>,
    visibility: RayCastVisibility,
    cached: Option<Option<RaycastHit>>,
}

impl<'a, 'w, 's> CameraScene<'a, 'w, 's> {
    pub fn new(
        camera: Option<(&'a Camera, &'a GlobalTransform)>,
        ray_cast: &'a mut MeshRayCast<'w, 's>,
    ) -> Self {
        Self {
            camera,
            ray_cast,
            visibility: RayCastVisibility::VisibleInView,
            cached: None,
        }
    }

    /// 默认只检测相机可见的网格（`ViewVisibility`）。
    pub fn with_visibility(mut self, visibility: RayCastVisibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl SceneQuery for CameraScene<'_, '_, '_> {
    fn screen_point_to_ray(&mut self, screen: ScreenPoint) -> Option<Ray> {
        let (camera, camera_transform) = self.camera?;
        camera
            .viewport_to_world(camera_transform, screen.into())
            .ok()
            .map(Ray::from)
    }

    fn raycast(&mut self, ray: &Ray) -> Option<RaycastHit> {
        if let Some(hit) = self.cached {
            return hit;
        }

        let direction = Dir3::new(ray.direction.into()).ok()?;
        let ray = Ray3d::new(ray.origin.into(), direction);
        let hit = self
            .ray_cast
            .cast_ray(
                ray,
                &MeshRayCastSettings::default().with_visibility(self.visibility),
            )
            .first()
            .map(|(entity, hit)| RaycastHit {
                target: object_id(*entity),
                point: hit.point.into(),
            });

        self.cached = Some(hit);
        hit
    }
}
