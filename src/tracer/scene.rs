use nalgebra::{Point3, Vector3};

use crate::camera::Camera;
use crate::tracer::material::Material;
use crate::tracer::ray::Ray;
use crate::tracer::shape::{Cuboid, Shape, Sphere};

/// 장면 안 객체의 위치. 객체를 지우면 뒤쪽 객체들의 번호가 하나씩 당겨짐.
pub type ObjectId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl Light {
    pub fn white(position: Point3<f32>, intensity: f32) -> Self {
        Self {
            position,
            color: Vector3::repeat(1.0),
            intensity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    // 재질을 토글할 때 되돌아갈 원래 색
    pub base_color: Option<Vector3<f32>>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>, material: Material) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            material,
            base_color: None,
        }
    }

    pub fn with_base_color(mut self, color: Vector3<f32>) -> Self {
        self.base_color = Some(color);
        self
    }

    pub fn intersect(&self, ray: &Ray) -> Option<HitInfo> {
        self.shape.intersect(ray).map(|hit| HitInfo {
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
            material: self.material,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub distance: f32,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub material: Material,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub const ROOM_HALF_SIZE: f32 = 2.0;
    pub const WALL_THICKNESS: f32 = 0.1;

    /// 닫힌 방 하나와 기본 물체 세 개, 조명 하나
    pub fn room() -> Self {
        let mut scene = Self::empty_room();

        scene.objects.push(SceneObject::new(
            "Sphere1",
            Sphere::new(Point3::new(-0.8, -1.0, 0.5), 0.8),
            Material::lambert(Vector3::new(0.2, 0.5, 0.9)),
        ));
        scene.objects.push(SceneObject::new(
            "Cube1",
            Cuboid::new(Point3::new(1.0, -1.2, 0.3), Vector3::new(0.6, 0.8, 0.6)),
            Material::metal(Vector3::new(0.9, 0.8, 0.2), 0.1),
        ));
        scene.objects.push(SceneObject::new(
            "Sphere2",
            Sphere::new(Point3::new(1.0, 0.0, 0.3), 0.3),
            Material::lambert(Vector3::new(0.2, 0.5, 0.9)),
        ));

        scene.lights.push(Light::white(Point3::new(0.0, 1.8, 0.0), 1.2));

        scene
    }

    /// 벽 여섯 개만 있는 방. 조명 없음.
    pub fn empty_room() -> Self {
        let size = Self::ROOM_HALF_SIZE;
        let thickness = Self::WALL_THICKNESS;
        let offset = size + thickness;

        let floor = Vector3::new(size, thickness, size);
        let side = Vector3::new(thickness, size, size);
        let back = Vector3::new(size, size, thickness);

        let wall = |name: &str, center: Point3<f32>, half_extents: Vector3<f32>, color: Vector3<f32>| {
            SceneObject::new(name, Cuboid::new(center, half_extents), Material::lambert(color))
        };

        let objects = vec![
            wall("Floor", Point3::new(0.0, -offset, 0.0), floor, Vector3::repeat(1.0)),
            wall("Ceiling", Point3::new(0.0, offset, 0.0), floor, Vector3::repeat(1.0)),
            wall("BackWall", Point3::new(0.0, 0.0, offset), back, Vector3::repeat(1.0)),
            wall("LeftWall", Point3::new(-offset, 0.0, 0.0), side, Vector3::new(1.0, 0.2, 0.2)),
            wall("RightWall", Point3::new(offset, 0.0, 0.0), side, Vector3::new(0.2, 1.0, 0.2)),
            wall("FrontWall", Point3::new(0.0, 0.0, -offset), back, Vector3::new(0.2, 1.0, 1.0)),
        ];

        Self {
            objects,
            lights: vec![],
        }
    }

    // 가속 구조 없이 모든 객체를 검사함. 객체 수십 개 수준까지만 감당 가능
    pub fn closest_hit(&self, ray: &Ray) -> Option<(HitInfo, ObjectId)> {
        let mut closest: Option<(HitInfo, ObjectId)> = None;
        let mut best = f32::INFINITY;

        for (id, object) in self.objects.iter().enumerate() {
            let Some(hit) = object.intersect(ray) else {
                continue;
            };

            if hit.distance < best {
                best = hit.distance;
                closest = Some((hit, id));
            }
        }

        closest
    }

    /// 화면 좌표 아래에 보이는 객체 찾기
    pub fn pick(&self, camera: &Camera, x: f32, y: f32) -> Option<ObjectId> {
        self.closest_hit(&camera.ray(x, y)).map(|(_, id)| id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_layout() {
        let scene = Scene::room();
        assert_eq!(scene.objects.len(), 9);
        assert_eq!(scene.lights.len(), 1);
        assert!(scene.objects[..6].iter().all(|wall| matches!(wall.shape, Shape::Cuboid(_))));
    }

    #[test]
    fn room_is_closed() {
        let scene = Scene::empty_room();
        let directions = [
            Vector3::new(1.0, 0.3, -0.2),
            Vector3::new(-0.4, 1.0, 0.1),
            Vector3::new(0.2, -1.0, 0.7),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.1, 0.1, -1.0),
            Vector3::new(-1.0, -1.0, -1.0),
        ];

        for direction in directions {
            let ray = Ray::new(Point3::new(0.3, -0.5, 0.2), direction);
            assert!(scene.closest_hit(&ray).is_some(), "{direction:?} escaped");
        }
    }

    #[test]
    fn closest_hit_takes_nearest() {
        let mut scene = Scene::default();
        let far = SceneObject::new("far", Sphere::new(Point3::new(0.0, 0.0, 10.0), 1.0), Material::default());
        let near = SceneObject::new("near", Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0), Material::default());
        scene.objects.push(far);
        scene.objects.push(near);

        let ray = Ray::new(Point3::origin(), Vector3::z());
        let (hit, id) = scene.closest_hit(&ray).unwrap();
        assert_eq!(id, 1);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn closest_hit_is_reproducible() {
        let scene = Scene::room();
        let ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vector3::new(-0.3, -0.4, 1.0));

        let (first, first_id) = scene.closest_hit(&ray).unwrap();
        let (second, second_id) = scene.closest_hit(&ray).unwrap();

        assert_eq!(first_id, second_id);
        assert_eq!(first.distance.to_bits(), second.distance.to_bits());
        assert_eq!(first.point, second.point);
        assert_eq!(first.normal, second.normal);
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let ray = Ray::new(Point3::origin(), Vector3::z());
        assert!(Scene::default().closest_hit(&ray).is_none());
    }

    #[test]
    fn pick_through_camera() {
        let scene = Scene::room();
        let camera = Camera::new(Point3::new(0.0, 0.0, -2.0), 1.0, 100, 100);

        // 화면 가운데는 뒷벽
        assert_eq!(scene.pick(&camera, 50.0, 50.0), Some(2));
    }
}
