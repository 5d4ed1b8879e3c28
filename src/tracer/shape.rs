use nalgebra::{Point3, Vector3};

use crate::tracer::ray::Ray;

// 이보다 가까운 교차는 광선 자기 자신의 표면으로 간주하고 버림
pub const SURFACE_EPSILON: f32 = 0.001;

// 방향 성분이 이보다 작으면 역수 대신 SLAB_SENTINEL 사용
const PARALLEL_THRESHOLD: f32 = 1e-6;
const SLAB_SENTINEL: f32 = 1e20;

/// 도형과 광선의 교차 결과. 재질은 도형을 소유한 객체가 붙임.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        // |O + tD - C|^2 = r^2 을 t에 대해 풂
        let origin = ray.origin - self.center;
        let direction = ray.direction.as_ref();

        let a = direction.dot(direction);
        let b = 2.0 * origin.dot(direction);
        let c = origin.dot(&origin) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let mut distance = (-b - root) / (2.0 * a);
        // 구 안쪽이나 표면 바로 위에서 출발한 광선이면 먼 쪽 근 사용
        if distance < SURFACE_EPSILON {
            distance = (-b + root) / (2.0 * a);
        }
        if distance < SURFACE_EPSILON {
            return None;
        }

        let point = ray.at(distance);
        Some(Hit {
            distance,
            point,
            normal: (point - self.center).normalize(),
        })
    }
}

/// 축 정렬 직육면체. `half_extents`는 중심에서 각 면까지의 거리.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub center: Point3<f32>,
    pub half_extents: Vector3<f32>,
}

impl Cuboid {
    pub fn new(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn min(&self) -> Point3<f32> {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Point3<f32> {
        self.center + self.half_extents
    }

    // Kay-Kajiya slab 방식
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let min = self.min();
        let max = self.max();

        let slab = |axis: usize| {
            let inverse = inverse_component(ray.direction[axis]);
            let near = (min[axis] - ray.origin[axis]) * inverse;
            let far = (max[axis] - ray.origin[axis]) * inverse;
            (near.min(far), near.max(far))
        };

        let (mut t_min, mut t_max) = slab(0);
        for axis in 1..3 {
            let (near, far) = slab(axis);
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }

        if t_max < t_min || t_max < 0.0 {
            return None;
        }

        // 상자 안에서 출발했다면 나가는 면까지의 거리
        let distance = if t_min > SURFACE_EPSILON { t_min } else { t_max };
        if distance < SURFACE_EPSILON || distance.is_nan() {
            return None;
        }

        let point = ray.at(distance);
        Some(Hit {
            distance,
            point,
            normal: self.normal_at(&point),
        })
    }

    // 가장 깊이 파고든 축이 법선 방향. 동률이면 X, Y, Z 순서로 우선함
    pub fn normal_at(&self, point: &Point3<f32>) -> Vector3<f32> {
        let local = point - self.center;
        let depth = local.abs().component_div(&self.half_extents);

        if depth.x >= depth.y && depth.x >= depth.z {
            Vector3::new(safe_sign(local.x), 0.0, 0.0)
        } else if depth.y >= depth.z {
            Vector3::new(0.0, safe_sign(local.y), 0.0)
        } else {
            Vector3::new(0.0, 0.0, safe_sign(local.z))
        }
    }
}

fn inverse_component(component: f32) -> f32 {
    if component.abs() < PARALLEL_THRESHOLD {
        SLAB_SENTINEL
    } else {
        1.0 / component
    }
}

// NaN이면 0
pub fn safe_sign(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Cuboid(Cuboid),
}

impl Shape {
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Cuboid(cuboid) => cuboid.intersect(ray),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        match self {
            Shape::Sphere(sphere) => sphere.center,
            Shape::Cuboid(cuboid) => cuboid.center,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Cuboid> for Shape {
    fn from(cuboid: Cuboid) -> Self {
        Shape::Cuboid(cuboid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::origin(), 1.0)
    }

    fn unit_cube() -> Cuboid {
        Cuboid::new(Point3::origin(), Vector3::repeat(1.0))
    }

    #[test]
    fn sphere_hit_from_outside() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::z());
        let hit = unit_sphere().intersect(&ray).unwrap();

        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn sphere_hit_off_axis_center() {
        let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 0.5);
        let origin = Point3::new(4.0, -2.0, 3.0);
        let ray = Ray::new(origin, sphere.center - origin);
        let hit = sphere.intersect(&ray).unwrap();

        assert_relative_eq!(hit.distance, 5.0 - 0.5, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.norm(), 1.0, epsilon = 1e-5);
        // 중심에서 바깥을 향함
        let outward = (hit.point - sphere.center).normalize();
        assert_relative_eq!(hit.normal, outward, epsilon = 1e-5);
        assert!(hit.normal.dot(&(origin - sphere.center)) > 0.0);
    }

    #[test]
    fn sphere_from_inside_uses_far_root() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        let hit = unit_sphere().intersect(&ray).unwrap();

        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vector3::x(), epsilon = 1e-5);
    }

    #[test]
    fn sphere_miss_and_behind() {
        let miss = Ray::new(Point3::new(0.0, 2.0, -5.0), Vector3::z());
        assert!(unit_sphere().intersect(&miss).is_none());

        let behind = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::z());
        assert!(unit_sphere().intersect(&behind).is_none());
    }

    #[test]
    fn sphere_rejects_own_surface() {
        // 표면에서 바깥으로 출발하는 광선은 자기 자신과 교차하지 않음
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn cuboid_face_normals() {
        let cube = unit_cube();
        let cases = [
            (Point3::new(5.0, 0.0, 0.0), Vector3::x()),
            (Point3::new(-5.0, 0.0, 0.0), -Vector3::x()),
            (Point3::new(0.0, 5.0, 0.0), Vector3::y()),
            (Point3::new(0.0, -5.0, 0.0), -Vector3::y()),
            (Point3::new(0.0, 0.0, 5.0), Vector3::z()),
            (Point3::new(0.0, 0.0, -5.0), -Vector3::z()),
        ];

        for (origin, expected) in cases {
            let ray = Ray::new(origin, cube.center - origin);
            let hit = cube.intersect(&ray).unwrap();
            assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
            assert_eq!(hit.normal, expected);
        }
    }

    #[test]
    fn cuboid_near_parallel_direction_stays_finite() {
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(-1.0, 1e-8, 0.0));
        let hit = unit_cube().intersect(&ray).unwrap();

        assert!(hit.distance.is_finite());
        assert!(hit.point.iter().all(|c| c.is_finite()));
        assert_eq!(hit.normal, Vector3::x());
    }

    #[test]
    fn cuboid_from_inside_exits() {
        let ray = Ray::new(Point3::new(0.5, 0.0, 0.0), Vector3::x());
        let hit = unit_cube().intersect(&ray).unwrap();

        assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-5);
        assert_eq!(hit.normal, Vector3::x());
    }

    #[test]
    fn cuboid_miss() {
        let ray = Ray::new(Point3::new(5.0, 3.0, 0.0), -Vector3::x());
        assert!(unit_cube().intersect(&ray).is_none());

        let away = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::x());
        assert!(unit_cube().intersect(&away).is_none());
    }

    #[test]
    fn cuboid_normal_tie_prefers_x_then_y() {
        let cube = unit_cube();
        assert_eq!(cube.normal_at(&Point3::new(1.0, 1.0, 1.0)), Vector3::x());
        assert_eq!(cube.normal_at(&Point3::new(0.0, -1.0, -1.0)), -Vector3::y());
        assert_eq!(cube.normal_at(&Point3::new(0.2, 0.3, -1.0)), -Vector3::z());
    }

    #[test]
    fn cuboid_normal_of_nan_point_is_zero() {
        let normal = unit_cube().normal_at(&Point3::new(f32::NAN, f32::NAN, f32::NAN));
        assert_eq!(normal, Vector3::zeros());
    }

    #[test]
    fn safe_sign_handles_nan() {
        assert_eq!(safe_sign(f32::NAN), 0.0);
        assert_eq!(safe_sign(0.0), 1.0);
        assert_eq!(safe_sign(-3.0), -1.0);
    }
}
