use bytemuck::cast_slice;
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::tracer::ray::Ray;
use crate::tracer::scene::{HitInfo, Light, Scene};

pub mod material;
pub mod ray;
pub mod scene;
pub mod shape;

// 새로 쏘는 광선을 표면에서 띄우는 거리
pub const RAY_BIAS: f32 = 0.005;
pub const DEFAULT_DEPTH: u32 = 4;
pub const MAX_DEPTH: u32 = 8;

const AMBIENT: f32 = 0.05;
const LIGHTING_THRESHOLD: f32 = 0.01;
// 이보다 투명한 물체는 그림자를 만들지 않음
const SHADOW_OPACITY: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub depth: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

pub struct Tracer {
    pixels: Vec<[u8; 4]>,
    width: u32,
    height: u32,
    pub settings: Settings,
}

impl Tracer {
    pub fn new(width: u32, height: u32, settings: Settings) -> Self {
        Self {
            pixels: vec![[0, 0, 0, 0xFF]; width as usize * height as usize],
            width,
            height,
            settings,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }

        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 0xFF]; width as usize * height as usize];
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 한 프레임 렌더링. 렌더링 도중 `scene`은 빌려온 상태라 바뀔 수 없음.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.resize(camera.width(), camera.height());
        if self.pixels.is_empty() {
            return;
        }

        let depth = self.settings.depth;
        let width = self.width as usize;

        // 줄 단위로 병렬 처리. 각 작업은 자기 줄만 씀
        self.pixels
            .par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = per_pixel(scene, camera, x as u32, y as u32, depth);
                }
            });
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// RGBA 순서, 행 우선의 4 * W * H 바이트
    pub fn bytes(&self) -> &[u8] {
        cast_slice(&self.pixels)
    }
}

// DirectX의 RayGen 쉐이더와 같음
pub fn per_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32, depth: u32) -> [u8; 4] {
    let ray = camera.ray(x as f32, y as f32);
    tone_map(&trace(scene, &ray, depth))
}

/// 재귀 광선 추적. 반환값은 톤 매핑 전의 선형 색이라 1을 넘을 수 있음.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32) -> Vector3<f32> {
    if depth == 0 {
        return Vector3::zeros();
    }

    // 닫힌 방이니 아무것도 안 맞으면 그냥 검정
    let Some((hit, _)) = scene.closest_hit(ray) else {
        return Vector3::zeros();
    };
    let material = &hit.material;

    let mut color = Vector3::zeros();

    // 투명할수록 직접광을 덜 받음. 안 그러면 유리가 플라스틱처럼 보임
    let weight = 1.0 - material.transparency;
    if weight > LIGHTING_THRESHOLD {
        color += material.albedo * AMBIENT * weight;

        for light in &scene.lights {
            color += direct_light(scene, ray, &hit, light, weight);
        }
    }

    if material.reflectivity > 0.0 {
        let bounce = Ray::new(
            hit.point + hit.normal * RAY_BIAS,
            reflect(&ray.direction, &hit.normal),
        );
        color += trace(scene, &bounce, depth - 1) * material.reflectivity;
    }

    if material.transparency > 0.0 {
        let mut normal = hit.normal;
        let mut eta = 1.0 / material.ior;

        // 물체 안에서 밖으로 나가는 중
        if ray.direction.dot(&normal) > 0.0 {
            normal = -normal;
            eta = material.ior;
        }

        match refract(&ray.direction, &normal, eta) {
            Some(direction) => {
                // 굴절 광선은 표면 안쪽으로 띄움
                let inner = Ray::new(hit.point - normal * RAY_BIAS, direction);
                let refracted = trace(scene, &inner, depth - 1);
                color = color.lerp(&refracted, material.transparency);
            }
            None => {
                // 전반사
                let inner = Ray::new(
                    hit.point + normal * RAY_BIAS,
                    reflect(&ray.direction, &normal),
                );
                color += trace(scene, &inner, depth - 1) * material.transparency;
            }
        }
    }

    color
}

// Blinn-Phong
fn direct_light(scene: &Scene, ray: &Ray, hit: &HitInfo, light: &Light, weight: f32) -> Vector3<f32> {
    let to_light = light.position - hit.point;
    let distance = to_light.norm();
    let light_direction = to_light.normalize();

    let shadow = Ray::new(hit.point + hit.normal * RAY_BIAS, light_direction);
    if let Some((blocker, _)) = scene.closest_hit(&shadow) {
        if blocker.distance < distance && blocker.material.transparency < SHADOW_OPACITY {
            return Vector3::zeros();
        }
    }

    let material = &hit.material;

    let n_dot_l = hit.normal.dot(&light_direction).max(0.0);
    let diffuse = material.albedo.component_mul(&light.color) * n_dot_l * light.intensity * weight;

    let view = -ray.direction.into_inner();
    let half = (light_direction + view).normalize();
    let n_dot_h = hit.normal.dot(&half).max(0.0);
    // 지수가 0이면 pow(0, 0)이 애매하니 1로 취급
    let exponent = if material.smoothness > 0.0 {
        material.smoothness
    } else {
        1.0
    };
    let specular = light.color * material.specular * n_dot_h.powf(exponent) * light.intensity;

    diffuse + specular
}

pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

// Snell 법칙. 근이 없으면 전반사라 None
pub fn refract(incident: &Vector3<f32>, normal: &Vector3<f32>, eta: f32) -> Option<Vector3<f32>> {
    let cos = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos * cos);
    if k < 0.0 {
        return None;
    }

    Some(incident * eta - normal * (eta * cos + k.sqrt()))
}

// Reinhard 톤 매핑 후 감마 2.0 근사
pub fn tone_map(color: &Vector3<f32>) -> [u8; 4] {
    let mapped = color.map(|c| (c / (c + 1.0)).clamp(0.0, 1.0).sqrt());

    [
        (mapped.x * 255.0) as u8,
        (mapped.y * 255.0) as u8,
        (mapped.z * 255.0) as u8,
        0xFF,
    ]
}
