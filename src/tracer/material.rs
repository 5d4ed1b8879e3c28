use nalgebra::Vector3;

/// 표면 재질. 반사율과 투명도는 서로 독립적이며 합이 1일 필요는 없음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub albedo: Vector3<f32>,
    pub specular: f32,
    // Phong 지수
    pub smoothness: f32,
    pub reflectivity: f32,
    pub transparency: f32,
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::lambert(Vector3::new(1.0, 1.0, 1.0))
    }
}

impl Material {
    pub const GLASS_IOR: f32 = 1.05;

    pub fn lambert(color: Vector3<f32>) -> Self {
        Self {
            albedo: color,
            specular: 0.0,
            smoothness: 0.0,
            reflectivity: 0.0,
            transparency: 0.0,
            ior: 1.0,
        }
    }

    // 금속은 대부분을 반사하고 고유색은 약하게만 보임
    pub fn metal(color: Vector3<f32>, fuzz: f32) -> Self {
        Self {
            albedo: color,
            specular: 1.0,
            smoothness: 200.0,
            reflectivity: 0.95 - fuzz,
            transparency: 0.0,
            ior: 1.0,
        }
    }

    // 유리: albedo는 거의 검정, 빛 대부분이 굴절로 넘어감
    pub fn glass(ior: f32) -> Self {
        Self {
            albedo: Vector3::repeat(0.05),
            specular: 1.0,
            smoothness: 300.0,
            reflectivity: 0.1,
            transparency: 0.95,
            ior,
        }
    }

    pub fn is_mirror(&self) -> bool {
        self.reflectivity > 0.0
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}
