use nalgebra::{Point3, Vector3};

use crate::tracer::ray::Ray;

/// 핀홀 카메라. 언제나 +Z 방향을 바라봄.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub focal_length: f32,

    width: u32,
    height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, -2.0), 1.0, 800, 600)
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, focal_length: f32, width: u32, height: u32) -> Self {
        Self {
            position,
            focal_length,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
    }

    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.position += delta;
    }

    // 픽셀 좌표 -> [-1, 1] 좌표. 화면은 아래로, 수학 좌표는 위로 증가하니 y는 뒤집음
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        let u = (x / self.width as f32 * 2.0 - 1.0) * self.aspect();
        let v = -(y / self.height as f32 * 2.0 - 1.0);

        Ray::new(self.position, Vector3::new(u, v, self.focal_length))
    }
}
