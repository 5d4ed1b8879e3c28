use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use image::ColorType;
use log::{debug, info, warn};

use crate::camera::Camera;
use crate::config::Config;
use crate::edit::{Edit, EditQueue};
use crate::tracer::scene::{ObjectId, Scene};
use crate::tracer::Tracer;

pub struct Application {
    pub scene: Scene,
    pub camera: Camera,
    pub tracer: Tracer,
    edits: EditQueue,
    frame_count: u64,
}

impl Application {
    pub fn new(config: &Config) -> Self {
        let camera = Camera::new(config.eye(), config.focal_length, config.width, config.height);
        let tracer = Tracer::new(config.width, config.height, config.settings());

        Self {
            scene: Scene::room(),
            camera,
            tracer,
            edits: EditQueue::default(),
            frame_count: 0,
        }
    }

    // 편집은 바로 적용하지 않고 다음 프레임 시작 때 한꺼번에 적용함
    pub fn queue(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn pending_edits(&self) -> usize {
        self.edits.len()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.tracer.resize(self.camera.width(), self.camera.height());
    }

    pub fn pick(&self, x: f32, y: f32) -> Option<ObjectId> {
        let picked = self.scene.pick(&self.camera, x, y);
        if let Some(object) = picked.and_then(|id| self.scene.object(id)) {
            info!("selected {} at {:?}", object.name, object.shape.position());
        }

        picked
    }

    /// 편집 적용 -> 렌더링 -> 완성된 버퍼 반환. 반환된 버퍼는 언제나 완성된 프레임임.
    pub fn frame(&mut self) -> &[u8] {
        for edit in self.edits.drain() {
            if let Err(error) = self.scene.apply(edit) {
                warn!("skipping edit: {error}");
            }
        }

        let start = Instant::now();
        self.tracer.render(&self.scene, &self.camera);
        self.frame_count += 1;

        debug!(
            "frame {} rendered in {:?} ({} objects, {} lights)",
            self.frame_count,
            start.elapsed(),
            self.scene.objects.len(),
            self.scene.lights.len()
        );

        self.tracer.bytes()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let (width, height) = self.tracer.size();

        image::save_buffer(path, self.tracer.bytes(), width, height, ColorType::Rgba8)
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!("wrote {}x{} frame to {}", width, height, path.display());
        Ok(())
    }
}

pub fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let mut app = Application::new(&config);
    for edit in config.edits.iter().cloned() {
        app.queue(edit);
    }

    let start = Instant::now();
    for _ in 0..config.frames {
        app.frame();
    }

    let elapsed = start.elapsed();
    info!(
        "rendered {} frame(s) at {}x{} in {:?} ({:.1} ms/frame)",
        app.frame_count(),
        config.width,
        config.height,
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / app.frame_count().max(1) as f64
    );

    app.save_png(&config.output)
}
