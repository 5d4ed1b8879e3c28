use std::str::FromStr;

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::tracer::material::Material;
use crate::tracer::scene::{Light, ObjectId, Scene, SceneObject};
use crate::tracer::shape::{Cuboid, Sphere};
use crate::util::{parse_floats, random_between, random_color, random_vec};

/// 프레임과 프레임 사이에만 적용되는 장면 편집 명령
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddSphere {
        center: Point3<f32>,
        radius: f32,
        color: Vector3<f32>,
    },
    AddCuboid {
        center: Point3<f32>,
        half_extents: Vector3<f32>,
        color: Vector3<f32>,
    },
    AddLight(Light),
    Remove(ObjectId),
    ToggleMirror(ObjectId),
    ToggleGlass(ObjectId),
    // 가장 마지막에 추가한 조명을 옮김
    MoveLight { delta: Vector3<f32> },
}

impl Edit {
    pub fn random_sphere() -> Self {
        Edit::AddSphere {
            center: random_position(),
            radius: random_between(0.2, 0.6),
            color: random_color(),
        }
    }

    pub fn random_cuboid() -> Self {
        let size = random_between(0.2, 0.6);
        Edit::AddCuboid {
            center: random_position(),
            half_extents: Vector3::repeat(size),
            color: random_color(),
        }
    }

    pub fn magenta_light() -> Self {
        Edit::AddLight(Light {
            position: Point3::new(0.0, 0.0, -1.0),
            color: Vector3::new(1.0, 0.0, 1.0),
            intensity: 1.0,
        })
    }
}

// x, y는 [-1, 1), z는 0
fn random_position() -> Point3<f32> {
    let mut position = random_vec(-1.0..1.0);
    position.z = 0.0;
    Point3::from(position)
}

impl Scene {
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        debug!("applying {edit:?}");

        match edit {
            Edit::AddSphere {
                center,
                radius,
                color,
            } => {
                let object = SceneObject::new("GenSphere", Sphere::new(center, radius), Material::lambert(color));
                self.objects.push(object.with_base_color(color));
            }
            Edit::AddCuboid {
                center,
                half_extents,
                color,
            } => {
                let object = SceneObject::new("GenCube", Cuboid::new(center, half_extents), Material::lambert(color));
                self.objects.push(object.with_base_color(color));
            }
            Edit::AddLight(light) => self.lights.push(light),
            Edit::Remove(id) => {
                self.object_mut(id)?;
                self.objects.remove(id);
            }
            Edit::ToggleMirror(id) => toggle_mirror(self.object_mut(id)?),
            Edit::ToggleGlass(id) => toggle_glass(self.object_mut(id)?),
            Edit::MoveLight { delta } => {
                let light = self.lights.last_mut().ok_or(Error::NoLights)?;
                light.position += delta;
            }
        }

        Ok(())
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.objects.get_mut(id).ok_or(Error::NoSuchObject(id))
    }
}

// 어두운 색은 원래 색으로 기억하지 않음
const BASE_COLOR_THRESHOLD: f32 = 0.1;

fn remember_albedo(object: &mut SceneObject) {
    if object.material.albedo.norm() > BASE_COLOR_THRESHOLD {
        object.base_color = Some(object.material.albedo);
    }
}

fn toggle_mirror(object: &mut SceneObject) {
    if object.material.is_mirror() {
        let base = *object.base_color.get_or_insert(object.material.albedo);
        object.material = Material::lambert(base);
    } else {
        remember_albedo(object);
        object.material = Material::metal(Vector3::repeat(1.0), 0.0);
    }
}

fn toggle_glass(object: &mut SceneObject) {
    if object.material.is_transparent() {
        // 원래 색을 잃어버렸으면 회색
        let base = *object.base_color.get_or_insert(Vector3::repeat(0.5));
        object.material = Material::lambert(base);
    } else {
        remember_albedo(object);
        object.material = Material::glass(Material::GLASS_IOR);
    }
}

fn is_unit_color(r: f32, g: f32, b: f32) -> bool {
    [r, g, b].iter().all(|c| (0.0..=1.0).contains(c))
}

impl FromStr for Edit {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidEdit {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (command, arguments) = match input.split_once(':') {
            Some((command, arguments)) => (command.trim(), Some(arguments)),
            None => (input.trim(), None),
        };

        let Some(arguments) = arguments else {
            return match command {
                "sphere" => Ok(Edit::random_sphere()),
                "cube" => Ok(Edit::random_cuboid()),
                "light" => Ok(Edit::magenta_light()),
                _ => Err(invalid("unknown command")),
            };
        };

        match command {
            "remove" | "mirror" | "glass" => {
                let id = arguments
                    .trim()
                    .parse::<ObjectId>()
                    .map_err(|_| invalid("expected an object id"))?;

                Ok(match command {
                    "remove" => Edit::Remove(id),
                    "mirror" => Edit::ToggleMirror(id),
                    _ => Edit::ToggleGlass(id),
                })
            }
            "move-light" => match parse_floats(arguments).as_deref() {
                Some(&[x, y, z]) => Ok(Edit::MoveLight {
                    delta: Vector3::new(x, y, z),
                }),
                _ => Err(invalid("expected `dx,dy,dz`")),
            },
            "sphere" | "cube" => match parse_floats(arguments).as_deref() {
                Some(&[x, y, z, size, r, g, b]) => {
                    if size <= 0.0 {
                        return Err(invalid("size must be positive"));
                    }
                    if !is_unit_color(r, g, b) {
                        return Err(invalid("color components must be in [0, 1]"));
                    }

                    let center = Point3::new(x, y, z);
                    let color = Vector3::new(r, g, b);
                    Ok(if command == "sphere" {
                        Edit::AddSphere {
                            center,
                            radius: size,
                            color,
                        }
                    } else {
                        Edit::AddCuboid {
                            center,
                            half_extents: Vector3::repeat(size),
                            color,
                        }
                    })
                }
                _ => Err(invalid("expected `x,y,z,size,r,g,b`")),
            },
            "light" => match parse_floats(arguments).as_deref() {
                Some(&[x, y, z, r, g, b, intensity]) => {
                    if intensity < 0.0 {
                        return Err(invalid("intensity must not be negative"));
                    }
                    if !is_unit_color(r, g, b) {
                        return Err(invalid("color components must be in [0, 1]"));
                    }

                    Ok(Edit::AddLight(Light {
                        position: Point3::new(x, y, z),
                        color: Vector3::new(r, g, b),
                        intensity,
                    }))
                }
                _ => Err(invalid("expected `x,y,z,r,g,b,intensity`")),
            },
            _ => Err(invalid("unknown command")),
        }
    }
}

/// 다음 프레임 시작 전에 한꺼번에 적용할 편집들
#[derive(Debug, Default)]
pub struct EditQueue {
    pending: Vec<Edit>,
}

impl EditQueue {
    pub fn push(&mut self, edit: Edit) {
        self.pending.push(edit);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Edit> {
        std::mem::take(&mut self.pending).into_iter()
    }
}
