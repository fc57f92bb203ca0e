use std::f32::consts::{FRAC_PI_4, SQRT_2};

use eframe::glow;
use egui::Color32;
use glam::Vec3;

use super::Scene;
use crate::{
    config::{LabConfig, ViewConfig},
    error::GfxError,
    gfx::{
        Drawable, FrameMatrices, Material, MeshLibrary, Model, OrbitCamera, ResetMode, Shape,
        ShaderSource, Transform,
    },
};

const VERTEX_SHADER: &str = r#"#version 330 core

layout(location = 0) in vec3 vertexPosition;
layout(location = 1) in vec3 vertexColor;

out vec3 color;

uniform mat4 MVP;

void main() {
    gl_Position = MVP * vec4(vertexPosition, 1);
    color = vertexColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core

in vec3 color;

out vec4 finalColor;

void main() {
    finalColor = vec4(color, 1.0);
}
"#;

/// Distance of the satellite boxes from the origin.
const RING_RADIUS: f32 = 80.0;

/// Coordinate axes, one large box at the origin and eight small boxes around it.
pub struct AxisBoxes {
    config: LabConfig,
    objects: Vec<Drawable>,

    meshes: MeshLibrary,
    material: Option<Material>,
}

impl AxisBoxes {
    pub fn default_config() -> LabConfig {
        LabConfig::default()
            .with_title("Lab 1")
            .with_view(ViewConfig::default())
            .with_clear_color(Color32::from_rgb(51, 51, 51))
    }

    pub fn new(config: LabConfig) -> Self {
        Self {
            config,
            objects: Self::layout(),
            meshes: MeshLibrary::new(),
            material: None,
        }
    }

    /// Objects in draw order.
    pub fn layout() -> Vec<Drawable> {
        let mut objects = vec![
            Drawable::new(Shape::Axes, Transform::default()),
            Drawable::new(
                Shape::ColorBox,
                Transform::new(Vec3::ZERO, Vec3::splat(30.0)).with_rotation(Vec3::Y, 45.0),
            ),
        ];

        let k = RING_RADIUS;
        let k2 = k / SQRT_2;
        let k3 = k / 3f32.sqrt();
        let ring = [
            Vec3::new(0.0, k, 0.0),
            Vec3::new(-k2, 0.0, k2),
            Vec3::new(0.0, -k, 0.0),
            Vec3::new(k2, 0.0, -k2),
            Vec3::new(-k3, k3, k3),
            Vec3::new(-k3, -k3, k3),
            Vec3::new(k3, -k3, -k3),
            Vec3::new(k3, k3, -k3),
        ];
        objects.extend(ring.into_iter().map(|position| {
            Drawable::new(
                Shape::ColorBox,
                Transform::new(position, Vec3::splat(6.0)).with_rotation(Vec3::Z, 45.0),
            )
        }));
        objects
    }

    pub fn objects(&self) -> &[Drawable] {
        &self.objects
    }
}

impl Model for AxisBoxes {
    fn setup_gl(&mut self, gl: &glow::Context) -> Result<(), GfxError> {
        // Do not setup twice!
        if self.material.is_some() {
            return Ok(());
        }

        for object in &self.objects {
            self.meshes.upload(gl, object.shape)?;
        }

        let source = ShaderSource::Embedded {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        };
        self.material = Some(Material::new(gl, &source, false)?);

        log::info!("{}: {} objects ready", self.config.title, self.objects.len());
        Ok(())
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        self.meshes.destroy(gl);
        if let Some(material) = self.material.take() {
            material.destroy(gl);
        }
    }

    fn draw(&mut self, gl: &glow::Context, frame: &FrameMatrices) {
        let Some(material) = &self.material else {
            return;
        };

        unsafe {
            use glow::HasContext as _;
            gl.enable(glow::CULL_FACE);
        }

        for object in &self.objects {
            object.draw(gl, &self.meshes, material, &frame.view_proj);
        }

        unsafe {
            use glow::HasContext as _;
            gl.disable(glow::CULL_FACE);
        }
    }
}

impl Scene for AxisBoxes {
    type Camera = OrbitCamera;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Starts looking down the (1, 1, 1) diagonal. `R` only logs here.
    fn initial_camera(&self) -> OrbitCamera {
        OrbitCamera::new(self.config.orbit_distance)
            .with_azimuth(FRAC_PI_4)
            .with_polar((1.0 / 3f32.sqrt()).asin())
            .with_reset(ResetMode::LogOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Key;

    use crate::gfx::{CameraModel, TransformOrder};
    use crate::input::KeyEvent;

    #[test]
    fn layout_draws_axes_first() {
        let scene = AxisBoxes::new(AxisBoxes::default_config());
        let objects = scene.objects();
        assert_eq!(objects.len(), 10);
        assert_eq!(objects[0].shape, Shape::Axes);
        assert_eq!(objects[0].transform.matrix(), glam::Mat4::IDENTITY);
        assert!(objects[1..].iter().all(|o| o.shape == Shape::ColorBox));
    }

    #[test]
    fn satellites_sit_on_the_ring() {
        let objects = AxisBoxes::layout();
        for object in &objects[2..] {
            let transform = &object.transform;
            assert!((transform.position.length() - RING_RADIUS).abs() < 1e-3);
            assert_eq!(transform.scale, Vec3::splat(6.0));
            assert_eq!(transform.axis, Vec3::Z);
            assert_eq!(transform.angle_deg, 45.0);
            assert_eq!(transform.order, TransformOrder::TranslateScaleRotate);
        }
    }

    #[test]
    fn initial_eye_is_on_the_diagonal() {
        let scene = AxisBoxes::new(AxisBoxes::default_config());
        let eye = scene.initial_camera().eye();
        let expected = Vec3::splat(300.0 / 3f32.sqrt());
        assert!(eye.abs_diff_eq(expected, 1e-2), "{eye:?}");
    }

    #[test]
    fn r_key_leaves_the_camera_alone() {
        let scene = AxisBoxes::new(AxisBoxes::default_config());
        let camera = scene.initial_camera();
        assert_eq!(camera.reset_mode(), ResetMode::LogOnly);

        let moved = camera.on_key(&KeyEvent::press(Key::ArrowLeft));
        let after = moved.on_key(&KeyEvent::press(Key::R));
        assert_eq!(after, moved);
        assert!((after.azimuth() - (FRAC_PI_4 - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn embedded_shaders_use_the_mvp_uniform() {
        assert!(VERTEX_SHADER.contains("uniform mat4 MVP"));
        assert!(VERTEX_SHADER.contains("layout(location = 1)"));
        assert!(FRAGMENT_SHADER.starts_with("#version 330 core"));
    }
}
