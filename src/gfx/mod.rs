pub mod camera;
pub mod drawable;
pub mod geometry;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use camera::{CameraModel, FreeLookCamera, OrbitCamera, ResetMode};
pub use drawable::{Drawable, Material, Transform, TransformOrder};
pub use geometry::Shape;
pub use mesh::MeshLibrary;
pub use shader::{Shader, ShaderSource};
pub use texture::Texture;

use eframe::glow;
use glam::Mat4;

use crate::{config::ViewConfig, error::GfxError};

/// Matrices shared by every drawable during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub proj: Mat4,
    pub view: Mat4,
    pub view_proj: Mat4,
}

impl FrameMatrices {
    pub fn new(view: Mat4, config: &ViewConfig, aspect: f32) -> Self {
        let proj = Mat4::perspective_rh_gl(
            config.fov_deg.to_radians(),
            aspect,
            config.z_near,
            config.z_far,
        );
        Self {
            proj,
            view,
            view_proj: proj * view,
        }
    }
}

/// GPU lifecycle of something drawable: created once, drawn every frame,
/// destroyed once before the context goes away.
pub trait Model {
    fn setup_gl(&mut self, gl: &glow::Context) -> Result<(), GfxError>;
    fn destroy_gl(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context, frame: &FrameMatrices);
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn view_proj_is_proj_times_view() {
        let view = Mat4::look_at_rh(Vec3::new(300.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        let frame = FrameMatrices::new(view, &ViewConfig::default(), 4.0 / 3.0);
        assert_eq!(frame.view_proj, frame.proj * frame.view);
    }

    #[test]
    fn look_at_target_lands_in_clip_center() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 300.0), Vec3::ZERO, Vec3::Y);
        let frame = FrameMatrices::new(view, &ViewConfig::default(), 4.0 / 3.0);
        let clip = frame.view_proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
