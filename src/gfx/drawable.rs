use eframe::glow;
use glam::{Mat4, Vec3};

use super::{
    geometry::Shape,
    mesh::MeshLibrary,
    shader::{Shader, ShaderSource, ShaderUniformTypes},
    texture::Texture,
};
use crate::error::GfxError;

pub const MVP_UNIFORM: &str = "MVP";
pub const SAMPLER_UNIFORM: &str = "textureSampler";

/// Order in which a drawable's translation and scale are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOrder {
    /// `T * S * R`: scale and rotate around the local origin, then place.
    TranslateScaleRotate,
    /// `S * T * R`: the position is expressed in scaled units.
    ScaleTranslate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub axis: Vec3,
    pub angle_deg: f32,
    pub order: TransformOrder,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            axis: Vec3::ONE,
            angle_deg: 0.0,
            order: TransformOrder::TranslateScaleRotate,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, axis: Vec3, angle_deg: f32) -> Self {
        self.axis = axis;
        self.angle_deg = angle_deg;
        self
    }

    pub fn with_order(mut self, order: TransformOrder) -> Self {
        self.order = order;
        self
    }

    pub fn rotation(&self) -> Mat4 {
        match self.axis.try_normalize() {
            Some(axis) if self.angle_deg != 0.0 => {
                Mat4::from_axis_angle(axis, self.angle_deg.to_radians())
            }
            _ => Mat4::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let translate = Mat4::from_translation(self.position);
        let scale = Mat4::from_scale(self.scale);
        match self.order {
            TransformOrder::TranslateScaleRotate => translate * scale * self.rotation(),
            TransformOrder::ScaleTranslate => scale * translate * self.rotation(),
        }
    }
}

/// A linked program plus the uniform locations drawables write to.
#[derive(Debug, Clone)]
pub struct Material {
    shader: Shader,
    mvp: Option<glow::UniformLocation>,
    sampler: Option<glow::UniformLocation>,
}

impl Material {
    pub fn new(gl: &glow::Context, source: &ShaderSource, textured: bool) -> Result<Self, GfxError> {
        let shader = Shader::from_source(gl, source)?;
        let mvp = shader.uniform_location(gl, MVP_UNIFORM);
        let sampler = if textured {
            shader.uniform_location(gl, SAMPLER_UNIFORM)
        } else {
            None
        };
        Ok(Self {
            shader,
            mvp,
            sampler,
        })
    }

    pub fn destroy(&self, gl: &glow::Context) {
        self.shader.destroy(gl);
    }
}

/// One object of a scene: a shared mesh, a transform and an optional texture.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub shape: Shape,
    pub transform: Transform,
    pub texture: Option<Texture>,
}

impl Drawable {
    pub fn new(shape: Shape, transform: Transform) -> Self {
        Self {
            shape,
            transform,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn mvp(&self, view_proj: &Mat4) -> Mat4 {
        *view_proj * self.transform.matrix()
    }

    pub fn draw(
        &self,
        gl: &glow::Context,
        meshes: &MeshLibrary,
        material: &Material,
        view_proj: &Mat4,
    ) {
        let Some(mesh) = meshes.get(self.shape) else {
            return;
        };

        material.shader.use_program(gl);
        mesh.bind(gl);

        let mvp = self.mvp(view_proj);
        material
            .shader
            .set_uniform(gl, material.mvp.as_ref(), ShaderUniformTypes::Mat4(&mvp));

        if let Some(texture) = &self.texture {
            texture.bind(gl, 0);
            material
                .shader
                .set_uniform(gl, material.sampler.as_ref(), ShaderUniformTypes::I32(&0));
        }

        mesh.draw(gl);
        mesh.unbind(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_unit_scale_is_pure_translation() {
        let position = Vec3::new(3.0, -4.0, 12.5);
        for order in [TransformOrder::TranslateScaleRotate, TransformOrder::ScaleTranslate] {
            let transform = Transform::new(position, Vec3::ONE)
                .with_rotation(Vec3::new(0.0, 0.0, 1.0), 0.0)
                .with_order(order);
            assert_eq!(transform.matrix(), Mat4::from_translation(position));
        }
    }

    #[test]
    fn translate_then_scale_keeps_position_in_world_units() {
        let transform = Transform::new(Vec3::new(0.0, 80.0, 0.0), Vec3::splat(6.0));
        let corner = transform.matrix().transform_point3(Vec3::ONE);
        assert!(corner.abs_diff_eq(Vec3::new(6.0, 86.0, 6.0), 1e-4));
    }

    #[test]
    fn scale_then_translate_scales_position() {
        let transform = Transform::new(Vec3::new(-7.0, 0.0, 3.0), Vec3::new(16.0, 48.0, 16.0))
            .with_order(TransformOrder::ScaleTranslate);
        let center = transform.matrix().transform_point3(Vec3::ZERO);
        assert!(center.abs_diff_eq(Vec3::new(-112.0, 0.0, 48.0), 1e-4));
        let top = transform.matrix().transform_point3(Vec3::Y);
        assert!((top.y - 48.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_applies_before_scale() {
        let transform = Transform::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(Vec3::Z, 90.0);
        let p = transform.matrix().transform_point3(Vec3::X);
        // X rotates onto Y first, so the X scale does not touch it
        assert!(p.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn unnormalized_axis_is_accepted() {
        let a = Transform::default().with_rotation(Vec3::new(0.0, 5.0, 0.0), 45.0);
        let b = Transform::default().with_rotation(Vec3::Y, 45.0);
        assert!(a.matrix().abs_diff_eq(b.matrix(), 1e-6));
    }

    #[test]
    fn degenerate_axis_means_no_rotation() {
        let transform = Transform::default().with_rotation(Vec3::ZERO, 30.0);
        assert_eq!(transform.rotation(), Mat4::IDENTITY);
    }

    #[test]
    fn mvp_is_view_proj_times_model() {
        let drawable = Drawable::new(
            Shape::ColorBox,
            Transform::new(Vec3::X, Vec3::splat(2.0)),
        );
        let view_proj = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
        assert_eq!(drawable.mvp(&view_proj), view_proj * drawable.transform.matrix());
    }
}
