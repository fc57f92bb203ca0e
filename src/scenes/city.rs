use std::path::{Path, PathBuf};

use eframe::glow;
use glam::{Mat3, Mat4, Vec3};
use rand::Rng;

use super::Scene;
use crate::{
    config::{LabConfig, ViewConfig},
    error::GfxError,
    gfx::{
        shader::ShaderUniformTypes,
        texture::Pixels,
        Drawable, FrameMatrices, FreeLookCamera, Material, MeshLibrary, Model, Shader,
        ShaderSource, Shape, Texture, Transform, TransformOrder,
    },
};

const GRID_START: i32 = -10;
const GRID_END: i32 = 10;
const GRID_STEP: f32 = 2.25;

const BASE_SIZE: f32 = 16.0;
const MAX_EXTRA_HEIGHT: f32 = 8.0;

const FACADE_PATTERNS: [&str; 2] = ["facade*.jpg", "facade*.png"];

/// Cubemap faces in +X, -X, +Y, -Y, +Z, -Z order.
pub const SKYBOX_FACES: [&str; 6] = [
    "facade0.jpg",
    "facade1.jpg",
    "facade2.jpg",
    "facade3.jpg",
    "facade4.jpg",
    "facade5.jpg",
];

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                  City Layout                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Placement of one building before any GPU resources exist.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSpec {
    /// Grid cell, in units of the base size.
    pub cell: Vec3,
    pub scale: Vec3,
    pub facade: usize,
}

impl BuildingSpec {
    pub fn transform(&self) -> Transform {
        Transform::new(self.cell, self.scale).with_order(TransformOrder::ScaleTranslate)
    }
}

/// Grid coordinates along one axis. The step is fractional but coordinates are
/// integers, so every step truncates toward zero.
pub fn grid_coordinates() -> Vec<i32> {
    let mut coords = Vec::new();
    let mut i = GRID_START;
    while i < GRID_END {
        coords.push(i);
        i = (i as f32 + GRID_STEP) as i32;
    }
    coords
}

/// Random building heights and facades over the grid.
pub fn generate_layout<R: Rng>(rng: &mut R, facade_count: usize) -> Vec<BuildingSpec> {
    let coords = grid_coordinates();
    let mut layout = Vec::with_capacity(coords.len() * coords.len());
    for &i in &coords {
        for &j in &coords {
            let height = 1.0 + rng.gen::<f32>() * MAX_EXTRA_HEIGHT;
            let facade = if facade_count > 0 {
                rng.gen_range(0..facade_count)
            } else {
                0
            };
            layout.push(BuildingSpec {
                cell: Vec3::new(i as f32, 0.0, j as f32),
                scale: Vec3::new(BASE_SIZE, height * BASE_SIZE, BASE_SIZE),
                facade,
            });
        }
    }
    layout
}

/// Facade images found in `dir`, sorted by path.
pub fn discover_facades(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for pattern in FACADE_PATTERNS {
        let pattern = dir.join(pattern);
        let Some(pattern) = pattern.to_str() else {
            log::warn!("Asset path {} is not valid UTF-8", dir.display());
            return found;
        };
        match glob::glob(pattern) {
            Ok(paths) => found.extend(paths.filter_map(Result::ok)),
            Err(e) => log::warn!("Invalid facade pattern {pattern}: {e}"),
        }
    }
    found.sort();
    found
}

fn fallback_facade() -> Pixels {
    Pixels::checker(64, 8, [200, 200, 190], [90, 100, 120])
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                     Skybox                                                        //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Skybox {
    shader: Shader,
    view: Option<glow::UniformLocation>,
    projection: Option<glow::UniformLocation>,
    sampler: Option<glow::UniformLocation>,
    cubemap: Texture,
}

impl Skybox {
    fn new(gl: &glow::Context, config: &LabConfig) -> Result<Self, GfxError> {
        let shader = Shader::from_source(
            gl,
            &ShaderSource::Files {
                vertex: config.shader("skybox.vert"),
                fragment: config.shader("skybox.frag"),
            },
        )?;

        let faces: Vec<PathBuf> = SKYBOX_FACES.iter().map(|face| config.asset(face)).collect();
        let cubemap = match Texture::load_cubemap(gl, &faces) {
            Ok(cubemap) => cubemap,
            Err(e) => {
                log::warn!("Cubemap texture failed to load, using a flat sky: {e}");
                let sky = [(); 6].map(|_| Pixels::solid([110, 150, 200]));
                match Texture::cubemap(gl, &sky) {
                    Ok(cubemap) => cubemap,
                    Err(e) => {
                        shader.destroy(gl);
                        return Err(e);
                    }
                }
            }
        };

        Ok(Self {
            view: shader.uniform_location(gl, "view"),
            projection: shader.uniform_location(gl, "projection"),
            sampler: shader.uniform_location(gl, "skybox"),
            shader,
            cubemap,
        })
    }

    /// Drawn behind everything: depth stays at the far plane and is never written.
    fn draw(&self, gl: &glow::Context, meshes: &MeshLibrary, frame: &FrameMatrices) {
        use glow::HasContext as _;

        let Some(mesh) = meshes.get(Shape::Skybox) else {
            return;
        };
        let view = skybox_view(&frame.view);

        unsafe {
            gl.depth_mask(false);
            gl.depth_func(glow::LEQUAL);
            gl.disable(glow::CULL_FACE);
        }

        self.shader.use_program(gl);
        self.shader
            .set_uniform(gl, self.view.as_ref(), ShaderUniformTypes::Mat4(&view));
        self.shader.set_uniform(
            gl,
            self.projection.as_ref(),
            ShaderUniformTypes::Mat4(&frame.proj),
        );
        self.cubemap.bind(gl, 0);
        self.shader
            .set_uniform(gl, self.sampler.as_ref(), ShaderUniformTypes::I32(&0));

        mesh.bind(gl);
        mesh.draw(gl);
        mesh.unbind(gl);

        unsafe {
            gl.depth_mask(true);
            gl.depth_func(glow::LESS);
            gl.enable(glow::CULL_FACE);
        }
    }

    fn destroy(&self, gl: &glow::Context) {
        self.cubemap.destroy(gl);
        self.shader.destroy(gl);
    }
}

/// Strips the translation from a view matrix.
pub fn skybox_view(view: &Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(*view))
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                   City Scene                                                      //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Building {
    facade: usize,
    drawable: Drawable,
}

/// A grid of textured buildings under a skybox.
pub struct City {
    config: LabConfig,
    facade_paths: Vec<PathBuf>,
    buildings: Vec<Building>,

    meshes: MeshLibrary,
    material: Option<Material>,
    facades: Vec<Texture>,
    skybox: Option<Skybox>,
}

impl City {
    pub fn default_config() -> LabConfig {
        LabConfig::default()
            .with_title("Lab 2")
            .with_view(ViewConfig::default().with_far(10000.0))
    }

    pub fn new<R: Rng>(config: LabConfig, rng: &mut R) -> Self {
        let facade_paths = discover_facades(&config.asset_dir);
        if facade_paths.is_empty() {
            log::warn!(
                "No facade images in {}, buildings use a generated texture",
                config.asset_dir.display()
            );
        }

        let buildings = generate_layout(rng, facade_paths.len())
            .into_iter()
            .map(|spec| Building {
                facade: spec.facade,
                drawable: Drawable::new(Shape::FacadeBox, spec.transform()),
            })
            .collect();

        Self {
            config,
            facade_paths,
            buildings,
            meshes: MeshLibrary::new(),
            material: None,
            facades: Vec::new(),
            skybox: None,
        }
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    fn load_facades(&mut self, gl: &glow::Context) -> Result<(), GfxError> {
        for path in &self.facade_paths {
            let texture = match Texture::load_tile_box(gl, path) {
                Ok(texture) => texture,
                Err(e) => {
                    log::warn!("Failed to load texture {}: {e}", path.display());
                    Texture::tile_box(gl, &fallback_facade())?
                }
            };
            self.facades.push(texture);
        }
        if self.facades.is_empty() {
            self.facades.push(Texture::tile_box(gl, &fallback_facade())?);
        }

        for building in &mut self.buildings {
            building.drawable.texture = self.facades.get(building.facade).copied();
        }
        Ok(())
    }
}

impl Model for City {
    fn setup_gl(&mut self, gl: &glow::Context) -> Result<(), GfxError> {
        if self.material.is_some() {
            return Ok(());
        }

        self.meshes.upload(gl, Shape::FacadeBox)?;
        self.meshes.upload(gl, Shape::Skybox)?;

        let source = ShaderSource::Files {
            vertex: self.config.shader("box.vert"),
            fragment: self.config.shader("box.frag"),
        };
        self.material = Some(Material::new(gl, &source, true)?);
        self.load_facades(gl)?;
        self.skybox = Some(Skybox::new(gl, &self.config)?);

        log::info!(
            "{}: {} buildings, {} facades",
            self.config.title,
            self.buildings.len(),
            self.facades.len()
        );
        Ok(())
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        for building in &mut self.buildings {
            building.drawable.texture = None;
        }
        for texture in self.facades.drain(..) {
            texture.destroy(gl);
        }
        if let Some(skybox) = self.skybox.take() {
            skybox.destroy(gl);
        }
        if let Some(material) = self.material.take() {
            material.destroy(gl);
        }
        self.meshes.destroy(gl);
    }

    fn draw(&mut self, gl: &glow::Context, frame: &FrameMatrices) {
        let (Some(material), Some(skybox)) = (&self.material, &self.skybox) else {
            return;
        };

        unsafe {
            use glow::HasContext as _;
            gl.enable(glow::CULL_FACE);
        }

        skybox.draw(gl, &self.meshes, frame);
        for building in &self.buildings {
            building
                .drawable
                .draw(gl, &self.meshes, material, &frame.view_proj);
        }

        unsafe {
            use glow::HasContext as _;
            gl.disable(glow::CULL_FACE);
        }
    }
}

impl Scene for City {
    type Camera = FreeLookCamera;

    fn config(&self) -> &LabConfig {
        &self.config
    }

    fn initial_camera(&self) -> FreeLookCamera {
        FreeLookCamera::new()
            .with_pos(Vec3::new(0.0, 150.0, 450.0))
            .with_yaw(-90.0)
            .with_pitch(-15.0)
    }
}
