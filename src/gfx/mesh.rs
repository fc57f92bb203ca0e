use std::collections::HashMap;

use eframe::glow;
use zerocopy::AsBytes;

use super::geometry::{Geometry, Shape};
use crate::error::GfxError;

pub const POSITION_SLOT: u32 = 0;
pub const COLOR_SLOT: u32 = 1;
pub const UV_SLOT: u32 = 2;

/// GPU copy of one `Geometry`: a vertex array plus one buffer per stream.
#[derive(Debug, Clone)]
pub struct GpuMesh {
    geometry: &'static Geometry,
    vao: glow::VertexArray,
    buffers: Vec<glow::Buffer>,
    slots: Vec<u32>,
}

impl GpuMesh {
    pub fn upload(gl: &glow::Context, geometry: &'static Geometry) -> Result<Self, GfxError> {
        use glow::HasContext as _;

        unsafe {
            let vao = gl.create_vertex_array().map_err(GfxError::ResourceCreation)?;
            gl.bind_vertex_array(Some(vao));

            let mut mesh = Self {
                geometry,
                vao,
                buffers: Vec::new(),
                slots: Vec::new(),
            };

            let mut streams = vec![(POSITION_SLOT, 3, geometry.positions)];
            if let Some(colors) = geometry.colors {
                streams.push((COLOR_SLOT, 3, colors));
            }
            if let Some(uvs) = geometry.uvs {
                streams.push((UV_SLOT, 2, uvs));
            }

            for (slot, size, data) in streams {
                let vbo = match gl.create_buffer() {
                    Ok(vbo) => vbo,
                    Err(e) => {
                        gl.bind_vertex_array(None);
                        mesh.destroy(gl);
                        return Err(GfxError::ResourceCreation(e));
                    }
                };
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.as_bytes(), glow::STATIC_DRAW);
                gl.vertex_attrib_pointer_f32(slot, size, glow::FLOAT, false, 0, 0);
                mesh.buffers.push(vbo);
                mesh.slots.push(slot);
            }

            if let Some(indices) = geometry.indices {
                let ibo = match gl.create_buffer() {
                    Ok(ibo) => ibo,
                    Err(e) => {
                        gl.bind_vertex_array(None);
                        mesh.destroy(gl);
                        return Err(GfxError::ResourceCreation(e));
                    }
                };
                // The element binding is recorded in the bound vertex array
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    indices.as_bytes(),
                    glow::STATIC_DRAW,
                );
                mesh.buffers.push(ibo);
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(mesh)
        }
    }

    /// Binds the vertex array and enables its attribute streams.
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            for &slot in &self.slots {
                gl.enable_vertex_attrib_array(slot);
            }
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        let mode = self.geometry.primitive.gl_enum();
        let count = self.geometry.draw_count() as i32;
        unsafe {
            if self.geometry.indices.is_some() {
                gl.draw_elements(mode, count, glow::UNSIGNED_INT, 0);
            } else {
                gl.draw_arrays(mode, 0, count);
            }
        }
    }

    /// Disables the streams enabled by `bind`.
    pub fn unbind(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            for &slot in &self.slots {
                gl.disable_vertex_attrib_array(slot);
            }
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            for &buffer in &self.buffers {
                gl.delete_buffer(buffer);
            }
            gl.delete_vertex_array(self.vao);
        }
    }
}

/// Meshes shared by every drawable of a scene, uploaded at most once per shape.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: HashMap<Shape, GpuMesh>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&mut self, gl: &glow::Context, shape: Shape) -> Result<(), GfxError> {
        if self.meshes.contains_key(&shape) {
            return Ok(());
        }
        let mesh = GpuMesh::upload(gl, shape.geometry())?;
        log::debug!("Uploaded {shape:?} mesh ({} vertices)", shape.geometry().vertex_count());
        self.meshes.insert(shape, mesh);
        Ok(())
    }

    pub fn get(&self, shape: Shape) -> Option<&GpuMesh> {
        self.meshes.get(&shape)
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        for (_, mesh) in self.meshes.drain() {
            mesh.destroy(gl);
        }
    }
}
