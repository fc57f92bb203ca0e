use std::{
    fs,
    path::{Path, PathBuf},
};

use eframe::glow;
use glam::Mat4;

use crate::error::{GfxError, ShaderStage};

pub enum ShaderUniformTypes<'a> {
    Mat4(&'a Mat4),
    I32(&'a i32),
}

/// Where a program's GLSL comes from.
#[derive(Debug, Clone)]
pub enum ShaderSource {
    Embedded {
        vertex: &'static str,
        fragment: &'static str,
    },
    Files {
        vertex: PathBuf,
        fragment: PathBuf,
    },
}

impl ShaderSource {
    /// Returns the (vertex, fragment) source text.
    pub fn load(&self) -> Result<(String, String), GfxError> {
        match self {
            ShaderSource::Embedded { vertex, fragment } => {
                Ok((vertex.to_string(), fragment.to_string()))
            }
            ShaderSource::Files { vertex, fragment } => Ok((read(vertex)?, read(fragment)?)),
        }
    }
}

fn read(path: &Path) -> Result<String, GfxError> {
    fs::read_to_string(path).map_err(|source| GfxError::ShaderSourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
#[repr(C)]
pub struct Shader(glow::Program);

impl Shader {
    pub fn from_source(gl: &glow::Context, source: &ShaderSource) -> Result<Self, GfxError> {
        let (vtx, frag) = source.load()?;
        Self::from_src(gl, &vtx, &frag)
    }

    pub fn from_src(gl: &glow::Context, vtx: &str, frag: &str) -> Result<Self, GfxError> {
        use glow::HasContext as _;

        unsafe {
            let program = gl.create_program().map_err(GfxError::ResourceCreation)?;

            let mut shaders = Vec::with_capacity(2);
            for (stage, shader_source) in [(ShaderStage::Vertex, vtx), (ShaderStage::Fragment, frag)]
            {
                let shader = match gl.create_shader(stage.gl_enum()) {
                    Ok(shader) => shader,
                    Err(e) => {
                        discard(gl, program, &shaders);
                        return Err(GfxError::ResourceCreation(e));
                    }
                };
                gl.shader_source(shader, shader_source);
                gl.compile_shader(shader);
                shaders.push(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    discard(gl, program, &shaders);
                    log::error!("Failed to compile {stage} shader: {log}");
                    return Err(GfxError::CompileFailed { stage, log });
                }
                gl.attach_shader(program, shader);
            }

            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                discard(gl, program, &shaders);
                log::error!("Failed to link shader program: {log}");
                return Err(GfxError::LinkFailed { log });
            }

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            Ok(Self(program))
        }
    }

    pub fn uniform_location(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        use glow::HasContext as _;

        let location = unsafe { gl.get_uniform_location(self.0, name) };
        if location.is_none() {
            log::warn!("Uniform `{name}` is not active in the program");
        }
        location
    }

    pub fn set_uniform(
        &self,
        gl: &glow::Context,
        location: Option<&glow::UniformLocation>,
        uniform: ShaderUniformTypes,
    ) {
        unsafe {
            use glow::HasContext as _;
            match uniform {
                ShaderUniformTypes::Mat4(uniform) => {
                    gl.uniform_matrix_4_f32_slice(location, false, &uniform.to_cols_array());
                }
                ShaderUniformTypes::I32(uniform) => {
                    gl.uniform_1_i32(location, *uniform);
                }
            }
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.use_program(Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_program(self.0);
        }
    }
}

unsafe fn discard(gl: &glow::Context, program: glow::Program, shaders: &[glow::Shader]) {
    use glow::HasContext as _;

    for &shader in shaders {
        gl.delete_shader(shader);
    }
    gl.delete_program(program);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_source_loads_verbatim() {
        let source = ShaderSource::Embedded {
            vertex: "void main() {}",
            fragment: "out vec4 c; void main() { c = vec4(1.0); }",
        };
        let (vtx, frag) = source.load().unwrap();
        assert_eq!(vtx, "void main() {}");
        assert!(frag.contains("vec4(1.0)"));
    }

    #[test]
    fn missing_file_is_reported() {
        let source = ShaderSource::Files {
            vertex: PathBuf::from("does/not/exist.vert"),
            fragment: PathBuf::from("does/not/exist.frag"),
        };
        match source.load() {
            Err(GfxError::ShaderSourceNotFound { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.vert"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn shipped_shader_files_load() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Shaders");
        for (vert, frag) in [("box.vert", "box.frag"), ("skybox.vert", "skybox.frag")] {
            let source = ShaderSource::Files {
                vertex: root.join(vert),
                fragment: root.join(frag),
            };
            let (vtx, frag) = source.load().unwrap();
            assert!(vtx.starts_with("#version 330 core"));
            assert!(frag.starts_with("#version 330 core"));
        }
    }
}
