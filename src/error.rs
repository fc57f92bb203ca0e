use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while creating GPU resources for a scene.
#[derive(Error, Debug)]
pub enum GfxError {
    #[error("Shader source not found: {}", path.display())]
    ShaderSourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to compile {stage} shader: {log}")]
    CompileFailed { stage: ShaderStage, log: String },
    #[error("Failed to link shader program: {log}")]
    LinkFailed { log: String },
    #[error("Failed to load image {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("A cubemap needs exactly 6 faces, got {0}")]
    CubemapFaceCount(usize),
    #[error("Cubemap face {index} is {width}x{height}, expected {size}x{size}")]
    CubemapFaceSize {
        index: usize,
        width: u32,
        height: u32,
        size: u32,
    },
    #[error("GL resource creation failed: {0}")]
    ResourceCreation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => eframe::glow::VERTEX_SHADER,
            ShaderStage::Fragment => eframe::glow::FRAGMENT_SHADER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_failure_names_the_stage() {
        let err = GfxError::CompileFailed {
            stage: ShaderStage::Fragment,
            log: "0:1(1): error: syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn missing_source_reports_path() {
        let err = GfxError::ShaderSourceNotFound {
            path: PathBuf::from("Shaders/missing.vert"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert!(err.to_string().contains("Shaders/missing.vert"));
    }
}
