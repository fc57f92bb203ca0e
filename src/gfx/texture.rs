use std::path::{Path, PathBuf};

use eframe::glow;
use image::RgbImage;

use crate::error::GfxError;

/// Decoded 8-bit RGB pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Pixels {
    pub fn load(path: &Path) -> Result<Self, GfxError> {
        let img = image::open(path).map_err(|source| GfxError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(img.to_rgb8()))
    }

    pub fn from_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgb: img.into_raw(),
        }
    }

    /// Two-tone checkerboard used when a facade image can't be read.
    pub fn checker(size: u32, cell: u32, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        Self::from_image(RgbImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                image::Rgb(a)
            } else {
                image::Rgb(b)
            }
        }))
    }

    pub fn solid(rgb: [u8; 3]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgb: rgb.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// 2D texture, repeat wrapping, mip-mapped linear filtering.
    TileBox,
    /// Six-face cubemap, clamp-to-edge wrapping, linear filtering.
    Cubemap,
}

impl TextureKind {
    pub fn target(self) -> u32 {
        match self {
            TextureKind::TileBox => glow::TEXTURE_2D,
            TextureKind::Cubemap => glow::TEXTURE_CUBE_MAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    kind: TextureKind,
    handle: glow::Texture,
}

impl Texture {
    pub fn load_tile_box(gl: &glow::Context, path: &Path) -> Result<Self, GfxError> {
        let pixels = Pixels::load(path)?;
        log::debug!("{}: {}x{} facade", path.display(), pixels.width, pixels.height);
        Self::tile_box(gl, &pixels)
    }

    pub fn tile_box(gl: &glow::Context, pixels: &Pixels) -> Result<Self, GfxError> {
        use glow::HasContext as _;

        unsafe {
            let handle = gl.create_texture().map_err(GfxError::ResourceCreation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            upload_rgb(gl, glow::TEXTURE_2D, pixels);
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                kind: TextureKind::TileBox,
                handle,
            })
        }
    }

    /// Faces are ordered +X, -X, +Y, -Y, +Z, -Z. Every face must decode.
    pub fn load_cubemap(gl: &glow::Context, faces: &[PathBuf]) -> Result<Self, GfxError> {
        if faces.len() != 6 {
            return Err(GfxError::CubemapFaceCount(faces.len()));
        }
        let pixels = faces
            .iter()
            .map(|path| Pixels::load(path))
            .collect::<Result<Vec<_>, _>>()?;
        Self::cubemap(gl, &pixels)
    }

    pub fn cubemap(gl: &glow::Context, faces: &[Pixels]) -> Result<Self, GfxError> {
        use glow::HasContext as _;

        check_cubemap_faces(faces)?;

        unsafe {
            let handle = gl.create_texture().map_err(GfxError::ResourceCreation)?;
            gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(handle));

            for (i, face) in faces.iter().enumerate() {
                upload_rgb(gl, glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32, face);
            }

            let target = glow::TEXTURE_CUBE_MAP;
            gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_R, glow::CLAMP_TO_EDGE as i32);
            gl.bind_texture(target, None);

            Ok(Self {
                kind: TextureKind::Cubemap,
                handle,
            })
        }
    }

    /// Binds to texture unit `unit`.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        use glow::HasContext as _;

        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(self.kind.target(), Some(self.handle));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext as _;

        unsafe {
            gl.delete_texture(self.handle);
        }
    }
}

/// Six faces, each square, all the same size.
pub fn check_cubemap_faces(faces: &[Pixels]) -> Result<(), GfxError> {
    if faces.len() != 6 {
        return Err(GfxError::CubemapFaceCount(faces.len()));
    }
    let size = faces[0].width;
    for (index, face) in faces.iter().enumerate() {
        if face.width != size || face.height != size {
            return Err(GfxError::CubemapFaceSize {
                index,
                width: face.width,
                height: face.height,
                size,
            });
        }
    }
    Ok(())
}

unsafe fn upload_rgb(gl: &glow::Context, target: u32, pixels: &Pixels) {
    use glow::HasContext as _;

    // RGB rows are not 4-byte aligned for odd widths
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
    gl.tex_image_2d(
        target,
        0,
        glow::RGB as i32,
        pixels.width as i32,
        pixels.height as i32,
        0,
        glow::RGB,
        glow::UNSIGNED_BYTE,
        Some(pixels.rgb.as_slice()),
    );
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
}
