use eframe::glow;

/// The canonical shapes the labs draw. Each maps to one immutable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Axes,
    ColorBox,
    FacadeBox,
    Skybox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Lines,
    Triangles,
}

impl Primitive {
    pub fn gl_enum(self) -> u32 {
        match self {
            Primitive::Lines => glow::LINES,
            Primitive::Triangles => glow::TRIANGLES,
        }
    }
}

/// Raw vertex streams for one shape. Positions and colors have 3 floats per
/// vertex, UVs have 2.
#[derive(Debug)]
pub struct Geometry {
    pub positions: &'static [f32],
    pub colors: Option<&'static [f32]>,
    pub uvs: Option<&'static [f32]>,
    pub indices: Option<&'static [u32]>,
    pub primitive: Primitive,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of elements handed to the draw call.
    pub fn draw_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }
}

impl Shape {
    pub fn geometry(self) -> &'static Geometry {
        match self {
            Shape::Axes => &AXES,
            Shape::ColorBox => &COLOR_BOX,
            Shape::FacadeBox => &FACADE_BOX,
            Shape::Skybox => &SKYBOX,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                   Tables                                                          //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

static AXES: Geometry = Geometry {
    positions: &AXES_POSITIONS,
    colors: Some(&AXES_COLORS),
    uvs: None,
    indices: None,
    primitive: Primitive::Lines,
};

static COLOR_BOX: Geometry = Geometry {
    positions: &BOX_POSITIONS,
    colors: Some(&BOX_COLORS),
    uvs: None,
    indices: Some(&BOX_INDICES),
    primitive: Primitive::Triangles,
};

static FACADE_BOX: Geometry = Geometry {
    positions: &BOX_POSITIONS,
    colors: Some(&BOX_COLORS),
    uvs: Some(&FACADE_UVS),
    indices: Some(&BOX_INDICES),
    primitive: Primitive::Triangles,
};

static SKYBOX: Geometry = Geometry {
    positions: &SKYBOX_POSITIONS,
    colors: None,
    uvs: None,
    indices: None,
    primitive: Primitive::Triangles,
};

#[rustfmt::skip]
const AXES_POSITIONS: [f32; 18] = [
    0.0, 0.0, 0.0,   100.0, 0.0, 0.0, // X
    0.0, 0.0, 0.0,   0.0, 100.0, 0.0, // Y
    0.0, 0.0, 0.0,   0.0, 0.0, 100.0, // Z
];

#[rustfmt::skip]
const AXES_COLORS: [f32; 18] = [
    1.0, 0.0, 0.0,   1.0, 0.0, 0.0, // red
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0, // green
    0.0, 0.0, 1.0,   0.0, 0.0, 1.0, // blue
];

#[rustfmt::skip]
const BOX_POSITIONS: [f32; 72] = [
    // Front
    -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,    1.0,  1.0,  1.0,   -1.0,  1.0,  1.0,
    // Back
     1.0, -1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,    1.0,  1.0, -1.0,
    // Left
    -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,   -1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,
    // Right
     1.0, -1.0,  1.0,    1.0, -1.0, -1.0,    1.0,  1.0, -1.0,    1.0,  1.0,  1.0,
    // Top
    -1.0,  1.0,  1.0,    1.0,  1.0,  1.0,    1.0,  1.0, -1.0,   -1.0,  1.0, -1.0,
    // Bottom
    -1.0, -1.0, -1.0,    1.0, -1.0, -1.0,    1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,
];

#[rustfmt::skip]
const BOX_COLORS: [f32; 72] = [
    1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0,   1.0, 0.0, 0.0, // front, red
    1.0, 1.0, 0.0,   1.0, 1.0, 0.0,   1.0, 1.0, 0.0,   1.0, 1.0, 0.0, // back, yellow
    0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0,   0.0, 1.0, 0.0, // left, green
    0.0, 1.0, 1.0,   0.0, 1.0, 1.0,   0.0, 1.0, 1.0,   0.0, 1.0, 1.0, // right, cyan
    0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0,   0.0, 0.0, 1.0, // top, blue
    1.0, 0.0, 1.0,   1.0, 0.0, 1.0,   1.0, 0.0, 1.0,   1.0, 0.0, 1.0, // bottom, magenta
];

#[rustfmt::skip]
const BOX_INDICES: [u32; 36] = [
     0,  1,  2,    0,  2,  3,
     4,  5,  6,    4,  6,  7,
     8,  9, 10,    8, 10, 11,
    12, 13, 14,   12, 14, 15,
    16, 17, 18,   16, 18, 19,
    20, 21, 22,   20, 22, 23,
];

/// Side faces repeat the facade five times vertically; top and bottom stay untextured.
#[rustfmt::skip]
const FACADE_UVS: [f32; 48] = [
    0.0, 5.0,   1.0, 5.0,   1.0, 0.0,   0.0, 0.0, // front
    0.0, 5.0,   1.0, 5.0,   1.0, 0.0,   0.0, 0.0, // back
    0.0, 5.0,   1.0, 5.0,   1.0, 0.0,   0.0, 0.0, // left
    0.0, 5.0,   1.0, 5.0,   1.0, 0.0,   0.0, 0.0, // right
    0.0, 0.0,   0.0, 0.0,   0.0, 0.0,   0.0, 0.0, // top
    0.0, 0.0,   0.0, 0.0,   0.0, 0.0,   0.0, 0.0, // bottom
];

#[rustfmt::skip]
const SKYBOX_POSITIONS: [f32; 108] = [
    -1.0,  1.0, -1.0,   -1.0, -1.0, -1.0,    1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,    1.0,  1.0, -1.0,   -1.0,  1.0, -1.0,

    -1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,   -1.0,  1.0,  1.0,   -1.0, -1.0,  1.0,

     1.0, -1.0, -1.0,    1.0, -1.0,  1.0,    1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,    1.0,  1.0, -1.0,    1.0, -1.0, -1.0,

    -1.0, -1.0,  1.0,   -1.0,  1.0,  1.0,    1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,    1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,

    -1.0,  1.0, -1.0,    1.0,  1.0, -1.0,    1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   -1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,

    -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,    1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::Vec3;

    use super::*;

    const ALL: [Shape; 4] = [Shape::Axes, Shape::ColorBox, Shape::FacadeBox, Shape::Skybox];

    #[test]
    fn streams_agree_on_vertex_count() {
        for shape in ALL {
            let geometry = shape.geometry();
            assert_eq!(geometry.positions.len() % 3, 0, "{shape:?}");
            let count = geometry.vertex_count();
            if let Some(colors) = geometry.colors {
                assert_eq!(colors.len(), count * 3, "{shape:?}");
            }
            if let Some(uvs) = geometry.uvs {
                assert_eq!(uvs.len(), count * 2, "{shape:?}");
            }
        }
    }

    #[test]
    fn box_indices_cover_every_vertex_once_per_face() {
        for shape in [Shape::ColorBox, Shape::FacadeBox] {
            let geometry = shape.geometry();
            let indices = geometry.indices.unwrap();
            assert_eq!(indices.len(), 36);
            assert_eq!(indices.len() / 3, 12);
            assert!(indices.iter().all(|&i| i <= 23));
            let unique: HashSet<u32> = indices.iter().copied().collect();
            assert_eq!(unique.len(), 24);
            assert_eq!(geometry.vertex_count(), 24);
        }
    }

    #[test]
    fn box_triangles_wind_outward() {
        let geometry = Shape::ColorBox.geometry();
        let vertex = |i: u32| {
            let i = i as usize * 3;
            Vec3::from_slice(&geometry.positions[i..i + 3])
        };
        for tri in geometry.indices.unwrap().chunks(3) {
            let (a, b, c) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]));
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn facade_leaves_caps_untextured() {
        let uvs = Shape::FacadeBox.geometry().uvs.unwrap();
        assert!(uvs[32..].iter().all(|&v| v == 0.0));
        assert!(uvs[..32].chunks(2).any(|uv| uv[1] == 5.0));
    }

    #[test]
    fn skybox_is_a_closed_unit_cube() {
        let geometry = Shape::Skybox.geometry();
        assert_eq!(geometry.vertex_count(), 36);
        assert_eq!(geometry.draw_count(), 36);
        assert!(geometry.positions.iter().all(|&v| v == 1.0 || v == -1.0));
        // each of the six faces contributes two triangles
        for axis in 0..3 {
            for side in [-1.0f32, 1.0] {
                let on_face = geometry
                    .positions
                    .chunks(9)
                    .filter(|tri| (0..3).all(|v| tri[v * 3 + axis] == side))
                    .count();
                assert_eq!(on_face, 2, "axis {axis} side {side}");
            }
        }
    }

    #[test]
    fn axes_are_lines() {
        let geometry = Shape::Axes.geometry();
        assert_eq!(geometry.primitive, Primitive::Lines);
        assert_eq!(geometry.draw_count(), 6);
    }
}
