pub mod shader;

/// the fixed shader pair every shader-compiling variant uses.
pub const VSHADER_SOURCE: &str = include_str!("shader.vert");
pub const FSHADER_SOURCE: &str = include_str!("shader.frag");

/// background for every variant.
pub const CLEAR_COLOR: [gl::GLfloat; 4] = [1.0, 0.0, 0.0, 0.0];

// NOTE: we want stable layout
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: [f32; 4],
}

/// the one and only triangle, in clip space.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.5, 0.0, 1.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0, 1.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0, 1.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(size_of::<Vertex>(), 16);
        assert_eq!(std::mem::offset_of!(Vertex, position), 0);
        assert_eq!(size_of_val(&TRIANGLE_VERTICES), 48);
    }

    #[test]
    fn test_vertices_are_homogeneous_points() {
        for vertex in TRIANGLE_VERTICES {
            assert_eq!(vertex.position[3], 1.0);
        }
    }

    // NOTE: glsl requires #version to be the first directive in the source.
    #[test]
    fn test_shader_sources_lead_with_version() {
        assert!(VSHADER_SOURCE.starts_with("#version 330"));
        assert!(FSHADER_SOURCE.starts_with("#version 330"));
    }
}
