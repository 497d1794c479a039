//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing vertex data on the GPU side.
//! Vertices are flat `f32` arrays whose interleaving is described by a [`VertexLayout`].

use std::sync::Arc;

use glow::HasContext;

/// Describes how floats are interleaved in a vertex buffer.
///
/// Attribute `i` is bound to shader location `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    components: &'static [i32],
}

impl VertexLayout {
    /// Only a `vec3` position.
    pub const POSITION: Self = Self::new(&[3]);
    /// A `vec3` position followed by a `vec3` colour.
    pub const POSITION_COLOR: Self = Self::new(&[3, 3]);

    pub const fn new(components: &'static [i32]) -> Self {
        Self { components }
    }

    /// Number of floats per vertex.
    pub fn floats_per_vertex(&self) -> usize {
        self.components.iter().map(|&c| c as usize).sum()
    }

    /// Distance between consecutive vertices in bytes.
    pub fn stride(&self) -> i32 {
        (self.floats_per_vertex() * size_of::<f32>()) as i32
    }

    /// `(location, components, byte offset)` for every attribute.
    pub fn attributes(&self) -> Vec<(u32, i32, i32)> {
        let mut offset = 0;
        self.components
            .iter()
            .enumerate()
            .map(|(location, &components)| {
                let attribute = (location as u32, components, offset);
                offset += components * size_of::<f32>() as i32;
                attribute
            })
            .collect()
    }

    /// Sets up the vertex attribute pointers for the bound VAO and VBO.
    fn apply(&self, gl: &glow::Context) {
        let stride = self.stride();
        for (location, components, offset) in self.attributes() {
            unsafe {
                gl.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset);
                gl.enable_vertex_attrib_array(location);
            }
        }
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Creates a mesh drawn with `draw_arrays`.
    pub fn new(
        gl: &Arc<glow::Context>,
        vertices: &[f32],
        layout: VertexLayout,
    ) -> Result<Self, String> {
        Self::build(gl, vertices, layout, None)
    }

    /// Creates a mesh drawn with `draw_elements` from an element buffer.
    pub fn indexed(
        gl: &Arc<glow::Context>,
        vertices: &[f32],
        layout: VertexLayout,
        indices: &[u32],
    ) -> Result<Self, String> {
        Self::build(gl, vertices, layout, Some(indices))
    }

    fn build(
        gl: &Arc<glow::Context>,
        vertices: &[f32],
        layout: VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<Self, String> {
        let floats = layout.floats_per_vertex();
        if floats == 0 || vertices.len() % floats != 0 {
            return Err(format!(
                "{} floats do not divide into vertices of {floats} floats",
                vertices.len()
            ));
        }

        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            let ebo = match indices {
                Some(indices) => {
                    let ebo = gl.create_buffer()?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            layout.apply(gl);

            // The element buffer binding is VAO state, so unbind the VAO first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode: glow::TRIANGLES,
                vao,
                vbo,
                ebo,
                count: indices.map_or(vertices.len() / floats, <[u32]>::len),
            })
        }
    }

    /// Draws the mesh with whatever program is active.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }

    /// Number of vertices (or indices, for indexed meshes) drawn.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_color_layout() {
        let layout = VertexLayout::POSITION_COLOR;
        assert_eq!(layout.floats_per_vertex(), 6);
        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.attributes(), vec![(0, 3, 0), (1, 3, 12)]);
    }

    #[test]
    fn test_position_layout() {
        let layout = VertexLayout::POSITION;
        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.attributes(), vec![(0, 3, 0)]);
    }

    #[test]
    fn test_mixed_layout_offsets() {
        let layout = VertexLayout::new(&[2, 4, 1]);
        assert_eq!(layout.attributes(), vec![(0, 2, 0), (1, 4, 8), (2, 1, 24)]);
        assert_eq!(layout.stride(), 28);
    }
}
