//! Position and colour interleaved in one buffer; colour is interpolated
//! across the triangle.

use std::sync::Arc;

use hellogl_core::{ShaderProgram, shader_program};

use super::Lesson;
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
};

#[rustfmt::skip]
pub const VERTICES: [f32; 18] = [
    // position       // colour
    -0.5, -0.5, 0.0,  1.0, 0.0, 0.0,
     0.5, -0.5, 0.0,  0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,  0.0, 0.0, 1.0,
];

pub struct MoreAttributes {
    program: ShaderProgram,
    triangle: Mesh,
}

impl MoreAttributes {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = shader_program!(
            gl,
            "../shaders/vertex_color.vert",
            "../shaders/vertex_color.frag"
        )
        .map_err(|e| e.to_string())?;
        let triangle = Mesh::new(gl, &VERTICES, VertexLayout::POSITION_COLOR)?;
        Ok(Self { program, triangle })
    }

    pub fn boxed(gl: &Arc<glow::Context>, _config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl)?))
    }
}

impl Lesson for MoreAttributes {
    fn render(&self, _gl: &glow::Context) {
        self.program.use_program();
        self.triangle.draw();
    }
}
