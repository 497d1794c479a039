//! Two triangles in separate vertex arrays, drawn with one program.

use std::sync::Arc;

use hellogl_core::{ShaderProgram, shader_program};

use super::Lesson;
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
};

#[rustfmt::skip]
pub const LEFT: [f32; 9] = [
    -0.5,  0.5, 0.0,
    -0.1, -0.5, 0.0,
    -0.9, -0.5, 0.0,
];

#[rustfmt::skip]
pub const RIGHT: [f32; 9] = [
     0.5,  0.5, 0.0,
     0.9, -0.5, 0.0,
     0.1, -0.5, 0.0,
];

pub struct TwoTriangles {
    program: ShaderProgram,
    triangles: [Mesh; 2],
}

impl TwoTriangles {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = shader_program!(gl, "../shaders/position.vert", "../shaders/yellow.frag")
            .map_err(|e| e.to_string())?;
        let triangles = [
            Mesh::new(gl, &LEFT, VertexLayout::POSITION)?,
            Mesh::new(gl, &RIGHT, VertexLayout::POSITION)?,
        ];
        Ok(Self { program, triangles })
    }

    pub fn boxed(gl: &Arc<glow::Context>, _config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl)?))
    }
}

impl Lesson for TwoTriangles {
    fn render(&self, _gl: &glow::Context) {
        self.program.use_program();
        for triangle in &self.triangles {
            triangle.draw();
        }
    }
}
