//! The vertex colour triangle again, with its shaders read from disk at
//! runtime instead of embedded in the binary.

use std::sync::Arc;

use hellogl_core::ShaderProgram;

use super::{Lesson, more_attributes::VERTICES};
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
};

pub struct ShaderClass {
    program: ShaderProgram,
    triangle: Mesh,
}

impl ShaderClass {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, String> {
        let dir = config.shader_dir();
        let program = ShaderProgram::from_files(
            gl,
            dir.join("vertex_color.vert"),
            dir.join("vertex_color.frag"),
        )
        .map_err(|e| e.to_string())?;
        let triangle = Mesh::new(gl, &VERTICES, VertexLayout::POSITION_COLOR)?;
        Ok(Self { program, triangle })
    }

    pub fn boxed(gl: &Arc<glow::Context>, config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl, config)?))
    }
}

impl Lesson for ShaderClass {
    fn render(&self, _gl: &glow::Context) {
        self.program.use_program();
        self.triangle.draw();
    }
}
