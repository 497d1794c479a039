//! The same two triangles, each drawn with its own program.

use std::sync::Arc;

use hellogl_core::{ShaderProgram, shader_program};

use super::{
    Lesson,
    two_triangles::{LEFT, RIGHT},
};
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
};

pub struct TwoPrograms {
    yellow: ShaderProgram,
    magenta: ShaderProgram,
    left: Mesh,
    right: Mesh,
}

impl TwoPrograms {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let yellow = shader_program!(gl, "../shaders/position.vert", "../shaders/yellow.frag")
            .map_err(|e| e.to_string())?;
        let magenta = shader_program!(gl, "../shaders/position.vert", "../shaders/magenta.frag")
            .map_err(|e| e.to_string())?;
        Ok(Self {
            yellow,
            magenta,
            left: Mesh::new(gl, &LEFT, VertexLayout::POSITION)?,
            right: Mesh::new(gl, &RIGHT, VertexLayout::POSITION)?,
        })
    }

    pub fn boxed(gl: &Arc<glow::Context>, _config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl)?))
    }
}

impl Lesson for TwoPrograms {
    fn render(&self, _gl: &glow::Context) {
        self.yellow.use_program();
        self.left.draw();
        self.magenta.use_program();
        self.right.draw();
    }
}
