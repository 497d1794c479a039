//! A single triangle drawn with `draw_arrays`.

use std::sync::Arc;

use hellogl_core::{ShaderProgram, shader_program};

use super::Lesson;
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
};

#[rustfmt::skip]
pub const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// Colour written by the fragment shader.
pub const COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

pub struct HelloTriangle {
    program: ShaderProgram,
    triangle: Mesh,
}

impl HelloTriangle {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = shader_program!(gl, "../shaders/position.vert", "../shaders/yellow.frag")
            .map_err(|e| e.to_string())?;
        let triangle = Mesh::new(gl, &VERTICES, VertexLayout::POSITION)?;
        Ok(Self { program, triangle })
    }

    pub fn boxed(gl: &Arc<glow::Context>, _config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl)?))
    }
}

impl Lesson for HelloTriangle {
    fn render(&self, _gl: &glow::Context) {
        self.program.use_program();
        self.triangle.draw();
    }
}
