//! A triangle swinging horizontally, driven by `uTime` and `uOffsetX`.
//! The fragment colour is the clip-space position.

use std::sync::Arc;

use hellogl_core::ShaderProgram;

use super::{Lesson, more_attributes::VERTICES};
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
    input::FrameContext,
};

/// Amplitude of the swing in clip-space units.
const OFFSET_X: f32 = 0.5;

pub struct UniformOffset {
    program: ShaderProgram,
    triangle: Mesh,
    time: f32,
}

impl UniformOffset {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, String> {
        let dir = config.shader_dir();
        let program = ShaderProgram::from_files(
            gl,
            dir.join("offset.vert"),
            dir.join("position_color.frag"),
        )
        .map_err(|e| e.to_string())?;
        // only the position attribute is read, the colour floats are skipped by the stride
        let triangle = Mesh::new(gl, &VERTICES, VertexLayout::POSITION_COLOR)?;
        Ok(Self {
            program,
            triangle,
            time: 0.0,
        })
    }

    pub fn boxed(gl: &Arc<glow::Context>, config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl, config)?))
    }
}

impl Lesson for UniformOffset {
    fn update(&mut self, ctx: &FrameContext) {
        self.time = ctx.time;
    }

    fn render(&self, _gl: &glow::Context) {
        self.program.set_uniform("uTime", self.time);
        self.program.set_uniform("uOffsetX", OFFSET_X);
        self.program.use_program();
        self.triangle.draw();
    }
}
