//! A rectangle from four vertices and six indices.
//!
//! Pressing `W` toggles wireframe rendering.

use std::sync::Arc;

use glow::HasContext;
use hellogl_core::{ShaderProgram, shader_program};
use sdl2::keyboard::Keycode;

use super::Lesson;
use crate::{
    abs::{Mesh, VertexLayout},
    config::Config,
    input::FrameContext,
};

#[rustfmt::skip]
const VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

pub struct HelloTriangleEbo {
    program: ShaderProgram,
    rectangle: Mesh,
    wireframe: bool,
}

impl HelloTriangleEbo {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = shader_program!(gl, "../shaders/position.vert", "../shaders/yellow.frag")
            .map_err(|e| e.to_string())?;
        let rectangle = Mesh::indexed(gl, &VERTICES, VertexLayout::POSITION, &INDICES)?;
        Ok(Self {
            program,
            rectangle,
            wireframe: false,
        })
    }

    pub fn boxed(gl: &Arc<glow::Context>, _config: &Config) -> Result<Box<dyn Lesson>, String> {
        Ok(Box::new(Self::new(gl)?))
    }
}

impl Lesson for HelloTriangleEbo {
    fn update(&mut self, ctx: &FrameContext) {
        if ctx.keyboard.pressed.contains(&Keycode::W) {
            self.wireframe = !self.wireframe;
            log::info!("wireframe {}", if self.wireframe { "on" } else { "off" });
        }
    }

    fn render(&self, gl: &glow::Context) {
        let mode = if self.wireframe { glow::LINE } else { glow::FILL };
        unsafe {
            gl.polygon_mode(glow::FRONT_AND_BACK, mode);
        }
        self.program.use_program();
        self.rectangle.draw();
        unsafe {
            gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
        }
    }
}
