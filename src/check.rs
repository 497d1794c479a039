//! End-to-end self check.
//!
//! Renders the hello triangle into an off-screen framebuffer and reads back
//! the pixel under the triangle's centroid. It must be the fragment colour,
//! and a corner outside the triangle must still be the clear colour.

use std::sync::Arc;

use glow::HasContext;

use crate::{
    abs::{Framebuffer, color_to_bytes, colors_match, read_pixel},
    lessons::{
        Lesson,
        hello_triangle::{COLOR, HelloTriangle, VERTICES},
    },
};

const SIZE: u32 = 64;
const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const TOLERANCE: u8 = 1;

/// Pixel containing the centroid of a triangle given in clip-space `vec3`s.
fn centroid_pixel(vertices: &[f32], width: u32, height: u32) -> (i32, i32) {
    let count = (vertices.len() / 3) as f32;
    let (sx, sy) = vertices
        .chunks_exact(3)
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v[0], sy + v[1]));
    let to_pixel = |ndc: f32, size: u32| ((ndc / count + 1.0) / 2.0 * size as f32).floor() as i32;
    (to_pixel(sx, width), to_pixel(sy, height))
}

pub fn run(gl: &Arc<glow::Context>) -> Result<(), String> {
    let framebuffer = Framebuffer::new(gl, SIZE, SIZE)?;
    let lesson = HelloTriangle::new(gl)?;

    framebuffer.bind();
    unsafe {
        gl.clear_color(CLEAR[0], CLEAR[1], CLEAR[2], CLEAR[3]);
        gl.clear(glow::COLOR_BUFFER_BIT);
    }
    lesson.render(gl);
    unsafe {
        gl.finish();
    }

    let (x, y) = centroid_pixel(&VERTICES, framebuffer.width(), framebuffer.height());
    let inside = read_pixel(gl, x, y);
    let outside = read_pixel(gl, 0, SIZE as i32 - 1);
    Framebuffer::unbind(gl);

    let expected = color_to_bytes(COLOR);
    if !colors_match(inside, expected, TOLERANCE) {
        return Err(format!(
            "pixel ({x}, {y}) is {inside:?}, expected the triangle colour {expected:?}"
        ));
    }
    let background = color_to_bytes(CLEAR);
    if !colors_match(outside, background, TOLERANCE) {
        return Err(format!(
            "corner pixel is {outside:?}, expected the clear colour {background:?}"
        ));
    }

    log::info!("self check passed: pixel ({x}, {y}) is {inside:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_pixel() {
        // centroid (0, -1/6) in a 64x64 target
        assert_eq!(centroid_pixel(&VERTICES, 64, 64), (32, 26));
        #[rustfmt::skip]
        let corner = [
            -1.0, -1.0, 0.0,
            -1.0, -1.0, 0.0,
            -1.0, -1.0, 0.0,
        ];
        assert_eq!(centroid_pixel(&corner, 10, 10), (0, 0));
    }

    #[test]
    #[ignore = "needs a display and an OpenGL 3.3 driver"]
    fn test_triangle_renders_at_centroid() {
        let app = crate::abs::App::new(&crate::config::Config::default(), true).unwrap();
        run(&app.gl).unwrap();
    }
}
