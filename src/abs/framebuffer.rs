//! Module to work with OpenGL framebuffers.
//!
//! This module provides an off-screen colour target for rendering without a
//! visible window, and read-back of pixels from whatever framebuffer is bound.

use std::sync::Arc;

use glow::HasContext;

/// Represents an off-screen RGBA8 framebuffer.
pub struct Framebuffer {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
    color_tex: glow::Texture,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Creates a new framebuffer with the specified width and height.
    pub fn new(gl: &Arc<glow::Context>, width: u32, height: u32) -> Result<Self, String> {
        unsafe {
            let fbo = gl.create_framebuffer()?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let tex = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(tex),
                0,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            let framebuffer = Self {
                gl: Arc::clone(gl),
                fbo,
                color_tex: tex,
                width,
                height,
            };
            if status != glow::FRAMEBUFFER_COMPLETE {
                return Err(format!("framebuffer incomplete (status 0x{status:x})"));
            }
            Ok(framebuffer)
        }
    }

    /// Binds the framebuffer for rendering and sets the viewport to cover it.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    /// Unbinds the framebuffer, reverting to the default framebuffer.
    pub fn unbind(gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.fbo);
            self.gl.delete_texture(self.color_tex);
        }
    }
}

/// Reads one RGBA pixel from the bound framebuffer. `(0, 0)` is bottom-left.
pub fn read_pixel(gl: &glow::Context, x: i32, y: i32) -> [u8; 4] {
    let mut pixel = [0u8; 4];
    unsafe {
        gl.read_pixels(
            x,
            y,
            1,
            1,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(&mut pixel[..])),
        );
    }
    pixel
}

/// Reads the whole bound framebuffer into an image with the top row first.
pub fn capture(gl: &glow::Context, width: u32, height: u32) -> image::RgbaImage {
    let mut data = vec![0u8; width as usize * height as usize * 4];
    unsafe {
        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(&mut data[..])),
        );
    }
    image_from_gl_rows(width, height, data)
}

/// OpenGL returns rows bottom-up; images are stored top-down.
fn image_from_gl_rows(width: u32, height: u32, data: Vec<u8>) -> image::RgbaImage {
    let image = image::RgbaImage::from_raw(width, height, data)
        .unwrap_or_else(|| image::RgbaImage::new(width, height));
    image::imageops::flip_vertical(&image)
}

/// Whether two colours differ by at most `tolerance` in every channel.
pub fn colors_match(a: [u8; 4], b: [u8; 4], tolerance: u8) -> bool {
    a.iter().zip(b).all(|(&x, y)| x.abs_diff(y) <= tolerance)
}

/// Converts a `[0, 1]` float colour to bytes the way the driver rounds it.
pub fn color_to_bytes(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
