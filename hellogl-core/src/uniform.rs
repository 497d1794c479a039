//! Values that can be written into a uniform slot.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::backend::ShaderBackend;

/// Represents a value that can be uploaded to a uniform variable.
pub trait Uniform {
    /// Writes the value to `location` of the currently active program.
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation);
}

impl Uniform for bool {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_i32(location, *self as i32);
    }
}

impl Uniform for i32 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_i32(location, *self);
    }
}

impl Uniform for f32 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec2 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_2_f32(location, self.x, self.y);
    }
}

impl Uniform for Vec3 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_3_f32(location, self.x, self.y, self.z);
    }
}

impl Uniform for Vec4 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_4_f32(location, self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Mat4 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_matrix_4_f32(location, &self.to_cols_array());
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}
