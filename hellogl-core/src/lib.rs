//! The core of hellogl. This crate contains the shader program component
//! used by every lesson: loading stage sources, compiling and linking them,
//! and setting uniforms on the result.
//!
//! Nothing here creates windows or contexts. The graphics back-end is reached
//! through the [`ShaderBackend`] trait, which `glow::Context` implements.

pub mod backend;
pub mod error;
pub mod shader;
pub mod uniform;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::ShaderBackend;
pub use error::BuildError;
pub use shader::{Shader, ShaderProgram, ShaderSource, ShaderStage};
pub use uniform::Uniform;

/// Embeds a vertex and fragment shader at compile time and links them.
///
/// `$gl` is a `&Arc` to the back-end. Expands to a
/// `Result<ShaderProgram<_>, BuildError>`. The paths are resolved relative to
/// the calling file, like `include_str!`.
#[macro_export]
macro_rules! shader_program {
    ($gl:expr, $vert:literal, $frag:literal) => {
        $crate::ShaderProgram::from_sources($gl, include_str!($vert), include_str!($frag))
    };
}
