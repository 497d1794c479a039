//! This module contains the window harness shared by every lesson:
//! application setup, meshes and off-screen framebuffers.

pub mod app;
pub mod framebuffer;
pub mod mesh;

pub use app::*;
pub use framebuffer::*;
pub use mesh::*;
