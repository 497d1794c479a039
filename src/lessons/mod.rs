//! Module providing the `Lesson` trait and all lesson implementations.
//!
//! Each lesson is one of the small programs the harness can run: it owns its
//! meshes and shader programs, and draws one frame at a time.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{config::Config, input::FrameContext};

pub mod hello_triangle;
pub mod hello_triangle_ebo;
pub mod more_attributes;
pub mod shader_class;
pub mod two_programs;
pub mod two_triangles;
pub mod uniform_offset;

/// The Lesson trait defines the common interface for all lessons.
pub trait Lesson {
    /// Updates the lesson state.
    fn update(&mut self, _ctx: &FrameContext) {}

    /// Renders the lesson. The framebuffer is already cleared.
    fn render(&self, gl: &glow::Context);
}

/// Builds a lesson on a live context.
pub type LessonCtor = fn(&Arc<glow::Context>, &Config) -> Result<Box<dyn Lesson>, String>;

/// All lessons in the order they are taught.
pub fn registry() -> IndexMap<&'static str, LessonCtor> {
    let mut lessons: IndexMap<&'static str, LessonCtor> = IndexMap::new();
    lessons.insert("hello_triangle", hello_triangle::HelloTriangle::boxed);
    lessons.insert("hello_triangle_ebo", hello_triangle_ebo::HelloTriangleEbo::boxed);
    lessons.insert("two_triangles", two_triangles::TwoTriangles::boxed);
    lessons.insert("two_programs", two_programs::TwoPrograms::boxed);
    lessons.insert("more_attributes", more_attributes::MoreAttributes::boxed);
    lessons.insert("shader_class", shader_class::ShaderClass::boxed);
    lessons.insert("uniform_offset", uniform_offset::UniformOffset::boxed);
    lessons
}
