//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing shader stages
//! and the linked program built from them. Uniform values go through the
//! [`Uniform`](crate::Uniform) trait.

use std::{
    borrow::Cow,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    backend::ShaderBackend,
    error::{BuildError, non_empty_log},
    uniform::Uniform,
};

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The OpenGL enum used when creating a shader object for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Where the text of a stage comes from.
#[derive(Debug, Clone)]
pub enum ShaderSource<'a> {
    /// Source already in memory.
    Inline(Cow<'a, str>),
    /// Source to be read in full from a file.
    File(PathBuf),
}

impl<'a> ShaderSource<'a> {
    /// Returns the full text, reading it from disk if needed.
    pub fn load(&self, stage: ShaderStage) -> Result<Cow<'_, str>, BuildError> {
        match self {
            ShaderSource::Inline(text) => Ok(Cow::Borrowed(&**text)),
            ShaderSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| BuildError::SourceRead {
                    stage,
                    path: path.clone(),
                    source,
                }),
        }
    }
}

impl<'a> From<&'a str> for ShaderSource<'a> {
    fn from(text: &'a str) -> Self {
        ShaderSource::Inline(Cow::Borrowed(text))
    }
}

impl From<String> for ShaderSource<'_> {
    fn from(text: String) -> Self {
        ShaderSource::Inline(Cow::Owned(text))
    }
}

impl From<&Path> for ShaderSource<'_> {
    fn from(path: &Path) -> Self {
        ShaderSource::File(path.to_path_buf())
    }
}

impl From<PathBuf> for ShaderSource<'_> {
    fn from(path: PathBuf) -> Self {
        ShaderSource::File(path)
    }
}

/// Represents an individual compiled shader stage.
///
/// The stage object is deleted when this value is dropped, which is what
/// releases intermediate stages once a program has been linked.
pub struct Shader<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: B::Shader,
    stage: ShaderStage,
}

impl<B: ShaderBackend> Shader<B> {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<B>, stage: ShaderStage, source: &str) -> Result<Self, BuildError> {
        let id = gl
            .create_shader(stage)
            .map_err(|message| BuildError::Create {
                what: "shader object",
                message,
            })?;
        let shader = Self {
            gl: Arc::clone(gl),
            id,
            stage,
        };

        if !gl.compile_shader(id, source) {
            let log = non_empty_log(gl.shader_info_log(id));
            return Err(BuildError::Compile { stage, log });
        }

        Ok(shader)
    }

    /// The stage this shader was compiled for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<B: ShaderBackend> Drop for Shader<B> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a linked shader program made of a vertex and a fragment stage.
///
/// A value of this type is always linked when handed out. Failures are
/// reported through [`BuildError`] and logged at construction.
pub struct ShaderProgram<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: Option<B::Program>,
    info_log: String,
}

impl<B: ShaderBackend> ShaderProgram<B> {
    /// Loads, compiles and links a program from two stage sources.
    pub fn new<'a>(
        gl: &Arc<B>,
        vertex: impl Into<ShaderSource<'a>>,
        fragment: impl Into<ShaderSource<'a>>,
    ) -> Result<Self, BuildError> {
        Self::build(gl, &vertex.into(), &fragment.into()).inspect_err(|e| log::error!("{e}"))
    }

    /// Builds a program from in-memory stage sources.
    pub fn from_sources(gl: &Arc<B>, vertex: &str, fragment: &str) -> Result<Self, BuildError> {
        Self::new(gl, vertex, fragment)
    }

    /// Builds a program from stage sources stored in files.
    pub fn from_files(
        gl: &Arc<B>,
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
    ) -> Result<Self, BuildError> {
        Self::new(gl, vertex.as_ref(), fragment.as_ref())
    }

    /// Links a new shader program from already compiled shaders.
    pub fn link(gl: &Arc<B>, shaders: &[&Shader<B>]) -> Result<Self, BuildError> {
        Self::link_stages(gl, shaders).inspect_err(|e| log::error!("{e}"))
    }

    fn build(
        gl: &Arc<B>,
        vertex: &ShaderSource<'_>,
        fragment: &ShaderSource<'_>,
    ) -> Result<Self, BuildError> {
        let vertex_src = vertex.load(ShaderStage::Vertex)?;
        let fragment_src = fragment.load(ShaderStage::Fragment)?;

        // Both stages are compiled so that every broken stage gets reported.
        let vert = Shader::new(gl, ShaderStage::Vertex, &vertex_src);
        let frag = Shader::new(gl, ShaderStage::Fragment, &fragment_src);

        match (vert, frag) {
            (Ok(vert), Ok(frag)) => Self::link_stages(gl, &[&vert, &frag]),
            (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
            (Err(err), Err(other)) => {
                log::error!("{other}");
                Err(err)
            }
        }
    }

    fn link_stages(gl: &Arc<B>, shaders: &[&Shader<B>]) -> Result<Self, BuildError> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !shaders.iter().any(|s| s.stage == stage) {
                return Err(BuildError::Link {
                    log: format!("program has no {stage} shader"),
                });
            }
        }

        let program = gl
            .create_program()
            .map_err(|message| BuildError::Create {
                what: "program object",
                message,
            })?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        if !gl.link_program(program) {
            let log = non_empty_log(gl.program_info_log(program));
            gl.delete_program(program);
            return Err(BuildError::Link { log });
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        let info_log = gl.program_info_log(program).trim().to_string();
        if !info_log.is_empty() {
            log::warn!("shader program linked with warnings: {info_log}");
        }
        log::debug!("linked shader program {program:?}");

        Ok(Self {
            gl: Arc::clone(gl),
            id: Some(program),
            info_log,
        })
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        match self.id {
            Some(id) => self.gl.use_program(Some(id)),
            None => log::warn!("use_program called on a released shader program"),
        }
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// This binds the program first, since uniform uploads target the active
    /// program. Names that are not active in the program are skipped.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        let Some(id) = self.id else {
            log::warn!("set_uniform(\"{name}\") called on a released shader program");
            return;
        };

        self.gl.use_program(Some(id));
        match self.gl.uniform_location(id, name) {
            Some(location) => value.set_uniform(&*self.gl, &location),
            None => log::trace!("uniform \"{name}\" is not active in program {id:?}"),
        }
    }

    /// Deletes the program on the GPU. Calling this more than once is harmless.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.gl.delete_program(id);
            log::debug!("released shader program {id:?}");
        }
    }

    /// Whether the program still holds a linked GPU program.
    pub fn is_linked(&self) -> bool {
        self.id.is_some()
    }

    /// The GPU handle, or `None` once released.
    pub fn id(&self) -> Option<B::Program> {
        self.id
    }

    /// Linker output from a successful link. Usually empty.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }
}

impl<B: ShaderBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<B: ShaderBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.id)
            .field("info_log", &self.info_log)
            .finish()
    }
}
