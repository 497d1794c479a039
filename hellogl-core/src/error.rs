use std::path::PathBuf;

use crate::shader::ShaderStage;

/// Substituted when a driver reports a failure without any log text.
pub(crate) const EMPTY_LOG: &str = "no diagnostic reported by the driver";

/// Why a [`crate::ShaderProgram`] could not be built.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A stage source could not be read from disk.
    #[error("failed to read {stage} shader source `{}`: {source}", .path.display())]
    SourceRead {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stage was rejected by the shading language compiler.
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but could not be linked together.
    #[error("failed to link shader program: {log}")]
    Link { log: String },

    /// The back-end refused to allocate a shader or program object.
    #[error("failed to create {what}: {message}")]
    Create { what: &'static str, message: String },
}

impl BuildError {
    /// The stage this error belongs to, if it is stage specific.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            BuildError::SourceRead { stage, .. } | BuildError::Compile { stage, .. } => Some(*stage),
            BuildError::Link { .. } | BuildError::Create { .. } => None,
        }
    }

    /// The compiler or linker log, if the failure came from the driver.
    pub fn log(&self) -> Option<&str> {
        match self {
            BuildError::Compile { log, .. } | BuildError::Link { log } => Some(log),
            BuildError::SourceRead { .. } | BuildError::Create { .. } => None,
        }
    }
}

/// Trims a driver log, falling back to [`EMPTY_LOG`] if nothing is left.
pub(crate) fn non_empty_log(log: String) -> String {
    let trimmed = log.trim();
    if trimmed.is_empty() {
        EMPTY_LOG.to_string()
    } else if trimmed.len() == log.len() {
        log
    } else {
        trimmed.to_string()
    }
}
