//! Errores de compilación del mapa de factories.

use std::io;
use std::path::PathBuf;

use fmap_core::FactoryError;
use thiserror::Error;

use crate::artifact::LoadError;
use crate::translator::TranslateError;

#[derive(Debug, Error)]
pub enum CompileError {
    /// Se detecta antes de pedir las factories a la fuente.
    #[error("factory map compilation file path is not writable ({})", .path.display())]
    UnwritablePath { path: PathBuf },
    /// Aborta toda la pasada: no se escribe ningún artefacto.
    #[error("failed to compile the factory associated with id '{id}'")]
    Compilation {
        id: String,
        #[source]
        source: TranslateError,
    },
    #[error("cannot fetch upstream factories: {0}")]
    Upstream(#[from] FactoryError),
    #[error("cannot write artifact {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl CompileError {
    /// Id de la factory que falló, si el error es de compilación.
    pub fn failed_id(&self) -> Option<&str> {
        match self {
            Self::Compilation { id, .. } => Some(id),
            _ => None,
        }
    }
}
