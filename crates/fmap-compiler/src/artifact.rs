//! Artefacto compilado en disco.
//!
//! Formato (JSON):
//!
//! ```text
//! {
//!     "format": "factorymap/1",
//!     "engine_version": "F1.0",
//!     "compiled_at": "2026-01-01T00:00:00Z",
//!     "fingerprint": "<blake3 del texto de factories>",
//!     "factories": { "id": <FactoryDefinition>, ... }
//! }
//! ```
//!
//! La cabecera y el cierre envuelven el literal producido por el
//! `MappingSerializer`, que se incrusta byte a byte. El fingerprint se calcula
//! sobre ese texto exacto, así que un archivo truncado o editado a mano no
//! se carga.
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use fmap_core::constants::{ARTIFACT_FORMAT, ENGINE_VERSION};
use fmap_core::hashing::hash_str;
use fmap_core::{ConstructorRegistry, Factory, FactoryDefinition, FactoryError};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;
use tempfile::NamedTempFile;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("artifact {} is not a valid document: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {} has unsupported format '{found}' (expected '{expected}')", .path.display())]
    Format {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },
    #[error("artifact {} was compiled by engine '{found}' (current '{expected}')", .path.display())]
    EngineVersion {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },
    #[error("artifact {} fingerprint mismatch (truncated or edited)", .path.display())]
    Fingerprint { path: PathBuf },
    #[error("cannot bind factory '{id}' from {}: {source}", .path.display())]
    Bind {
        path: PathBuf,
        id: String,
        #[source]
        source: FactoryError,
    },
}

/// Estrategia de escritura del artefacto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Archivo temporal en el mismo directorio + `rename` sobre el destino.
    /// Un lector concurrente ve el artefacto anterior completo o el nuevo
    /// completo. Requiere escritura en el directorio; se conservan los
    /// permisos del artefacto previo pero no su propietario.
    #[default]
    Atomic,
    /// Sobrescritura directa con una única escritura.
    Overwrite,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!("unknown write mode '{other}'")),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Atomic => "atomic",
                        Self::Overwrite => "overwrite",
                    })
    }
}

#[derive(Deserialize)]
struct RawDocument<'a> {
    format: String,
    engine_version: String,
    fingerprint: String,
    #[serde(borrow)]
    factories: &'a RawValue,
}

/// Envuelve el literal del mapa en el documento completo.
pub fn render_document(mapping: &str, compiled_at: DateTime<Utc>) -> String {
    let stamp = compiled_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!("{{\n    \"format\": {},\n    \"engine_version\": {},\n    \"compiled_at\": {},\n    \"fingerprint\": {},\n    \"factories\": {mapping}\n}}\n",
            Value::from(ARTIFACT_FORMAT),
            Value::from(ENGINE_VERSION),
            Value::from(stamp),
            Value::from(hash_str(mapping)))
}

/// Lee el artefacto y enlaza cada definición con el registry, conservando el
/// orden del archivo.
pub fn load_artifact(path: &Path, registry: &ConstructorRegistry) -> Result<IndexMap<String, Factory>, LoadError> {
    debug!("load_artifact:start path={}", path.display());
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read { path: path.to_path_buf(),
                                                                           source })?;
    let parse_err = |source| LoadError::Parse { path: path.to_path_buf(),
                                                source };
    let doc: RawDocument<'_> = serde_json::from_str(&text).map_err(parse_err)?;
    if doc.format != ARTIFACT_FORMAT {
        return Err(LoadError::Format { path: path.to_path_buf(),
                                       expected: ARTIFACT_FORMAT,
                                       found: doc.format });
    }
    if doc.engine_version != ENGINE_VERSION {
        return Err(LoadError::EngineVersion { path: path.to_path_buf(),
                                              expected: ENGINE_VERSION,
                                              found: doc.engine_version });
    }
    let mapping = doc.factories.get();
    if hash_str(mapping) != doc.fingerprint {
        return Err(LoadError::Fingerprint { path: path.to_path_buf() });
    }
    let definitions: IndexMap<String, FactoryDefinition> = serde_json::from_str(mapping).map_err(parse_err)?;
    let mut factories = IndexMap::with_capacity(definitions.len());
    for (id, definition) in definitions {
        let factory = Factory::from_definition(definition, registry).map_err(|source| LoadError::Bind { path: path.to_path_buf(),
                                                                                                          id: id.clone(),
                                                                                                          source })?;
        factories.insert(id, factory);
    }
    debug!("load_artifact:done path={} count={}", path.display(), factories.len());
    Ok(factories)
}

/// Comprobación previa a compilar, con los permisos efectivos del proceso:
/// - archivo inexistente: su directorio debe ser escribible;
/// - archivo existente: debe ser escribible, y en `WriteMode::Atomic`
///   también su directorio (ahí se crea el temporal).
pub fn is_path_writable(path: &Path, mode: WriteMode) -> bool {
    let parent = parent_dir(path);
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && can_write(path) && (mode == WriteMode::Overwrite || is_writable_dir(parent)),
        Err(_) => is_writable_dir(parent),
    }
}

fn is_writable_dir(dir: &Path) -> bool {
    fs::metadata(dir).map(|meta| meta.is_dir()).unwrap_or(false) && can_write(dir)
}

#[cfg(unix)]
fn can_write(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn can_write(path: &Path) -> bool {
    fs::metadata(path).map(|meta| !meta.permissions().readonly()).unwrap_or(false)
}

/// Escribe `contents` en `path` según `mode`.
///
/// En modo atómico el temporal hereda los permisos del artefacto previo; el
/// propietario pasa a ser el del proceso que escribe.
pub fn write_artifact(path: &Path, contents: &str, mode: WriteMode) -> io::Result<()> {
    match mode {
        WriteMode::Overwrite => fs::write(path, contents),
        WriteMode::Atomic => {
            let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
            tmp.write_all(contents.as_bytes())?;
            if let Ok(meta) = fs::metadata(path) {
                tmp.as_file().set_permissions(meta.permissions())?;
            }
            tmp.persist(path).map_err(|e| e.error)?;
            Ok(())
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
