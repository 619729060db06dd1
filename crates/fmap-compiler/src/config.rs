//! Configuración del compilador desde variables de entorno.
//!
//! Variables:
//! - `FACTORYMAP_CACHE`: reutilizar el artefacto existente (`true` por defecto).
//! - `FACTORYMAP_PATH`: ruta del artefacto (por defecto
//!   `<tmp>/factorymap-factories.json`, cuyo directorio siempre existe).
//! - `FACTORYMAP_WRITE_MODE`: `atomic` (defecto) u `overwrite`.
//!
//! Valores inválidos se ignoran con un `warn!` y se usa el defecto.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;

use crate::artifact::WriteMode;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    /// Con `false` se recompila y reescribe el artefacto en cada llamada
    /// (útil para comprobar en desarrollo que la compilación no falla).
    pub cache_enabled: bool,
    pub path: PathBuf,
    pub write_mode: WriteMode,
}

impl CompileConfig {
    pub fn new(cache_enabled: bool, path: impl Into<PathBuf>) -> Self {
        Self { cache_enabled,
               path: path.into(),
               write_mode: WriteMode::default() }
    }

    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let cache_enabled = lookup("FACTORYMAP_CACHE").and_then(|v| parse_flag("FACTORYMAP_CACHE", &v))
                                                      .unwrap_or(true);
        let path = lookup("FACTORYMAP_PATH").filter(|v| !v.trim().is_empty())
                                            .map(PathBuf::from)
                                            .unwrap_or_else(default_path);
        let write_mode = lookup("FACTORYMAP_WRITE_MODE").and_then(|v| match v.parse::<WriteMode>() {
                                                            Ok(mode) => Some(mode),
                                                            Err(e) => {
                                                                warn!("FACTORYMAP_WRITE_MODE ignored: {e}");
                                                                None
                                                            }
                                                        })
                                                        .unwrap_or_default();
        Self { cache_enabled,
               path,
               write_mode }
    }
}

fn default_path() -> PathBuf {
    env::temp_dir().join("factorymap-factories.json")
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("{key} ignored: '{other}' is not a boolean");
            None
        }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
