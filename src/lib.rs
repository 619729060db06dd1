//! FactoryMap Rust Library
//!
//! Punto de entrada del workspace:
//! - `fmap_core`: factories declarativas, registry de constructores y la
//!   fuente `FactoryMap`.
//! - `fmap_compiler`: compilación a artefacto en disco con caché.
//!
//! `compiled_from_env` arma un `CompiledFactoryMap` con la configuración de
//! `.env` / entorno.

use std::sync::Arc;

pub use fmap_compiler::{
    init_dotenv, load_artifact, CallableCompiler, CompileConfig, CompileError, CompiledFactoryMap, DefinitionTranslator,
    LoadError, MappingSerializer, TranslateError, Translator, WriteMode,
};
pub use fmap_core::{
    instance, ConstructorRegistry, Factory, FactoryDefinition, FactoryError, FactoryMap, InMemoryFactoryMap, Instance,
    NoDependencies, Resolver,
};
pub use indexmap::IndexMap;

/// Tipos más usados, para `use factorymap_rust::prelude::*`.
pub mod prelude {
    pub use crate::{
        instance, CompileError, CompiledFactoryMap, ConstructorRegistry, Factory, FactoryDefinition, FactoryMap,
        InMemoryFactoryMap, Instance, Resolver,
    };
    pub use serde_json::{json, Value};
}

/// `CompiledFactoryMap` configurado desde `FACTORYMAP_*`.
pub fn compiled_from_env<M: FactoryMap>(map: M, registry: Arc<ConstructorRegistry>) -> CompiledFactoryMap<M> {
    init_dotenv();
    let config = CompileConfig::from_env();
    log::debug!("compiled_from_env cache={} path={} mode={}",
                config.cache_enabled,
                config.path.display(),
                config.write_mode);
    CompiledFactoryMap::from_config(map, &config, registry)
}
