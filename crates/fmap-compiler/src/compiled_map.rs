//! `CompiledFactoryMap`: compila un `FactoryMap` a un artefacto en disco y
//! lo carga.
//!
//! Flujo de `factories()`:
//! 1. Si la caché está activa y el archivo existe, se carga directamente.
//! 2. Si no: se comprueba que la ruta es escribible (antes de pedir nada a
//!    la fuente), se piden todas las factories, se compilan en orden, se
//!    serializa el mapa, se envuelve en el documento y se escribe.
//! 3. Se carga el artefacto y se devuelve id → `Factory`.
//!
//! Un fallo en cualquier entrada aborta la pasada completa antes de escribir,
//! así que un artefacto previo nunca se pisa con uno parcial.
use std::any::Any;
use std::error::Error;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use fmap_core::{ConstructorRegistry, Factory, FactoryError, FactoryMap};
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::artifact::{is_path_writable, load_artifact, render_document, write_artifact, WriteMode};
use crate::callable_compiler::CallableCompiler;
use crate::config::CompileConfig;
use crate::error::CompileError;
use crate::serializer::MappingSerializer;
use crate::translator::{DefinitionTranslator, TranslateError, Translator};

pub struct CompiledFactoryMap<M: FactoryMap, T: Translator = DefinitionTranslator> {
    map: M,
    cache: bool,
    path: PathBuf,
    compiler: CallableCompiler<T>,
    registry: Arc<ConstructorRegistry>,
    write_mode: WriteMode,
}

impl<M: FactoryMap> CompiledFactoryMap<M, DefinitionTranslator> {
    /// Compilador con el traductor por defecto, validado contra `registry`.
    pub fn new(map: M, cache: bool, path: impl Into<PathBuf>, registry: Arc<ConstructorRegistry>) -> Self {
        let compiler = CallableCompiler::new(DefinitionTranslator::new(registry.clone()));
        Self::with_compiler(map, cache, path, registry, compiler)
    }

    pub fn from_config(map: M, config: &CompileConfig, registry: Arc<ConstructorRegistry>) -> Self {
        Self::new(map, config.cache_enabled, config.path.clone(), registry).with_write_mode(config.write_mode)
    }
}

impl<M: FactoryMap, T: Translator> CompiledFactoryMap<M, T> {
    pub fn with_compiler(map: M,
                         cache: bool,
                         path: impl Into<PathBuf>,
                         registry: Arc<ConstructorRegistry>,
                         compiler: CallableCompiler<T>)
                         -> Self {
        Self { map,
               cache,
               path: path.into(),
               compiler,
               registry,
               write_mode: WriteMode::default() }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Si la próxima llamada a `factories()` reutilizará el archivo.
    pub fn is_cached(&self) -> bool {
        self.cache && self.path.is_file()
    }

    /// Mapa id → factory, compilando antes si la caché no es utilizable.
    pub fn factories(&self) -> Result<IndexMap<String, Factory>, CompileError> {
        if self.is_cached() {
            debug!("factories:cache_hit path={}", self.path.display());
        } else {
            self.compile()?;
        }
        Ok(load_artifact(&self.path, &self.registry)?)
    }

    /// Representación textual de una factory.
    pub fn compiled(&self, factory: &Factory) -> Result<String, TranslateError> {
        self.compiler.compiled(factory)
    }

    /// Borra el artefacto si existe. Devuelve si había algo que borrar.
    pub fn invalidate(&self) -> Result<bool, CompileError> {
        if !self.path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| CompileError::Write { path: self.path.clone(),
                                                                           source })?;
        info!("factories:invalidated path={}", self.path.display());
        Ok(true)
    }

    fn compile(&self) -> Result<(), CompileError> {
        if !is_path_writable(&self.path, self.write_mode) {
            return Err(CompileError::UnwritablePath { path: self.path.clone() });
        }

        let factories = self.map.factories()?;
        debug!("compile:start path={} count={}", self.path.display(), factories.len());

        let mut compiled = IndexMap::with_capacity(factories.len());
        for (id, factory) in &factories {
            let text = self.compile_entry(factory).map_err(|source| {
                                                      warn!("compile:aborted id={id} cause={source}");
                                                      CompileError::Compilation { id: id.clone(),
                                                                                  source }
                                                  })?;
            if let Some(definition) = factory.definition() {
                debug!("compile:entry id={id} fingerprint={}", definition.fingerprint());
            }
            compiled.insert(id.clone(), text);
        }

        let mapping = MappingSerializer::nested(1).serialize(&compiled);
        let contents = render_document(&mapping, Utc::now());
        write_artifact(&self.path, &contents, self.write_mode).map_err(|source| CompileError::Write { path: self.path.clone(),
                                                                                                     source })?;
        info!("compile:done path={} count={} mode={}", self.path.display(), compiled.len(), self.write_mode);
        Ok(())
    }

    // Un panic dentro del traductor cuenta como fallo de esa entrada.
    fn compile_entry(&self, factory: &Factory) -> Result<String, TranslateError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.compiler.compiled(factory)))
            .unwrap_or_else(|payload| Err(TranslateError::Panicked(panic_message(payload.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// Mensaje con toda la cadena de causas: "error: causa: causa...".
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}

/// Un mapa compilado es a su vez una fuente de factories. El error conserva
/// el id que falló y sus causas en el mensaje.
impl<M: FactoryMap, T: Translator> FactoryMap for CompiledFactoryMap<M, T> {
    fn factories(&self) -> Result<IndexMap<String, Factory>, FactoryError> {
        CompiledFactoryMap::factories(self).map_err(|e| FactoryError::Upstream(error_chain(&e)))
    }
}
