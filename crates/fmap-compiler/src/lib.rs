//! fmap-compiler: compila un `FactoryMap` a un artefacto en disco y lo carga.
//!
//! Módulos:
//! - `translator`: factory → texto (`Translator`, `DefinitionTranslator`).
//! - `callable_compiler`: capa fina sobre el traductor.
//! - `serializer`: id → texto a un único literal de mapa.
//! - `artifact`: documento en disco, escritura y carga.
//! - `compiled_map`: orquestador con política de caché.
//! - `config`: configuración desde `.env` / entorno.

pub mod artifact;
pub mod callable_compiler;
pub mod compiled_map;
pub mod config;
pub mod error;
pub mod serializer;
pub mod translator;

pub use artifact::{load_artifact, LoadError, WriteMode};
pub use callable_compiler::CallableCompiler;
pub use compiled_map::CompiledFactoryMap;
pub use config::{init_dotenv, CompileConfig};
pub use error::CompileError;
pub use serializer::MappingSerializer;
pub use translator::{DefinitionTranslator, TranslateError, Translator};
