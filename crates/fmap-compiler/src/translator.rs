//! Traducción de una factory a texto re-cargable.
//!
//! El texto producido es una expresión JSON válida por sí sola; el
//! `MappingSerializer` la incrusta tal cual dentro del mapa compilado.
use std::sync::Arc;

use fmap_core::{ConstructorRegistry, Factory, FactoryDefinition};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("factory has no declarative definition (runtime closures cannot be compiled)")]
    NotTranslatable,
    #[error("unknown constructor '{0}'")]
    UnknownConstructor(String),
    #[error("invalid definition: {0}")]
    InvalidDefinition(String),
    #[error("definition cannot be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("translator panicked: {0}")]
    Panicked(String),
}

/// Convierte una factory en texto que, al cargarse, reconstruye una factory
/// equivalente.
pub trait Translator {
    fn translate(&self, factory: &Factory) -> Result<String, TranslateError>;
}

/// Traductor por defecto: emite la `FactoryDefinition` como JSON compacto.
///
/// Valida contra el registry que el artefacto podrá enlazarse al cargarse,
/// de modo que un constructor inexistente falla en compilación y no en la
/// primera carga.
#[derive(Debug, Clone)]
pub struct DefinitionTranslator {
    registry: Arc<ConstructorRegistry>,
}

impl DefinitionTranslator {
    pub fn new(registry: Arc<ConstructorRegistry>) -> Self {
        Self { registry }
    }

    fn validate(&self, definition: &FactoryDefinition) -> Result<(), TranslateError> {
        if let FactoryDefinition::Construct { constructor, .. } = definition {
            if !self.registry.contains(constructor) {
                return Err(TranslateError::UnknownConstructor(constructor.clone()));
            }
        }
        if definition.dependencies().iter().any(|id| id.is_empty()) {
            return Err(TranslateError::InvalidDefinition("empty dependency id".into()));
        }
        Ok(())
    }
}

impl Translator for DefinitionTranslator {
    fn translate(&self, factory: &Factory) -> Result<String, TranslateError> {
        let definition = factory.definition().ok_or(TranslateError::NotTranslatable)?;
        self.validate(definition)?;
        Ok(serde_json::to_string(definition)?)
    }
}
