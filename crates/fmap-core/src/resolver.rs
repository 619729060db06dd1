//! Contrato mínimo para resolver dependencias al invocar una factory.
//!
//! La resolución completa (grafo de dependencias, singletons, ciclos) es
//! responsabilidad del contenedor que consume el mapa de factories.
use indexmap::IndexMap;

use crate::errors::FactoryError;
use crate::model::Instance;

pub trait Resolver {
    fn resolve(&self, id: &str) -> Result<Instance, FactoryError>;
}

/// Resolver vacío: cualquier dependencia es irresoluble.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDependencies;

impl Resolver for NoDependencies {
    fn resolve(&self, id: &str) -> Result<Instance, FactoryError> {
        Err(FactoryError::Unresolvable(id.to_string()))
    }
}

/// Instancias ya construidas, indexadas por id.
impl Resolver for IndexMap<String, Instance> {
    fn resolve(&self, id: &str) -> Result<Instance, FactoryError> {
        self.get(id).cloned().ok_or_else(|| FactoryError::Unresolvable(id.to_string()))
    }
}
