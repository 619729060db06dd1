//! Fuente de factories: id → `Factory` en orden de inserción.
use indexmap::IndexMap;

use crate::errors::FactoryError;
use crate::model::Factory;

/// Capacidad consumida por el compilador: devolver el mapa completo de
/// factories. El orden de iteración es parte del contrato.
pub trait FactoryMap {
    fn factories(&self) -> Result<IndexMap<String, Factory>, FactoryError>;
}

impl<M: FactoryMap + ?Sized> FactoryMap for &M {
    fn factories(&self) -> Result<IndexMap<String, Factory>, FactoryError> {
        (**self).factories()
    }
}

impl<M: FactoryMap + ?Sized> FactoryMap for Box<M> {
    fn factories(&self) -> Result<IndexMap<String, Factory>, FactoryError> {
        (**self).factories()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFactoryMap {
    factories: IndexMap<String, Factory>,
}

impl InMemoryFactoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, factory: Factory) -> Self {
        self.insert(id, factory);
        self
    }

    /// Inserta o reemplaza; un id reemplazado conserva su posición.
    pub fn insert(&mut self, id: impl Into<String>, factory: Factory) -> Option<Factory> {
        self.factories.insert(id.into(), factory)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl FromIterator<(String, Factory)> for InMemoryFactoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Factory)>>(iter: I) -> Self {
        Self { factories: iter.into_iter().collect() }
    }
}

impl FactoryMap for InMemoryFactoryMap {
    fn factories(&self) -> Result<IndexMap<String, Factory>, FactoryError> {
        Ok(self.factories.clone())
    }
}
