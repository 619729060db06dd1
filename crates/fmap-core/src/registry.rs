//! Registro de constructores con nombre.
//!
//! El código no se serializa: las definiciones referencian constructores por
//! nombre y el registry los enlaza de nuevo al cargar un artefacto.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::FactoryError;
use crate::model::Instance;

/// Constructor: recibe los `params` de la definición y las dependencias ya
/// resueltas, en el orden declarado.
pub type ConstructorFn = Arc<dyn Fn(&Value, Vec<Instance>) -> Result<Instance, FactoryError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ConstructorRegistry {
    constructors: IndexMap<String, ConstructorFn>,
}

impl ConstructorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) un constructor.
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F) -> &mut Self
        where F: Fn(&Value, Vec<Instance>) -> Result<Instance, FactoryError> + Send + Sync + 'static
    {
        self.constructors.insert(name.into(), Arc::new(ctor));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, ctor: F) -> Self
        where F: Fn(&Value, Vec<Instance>) -> Result<Instance, FactoryError> + Send + Sync + 'static
    {
        self.register(name, ctor);
        self
    }

    pub fn get(&self, name: &str) -> Option<ConstructorFn> {
        self.constructors.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ConstructorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::instance;

    #[test]
    fn names_keep_registration_order() {
        let mut r = ConstructorRegistry::new();
        r.register("b", |_: &Value, _| Ok(instance(1u8)))
         .register("a", |_: &Value, _| Ok(instance(2u8)));
        assert_eq!(r.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(r.contains("a"));
        assert!(!r.contains("c"));
        assert_eq!(r.len(), 2);
        assert_eq!(format!("{r:?}"), r#"["b", "a"]"#);
    }

    #[test]
    fn register_replaces_existing_name() {
        let r = ConstructorRegistry::new().with("x", |_: &Value, _| Ok(instance(1u8)))
                                          .with("x", |_: &Value, _| Ok(instance(2u8)));
        let out = r.get("x").unwrap()(&Value::Null, vec![]).unwrap();
        assert_eq!(out.downcast_ref::<u8>(), Some(&2));
        assert_eq!(r.len(), 1);
    }
}
