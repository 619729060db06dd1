//! Definición declarativa de una factory.
//!
//! Una `FactoryDefinition` es la forma "texto" de una factory: todo lo que se
//! necesita para reconstruirla está en la propia definición (valores
//! capturados incluidos como `params`), salvo el código de los constructores,
//! que vive en un `ConstructorRegistry` y se referencia por nombre.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hashing::hash_value;

/// Variantes soportadas. Se serializa con la etiqueta `kind`:
///
/// ```json
/// {"kind":"construct","constructor":"pool","params":{"size":4},"dependencies":["config"]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactoryDefinition {
    /// Devuelve siempre el mismo valor JSON.
    Constant { value: Value },
    /// Resuelve `dependencies` en orden y llama al constructor registrado.
    Construct {
        constructor: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        params: Value,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        dependencies: Vec<String>,
    },
    /// Delega en otra entrada del contenedor.
    Alias { target: String },
}

impl FactoryDefinition {
    pub fn constant(value: Value) -> Self {
        Self::Constant { value }
    }

    pub fn construct<I, S>(constructor: impl Into<String>, params: Value, dependencies: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self::Construct { constructor: constructor.into(),
                          params,
                          dependencies: dependencies.into_iter().map(Into::into).collect() }
    }

    pub fn alias(target: impl Into<String>) -> Self {
        Self::Alias { target: target.into() }
    }

    /// Ids que la factory pedirá al `Resolver` al invocarse, en orden.
    pub fn dependencies(&self) -> Vec<&str> {
        match self {
            Self::Constant { .. } => vec![],
            Self::Construct { dependencies, .. } => dependencies.iter().map(String::as_str).collect(),
            Self::Alias { target } => vec![target.as_str()],
        }
    }

    /// Hash canónico de la definición (independiente del orden de claves en
    /// `params`).
    pub fn fingerprint(&self) -> String {
        // Serializar un enum con claves String no falla.
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        hash_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn construct_serializes_with_kind_tag() {
        let def = FactoryDefinition::construct("pool", json!({"size": 4}), ["config"]);
        let text = serde_json::to_string(&def).unwrap();
        assert_eq!(text, r#"{"kind":"construct","constructor":"pool","params":{"size":4},"dependencies":["config"]}"#);
    }

    #[test]
    fn construct_defaults_params_and_dependencies() {
        let def: FactoryDefinition = serde_json::from_str(r#"{"kind":"construct","constructor":"clock"}"#).unwrap();
        assert_eq!(def, FactoryDefinition::construct("clock", Value::Null, Vec::<String>::new()));
        assert_eq!(serde_json::to_string(&def).unwrap(), r#"{"kind":"construct","constructor":"clock"}"#);
    }

    #[test]
    fn alias_depends_on_its_target() {
        assert_eq!(FactoryDefinition::alias("logger").dependencies(), vec!["logger"]);
        assert!(FactoryDefinition::constant(json!(1)).dependencies().is_empty());
    }

    #[test]
    fn fingerprint_ignores_param_key_order() {
        let a = FactoryDefinition::construct("pool", json!({"a": 1, "b": 2}), ["x"]);
        let b = FactoryDefinition::construct("pool", json!({"b": 2, "a": 1}), ["x"]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_ne!(a.fingerprint(), FactoryDefinition::alias("x").fingerprint());
    }
}
