//! Factories con constructores y dependencias: compilar, cargar e invocar.
//!
//! Los valores que un closure capturaría viajan como `params` explícitos.

use std::sync::Arc;

use tempfile::tempdir;

use factorymap_rust::prelude::*;
use factorymap_rust::{FactoryError, IndexMap, LoadError};

#[derive(Debug, PartialEq)]
struct Mailer {
    host: String,
    port: u64,
    sender: String,
}

/// Resolver de prueba: invoca la factory del mismo mapa (sin caché).
struct MapResolver<'a>(&'a IndexMap<String, Factory>);

impl Resolver for MapResolver<'_> {
    fn resolve(&self, id: &str) -> Result<Instance, FactoryError> {
        let factory = self.0.get(id).ok_or_else(|| FactoryError::Unresolvable(id.to_string()))?;
        factory.call(self)
    }
}

fn registry() -> ConstructorRegistry {
    ConstructorRegistry::new().with("mailer", |params: &Value, deps: Vec<Instance>| {
                                  let sender = deps[0].downcast_ref::<Value>()
                                                      .and_then(Value::as_str)
                                                      .ok_or(FactoryError::TypeMismatch { expected: "string sender" })?;
                                  let host = params["host"].as_str()
                                                           .ok_or_else(|| FactoryError::Construction("missing host".into()))?;
                                  Ok(instance(Mailer { host: host.to_string(),
                                                       port: params["port"].as_u64().unwrap_or(25),
                                                       sender: sender.to_string() }))
                              })
}

fn source(registry: &ConstructorRegistry) -> InMemoryFactoryMap {
    let mailer = FactoryDefinition::construct("mailer", json!({"host": "smtp.local", "port": 2525}), ["config.sender"]);
    InMemoryFactoryMap::new().with("config.sender", Factory::constant(json!("noreply@local")))
                             .with("mailer", Factory::from_definition(mailer, registry).unwrap())
                             .with("mailer.default", Factory::from_definition(FactoryDefinition::alias("mailer"), registry).unwrap())
}

#[test]
fn constructed_factories_survive_the_round_trip() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(registry());

    let compiled = CompiledFactoryMap::new(source(&registry), true, dir.path().join("factories.json"), registry.clone());
    let loaded = compiled.factories().unwrap();

    let resolver = MapResolver(&loaded);
    let mailer = loaded["mailer.default"].call_as::<Mailer>(&resolver).unwrap();
    assert_eq!(*mailer,
               Mailer { host: "smtp.local".into(),
                        port: 2525,
                        sender: "noreply@local".into() });
}

#[test]
fn loading_with_a_registry_missing_a_constructor_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factories.json");
    let full = Arc::new(registry());
    CompiledFactoryMap::new(source(&full), true, &path, full.clone()).factories().unwrap();

    let empty = Arc::new(ConstructorRegistry::new());
    let err = CompiledFactoryMap::new(InMemoryFactoryMap::new(), true, &path, empty).factories().unwrap_err();
    assert!(matches!(err, CompileError::Load(LoadError::Bind { ref id, .. }) if id == "mailer"));
}

#[test]
fn compile_rejects_constructors_unknown_to_the_compiler() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("factories.json");
    // La fuente se arma con un registry distinto al del compilador.
    let upstream_registry = registry();
    let err = CompiledFactoryMap::new(source(&upstream_registry), false, &path, Arc::new(ConstructorRegistry::new())).factories()
                                                                                                                    .unwrap_err();
    assert_eq!(err.failed_id(), Some("mailer"));
    assert!(!path.exists());
}
