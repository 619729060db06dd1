//! `Factory`: unidad invocable que produce una instancia.
//!
//! Una factory puede venir de una `FactoryDefinition` (compilable a texto) o
//! de un closure arbitrario (`Factory::from_fn`), que es invocable pero no
//! tiene representación declarativa y por tanto no se puede compilar.
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::FactoryError;
use crate::registry::ConstructorRegistry;
use crate::resolver::Resolver;

use super::FactoryDefinition;

/// Valor producido por una factory.
pub type Instance = Arc<dyn Any + Send + Sync>;

type Body = Arc<dyn Fn(&dyn Resolver) -> Result<Instance, FactoryError> + Send + Sync>;

/// Envuelve un valor concreto como `Instance`.
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

#[derive(Clone)]
pub struct Factory {
    definition: Option<FactoryDefinition>,
    body: Body,
}

impl Factory {
    /// Enlaza una definición con los constructores del registry. Falla si la
    /// definición nombra un constructor no registrado.
    pub fn from_definition(definition: FactoryDefinition, registry: &ConstructorRegistry) -> Result<Self, FactoryError> {
        let body: Body = match &definition {
            FactoryDefinition::Constant { value } => constant_body(value.clone()),
            FactoryDefinition::Construct { constructor,
                                           params,
                                           dependencies, } => {
                let ctor = registry.get(constructor)
                                   .ok_or_else(|| FactoryError::UnknownConstructor(constructor.clone()))?;
                let params = params.clone();
                let dependencies = dependencies.clone();
                Arc::new(move |resolver: &dyn Resolver| {
                    let resolved = dependencies.iter()
                                               .map(|id| resolver.resolve(id))
                                               .collect::<Result<Vec<_>, _>>()?;
                    ctor(&params, resolved)
                })
            }
            FactoryDefinition::Alias { target } => {
                let target = target.clone();
                Arc::new(move |resolver: &dyn Resolver| resolver.resolve(&target))
            }
        };
        Ok(Self { definition: Some(definition),
                  body })
    }

    /// Factory sin dependencias que devuelve siempre `value`.
    pub fn constant(value: Value) -> Self {
        Self { body: constant_body(value.clone()),
               definition: Some(FactoryDefinition::Constant { value }) }
    }

    /// Factory opaca a partir de un closure. No es compilable.
    pub fn from_fn<F>(f: F) -> Self
        where F: Fn(&dyn Resolver) -> Result<Instance, FactoryError> + Send + Sync + 'static
    {
        Self { definition: None,
               body: Arc::new(f) }
    }

    pub fn definition(&self) -> Option<&FactoryDefinition> {
        self.definition.as_ref()
    }

    pub fn is_declarative(&self) -> bool {
        self.definition.is_some()
    }

    pub fn call(&self, resolver: &dyn Resolver) -> Result<Instance, FactoryError> {
        (self.body)(resolver)
    }

    /// Invoca y hace downcast al tipo esperado.
    pub fn call_as<T: Any + Send + Sync>(&self, resolver: &dyn Resolver) -> Result<Arc<T>, FactoryError> {
        self.call(resolver)?
            .downcast::<T>()
            .map_err(|_| FactoryError::TypeMismatch { expected: type_name::<T>() })
    }
}

fn constant_body(value: Value) -> Body {
    Arc::new(move |_: &dyn Resolver| Ok(instance(value.clone())))
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.definition {
            Some(def) => f.debug_tuple("Factory").field(def).finish(),
            None => f.write_str("Factory(<closure>)"),
        }
    }
}
