//! Modelos neutrales: definición declarativa de una factory y la factory
//! invocable que se reconstruye a partir de ella.

pub mod definition;
pub mod factory;

pub use definition::FactoryDefinition;
pub use factory::{instance, Factory, Instance};
