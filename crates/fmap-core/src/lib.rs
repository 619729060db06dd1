//! fmap-core: modelo de factories declarativas.
//!
//! - `model`: `FactoryDefinition` (forma serializable) y `Factory` (invocable).
//! - `registry`: constructores con nombre que enlazan definiciones a código.
//! - `resolver`: contrato para resolver dependencias al invocar.
//! - `map`: trait `FactoryMap`, la fuente id → factory.
//! - `hashing`: JSON canónico + blake3.
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod map;
pub mod model;
pub mod registry;
pub mod resolver;

pub use errors::FactoryError;
pub use map::{FactoryMap, InMemoryFactoryMap};
pub use model::{instance, Factory, FactoryDefinition, Instance};
pub use registry::{ConstructorFn, ConstructorRegistry};
pub use resolver::{NoDependencies, Resolver};
