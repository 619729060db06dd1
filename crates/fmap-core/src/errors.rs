//! Errores del core: construcción e invocación de factories.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FactoryError {
    #[error("unknown constructor '{0}'")]
    UnknownConstructor(String),
    #[error("cannot resolve dependency '{0}'")]
    Unresolvable(String),
    #[error("factory produced a value of an unexpected type (expected {expected})")]
    TypeMismatch { expected: &'static str },
    #[error("construction failed: {0}")]
    Construction(String),
    #[error("upstream factory map failed: {0}")]
    Upstream(String),
}
