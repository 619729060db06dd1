//! Capa fina sobre el `Translator`: compila una factory a texto.
//!
//! El traductor se inyecta al construir; los errores de traducción se
//! devuelven sin modificar y es el orquestador quien les añade el id.
use fmap_core::Factory;

use crate::translator::{TranslateError, Translator};

#[derive(Debug, Clone)]
pub struct CallableCompiler<T: Translator> {
    translator: T,
}

impl<T: Translator> CallableCompiler<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Representación textual de la factory.
    pub fn compiled(&self, factory: &Factory) -> Result<String, TranslateError> {
        self.translator.translate(factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    struct CountingTranslator {
        calls: Cell<usize>,
    }

    impl Translator for CountingTranslator {
        fn translate(&self, _factory: &Factory) -> Result<String, TranslateError> {
            self.calls.set(self.calls.get() + 1);
            Err(TranslateError::InvalidDefinition(format!("call {}", self.calls.get())))
        }
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let compiler = CallableCompiler::new(CountingTranslator { calls: Cell::new(0) });
        let f = Factory::constant(json!(1));
        let first = compiler.compiled(&f).unwrap_err();
        let second = compiler.compiled(&f).unwrap_err();
        assert_eq!(first.to_string(), "invalid definition: call 1");
        assert_eq!(second.to_string(), "invalid definition: call 2");
        assert_eq!(compiler.translator().calls.get(), 2);
    }
}
