//! Constantes del formato de artefacto compilado.
//!
//! Ambos valores se escriben en la cabecera del artefacto y se comparan al
//! cargarlo: un artefacto escrito por otra versión del motor se rechaza en
//! lugar de reinterpretarse.

/// Versión lógica del motor. Cambiarla cuando cambie la semántica de
/// `FactoryDefinition` de forma incompatible.
pub const ENGINE_VERSION: &str = "F1.0";

/// Identificador del formato del documento en disco.
pub const ARTIFACT_FORMAT: &str = "factorymap/1";
