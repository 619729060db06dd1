//! Serializa un mapa id → texto en un único literal de objeto JSON.
//!
//! Los valores ya son expresiones válidas y se incrustan sin tocar; sólo las
//! claves se escapan. El orden de entrada se conserva.
use indexmap::IndexMap;
use serde_json::Value;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct MappingSerializer {
    depth: usize,
}

impl MappingSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer para un literal anidado `depth` niveles dentro de otro
    /// documento (sólo afecta a la indentación).
    pub fn nested(depth: usize) -> Self {
        Self { depth }
    }

    pub fn serialize(&self, entries: &IndexMap<String, String>) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }
        let outer = INDENT.repeat(self.depth);
        let inner = INDENT.repeat(self.depth + 1);
        let lines: Vec<String> = entries.iter()
                                        .map(|(id, text)| format!("{inner}{}: {text}", Value::from(id.as_str())))
                                        .collect();
        format!("{{\n{}\n{outer}}}", lines.join(",\n"))
    }
}
