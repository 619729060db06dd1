//! Canonical JSON: claves de objeto ordenadas y sin espacios.
//!
//! El orden de inserción de los mapas no participa en la forma canónica, de
//! modo que dos definiciones equivalentes producen el mismo texto.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter().map(|(k, v)| format!("{}:{}", quote(k), v)).collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

// Serializar un &str a JSON no puede fallar; el fallback nunca se usa.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}
