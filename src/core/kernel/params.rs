use serde_json::Value;
use std::collections::BTreeMap;

/// Normalize a loosely-typed parameter map into query-string form.
///
/// Per entry, in key order:
/// - null values are dropped entirely
/// - booleans become the literals `"true"` / `"false"`
/// - arrays become a bracketed comma-separated literal with strings
///   double-quoted (`["BTCUSDT","ETHUSDT"]`, `[1,2,3]`); an empty array
///   renders as `[]`
/// - strings pass through unquoted, everything else in its JSON text form
///
/// The caller's map is never mutated; the result is a fresh map ready for
/// percent-encoding by the URL builder.
pub fn tidy_request_params(params: &BTreeMap<String, Value>) -> BTreeMap<String, String> {
    let mut tidy = BTreeMap::new();

    for (key, value) in params {
        let rendered = match value {
            Value::Null => continue,
            Value::Bool(b) => b.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) => render_array(items),
            other => other.to_string(),
        };
        tidy.insert(key.clone(), rendered);
    }

    tidy
}

fn render_array(items: &[Value]) -> String {
    let rendered: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", rendered.join(","))
}
