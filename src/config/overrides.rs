use serde::Serialize;
use serde_json::Value;

/// Drop unset values from any serializable structure
///
/// Nulls, and objects left empty once their nulls are gone, are removed so
/// that merging the result never overwrites a configured value with nothing.
pub fn strip_unset<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    strip_unset_recursive(&mut value);
    value
}

fn strip_unset_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            // Recurse first so emptied children are removed in the same pass
            for (_, v) in map.iter_mut() {
                strip_unset_recursive(v);
            }

            let keys_to_remove: Vec<String> = map
                .iter()
                .filter_map(|(k, v)| match v {
                    Value::Null => Some(k.clone()),
                    Value::Object(inner) if inner.is_empty() => Some(k.clone()),
                    _ => None,
                })
                .collect();

            for key in keys_to_remove {
                map.remove(&key);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                strip_unset_recursive(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_nulls_and_empty_sections() {
        let input = json!({
            "pool": { "threads": null },
            "sum": { "n": 100, "threshold": null },
            "word_count": {}
        });
        assert_eq!(strip_unset(input), json!({ "sum": { "n": 100 } }));
    }

    #[test]
    fn test_keeps_falsy_values() {
        let input = json!({ "pool": { "threads": 0 }, "flag": false, "list": [] });
        assert_eq!(strip_unset(input.clone()), input);
    }
}
