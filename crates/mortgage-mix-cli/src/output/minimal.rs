use serde_json::Value;

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Mix envelope: the recommended option's monthly payment
    if let Some(Value::Array(options)) = result.get("options") {
        if let Some(recommended) = options
            .iter()
            .find(|o| o.get("recommended").and_then(Value::as_bool).unwrap_or(false))
        {
            if let Some(payment) = recommended.get("monthly_payment") {
                println!("{}", format_minimal(payment));
                return;
            }
        }
    }

    // Priority list of key output fields
    let priority_keys = ["saving", "monthly_payment", "prime"];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
