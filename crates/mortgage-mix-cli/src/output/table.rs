use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
///
/// Mix envelopes get a per-option comparison table; everything else falls
/// back to a field/value listing. Affordability findings print as a list
/// under the table rather than as one crammed cell.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                if let Some(Value::String(methodology)) = map.get("methodology") {
                    println!("\nMethodology: {}", methodology);
                }
            } else {
                print_fields(value);
            }
        }
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    if let Some(Value::Array(options)) = result.get("options") {
        print_mix_options(options);
        return;
    }

    print_fields(result);

    if let Some(Value::Array(warnings)) = result.get("warnings") {
        println!("\nFindings:");
        for warning in warnings {
            let code = warning.get("code").and_then(Value::as_str).unwrap_or("?");
            let message = warning.get("message").and_then(Value::as_str).unwrap_or("");
            println!("  [{code}] {message}");
        }
    }
}

fn print_mix_options(options: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record([
        "Mix",
        "Fixed %",
        "Variable %",
        "Prime %",
        "Rate %",
        "Monthly",
        "Total cost",
        "Volatility",
        "Recommended",
    ]);

    for option in options {
        let composition = option.get("composition").cloned().unwrap_or_default();
        builder.push_record([
            field(option, "id"),
            field(&composition, "fixed"),
            field(&composition, "variable"),
            field(&composition, "prime"),
            field(option, "annual_rate"),
            field(option, "monthly_payment"),
            field(option, "total_cost"),
            field(option, "volatility"),
            field(option, "recommended"),
        ]);
    }

    println!("{}", Table::from(builder));
}

fn print_fields(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            // rendered separately as a findings list
            if key == "warnings" {
                continue;
            }
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn field(value: &Value, key: &str) -> String {
    value.get(key).map(format_value).unwrap_or_default()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
