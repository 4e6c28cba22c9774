use serde_json::Value;

use super::format_value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field of the object.
pub fn print_minimal(value: &Value) {
    let priority_keys = [
        "minimum_payment",
        "monthly_payment",
        "new_monthly_payment",
        "months",
        "total_interest",
        "interest_savings",
    ];

    match value {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_value(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_value(val));
            }
        }
        // A bare schedule: its length is the headline number
        Value::Array(rows) => println!("{}", rows.len()),
        _ => println!("{}", format_value(value)),
    }
}
