use serde_json::Value;

use super::cell;

/// Fields printed by `--output minimal`, most useful first.
const PRIORITY_KEYS: [&str; 5] = [
    "total_monthly_payment",
    "monthly_pmi",
    "monthly_principal_and_interest",
    "interest_saved",
    "total_cost",
];

/// Print just the headline number from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", cell(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(result_obj));
}
