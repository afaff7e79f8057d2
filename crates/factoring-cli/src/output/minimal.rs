use serde_json::Value;

use super::{format_scalar, labelled_rows};

/// Headline figure of each command's result, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "net_cash_received",
    "cost_difference",
    "total_lc_cost",
    "base_case_value",
];

/// Print just the key answer value(s) from the output.
///
/// Labelled rows print as `label: value`, one per line. Otherwise the first
/// priority field present in the result wins, then the first field.
pub fn print_minimal(value: &Value) {
    if let Some(rows) = labelled_rows(value) {
        for row in rows {
            let label = row.get("label").map(format_scalar).unwrap_or_default();
            let val = row.get("value").map(format_scalar).unwrap_or_default();
            println!("{}: {}", label, val);
        }
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_scalar(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
