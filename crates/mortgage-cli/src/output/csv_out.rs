use serde_json::Value;
use std::io;

use super::cell;

/// Write output as CSV to stdout. Schedules and chart series become one
/// record per row; summaries become `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            wtr.write_record(["field", "value"]).and_then(|_| {
                fields
                    .iter()
                    .try_for_each(|(key, val)| wtr.write_record([key.clone(), cell(val)]))
            })
        }
        _ => wtr.write_record([cell(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return rows.iter().try_for_each(|item| wtr.write_record([cell(item)]));
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(cell).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
