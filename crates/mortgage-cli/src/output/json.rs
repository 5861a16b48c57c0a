use serde_json::Value;
use std::io::{self, Write};

/// Write `value` as indented JSON followed by a newline.
fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Pretty-print the envelope (or bare rows) to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON write error: {}", e);
    }
}
