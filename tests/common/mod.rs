use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "type, payment_id, amount, payment_method";

/// Writes `rows` under the command header into a fresh temp file.
pub fn commands_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

/// Registers and pays `count` PayPal payments.
pub fn generate_commands_csv(path: &Path, count: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["type", "payment_id", "amount", "payment_method"])?;

    for i in 1..=count {
        let id = format!("PP{}", i);
        wtr.write_record(["register", &id, "10.5", "paypal"])?;
        wtr.write_record(["pay", &id, "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
