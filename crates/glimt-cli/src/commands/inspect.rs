use glimt_core::error::GlimtError;
use glimt_core::format::FormatTag;
use glimt_core::pipeline::Session;
use std::path::PathBuf;

pub fn run(input_file: PathBuf) -> Result<(), GlimtError> {
    let file = super::load(&input_file)?;
    let mut session = Session::new();
    let mut run = session.ingest(file)?;

    println!("{}: {}", run.file_name(), run.format());

    match run.format() {
        FormatTag::Spreadsheet => {
            println!("Sheets:");
            for name in run.sheet_names()? {
                println!("  {name}");
            }
        }
        FormatTag::DelimitedText => {
            if let Some(table) = run.table() {
                println!("{} column(s), {} row(s)", table.column_count(), table.row_count());
            }
        }
        _ => {
            if let Some(text) = run.text() {
                println!("{} character(s) of extractable text", text.as_str().len());
            }
        }
    }

    Ok(())
}
