use glimt_core::error::GlimtError;
use glimt_core::extraction::PageWindow;
use glimt_core::pipeline::Session;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    sheet: Option<String>,
    pages: usize,
    rows: usize,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), GlimtError> {
    let file = super::load(&input_file)?;
    let mut session = Session::new().pdf_window(PageWindow::first(pages));
    let mut run = session.ingest(file)?;

    if let Some(name) = &sheet {
        run.select_sheet(name)?;
    }

    if let Some(table) = run.table() {
        let preview = table.preview(rows);
        match output_file {
            Some(path) => {
                output::json::write(&path, &preview)?;
                eprintln!(
                    "Extracted {} row(s), preview written to {}",
                    table.row_count(),
                    path.display()
                );
            }
            None => match output_format {
                "json" => output::json::print(&preview)?,
                _ => {
                    if let Some(name) = run.selected_sheet() {
                        println!("Sheet: {name}");
                    }
                    println!("{}", output::table::format_table(&preview));
                }
            },
        }
        return Ok(());
    }

    // Document formats: the excerpt is presentation-only truncation.
    let excerpt = run.excerpt().unwrap_or_default();
    match output_file {
        Some(path) => {
            output::json::write(&path, &run.text())?;
            eprintln!("Extracted text written to {}", path.display());
        }
        None => match output_format {
            "json" => output::json::print(&run.text())?,
            _ => println!("{excerpt}"),
        },
    }

    Ok(())
}
