use glimt_core::chart::ChartKind;
use glimt_core::error::GlimtError;
use glimt_core::pipeline::Session;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    x: String,
    y: String,
    kind: &str,
    sheet: Option<String>,
    title: Option<String>,
    output_file: Option<PathBuf>,
) -> Result<(), GlimtError> {
    let kind: ChartKind = kind.parse()?;
    let file = super::load(&input_file)?;
    let mut session = Session::new();
    let mut run = session.ingest(file)?;

    if run.table().is_none() {
        return Err(GlimtError::Parse(format!(
            "charts need tabular data, but {} is a {}",
            run.file_name(),
            run.format()
        )));
    }

    if let Some(name) = &sheet {
        run.select_sheet(name)?;
    }

    let selection = vec![x, y];
    match run.render_chart(&selection, kind, title)? {
        Some(spec) => match output_file {
            Some(path) => {
                output::json::write(&path, &spec)?;
                eprintln!("Chart spec written to {}", path.display());
            }
            None => output::json::print(&spec)?,
        },
        // Unreachable with two columns supplied, kept for completeness.
        None => eprintln!("Nothing to chart: select two columns"),
    }

    Ok(())
}
