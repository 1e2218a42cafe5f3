use glimt_core::error::GlimtError;
use glimt_core::extraction::PageWindow;
use glimt_core::pipeline::Session;
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    pages: usize,
    output_file: Option<PathBuf>,
) -> Result<(), GlimtError> {
    let file = super::load(&input_file)?;
    let mut session = Session::new().pdf_window(PageWindow::first(pages));
    let run = session.ingest(file)?;

    if run.text().is_none() {
        return Err(GlimtError::Parse(format!(
            "word clouds need document text, but {} is a {}",
            run.file_name(),
            run.format()
        )));
    }

    match run.word_cloud() {
        Some(cloud) => {
            let svg = cloud.to_svg()?;
            match output_file {
                Some(path) => {
                    std::fs::write(&path, svg)?;
                    eprintln!(
                        "Word cloud ({} word(s)) written to {}",
                        cloud.words.len(),
                        path.display()
                    );
                }
                None => println!("{svg}"),
            }
        }
        // Empty documents are an expected state, not a failure.
        None => eprintln!("No extractable words in {}", run.file_name()),
    }

    Ok(())
}
