mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glimt",
    version,
    about = "Visualize tabular and document files from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file and, for spreadsheets, list its sheets
    Inspect {
        /// Path to an xlsx, xls, csv, pdf or docx file
        input_file: PathBuf,
    },
    /// Extract a table preview or text excerpt
    Extract {
        /// Path to an xlsx, xls, csv, pdf or docx file
        input_file: PathBuf,

        /// Sheet to read (spreadsheets; default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Number of pages to extract from the start of a PDF
        #[arg(short, long, default_value_t = 5)]
        pages: usize,

        /// Number of preview rows for tabular output
        #[arg(short, long, default_value_t = 10)]
        rows: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted output as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Build a chart spec from two columns of a tabular file
    Chart {
        /// Path to an xlsx, xls or csv file
        input_file: PathBuf,

        /// Column for the x/category axis
        #[arg(short, long)]
        x: String,

        /// Column for the y/value axis
        #[arg(short, long)]
        y: String,

        /// Chart kind: bar, pie, line or scatter
        #[arg(short, long, default_value = "bar")]
        kind: String,

        /// Sheet to read (spreadsheets; default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Chart title (default derived from the column names)
        #[arg(short, long)]
        title: Option<String>,

        /// Write the chart spec JSON to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Render a word-frequency cloud from a document file
    Cloud {
        /// Path to a pdf or docx file
        input_file: PathBuf,

        /// Number of pages to extract from the start of a PDF
        #[arg(short, long, default_value_t = 5)]
        pages: usize,

        /// Write the SVG to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { input_file } => commands::inspect::run(input_file),
        Commands::Extract {
            input_file,
            sheet,
            pages,
            rows,
            output,
            out,
        } => commands::extract::run(input_file, sheet, pages, rows, &output, out),
        Commands::Chart {
            input_file,
            x,
            y,
            kind,
            sheet,
            title,
            out,
        } => commands::chart::run(input_file, x, y, &kind, sheet, title, out),
        Commands::Cloud {
            input_file,
            pages,
            out,
        } => commands::cloud::run(input_file, pages, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
