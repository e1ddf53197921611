// SheetLens CLI - spreadsheet preview and remote insight queries

mod ask;
mod exit_codes;
mod tui;
mod util;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sheetlens_config::Settings;
use sheetlens_core::TableStore;

use exit_codes::{EXIT_ERROR, EXIT_FILE_PARSE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "slens")]
#[command(about = "Spreadsheet preview with remote AI insights")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview a spreadsheet as a paginated table (200 rows per page)
    #[command(after_help = "\
Examples:
  slens view sales.csv
  slens view report.xlsx --plain
  slens view big.csv --page 3 --plain")]
    View {
        /// Spreadsheet file (csv, tsv, txt, xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        /// Print a plain table instead of the interactive viewer
        #[arg(long)]
        plain: bool,

        /// Page to show, 1-indexed (clamped to the last page)
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Ask the insight backend a question about a spreadsheet
    #[command(after_help = "\
The header row plus at most 150 data rows are sent, regardless of file size.

Examples:
  slens ask sales.csv 'Which region has the highest total?'
  slens ask report.xlsx 'Summarize the trends' --endpoint http://localhost:1000/analyze")]
    Ask {
        /// Spreadsheet file (csv, tsv, txt, xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        /// Question to ask about the data
        query: String,

        /// Insight endpoint URL (overrides the configured one)
        #[arg(long, env = "SHEETLENS_ENDPOINT")]
        endpoint: Option<String>,

        /// Request timeout in seconds (overrides the configured one)
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View { file, plain, page } => cmd_view(file, plain, page),
        Commands::Ask {
            file,
            query,
            endpoint,
            timeout,
        } => ask::cmd_ask(file, &query, endpoint, timeout),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_view(file: PathBuf, plain: bool, page: usize) -> Result<(), CliError> {
    let sheet = sheetlens_io::load_sheet(&file)
        .map_err(|e| CliError::new(EXIT_FILE_PARSE, e))?;

    let mut store = TableStore::new();
    store.load(sheet);
    store.set_page(page);

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());

    if !plain && std::io::stdout().is_terminal() {
        let settings = Settings::load();
        tui::run(store, file_name, settings).map_err(|e| CliError::new(EXIT_ERROR, e))
    } else {
        // Piped output or --plain: print the page, no raw mode
        tui::print_plain(&store.current_view()).map_err(|e| CliError::new(EXIT_ERROR, e))
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
