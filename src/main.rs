//! notice-maker CLI
//!
//! Commands: compose, preview, validate, html, print, pdf
//! Form fields come from flags, a `--form` file, or both (flags win).

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use notice_maker::config::load_form;
use notice_maker::export::NoLifecycle;
use notice_maker::{
    BrowserSurface, DirectorySink, FormData, GuardianStatus, NoticeConfig, NoticeError, PrintChannel, PrintOutcome,
    Relation,
};

#[derive(Parser)]
#[command(name = "notice-maker")]
#[command(about = "Malayalam death-notice generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (.yaml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the composed notice text
    Compose {
        #[command(flatten)]
        form: FormArgs,

        /// Strip emphasis markup
        #[arg(long)]
        plain: bool,

        /// Print the four notice lines as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },

    /// Show the notice in the terminal
    Preview {
        #[command(flatten)]
        form: FormArgs,

        /// Print the HTML preview fragment instead
        #[arg(long)]
        html: bool,
    },

    /// Report missing required fields as JSON
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Save the printable A4 sheet as HTML
    Html {
        #[command(flatten)]
        form: FormArgs,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Open the sheet in the browser for printing
    Print {
        #[command(flatten)]
        form: FormArgs,

        /// Program used to open the sheet
        #[arg(long)]
        opener: Option<String>,

        /// Where the sheet is saved if it cannot be opened
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Render the sheet to PDF with headless Chromium (needs the `pdf` feature)
    Pdf {
        #[command(flatten)]
        form: FormArgs,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Chrome/Chromium binary
        #[arg(long)]
        chrome: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FormArgs {
    /// Form data file (.json or .yaml)
    #[arg(short, long)]
    form: Option<PathBuf>,

    /// Place (സ്ഥലം)
    #[arg(long)]
    place: Option<String>,

    /// Guardian's name
    #[arg(long)]
    guardian: Option<String>,

    /// alive, deceased-male or deceased-female
    #[arg(long)]
    guardian_status: Option<GuardianStatus>,

    /// son, daughter, wife (or മകൻ, മകൾ, ഭാര്യ)
    #[arg(long)]
    relation: Option<Relation>,

    /// Name of the deceased
    #[arg(long)]
    deceased: Option<String>,

    /// Date of death, YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl FormArgs {
    fn into_form(self) -> notice_maker::Result<FormData> {
        let mut form = match &self.form {
            Some(path) => load_form(path)?,
            None => FormData::default(),
        };
        if let Some(v) = self.place {
            form.place = v;
        }
        if let Some(v) = self.guardian {
            form.guardian_name = v;
        }
        if let Some(v) = self.guardian_status {
            form.guardian_status = v;
        }
        if let Some(v) = self.relation {
            form.relation = v;
        }
        if let Some(v) = self.deceased {
            form.deceased_name = v;
        }
        if self.date.is_some() {
            form.date = self.date;
        }
        Ok(form)
    }
}

/// `-v` count to log level; `RUST_LOG` still overrides per module.
fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match NoticeConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("✗ {e}");
                return ExitCode::FAILURE;
            }
        },
        None => NoticeConfig::default(),
    };

    match run(cli.command, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {}", e.user_message());
            log::error!("{e}");
            match e {
                NoticeError::IncompleteInput { .. } => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(command: Commands, mut config: NoticeConfig) -> notice_maker::Result<ExitCode> {
    match command {
        Commands::Compose { form, plain, json } => {
            let form = form.into_form()?;
            notice_maker::validate::ensure_complete(&form)?;
            if json {
                let content = form.notice().ok_or(NoticeError::MalformedComposedText)?;
                let out = serde_json::to_string_pretty(&content).map_err(|e| NoticeError::Config(e.to_string()))?;
                println!("{out}");
            } else if plain {
                let content = form.notice().ok_or(NoticeError::MalformedComposedText)?;
                print!("{}", content.to_plain_text());
            } else {
                println!("{}", form.notice_text());
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Preview { form, html } => {
            let form = form.into_form()?;
            if html {
                let mut session = notice_maker::NoticeSession::new(config.layout, config.fonts);
                session.load(form);
                println!("{}", session.preview_html());
                return Ok(ExitCode::SUCCESS);
            }
            let Some(content) = notice_maker::parse_notice_content(&form.notice_text()) else {
                let missing = form.missing_fields();
                eprintln!("Fill the form to see preview (missing: {})", join(&missing));
                return Ok(ExitCode::from(2));
            };
            #[cfg(feature = "terminal")]
            print!("{}", content.to_terminal());
            #[cfg(not(feature = "terminal"))]
            print!("{}", content.to_plain_text());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate { form } => {
            let validation = form.into_form()?.validate();
            let out = serde_json::to_string_pretty(&validation).map_err(|e| NoticeError::Config(e.to_string()))?;
            println!("{out}");
            Ok(if validation.is_valid { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }

        Commands::Html { form, out_dir } => {
            let form = form.into_form()?;
            if let Some(dir) = out_dir {
                config.output_dir = dir;
            }
            let sink = DirectorySink::new(&config.output_dir);
            let channel = PrintChannel::new(BrowserSurface::default(), sink, config);
            let path = channel.download_html(&form)?;
            eprintln!("✓ Written {}", path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Print { form, opener, out_dir } => {
            let form = form.into_form()?;
            if let Some(dir) = out_dir {
                config.output_dir = dir;
            }
            let sink = DirectorySink::new(&config.output_dir);
            let channel = PrintChannel::new(BrowserSurface { opener, ..BrowserSurface::default() }, sink, config);
            match channel.open_print_preview(&form, &NoLifecycle)? {
                PrintOutcome::Opened => eprintln!("✓ Opened print preview. Use A4 landscape with no margins."),
                PrintOutcome::Downloaded(path) => {
                    eprintln!("✓ Could not open a browser; saved {} instead", path.display())
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Pdf { form, out_dir, chrome } => {
            let form = form.into_form()?;
            if let Some(dir) = out_dir {
                config.output_dir = dir;
            }
            render_pdf(&form, config, chrome)
        }
    }
}

#[cfg(feature = "pdf")]
fn render_pdf(form: &FormData, config: NoticeConfig, chrome: Option<PathBuf>) -> notice_maker::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| NoticeError::io(&config.output_dir, e))?;
    let sink = DirectorySink::new(&config.output_dir);
    let rasterizer = notice_maker::ChromiumRasterizer { executable: chrome };
    let channel = notice_maker::PdfChannel::new(rasterizer, sink, config);
    let path = runtime.block_on(channel.download_pdf(form))?;
    eprintln!("✓ Written {}", path.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "pdf"))]
fn render_pdf(_form: &FormData, _config: NoticeConfig, _chrome: Option<PathBuf>) -> notice_maker::Result<ExitCode> {
    Err(notice_maker::PdfError::RendererUnavailable("built without the `pdf` feature".into()).into())
}

fn join(fields: &[notice_maker::FormField]) -> String {
    fields.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(7), LevelFilter::Trace);
    }

    #[test]
    fn cli_parses_form_flags() {
        let cli = Cli::try_parse_from([
            "notice-maker", "-vv", "compose", "--place", "Kozhikode", "--guardian", "Ahmed",
            "--guardian-status", "deceased-male", "--relation", "മകൾ", "--deceased", "Fathima",
            "--date", "2024-01-15",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Compose { form, .. } = cli.command else {
            panic!("expected compose");
        };
        let form = form.into_form().unwrap();
        assert_eq!(form.relation, Relation::Daughter);
        assert_eq!(form.guardian_status, GuardianStatus::DeceasedMale);
        assert!(form.is_complete());
    }
}
