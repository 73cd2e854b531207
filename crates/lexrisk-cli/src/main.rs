//! lexrisk: contract risk analysis from the command line.
//!
//! ## Commands
//!
//! - `analyze`: full pipeline, printed as a card or rendered as a report
//! - `segment`: show the clauses a document splits into
//! - `compare`: judge a clause against a market-standard archetype
//! - `translate`: translate contract text
//! - `ask`: answer a question from the contract text
//! - `templates`: list or print reference clauses and agreements

mod display;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use lexrisk_ai::http::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use lexrisk_ai::{
    AnalysisOracle, ContractAnalyzer, HttpOracle, OfflineOracle, PatternEntityExtractor,
};
use lexrisk_core::{
    AgreementTemplate, AnalysisSession, ClauseArchetype, ClauseSegmenter, PipelineConfig,
    ReportRenderer,
};
use lexrisk_ingest::{DocumentFormat, PlainTextExtractor, read_document};
use tracing::{Level, info, warn};

use crate::report::{JsonReport, MarkdownReport};

#[derive(Parser)]
#[command(name = "lexrisk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Contract risk analysis", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pipeline configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Oracle API key; falls back to GROQ_API_KEY, then offline mode
    #[arg(long, global = true, env = "LEXRISK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, global = true, env = "LEXRISK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Chat model name
    #[arg(long, global = true, env = "LEXRISK_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline on a document
    Analyze {
        /// Contract file (pdf, docx, txt)
        file: PathBuf,

        /// Override the format detected from the file extension
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Render a report instead of the terminal card
        #[arg(long, value_enum)]
        report: Option<ReportKind>,

        /// Write the report here instead of stdout
        #[arg(short, long, requires = "report")]
        output: Option<PathBuf>,
    },

    /// Split a document into clauses without analysing them
    Segment {
        file: PathBuf,

        #[arg(long)]
        format: Option<DocumentFormat>,
    },

    /// Compare a clause with a market-standard archetype
    Compare {
        /// indemnity, termination-for-convenience, non-compete, confidentiality
        #[arg(short, long)]
        archetype: ClauseArchetype,

        /// File holding the clause text
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Clause text given inline
        #[arg(long)]
        text: Option<String>,
    },

    /// Translate contract text
    Translate {
        file: PathBuf,

        /// Target language
        #[arg(long, default_value = "English")]
        to: String,
    },

    /// Ask a question about a contract
    Ask { file: PathBuf, question: String },

    /// List reference clauses and agreement templates, or print one
    Templates {
        /// Template or archetype name (e.g. nda, employment, indemnity)
        name: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Md,
    Json,
}

/// Oracle connection settings taken from the command line.
struct OracleArgs {
    config: Option<PathBuf>,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OracleArgs {
    fn build_analyzer(&self) -> Result<ContractAnalyzer> {
        let config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|k| !k.trim().is_empty());

        let oracle: Arc<dyn AnalysisOracle> = match api_key {
            Some(key) => {
                let http = HttpOracle::new(&self.base_url, &self.model, &key, config.oracle_timeout())
                    .context("building HTTP oracle")?;
                info!(base_url = %self.base_url, model = %http.model(), "using HTTP oracle");
                Arc::new(http)
            }
            None => {
                warn!("no API key configured; using offline oracle");
                Arc::new(OfflineOracle)
            }
        };

        Ok(ContractAnalyzer::new(
            oracle,
            Arc::new(PatternEntityExtractor::new()),
            config,
        ))
    }
}

fn read_text(path: &Path, format: Option<DocumentFormat>) -> Result<String> {
    read_document(&PlainTextExtractor, path, format)
        .with_context(|| format!("reading {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    info!("lexrisk v{}", env!("CARGO_PKG_VERSION"));

    let oracle = OracleArgs {
        config: cli.config,
        api_key: cli.api_key,
        base_url: cli.base_url,
        model: cli.model,
    };

    match cli.command {
        Commands::Analyze {
            file,
            format,
            report,
            output,
        } => cmd_analyze(&oracle, &file, format, report, output.as_deref()).await,
        Commands::Segment { file, format } => {
            let text = read_text(&file, format)?;
            display::print_clause_units(&ClauseSegmenter::new().segment(&text));
            Ok(())
        }
        Commands::Compare {
            archetype,
            file,
            text,
        } => {
            let actual = match (text, file) {
                (Some(text), _) => text,
                (None, Some(file)) => read_text(&file, None)?,
                (None, None) => bail!("give a clause file or --text"),
            };
            let analyzer = oracle.build_analyzer()?;
            let comparison = analyzer.compare(&actual, archetype).await?;
            display::print_comparison(archetype.label(), &comparison);
            Ok(())
        }
        Commands::Translate { file, to } => {
            let text = read_text(&file, None)?;
            let analyzer = oracle.build_analyzer()?;
            println!("{}", analyzer.translate(&text, &to).await?);
            Ok(())
        }
        Commands::Ask { file, question } => {
            let text = read_text(&file, None)?;
            let analyzer = oracle.build_analyzer()?;
            println!("{}", analyzer.ask(&text, &question).await?);
            Ok(())
        }
        Commands::Templates { name } => cmd_templates(name.as_deref()),
    }
}

async fn cmd_analyze(
    oracle: &OracleArgs,
    file: &Path,
    format: Option<DocumentFormat>,
    report: Option<ReportKind>,
    output: Option<&Path>,
) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => DocumentFormat::from_path(file)?,
    };
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let analyzer = oracle.build_analyzer()?;
    let session = AnalysisSession::new();
    let result = analyzer
        .analyze_bytes(&PlainTextExtractor, &bytes, format)
        .await
        .with_context(|| format!("analysing {}", file.display()))?;
    session.replace(result);
    let current = session
        .current()
        .context("analysis produced no result")?;

    let Some(kind) = report else {
        display::print_analysis_card(&current);
        return Ok(());
    };

    let renderer: Box<dyn ReportRenderer> = match kind {
        ReportKind::Md => Box::new(MarkdownReport::new()),
        ReportKind::Json => Box::new(JsonReport),
    };
    let rendered = renderer.render(&current).context("rendering report")?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(
                path = %path.display(),
                content_type = renderer.content_type(),
                bytes = rendered.len(),
                "report written"
            );
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&rendered)
                .context("writing report to stdout")?;
        }
    }
    Ok(())
}

fn cmd_templates(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        println!("Agreement templates");
        for t in AgreementTemplate::ALL {
            println!("  {}", t.label());
        }
        println!();
        println!("Clause archetypes");
        for a in ClauseArchetype::ALL {
            println!("  {}", a.label());
        }
        return Ok(());
    };

    if let Ok(template) = name.parse::<AgreementTemplate>() {
        println!("{}\n", template.label());
        print!("{}", template.body());
    } else if let Ok(archetype) = name.parse::<ClauseArchetype>() {
        println!("{} (standard)\n", archetype.label());
        println!("{}", archetype.standard_text());
    } else {
        bail!("unknown template or archetype {name:?}");
    }
    Ok(())
}
