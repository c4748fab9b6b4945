//! CLI command definitions

use clap::Parser;
use pid_domain::OutputFormat;
use std::path::PathBuf;

/// CLI arguments for pid-insight
#[derive(Parser, Debug)]
#[command(name = "pid-insight")]
#[command(author, version, about = "Analyze P&ID diagrams with Gemini and ask follow-up questions")]
#[command(long_about = r#"
P&ID Insight sends a Piping and Instrumentation Diagram to Gemini, prints a
structured engineering analysis, and keeps the conversation open so you can
ask follow-up questions about the same diagram.

The API key is read from $API_KEY (or $GEMINI_API_KEY).

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./pid-insight.toml       Project-level config
3. ~/.config/pid-insight/config.toml   Global config

Example:
  pid-insight plant-a.png
  pid-insight plant-a.png -q "What is the purpose of V-203?" -q "Which loops control T-101?"
  pid-insight --chat plant-a.png
"#)]
pub struct Cli {
    /// Diagram image to analyze (JPEG, PNG, WebP; at most 10 MB)
    pub image: Option<PathBuf>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Follow-up question asked after the analysis (can be repeated)
    #[arg(short = 'q', long = "question", value_name = "QUESTION")]
    pub questions: Vec<String>,

    /// Gemini model to use
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format: report, raw or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_file_dir: Option<PathBuf>,
}

impl Cli {
    /// Whether the run needs a diagram up front
    pub fn requires_image(&self) -> bool {
        !self.chat && !self.show_config
    }
}
