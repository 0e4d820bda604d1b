use clap::{Parser, Subcommand};
use slimemark_engine::Dialect;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slimemark")]
#[command(author, version)]
#[command(about = "Convert SlimeMark documents to HTML and back")]
#[command(after_help = "\
EXAMPLES:

    # Render to stdout
    slimemark render page.sm

    # Render to a file and save the front-matter properties
    slimemark render page.sm -o page.html --properties page.yaml

    # Convert HTML back to markup
    slimemark reverse page.html -o page.sm

CONFIGURATION:

Settings are read from --config, or ~/.config/slimemark/config.toml:

    dialect = \"slime\"
    include_base = \"~/site/parts\"
    properties_path = \"/tmp/properties.yaml\"
    add_extra_new_lines = false
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a SlimeMark document to HTML
    Render {
        /// Input document
        input: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save front-matter properties as YAML to this file
        #[arg(long)]
        properties: Option<PathBuf>,

        /// Also convert the rendered HTML back to markup at this path
        #[arg(long)]
        markup: Option<PathBuf>,

        /// Extension set to parse with
        #[arg(long)]
        dialect: Option<Dialect>,
    },

    /// Convert HTML back to SlimeMark
    Reverse {
        /// Input HTML file
        input: PathBuf,

        /// Write markup here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
