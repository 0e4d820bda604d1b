mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::RenderArgs;
use slimemark_config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            input,
            output,
            properties,
            markup,
            dialect,
        } => {
            let print_html = output.is_none();
            let args = RenderArgs {
                input,
                output,
                properties,
                markup,
                dialect,
            };
            let report = commands::render(&args, &config)?;
            if print_html {
                println!("{}", report.html);
            }
            eprintln!("{}", report.summary());
        }
        Commands::Reverse { input, output } => {
            let markup = commands::reverse(&input, output.as_deref(), &config)?;
            if output.is_none() {
                print!("{markup}");
            }
        }
    }

    Ok(())
}
