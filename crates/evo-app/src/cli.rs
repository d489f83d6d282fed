use clap::Parser;

/// Evo, a conversational assistant for the terminal.
#[derive(Parser, Debug)]
#[command(name = "evo", version, about)]
pub struct Args {
    /// Model identifier override (defaults to the saved settings).
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Settings file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print replies whole instead of streaming them token by token.
    #[arg(long)]
    pub no_stream: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
