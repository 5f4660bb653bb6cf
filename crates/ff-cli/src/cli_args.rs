use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "formflow")]
#[command(about = "Draws the branching logic of a form as a flowchart")]
pub(crate) struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true, default_value = "warn")]
    pub(crate) log_level: String,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Render(RenderArgs),
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    #[arg(long = "snapshot")]
    pub(crate) snapshot: String,
    #[arg(long = "out")]
    pub(crate) out: Option<String>,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
    /// Print the result record as JSON instead of the line protocol
    #[arg(long = "json")]
    pub(crate) json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct BatchArgs {
    #[arg(long = "snapshots-dir")]
    pub(crate) snapshots_dir: String,
    #[arg(long = "out-dir")]
    pub(crate) out_dir: String,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
}
