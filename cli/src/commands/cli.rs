use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tailer",
    version,
    about = "a simple CLI tool to insert lines when command output stops"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// duration to wait after last output (e.g. 1s, 500ms, 1m30s)
    #[arg(short = 'a', long, global = true)]
    pub after: Option<String>,

    /// dash character to print
    #[arg(short = 'd', long, global = true)]
    pub dash: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExecArgs {
    /// Command and arguments. A single quoted argument containing spaces is
    /// split on whitespace.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a command and tail its output
    #[command(visible_alias = "e")]
    Exec(ExecArgs),
}
