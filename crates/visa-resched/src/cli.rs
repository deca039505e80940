use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "resched")]
#[command(about = "Reschedules a visa appointment to an earlier date")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "resched.toml")]
    pub config: PathBuf,

    /// Validate the configuration and credentials, then exit
    #[arg(long)]
    pub check_config: bool,
}
