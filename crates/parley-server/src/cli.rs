use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "parley-server", about = "Parley two-party chat server")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/parley.toml")]
    pub config: String,

    /// Address to listen on (overrides config)
    #[arg(long)]
    pub bind: Option<String>,
}
