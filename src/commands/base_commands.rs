use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::services::simulation_types::{
    DEFAULT_BREAK_EVEN_VOLUME, DEFAULT_DEMAND_MULTIPLIER, DEFAULT_TARGET_TIME,
};

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the FulfillSmart HTTP API
    Serve {
        /// Optional server config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Compare main warehouse and RDC costs for an orders table
    Simulate {
        /// Orders file (.csv or Excel workbook)
        #[arg(short, long)]
        input: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Volume at which an RDC breaks even
        #[arg(short, long, default_value_t = DEFAULT_BREAK_EVEN_VOLUME)]
        break_even_volume: u32,
        /// Target delivery time in hours
        #[arg(short, long, default_value_t = DEFAULT_TARGET_TIME)]
        target_time: u32,
        /// Factor applied to every order volume
        #[arg(short, long, default_value_t = DEFAULT_DEMAND_MULTIPLIER)]
        demand_multiplier: f64,
        /// Seed for reproducible cost draws
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
