use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kwcluster", about = "Topic clustering and opportunity scoring for keyword sets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster a keyword set and print the run as JSON
    Cluster {
        /// Request JSON file (object or bare keyword array), or - for stdin
        input: String,
        /// Override granularity (0 = loose, 100 = tight)
        #[arg(long)]
        granularity: Option<u32>,
        /// Override the minimum size of an automatic cluster
        #[arg(long)]
        min_cluster_size: Option<usize>,
        /// Override the policy (topic, bucket-separated)
        #[arg(long)]
        policy: Option<String>,
        /// Cluster id to flag as locked (repeatable)
        #[arg(long = "locked")]
        locked: Vec<String>,
        /// Print compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show the normalized and topic text of a keyword
    Normalize {
        keyword: String,
    },
    /// Show the similarity threshold for a granularity
    Threshold {
        granularity: u32,
    },
}
