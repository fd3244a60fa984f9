use clap::Parser;
use kwcluster::application::cluster_keywords::ClusterRequest;
use kwcluster::cli::commands::{Cli, Commands};
use kwcluster::domain::values::cluster_policy::ClusterPolicy;
use kwcluster::domain::values::granularity::Granularity;
use kwcluster::{load_request, KeywordClusterer};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let clusterer = KeywordClusterer::new();

    if let Err(e) = run_command(&clusterer, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(clusterer: &KeywordClusterer, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Cluster {
            input,
            granularity,
            min_cluster_size,
            policy,
            locked,
            compact,
        } => {
            let mut request: ClusterRequest = load_request(&input)?;
            if let Some(g) = granularity {
                request.granularity = Some(Granularity::new(g)?);
            }
            if let Some(m) = min_cluster_size {
                request.min_cluster_size = Some(m);
            }
            if let Some(p) = policy {
                let p: ClusterPolicy = p.parse()?;
                request.cluster_policy = Some(p);
            }
            request.locked_clusters.extend(locked);

            let run = clusterer.cluster(&request)?;
            let out = if compact {
                serde_json::to_string(&run)?
            } else {
                serde_json::to_string_pretty(&run)?
            };
            println!("{out}");
        }
        Commands::Normalize { keyword } => {
            let (normalized, topic) = clusterer.normalize_preview(&keyword);
            let out = serde_json::json!({
                "keyword": keyword,
                "normalizedText": normalized,
                "topicText": topic,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Threshold { granularity } => {
            let g = Granularity::new(granularity)?;
            println!("{:.4}", g.threshold());
        }
    }
    Ok(())
}
