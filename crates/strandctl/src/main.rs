//! `strandctl` — inspect consistent hash ring placement from the shell.
//!
//! # Usage
//!
//! ```text
//! strandctl lookup -n cache-a -n cache-b -n cache-c user:42 user:43
//! strandctl lookup -n cache-a -n cache-b --preference 2 user:42
//! strandctl distribution --nodes 1000 --keys 100000
//! strandctl remap --nodes 1000 --keys 100000 --remove node_50
//! strandctl -c strand.toml distribution      # ring settings from a file
//! ```

mod config;
mod report;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use strand_ring::HashRing;
use tracing::{debug, info};

use config::CliConfig;
use report::{LoadStats, node_ids, random_keys};

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "strandctl",
    version,
    about = "Consistent hash ring placement tool"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true, env = "STRAND_CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of virtual positions per node.
    #[arg(short, long, global = true)]
    replicas: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve keys to their owning node.
    Lookup {
        /// Node to place on the ring. Can be specified multiple times.
        #[arg(short, long = "node", required = true)]
        nodes: Vec<String>,

        /// Also print the first N distinct nodes clockwise from each key.
        #[arg(short, long)]
        preference: Option<usize>,

        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Place random keys on a ring of generated nodes and report the spread.
    Distribution {
        /// Number of nodes (`node_0 .. node_{N-1}`).
        #[arg(short, long, default_value = "1000")]
        nodes: usize,

        /// Number of random keys.
        #[arg(short, long, default_value = "100000")]
        keys: usize,

        /// Seed for key generation.
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Remove one node and report which keys moved.
    Remap {
        /// Number of nodes (`node_0 .. node_{N-1}`).
        #[arg(short, long, default_value = "1000")]
        nodes: usize,

        /// Number of random keys.
        #[arg(short, long, default_value = "100000")]
        keys: usize,

        /// Seed for key generation.
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Node to remove.
        #[arg(long)]
        remove: String,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    // CLI args override config file values.
    if let Some(replicas) = cli.replicas {
        config.ring.replicas = replicas;
    }

    match cli.command {
        Commands::Lookup {
            nodes,
            preference,
            keys,
        } => cmd_lookup(&config, &nodes, preference, &keys),
        Commands::Distribution { nodes, keys, seed } => {
            cmd_distribution(&config, nodes, keys, seed)
        }
        Commands::Remap {
            nodes,
            keys,
            seed,
            remove,
        } => cmd_remap(&config, nodes, keys, seed, &remove),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build a ring from config and add every node in `nodes`.
fn build_ring(config: &CliConfig, nodes: &[String]) -> Result<HashRing> {
    let mut ring = HashRing::with_config(&config.ring).context("invalid ring config")?;
    for node in nodes {
        ring.add_node(node)?;
    }
    info!(
        nodes = ring.node_count(),
        positions = ring.position_count(),
        replicas = ring.replica_count(),
        "ring built"
    );
    Ok(ring)
}

// -----------------------------------------------------------------------
// strandctl lookup
// -----------------------------------------------------------------------

fn cmd_lookup(
    config: &CliConfig,
    nodes: &[String],
    preference: Option<usize>,
    keys: &[String],
) -> Result<()> {
    let ring = build_ring(config, nodes)?;

    for key in keys {
        match preference {
            Some(n) => {
                let owners = ring.lookup_n(key, n)?;
                println!("{key} -> {}", owners.join(", "));
            }
            None => println!("{key} -> {}", ring.lookup(key)?),
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// strandctl distribution
// -----------------------------------------------------------------------

fn cmd_distribution(config: &CliConfig, nodes: usize, keys: usize, seed: u64) -> Result<()> {
    let ring = build_ring(config, &node_ids(nodes))?;
    let keys = random_keys(keys, seed);

    let counts = ring.distribution(&keys)?;
    let Some(stats) = LoadStats::from_counts(counts.values().copied()) else {
        bail!("no nodes to report on");
    };

    println!("Key distribution");
    println!("{stats}");
    Ok(())
}

// -----------------------------------------------------------------------
// strandctl remap
// -----------------------------------------------------------------------

fn cmd_remap(config: &CliConfig, nodes: usize, keys: usize, seed: u64, remove: &str) -> Result<()> {
    let mut ring = build_ring(config, &node_ids(nodes))?;
    let keys = random_keys(keys, seed);

    let mut before: HashMap<&str, String> = HashMap::with_capacity(keys.len());
    for key in &keys {
        before.insert(key, ring.lookup(key)?.to_string());
    }

    ring.remove_node(remove)
        .with_context(|| format!("cannot remove {remove}"))?;

    let mut moved = 0usize;
    let mut owned = 0usize;
    for (key, owner) in &before {
        let now = ring.lookup(key)?;
        if owner == remove {
            owned += 1;
        }
        if now != owner {
            if owner != remove {
                bail!("key {key} moved from {owner} to {now} although {owner} stayed");
            }
            moved += 1;
        }
    }
    debug!(moved, owned, "remap complete");

    println!("Removed {remove}");
    println!("  keys owned by {remove}: {owned}");
    println!("  keys moved:            {moved}");
    println!("  keys unchanged:        {}", before.len() - moved);
    Ok(())
}
