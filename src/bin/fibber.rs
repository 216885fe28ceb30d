use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fibber::stats::BuildStats;
use fibber::{table_loader, Fib, LoadedTable, NextHopTable, RadixTree, TrieBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fibber")]
#[command(
    about = "Compressed IPv4 forwarding table with longest-prefix-match lookups",
    long_about = "fibber - Compile a route table into a compact three-level trie and query it\n\n\
    Route tables are line-oriented text: one 'A.B.C.D/L next-hop' entry per line,\n\
    '#' comments, .gz transparently decompressed, '-' reads stdin.\n\n\
    Examples:\n\
      fibber build rib.table --stats\n\
      fibber query rib.table 8.8.8.8 1.1.1.1\n\
      fibber bench rib.table --count 1000000\n\
      fibber verify rib.table.gz"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the compiled trie and print a summary
    Build {
        /// Route-table file, or "-" for stdin
        table: PathBuf,

        /// Print full build statistics as JSON
        #[arg(long)]
        stats: bool,

        /// Arena capacity in bytes (default 16 MiB)
        #[arg(long, value_name = "BYTES")]
        arena_capacity: Option<usize>,
    },

    /// Resolve addresses against a route table
    Query {
        /// Route-table file, or "-" for stdin
        table: PathBuf,

        /// Addresses to resolve; with none given, reads addresses from
        /// stdin until EOF or "quit"
        addresses: Vec<String>,
    },

    /// Time lookups over a fixed-seed pseudorandom address sample
    Bench {
        /// Route-table file
        table: PathBuf,

        /// Number of lookups
        #[arg(long, default_value_t = 100_000)]
        count: usize,

        /// Sample seed
        #[arg(long, default_value_t = 100)]
        seed: u64,
    },

    /// Cross-check compiled-trie lookups against the radix tree
    Verify {
        /// Route-table file
        table: PathBuf,

        /// Number of sampled addresses
        #[arg(long, default_value_t = 100_000)]
        count: usize,

        /// Sample seed
        #[arg(long, default_value_t = 100)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            table,
            stats,
            arena_capacity,
        } => cmd_build(&table, stats, arena_capacity),
        Commands::Query { table, addresses } => cmd_query(&table, &addresses),
        Commands::Bench { table, count, seed } => cmd_bench(&table, count, seed),
        Commands::Verify { table, count, seed } => cmd_verify(&table, count, seed),
    }
}

fn load_table(path: &Path) -> Result<LoadedTable> {
    table_loader::load(path).with_context(|| format!("loading route table {}", path.display()))
}

/// Run the pipeline by hand so the radix tree stays available.
fn build_pipeline(
    loaded: &LoadedTable,
    arena_capacity: Option<usize>,
) -> Result<(RadixTree, NextHopTable, Fib)> {
    let (tree, nexthops) = RadixTree::from_prefix_set(&loaded.prefixes)?;
    let builder = match arena_capacity {
        Some(capacity) => TrieBuilder::with_capacity(capacity),
        None => TrieBuilder::new(),
    };
    let trie = builder.build(&tree)?;
    let fib = Fib::from_parts(trie, nexthops.clone());
    Ok((tree, nexthops, fib))
}

fn cmd_build(path: &Path, stats: bool, arena_capacity: Option<usize>) -> Result<()> {
    let loaded = load_table(path)?;
    eprintln!("{} prefixes read", loaded.prefixes.len());

    let started = Instant::now();
    let (tree, nexthops, fib) = build_pipeline(&loaded, arena_capacity)?;
    let elapsed = started.elapsed();

    eprintln!(
        "built {} routes into {} bytes in {:.1?}",
        nexthops.len(),
        fib.trie().size_bytes(),
        elapsed
    );

    if stats {
        let stats = BuildStats::collect(&loaded.prefixes, &tree, &nexthops, fib.trie());
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}

fn cmd_query(path: &Path, addresses: &[String]) -> Result<()> {
    let loaded = load_table(path)?;
    let fib = Fib::build(&loaded.prefixes)?;

    if !addresses.is_empty() {
        for text in addresses {
            print_route(&fib, &loaded, text)?;
        }
        return Ok(());
    }

    // Interactive loop: one address per line
    eprintln!("enter IPv4 addresses to resolve, \"quit\" to exit");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "quit" {
            break;
        }
        print_route(&fib, &loaded, text)?;
    }
    Ok(())
}

fn print_route(fib: &Fib, loaded: &LoadedTable, text: &str) -> Result<()> {
    let addr: Ipv4Addr = text
        .parse()
        .with_context(|| format!("bad IPv4 address {:?}", text))?;
    match fib.lookup_addr(addr) {
        Some(record) => {
            let hop = loaded.next_hop_name(record.next_hop).unwrap_or("?");
            println!(
                "{} -> {}/{} via {}",
                addr,
                Ipv4Addr::from(record.start),
                record.prefix_len(),
                hop
            );
        }
        None => println!("{} -> no route", addr),
    }
    Ok(())
}

fn sample_addresses(count: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<u32>()).collect()
}

fn cmd_bench(path: &Path, count: usize, seed: u64) -> Result<()> {
    let loaded = load_table(path)?;
    let (tree, nexthops, fib) = build_pipeline(&loaded, None)?;
    let sample = sample_addresses(count, seed);

    let started = Instant::now();
    let mut hits = 0usize;
    for &addr in &sample {
        if tree.lookup(addr, &nexthops).is_some() {
            hits += 1;
        }
    }
    let radix_elapsed = started.elapsed();
    println!(
        "radix:    {} lookups in {:.1?} ({:.0} ns/lookup, {} hits)",
        count,
        radix_elapsed,
        radix_elapsed.as_nanos() as f64 / count.max(1) as f64,
        hits
    );

    let started = Instant::now();
    let mut hits = 0usize;
    for &addr in &sample {
        if fib.lookup(addr).is_some() {
            hits += 1;
        }
    }
    let trie_elapsed = started.elapsed();
    println!(
        "compiled: {} lookups in {:.1?} ({:.0} ns/lookup, {} hits)",
        count,
        trie_elapsed,
        trie_elapsed.as_nanos() as f64 / count.max(1) as f64,
        hits
    );
    Ok(())
}

fn cmd_verify(path: &Path, count: usize, seed: u64) -> Result<()> {
    let loaded = load_table(path)?;
    let (tree, nexthops, fib) = build_pipeline(&loaded, None)?;

    let mut mismatches = 0usize;
    for addr in sample_addresses(count, seed) {
        let expected = tree.lookup(addr, &nexthops);
        let got = fib.lookup(addr);
        if expected != got {
            if mismatches < 10 {
                eprintln!(
                    "mismatch at {}: radix {:?}, compiled {:?}",
                    Ipv4Addr::from(addr),
                    expected.map(|r| r.next_hop),
                    got.map(|r| r.next_hop)
                );
            }
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        bail!("{} of {} sampled addresses disagree", mismatches, count);
    }
    println!("{} sampled addresses agree", count);
    Ok(())
}
