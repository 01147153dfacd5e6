use clap::Parser;
use hdrhistogram::Histogram;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use std::time::Instant;

use swap::{generate_report, Collection, ItemId, Member, Snapshot};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of members in the club
    #[arg(short, long, default_value = "200")]
    members: usize,

    /// Highest item number in the album
    #[arg(short, long, default_value = "640")]
    items: u32,

    /// Needs per member
    #[arg(long, default_value = "120")]
    needs: usize,

    /// Duplicates per member
    #[arg(long, default_value = "40")]
    duplicates: usize,

    /// How many times every member's report is generated
    #[arg(short, long, default_value = "10")]
    rounds: usize,

    /// RNG seed, for repeatable rosters
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

fn random_items(rng: &mut StdRng, album: u32, count: usize) -> impl Iterator<Item = ItemId> {
    let count = count.min(album as usize);
    sample(rng, album as usize, count)
        .into_iter()
        .map(|i| i as ItemId + 1)
}

fn build_roster(args: &Args) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut snapshot = Snapshot::new();
    for i in 0..args.members {
        let member = Member::new(&format!("member {}", i))?;
        let collection = Collection::new(
            random_items(&mut rng, args.items, args.needs).collect::<Vec<_>>(),
            random_items(&mut rng, args.items, args.duplicates).collect::<Vec<_>>(),
        );
        snapshot.insert(member, collection);
    }
    Ok(snapshot)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::try_init().unwrap_or_default();
    let args = Args::parse();

    let snapshot = build_roster(&args)?;
    let mut histogram = Histogram::<u64>::new(3)?;
    let mut matches = 0usize;

    println!(
        "Starting benchmark with {} members, {} items, {} rounds",
        args.members, args.items, args.rounds
    );

    let started = Instant::now();
    for _ in 0..args.rounds {
        for member in snapshot.members() {
            let start = Instant::now();
            let report = generate_report(member, &snapshot);
            histogram.record(start.elapsed().as_micros() as u64)?;
            matches += report.perfect_matches.len();
        }
    }
    let elapsed = started.elapsed();

    let total = histogram.len();
    println!("\nBenchmark Results:");
    println!("Total Reports: {}", total);
    println!("Perfect matches found: {}", matches);
    println!(
        "Reports per second: {:.2}",
        total as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("\nLatency Distribution (microseconds):");
    println!("p50: {}", histogram.value_at_percentile(50.0));
    println!("p90: {}", histogram.value_at_percentile(90.0));
    println!("p99: {}", histogram.value_at_percentile(99.0));
    println!("max: {}", histogram.max());

    Ok(())
}
