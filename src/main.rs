//! Command-line demo: average a batch of readings under encryption and
//! compare against the direct plaintext computation.

use blindavg::ckks::CkksParams;
use blindavg::protocol::{self, CkksScheme, PlaintextSample};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "blindavg")]
#[command(about = "Two-party encrypted average demo")]
#[command(version)]
struct Args {
    /// Readings to average, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = vec![120.0, 130.0, 125.0, 140.0, 115.0, 135.0])]
    values: Vec<f64>,

    /// Polynomial ring degree (power of two)
    #[arg(long, default_value_t = 512)]
    degree: usize,

    /// Seed for deterministic runs; omit for OS randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    };

    let sample = PlaintextSample::new(args.values)?;
    let params = CkksParams::with_degree(args.degree);

    println!("Readings: {:?}", sample.values());
    let report = protocol::benchmark::<CkksScheme, _>(&params, &sample, &mut rng)?;

    println!("Encrypted average: {:.6}", report.encrypted_average);
    println!("Direct average:    {:.6}", report.direct_average);
    println!("Absolute error:    {:.2e}", report.absolute_error);
    if let Some(relative) = report.relative_error {
        println!("Relative error:    {:.2e}", relative);
    }
    println!("Encrypted time:    {:?}", report.encrypted_time);
    println!("Direct time:       {:?}", report.direct_time);
    match report.slowdown {
        Some(ratio) => println!("Slowdown:          {ratio:.1}x"),
        None => println!("Slowdown:          n/a (direct computation below timer resolution)"),
    }

    Ok(())
}
