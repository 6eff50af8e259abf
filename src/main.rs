use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use s3sentry::config::ScanConfig;
use s3sentry::constants::DEFAULT_CONCURRENCY;
use s3sentry::pipeline::BucketPipeline;
use s3sentry::region::HttpRegionResolver;
use s3sentry::report::ConsoleReporter;
use s3sentry::scanner::ScanOrchestrator;
use s3sentry::store::aws::AwsClientFactory;

/// Scan S3 buckets named on stdin for public-exposure misconfigurations
#[derive(Parser, Debug)]
#[command(name = "s3sentry")]
#[command(version, about, long_about = None)]
struct Args {
    /// Be aggressive and attempt to write to the bucket/object policy
    /// (destructive: test objects and widened grants are not cleaned up)
    #[arg(short = 'a')]
    aggressive: bool,

    /// See more info on attempts
    #[arg(short = 'v')]
    verbose: bool,

    /// Set the concurrency level
    #[arg(short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Quick mode just checks the bucket ACL and for a directory listing,
    /// no enumeration of objects
    #[arg(short = 'q')]
    quick: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    s3sentry::logging::init_subscriber(args.verbose)
        .expect("Failed to initialize logging subsystem");

    // Refuse to sit waiting on an interactive terminal
    if std::io::stdin().is_terminal() {
        eprintln!("No input detected. Please provide a list of bucket names via stdin.");
        std::process::exit(1);
    }

    let config = Arc::new(ScanConfig {
        verbose: args.verbose,
        aggressive: args.aggressive,
        quick: args.quick,
        concurrency: args.concurrency,
    });

    // Bootstrap failures are fatal; everything after this point is
    // contained within individual bucket pipelines.
    let resolver = Arc::new(HttpRegionResolver::new().context("failed to build region prober")?);
    let stores = Arc::new(
        AwsClientFactory::load()
            .await
            .context("unable to load AWS SDK config")?,
    );
    let reporter = Arc::new(ConsoleReporter::new(config.verbose));

    let pipeline = Arc::new(BucketPipeline::new(
        Arc::clone(&config),
        resolver,
        stores,
        reporter,
    ));

    ScanOrchestrator::new(config.concurrency, pipeline)
        .run(BufReader::new(tokio::io::stdin()))
        .await;

    Ok(())
}
