/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::process::ExitCode;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::{CommandFactory, Parser};
use s3_integrity_verifier::config::loader::ConfigLoader;
use s3_integrity_verifier::types::{ConcurrencySetting, Verdict};

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "s3-verify")]
#[command(
    about = "Audits every object version in an S3-compatible store by recomputing its ETag."
)]
pub struct Args {
    /// S3 endpoint URL
    #[arg(long, env = "S3_VERIFY_ENDPOINT")]
    endpoint: String,

    /// S3 access key
    #[arg(long, env = "S3_VERIFY_ACCESS_KEY")]
    access_key: String,

    /// S3 secret key
    #[arg(long, env = "S3_VERIFY_SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    /// Select a specific bucket (default: every accessible bucket)
    #[arg(long)]
    bucket: Option<String>,

    /// Select a key prefix (requires --bucket)
    #[arg(long)]
    prefix: Option<String>,

    /// Signing region
    #[arg(long, default_value = "us-east-1")]
    region: String,

    /// Number of objects to verify at the same time
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
}

fn invalid_arg(message: &str) -> ! {
    Args::command()
        .error(clap::error::ErrorKind::InvalidValue, message)
        .exit()
}

impl Args {
    /// Reject flag combinations that cannot work, before any request is sent.
    fn validate(&self) {
        let has = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        if !has(&self.bucket) && has(&self.prefix) {
            invalid_arg("--prefix is specified without --bucket");
        }
        if self.concurrency == 0 {
            invalid_arg("--concurrency must be at least 1");
        }
    }

    fn concurrency(&self) -> ConcurrencySetting {
        match self.concurrency {
            1 => ConcurrencySetting::Sequential,
            n => ConcurrencySetting::Explicit(n),
        }
    }
}

async fn run(args: Args) -> Result<(), s3_integrity_verifier::error::Error> {
    let loader = ConfigLoader::default()
        .endpoint_url(args.endpoint.as_str())
        .access_key(args.access_key.as_str())
        .secret_key(args.secret_key.as_str())
        .region(args.region.as_str())
        .concurrency(args.concurrency());
    if let Err(err) = loader.validate() {
        invalid_arg(&DisplayErrorContext(&err).to_string());
    }
    let client = s3_integrity_verifier::Client::new(loader.load().await?);

    let mut handle = client
        .verify_objects()
        .set_bucket(args.bucket)
        .set_key_prefix(args.prefix)
        .send()
        .await?;

    while let Some(verification) = handle.next().await {
        match verification.verdict() {
            Verdict::Error(_) => eprintln!("{verification}"),
            _ => println!("{verification}"),
        }
    }

    let output = handle.join().await?;
    eprintln!(
        "verified {} object version(s): {} intact, {} corrupted, {} skipped, {} errors, {} listing errors",
        output.objects_processed(),
        output.objects_intact(),
        output.objects_corrupted(),
        output.objects_skipped(),
        output.objects_failed(),
        output.listing_failures(),
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.validate();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("verification failed: {}", DisplayErrorContext(&err));
            ExitCode::FAILURE
        }
    }
}
