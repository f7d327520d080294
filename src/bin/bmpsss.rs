// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Command-line front end for (k, n) secret image sharing.
//!
//! Usage:
//!   bmpsss -d --secret <secret.bmp> -k <k> [-n <n>] [--dir <covers>] [--out-dir <dir>] [-s <seed>]
//!   bmpsss -r --secret <output.bmp> -k <k> -w <width> -h <height> [--dir <carriers>]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, ArgGroup, Parser};

use bmp_sss::sss::default_shadow_count;
use bmp_sss::{distribute_dir, recover_dir, SchemeParams, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(name = "bmpsss", version)]
#[command(about = "Split a BMP image into shadows hidden in cover images, or recover it")]
#[command(disable_help_flag = true)]
#[command(group(ArgGroup::new("mode").required(true).args(["distribute", "recover"])))]
struct Args {
    /// Split the secret and hide the shadows in covers from --dir
    #[arg(short = 'd', long)]
    distribute: bool,

    /// Recover the secret from carriers in --dir
    #[arg(short = 'r', long)]
    recover: bool,

    /// Secret image: input with -d, output with -r
    #[arg(long)]
    secret: PathBuf,

    /// Shadows needed to recover
    #[arg(short = 'k')]
    k: u16,

    /// Shadows to produce (default: number of other files in --dir)
    #[arg(short = 'n')]
    n: Option<u16>,

    /// Secret width in pixels (recover)
    #[arg(short = 'w', long, required_if_eq("recover", "true"))]
    width: Option<u32>,

    /// Secret height in pixels (recover)
    #[arg(short = 'h', long, required_if_eq("recover", "true"), allow_negative_numbers = true)]
    height: Option<i32>,

    /// Whitening key
    #[arg(short = 's', long, default_value_t = DEFAULT_SEED)]
    seed: u16,

    /// Directory holding covers (-d) or carriers (-r)
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Where carriers are written (-d)
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_distribute(args: &Args) -> anyhow::Result<()> {
    let n = match args.n {
        Some(n) => n,
        None => default_shadow_count(&args.secret, &args.dir)
            .with_context(|| format!("counting files in {}", args.dir.display()))?,
    };
    let params = SchemeParams::new(args.k, n)?;

    let written = distribute_dir(&args.secret, &args.dir, &args.out_dir, params, args.seed)
        .with_context(|| format!("distributing {}", args.secret.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    tracing::info!(k = params.k(), n = params.n(), "distributed");
    Ok(())
}

fn run_recover(args: &Args) -> anyhow::Result<()> {
    let (Some(width), Some(height)) = (args.width, args.height) else {
        bail!("recover needs -w and -h");
    };
    recover_dir(&args.dir, &args.secret, width, height, args.k)
        .with_context(|| format!("recovering into {}", args.secret.display()))?;
    println!("{}", args.secret.display());
    tracing::info!(k = args.k, width, height, "recovered");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.distribute {
        run_distribute(&args)
    } else {
        run_recover(&args)
    }
}
