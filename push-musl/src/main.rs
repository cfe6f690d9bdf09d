// Copy the vendored musl tree into an upstream musl checkout. This is the
// logical inverse of the update direction, which imports changes from the
// upstream tree into the vendored copy.

use anyhow::Result;
use clap::Parser;

/// Location of the vendored musl tree, relative to the vendor root.
const VENDORED_MUSL: &str = "libc/musl";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "push-musl",
    version,
    about = "Push the vendored musl tree into an upstream musl checkout",
    long_about = "Replaces the upstream musl tree with a copy of the vendored one.

EXAMPLE:
    # Push into a checkout in a non-default location
    push-musl ~/src/musl --summary

Note: the upstream tree is removed and rebuilt; commit or stash upstream
changes you care about first."
)]
struct Args {
    /// Path to the upstream musl checkout
    ///
    /// Defaults to a `musl` checkout next to this repository.
    #[arg(value_name = "MUSL_DIR")]
    musl_dir: Option<std::path::PathBuf>,

    /// Root of the vendored source trees
    #[arg(
        long,
        value_name = "DIR",
        default_value = "vendor",
        help_heading = "Layout"
    )]
    vendor_root: std::path::PathBuf,

    /// Verbose level: -v INFO / -vv DEBUG / -vvv TRACE (default: ERROR)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Progress & output")]
    verbose: u8,

    /// Print summary at the end
    #[arg(long, help_heading = "Progress & output")]
    summary: bool,

    /// Quiet mode, don't report errors
    #[arg(short = 'q', long = "quiet", help_heading = "Progress & output")]
    quiet: bool,
}

fn push(args: &Args) -> Result<common::mirror::Summary> {
    let upstream_root = args
        .musl_dir
        .clone()
        .unwrap_or_else(|| args.vendor_root.join("../../musl"));
    let local_dir = args.vendor_root.join(VENDORED_MUSL);
    common::ensure_dirs_exist([local_dir.as_path(), upstream_root.as_path()])?;
    tracing::info!("copying {:?} -> {:?}", &local_dir, &upstream_root);
    let summary = common::mirror::mirror(&local_dir, &upstream_root)?;
    Ok(summary)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output = common::OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        print_summary: args.summary,
    };
    let func = {
        let args = args.clone();
        move || push(&args)
    };
    let res = common::run(&output, func);
    if res.is_none() {
        std::process::exit(1);
    }
    Ok(())
}
