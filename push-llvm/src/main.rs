// Copy the vendored LLVM library trees into an upstream llvm-project
// checkout. This is the logical inverse of update-compiler-rt, which
// imports changes from the upstream tree into the vendored copies.

use anyhow::Result;
use clap::Parser;

/// Vendored trees pushed back upstream, relative to both roots.
const COPY_DIRS: &[&str] = &["compiler-rt", "libcxx", "libcxxabi"];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "push-llvm",
    version,
    about = "Push the vendored LLVM library trees into an upstream llvm-project checkout",
    long_about = "Replaces the compiler-rt, libcxx and libcxxabi trees of an upstream
llvm-project checkout with copies of the vendored ones.

EXAMPLE:
    # Push into a checkout in a non-default location
    push-llvm ~/src/llvm-project --summary

Note: the upstream trees are removed and rebuilt; commit or stash upstream
changes you care about first."
)]
struct Args {
    /// Path to the upstream llvm-project checkout
    ///
    /// Defaults to an `llvm-project` checkout next to this repository.
    #[arg(value_name = "LLVM_DIR")]
    llvm_dir: Option<std::path::PathBuf>,

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
        .llvm_dir
        .clone()
        .unwrap_or_else(|| args.vendor_root.join("../../llvm-project"));
    let mut required = vec![upstream_root.clone()];
    for dir in COPY_DIRS {
        required.push(args.vendor_root.join(dir));
        required.push(upstream_root.join(dir));
    }
    common::ensure_dirs_exist(required.iter().map(std::path::PathBuf::as_path))?;
    let mut push_summary = common::mirror::Summary::default();
    for dir in COPY_DIRS {
        let local_dir = args.vendor_root.join(dir);
        let upstream_dir = upstream_root.join(dir);
        tracing::info!("copying {:?} -> {:?}", &local_dir, &upstream_dir);
        push_summary = push_summary + common::mirror::mirror(&local_dir, &upstream_dir)?;
    }
    Ok(push_summary)
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
