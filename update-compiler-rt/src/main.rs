use anyhow::{Context, Result};
use clap::Parser;

/// compiler-rt subtrees we vendor.
const COPY_DIRS: &[&str] = &[
    "include/sanitizer",
    "lib/sanitizer_common",
    "lib/asan",
    "lib/interception",
    "lib/builtins",
    "lib/lsan",
    "lib/ubsan",
    "lib/ubsan_minimal",
];

/// Entries that survive the clear pass: the local readme plus any
/// locally-added file carrying the project marker in its name.
const KEEP_NAMES: &[&str] = &["readme.txt"];
const KEEP_MARKER: &str = "emscripten";

/// Upstream entries we never import: build system files and assembly
/// sources we do not vendor.
const SKIP_PATTERNS: &[&str] = &[
    ".clang-format",
    "CMakeLists.txt",
    "README.txt",
    "weak_symbols.txt",
    "*.syms.extra",
    "*.S",
];

/// Attribution files copied into the vendored compiler-rt root.
const EXTRA_FILES: &[&str] = &["CREDITS.TXT", "LICENSE.TXT"];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "update-compiler-rt",
    version,
    about = "Refresh the vendored compiler-rt sources from an upstream LLVM checkout",
    long_about = "Clears each vendored compiler-rt subtree (keeping locally-maintained files)
and imports the matching upstream files from an llvm-project checkout.

EXAMPLE:
    # Refresh from a checkout in a non-default location
    update-compiler-rt ~/src/llvm-project --summary

Note: pre-existing vendored files outside the keep-list are removed."
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

#[derive(Copy, Clone, Debug, Default)]
struct UpdateSummary {
    copy_summary: common::mirror::Summary,
    clear_summary: common::clear::Summary,
    entries_skipped: usize,
}

impl std::fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\n\
            {}\n\
            upstream entries skipped: {}",
            &self.copy_summary, &self.clear_summary, self.entries_skipped,
        )
    }
}

fn update(args: &Args) -> Result<UpdateSummary> {
    let llvm_dir = args
        .llvm_dir
        .clone()
        .unwrap_or_else(|| args.vendor_root.join("../../llvm-project"));
    let upstream_root = llvm_dir.join("compiler-rt");
    let vendored_root = args.vendor_root.join("compiler-rt");
    let mut required = vec![upstream_root.clone(), vendored_root.clone()];
    for dir in COPY_DIRS {
        required.push(upstream_root.join(dir));
        required.push(vendored_root.join(dir));
    }
    common::ensure_dirs_exist(required.iter().map(std::path::PathBuf::as_path))?;

    let keep = common::filter::KeepSet::new(KEEP_NAMES, Some(KEEP_MARKER));
    let skip = common::filter::SkipSet::new(SKIP_PATTERNS)?;

    let mut update_summary = UpdateSummary::default();
    for dir in COPY_DIRS {
        let src_dir = upstream_root.join(dir);
        let dst_dir = vendored_root.join(dir);
        tracing::info!("refreshing {:?} from {:?}", &dst_dir, &src_dir);
        update_summary.clear_summary =
            update_summary.clear_summary + common::clear::clear(&dst_dir, &keep)?;
        let entries = std::fs::read_dir(&src_dir)
            .with_context(|| format!("cannot open directory {src_dir:?} for reading"))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed traversing directory {:?}", &src_dir))?;
            let file_name = entry.file_name();
            if skip.is_skipped(&file_name.to_string_lossy()) {
                tracing::debug!("skipping upstream entry: {:?}", entry.path());
                update_summary.entries_skipped += 1;
                continue;
            }
            let entry_path = entry.path();
            let entry_metadata = std::fs::metadata(&entry_path)
                .with_context(|| format!("failed reading metadata from {:?}", &entry_path))?;
            if !entry_metadata.is_file() {
                // only plain files are vendored at the top of each subtree
                tracing::debug!("not a regular file, skipping: {:?}", &entry_path);
                update_summary.entries_skipped += 1;
                continue;
            }
            update_summary.copy_summary = update_summary.copy_summary
                + common::mirror::copy_file(&entry_path, &dst_dir.join(&file_name))?;
        }
    }
    for name in EXTRA_FILES {
        update_summary.copy_summary = update_summary.copy_summary
            + common::mirror::copy_file(&upstream_root.join(name), &vendored_root.join(name))?;
    }
    Ok(update_summary)
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
        move || update(&args)
    };
    let res = common::run(&output, func);
    if res.is_none() {
        std::process::exit(1);
    }
    Ok(())
}
