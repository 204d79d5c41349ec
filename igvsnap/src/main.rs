mod file;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::Verbosity;
use eyre::Result;
use file::ValidPathBuf;
use human_panic::setup_panic;
use libigvsnap::{
    utils::{self, wrap_cmd},
    IgvOptions,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about=None)]
/// Take IGV snapshots of genomic regions by running a pre-built IGV
/// batch script under a virtual X framebuffer.
struct Args {
    #[clap(flatten)]
    verbose: Verbosity,

    /// Path to the IGV jar binary to run, defaults to igv.jar next to
    /// this executable
    #[clap(short = 'b', long = "bin")]
    igv_jar: Option<PathBuf>,

    /// Amount of memory to allocate to IGV, in Megabytes (MB)
    #[clap(short, long, default_value_t = 4000)]
    mem: u32,

    /// Path to batchscript file to run in IGV. Performs no error
    /// checking or other input evaluation, only runs IGV on the
    /// batchscript and exits.
    #[clap(long)]
    onlysnap: ValidPathBuf,

    /// Path to xvfb-run binary, if not specified will look in $PATH
    #[clap(long)]
    xvfb_run_path: Option<PathBuf>,

    /// Path to java binary, if not specified will be resolved from
    /// $PATH when the command runs
    #[clap(long)]
    java_path: Option<PathBuf>,
}

fn default_igv_jar() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| eyre::eyre!("Executable has no parent directory"))?;
    Ok(dir.join("igv.jar"))
}

fn main() -> Result<()> {
    setup_panic!();
    jane_eyre::install()?;

    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::info!("{args:?}");

    let jar = match args.igv_jar {
        Some(jar) => jar,
        None => default_igv_jar()?,
    };
    let xvfb_run = utils::find_binary("xvfb-run", &args.xvfb_run_path)?;

    let mut opts = IgvOptions::new(jar, args.mem).xvfb_run(xvfb_run);
    if let Some(java) = args.java_path {
        opts = opts.java(java);
    }

    wrap_cmd("Running the IGV batch script", || opts.run(&args.onlysnap.0))
}
