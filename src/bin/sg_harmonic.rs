use std::env;
use std::io;

use anyhow::Result;

use sg_waveforms::cli::{init_tracing, parse_args, print_usage};
use sg_waveforms::commands::run_harmonic;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = parse_args(&args, false)?;
    if opts.help {
        print_usage("sg-harmonic", false);
        return Ok(());
    }

    run_harmonic(&opts, &mut io::stdout())
}
