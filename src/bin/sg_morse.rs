use std::env;
use std::io;

use anyhow::Result;

use sg_waveforms::cli::{init_tracing, parse_args, print_usage};
use sg_waveforms::commands::run_morse;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = parse_args(&args, true)?;
    if opts.help {
        print_usage("sg-morse", true);
        return Ok(());
    }

    run_morse(&opts, &mut io::stdout())
}
