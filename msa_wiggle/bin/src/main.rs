/*
Produce an alignment restricted to the columns of a reference sequence
and a wiggle track of the Shannon entropy at each of those columns
    + gaps of the reference ("-", ".", "_", "~") are removed
    + N/n are left out of the entropy but kept in the alignment
    + coordinates count reference residues only, starting at 0

Modes
    wiggle: alignment + track, in memory or streamed through a temporary file
    fasta: rebuild the alignment from a temporary file left by a streaming run
*/

mod bin_utils;
use std::process::ExitCode;
use std::time::Instant;
use clap::Parser;
use log::{debug, error, info};
use bin_utils::get_args::{Cli, Mode};
use bin_utils::run_jobs::run_jobs;
use msa_entropy::lib_utils::deinterleave::deinterleave_file;

fn main() -> ExitCode {
    env_logger::init();
    let tick = Instant::now();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    let failed = match cli.mode {
        Mode::Wiggle(args) => {
            info!("Started wiggle on {} alignment file(s)", args.input_alignment.len());
            run_jobs(&args)
        }
        Mode::Fasta(args) => {
            match deinterleave_file(&args.temp_file, &args.msa_output, None) {
                Ok(records) => {
                    info!("{} records written to {:?}", records, args.msa_output);
                    0
                }
                Err(e) => {
                    error!("{} stage failed: {}", e.stage(), e);
                    1
                }
            }
        }
    };
    info!("The process took {:?}.", tick.elapsed());
    if failed > 0 {
        error!("{} job(s) failed", failed);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
