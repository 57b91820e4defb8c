/*
    Check alignments before building entropy tracks
        every record carries as many residues as the first one
        nucleotide or protein, from a sample of residues
        optionally, whether a reference id prefix matches a header

    Exits with failure when a file cannot be read or is ragged
*/

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use msa_entropy::lib_utils::alignment::{check_lengths, read_alignment, LengthReport};
use msa_entropy::lib_utils::alphabet::{classify_alignment_file, SequenceKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to alignment file stored in fasta format
    #[arg(short='i', long="infile", required = true, action=clap::ArgAction::Append)]
    input_alignment: Vec<PathBuf>,
    /// Reference id prefix to look for
    #[arg(short='r', long="reference")]
    seq_id: Option<String>,
}

struct Summary {
    records: usize,
    lengths: LengthReport,
    kind: SequenceKind,
    reference_found: Option<bool>,
}

fn check_file(file: &PathBuf, seq_id: Option<&str>) -> Result<Summary> {
    let alignment = read_alignment(file).with_context(|| format!("Reading {:?}", file))?;
    let kind = classify_alignment_file(file).with_context(|| format!("Sampling {:?}", file))?;
    let reference_found = seq_id.map(|id| alignment.records.iter().any(|r| r.id.starts_with(id)));
    Ok(Summary {
        records: alignment.len(),
        lengths: check_lengths(&alignment),
        kind,
        reference_found,
    })
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    let mut failed = 0;
    for file in &cli.input_alignment {
        let summary = match check_file(file, cli.seq_id.as_deref()) {
            Ok(summary) => summary,
            Err(e) => {
                error!("{:#}", e);
                failed += 1;
                continue;
            }
        };
        println!("{}\trecords={}\tlength={}\talphabet={}",
            file.display(), summary.records, summary.lengths.expected, summary.kind);
        if summary.records == 0 {
            warn!("No records in {:?}", file);
        }
        match summary.reference_found {
            Some(true) => info!("Reference found in {:?}", file),
            Some(false) => warn!("No record id in {:?} starts with the reference prefix", file),
            None => {}
        }
        if summary.lengths.is_consistent() {
            info!("Alignment complies requirements {:?}", file);
        } else {
            for (id, length) in &summary.lengths.ragged {
                println!("{}\tragged\t{}\t{}", file.display(), id, length);
            }
            error!("{} record(s) in {:?} differ from the alignment length {}",
                summary.lengths.ragged.len(), file, summary.lengths.expected);
            failed += 1;
        }
    }
    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
