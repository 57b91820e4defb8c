use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand)]
pub enum Mode {
    /// Produce the gapless alignment and the entropy wiggle track.
    Wiggle(WiggleArgs),
    /// Rebuild the alignment from an interleaved temporary file left by a streaming run.
    Fasta(FastaArgs),
}

#[derive(Args)]
pub struct WiggleArgs {
    /// Path to alignment file stored in fasta format. Repeat to process several files.
    #[arg(short='i', long="infile", required = true, action=clap::ArgAction::Append)]
    pub input_alignment: Vec<PathBuf>,
    /// Identifier of the reference sequence, matched as a prefix of the header.
    #[arg(short='r', long="reference", required = true)]
    pub seq_id: String,
    /// Location of the alignment output. Default: "msa.afa"
    #[arg(short='m', long="msa-output", default_value = "msa.afa")]
    pub msa_output: PathBuf,
    /// Location of the wiggle output. Default: "entropy.wig"
    #[arg(short='w', long="wig-output", default_value = "entropy.wig")]
    pub wig_output: PathBuf,
    /// Stream columns through an interleaved temporary file instead of holding the alignment output in memory.
    #[arg(short='s', long="streaming")]
    pub streaming: bool,
    /// Location of the temporary file of a streaming run. Default: hidden file next to the alignment output
    #[arg(short='t', long="temp-output", requires = "streaming")]
    pub temp_output: Option<PathBuf>,
    /// Constant the entropy in bits is multiplied by. Default: 100
    #[arg(long="scale", value_parser=validate_scale, default_value_t=100.0)]
    pub scale: f64,
    /// Number of alignment files processed at once. Default: 1
    #[arg(short='n', long="threads", default_value_t=1)]
    pub nproc: usize,
}

#[derive(Args)]
pub struct FastaArgs {
    /// The location of the intermediate temp file.
    pub temp_file: PathBuf,
    /// Location of the alignment output. Default: "msa.afa"
    #[arg(short='m', long="msa-output", default_value = "msa.afa")]
    pub msa_output: PathBuf,
}

fn validate_scale(input_str: &str) -> Result<f64, String> {
    let scale: f64 = input_str
        .parse()
        .map_err(|_| format!("Scale {} is not a number", input_str))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("Scale must be a positive number, got {}", scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_must_be_positive() {
        assert_eq!(validate_scale("100"), Ok(100.0));
        assert!(validate_scale("0").is_err());
        assert!(validate_scale("-1").is_err());
        assert!(validate_scale("abc").is_err());
    }

    #[test]
    fn wiggle_defaults() {
        let cli = Cli::try_parse_from(["msa_wiggle", "wiggle", "-i", "in.afa", "-r", "ref"]).unwrap();
        match cli.mode {
            Mode::Wiggle(args) => {
                assert_eq!(args.msa_output, PathBuf::from("msa.afa"));
                assert_eq!(args.wig_output, PathBuf::from("entropy.wig"));
                assert!(!args.streaming);
                assert_eq!(args.scale, 100.0);
                assert_eq!(args.nproc, 1);
            }
            Mode::Fasta(_) => panic!("expected wiggle mode"),
        }
    }

    #[test]
    fn temp_output_needs_streaming() {
        assert!(Cli::try_parse_from(
            ["msa_wiggle", "wiggle", "-i", "a", "-r", "ref", "-t", ".tmp"]).is_err());
        assert!(Cli::try_parse_from(
            ["msa_wiggle", "wiggle", "-i", "a", "-r", "ref", "-s", "-t", ".tmp"]).is_ok());
    }
}
