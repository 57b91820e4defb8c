/*
    One job per input alignment
        outputs are used as given for a single input
        with several inputs the input stem is put in front of each output name,
        repeated stems get _2, _3, ... appended
    Jobs run on a thread pool, each job is a single-threaded pipeline run
*/

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Instant;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use msa_entropy::{default_temp_path, msa_to_wiggle, msa_to_wiggle_low_memory, WiggleOptions};
use threadpool::ThreadPool;
use super::get_args::WiggleArgs;

#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub msa_output: PathBuf,
    pub wig_output: PathBuf,
    // set for streaming runs only
    pub temp_output: Option<PathBuf>,
}

fn prefixed(path: &Path, stem: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}", stem, name))
}

fn unique_stem(input: &Path, seen: &mut HashSet<String>) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "alignment".to_string());
    let mut candidate = stem.clone();
    let mut count = 2;
    while seen.contains(&candidate) {
        candidate = format!("{}_{}", stem, count);
        count += 1;
    }
    seen.insert(candidate.clone());
    candidate
}

pub fn plan_jobs(args: &WiggleArgs) -> Vec<Job> {
    let single = args.input_alignment.len() == 1;
    let mut seen = HashSet::new();
    args.input_alignment
        .iter()
        .map(|input| {
            let (msa_output, wig_output, temp_output) = if single {
                (args.msa_output.clone(), args.wig_output.clone(), args.temp_output.clone())
            } else {
                let stem = unique_stem(input, &mut seen);
                (
                    prefixed(&args.msa_output, &stem),
                    prefixed(&args.wig_output, &stem),
                    args.temp_output.as_deref().map(|t| prefixed(t, &stem)),
                )
            };
            let temp_output = if args.streaming {
                Some(temp_output.unwrap_or_else(|| default_temp_path(&msa_output)))
            } else {
                None
            };
            Job { input: input.clone(), msa_output, wig_output, temp_output }
        })
        .collect()
}

pub fn run_job(job: &Job, seq_id: &str, options: &WiggleOptions) -> Result<usize> {
    let tick = Instant::now();
    info!("Started {:?} with reference {:?}", job.input, seq_id);
    let count = match &job.temp_output {
        Some(temp) => msa_to_wiggle_low_memory(
            &job.input, seq_id, &job.msa_output, &job.wig_output, temp, options),
        None => msa_to_wiggle(&job.input, seq_id, &job.msa_output, &job.wig_output, options),
    }
    .with_context(|| format!("Processing {:?}", job.input))?;
    info!("There were {} columns extracted from {:?}. The process took {:?}.",
        count, job.input, tick.elapsed());
    if count == 0 {
        warn!("No columns extracted from {:?}: reference {:?} not found or entirely gapped",
            job.input, seq_id);
    }
    Ok(count)
}

// number of failed jobs
pub fn run_jobs(args: &WiggleArgs) -> usize {
    let jobs = plan_jobs(args);
    let options = WiggleOptions { scale: args.scale, ..WiggleOptions::default() };
    let pool = ThreadPool::new(args.nproc.max(1));
    let (sender, receiver) = channel();
    for job in jobs.iter().cloned() {
        debug!("Queueing {:?}", job);
        let sender = sender.clone();
        let seq_id = args.seq_id.clone();
        pool.execute(move || {
            let outcome = run_job(&job, &seq_id, &options);
            // receiver outlives the pool
            let _ = sender.send((job.input, outcome));
        });
    }
    drop(sender);
    pool.join();
    info!("Threadpool jobs complete");
    let mut failed = 0;
    for (input, outcome) in receiver.iter() {
        if let Err(e) = outcome {
            error!("{:?} failed: {:#}", input, e);
            failed += 1;
        }
    }
    failed
}
