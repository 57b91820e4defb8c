pub mod get_args;
pub mod run_jobs;
