mod run_file;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use th_optimizer::TwoHandedOptimizer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::run_file::RunFile;

/// Run the two-handed optimizer over a JSON run file and print the report.
///
/// Without a run file the binding-energy demo over the nuclear chart runs.
#[derive(Parser, Debug)]
#[command(name = "two-handed")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// JSON run file with `ranges`, `objective` and an optional `optimizer` section
    #[arg(env = "TWO_HANDED_CONFIG", value_name = "RUN_FILE")]
    run_file: Option<PathBuf>,

    /// Override `optimizer.num_iterations`
    #[arg(short = 'n', long, value_name = "N")]
    iterations: Option<usize>,

    /// Override `optimizer.seed`
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn load_run(&self) -> anyhow::Result<RunFile> {
        let mut run = match &self.run_file {
            Some(path) => RunFile::load(path)
                .with_context(|| format!("failed to load run file {}", path.display()))?,
            None => {
                info!("no run file given, running the binding energy demo");
                RunFile::binding_energy_demo()?
            }
        };
        if let Some(n) = self.iterations {
            run.optimizer = run.optimizer.with_iterations(n);
        }
        if let Some(seed) = self.seed {
            run.optimizer = run.optimizer.with_seed(seed);
        }
        Ok(run)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let run = cli.load_run()?;
    let objective = run.objective.build()?;
    let optimizer = TwoHandedOptimizer::new(run.ranges, run.optimizer)?;
    let report = optimizer.run(objective.as_ref(), optimizer.config().num_iterations)?;

    match (report.best(), report.best_score()) {
        (Some(best), Some(score)) => info!(best = %best, score, "best hypothesis"),
        (Some(best), None) => info!(best = %best, "no finite score found, best is the unscored seed"),
        (None, _) => info!("no iterations run, no hypothesis"),
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_apply_on_top_of_the_demo() {
        let cli = Cli::try_parse_from(["two-handed", "--iterations", "40", "--seed", "9"]).unwrap();
        // The env var may be set in the caller's shell; only check it when it is not.
        if std::env::var_os("TWO_HANDED_CONFIG").is_none() {
            assert!(cli.run_file.is_none());
            let run = cli.load_run().unwrap();
            assert_eq!(run.optimizer.num_iterations, 40);
            assert_eq!(run.optimizer.seed, Some(9));
        }
    }

    #[test]
    fn positional_run_file_is_accepted() {
        let cli = Cli::try_parse_from(["two-handed", "runs/semf.json", "-n", "10"]).unwrap();
        assert_eq!(cli.run_file, Some(PathBuf::from("runs/semf.json")));
        assert_eq!(cli.iterations, Some(10));
    }

    #[test]
    fn missing_run_file_is_a_load_error() {
        let cli = Cli::try_parse_from(["two-handed", "/nonexistent/run.json"]).unwrap();
        assert!(cli.load_run().is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["two-handed", "--bogus"]).is_err());
    }
}
