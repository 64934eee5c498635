//! Application orchestrator.
//! Loads config, applies CLI overrides, initializes logging, builds the engine and
//! dispatches the requested batch.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

use batchfs::cli::{self, Args, Command};
use batchfs::output as out;
use batchfs::{
    BatchResult, Config, FsStat, NumericIds, Ops, PoolExecutor, default_resolver, load_config,
    unify_ancestors,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let mut cfg: Config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);
    cfg.validate()?;

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json_logs)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            e
        })?;

    debug!(?args, "starting batchfs");

    let result = dispatch(&cfg, args.command);

    // Flush the file appender before the process exits.
    drop(guard);
    result
}

fn build_ops(cfg: &Config) -> Result<Ops> {
    let executor = PoolExecutor::new(cfg.workers).context("build worker pool")?;
    let ids = if cfg.numeric_ids {
        Arc::new(NumericIds) as Arc<dyn batchfs::IdentityResolver>
    } else {
        default_resolver()
    };
    Ok(Ops::with_resolver(executor, cfg.modes(), ids))
}

fn dispatch(cfg: &Config, command: Command) -> Result<()> {
    let ops = build_ops(cfg)?;
    match command {
        Command::New { paths } => report(ops.create_all(absolutize_all(&paths))),
        Command::Rename { pairs } => report(ops.rename_all(cli::into_pairs(&pairs)?)),
        Command::Cut { pairs } => report(ops.cut_all(cli::into_pairs(&pairs)?)),
        Command::Copy { pairs } => report(ops.copy_all(cli::into_pairs(&pairs)?)),
        Command::Remove { paths, no_unify } => {
            let paths = absolutize_all(&paths);
            let targets: Vec<PathBuf> = if no_unify {
                paths
            } else {
                let set: HashSet<PathBuf> = paths.into_iter().collect();
                let mut roots: Vec<PathBuf> = unify_ancestors(&set).into_iter().collect();
                roots.sort();
                roots
            };
            report(ops.remove_all(targets))
        }
        Command::Stat { paths, json } => show_stats(&ops, absolutize_all(&paths), json),
    }
}

fn absolutize_all(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|p| cli::absolutize(p)).collect()
}

fn report(result: BatchResult) -> Result<()> {
    match result {
        Ok(done) => {
            out::print_success(&format!("{}: {} completed", done.operation, done.completed));
            Ok(())
        }
        Err(failure) => {
            error!(
                operation = %failure.operation,
                failed = failure.failures.len(),
                succeeded = failure.succeeded(),
                kind = %failure.kind(),
                "batch failed"
            );
            out::print_batch_failure(&failure);
            Err(failure.into())
        }
    }
}

fn show_stats(ops: &Ops, paths: Vec<PathBuf>, json: bool) -> Result<()> {
    let results = ops.stat_all(paths.clone());
    let mut failed = 0usize;
    for (path, res) in paths.iter().zip(results) {
        match res {
            Ok(st) if json => out::print_user(&serde_json::to_string(&st)?),
            Ok(st) => out::print_user(&stat_line(&path.display().to_string(), &st)),
            Err(e) => {
                failed += 1;
                out::print_error(&out::describe_error(&e));
            }
        }
    }
    if failed > 0 {
        bail!("stat: {failed} of {} paths failed", paths.len());
    }
    Ok(())
}

/// `ls -l`-like line: mode, owner, group, size, mtime, path [-> target].
fn stat_line(path: &str, st: &FsStat) -> String {
    let mut line = format!(
        "{} {} {} {:>10} {} {}",
        st.permissions,
        st.user,
        st.group,
        st.size,
        st.date_mod.format("%Y-%m-%d %H:%M:%S"),
        path
    );
    if let Some(target) = &st.link {
        line.push_str(&format!(" -> {}", target.display()));
    }
    line
}
