//! Run command: the full pipeline in stage order
//!
//! Stage CRM -> stage ERP -> build warehouse -> publish views. Each stage
//! fully completes before the next begins; the first failing stage aborts
//! the run and leaves later relations in their prior state.

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use sl_core::catalog::SourceSystem;
use sl_warehouse::ViewsStatus;
use std::time::Instant;
use uuid::Uuid;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{
    carries_exit_code, load_project, ExitCode, EXIT_STAGING, EXIT_WAREHOUSE,
};
use crate::commands::{build, publish, stage};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let run_id = Uuid::new_v4();
    let started = Instant::now();

    println!(
        "Starting run {} for project '{}' at {}",
        run_id,
        project.config.name,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let progress = if !args.quiet {
        let pb = ProgressBar::new(4);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let fail = |pb: &Option<ProgressBar>, label: &str, e: anyhow::Error, code: i32| {
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        if carries_exit_code(&e) {
            return e;
        }
        println!("  \u{2717} {} - {:#}", label, e);
        ExitCode(code).into()
    };

    for system in [SourceSystem::Crm, SourceSystem::Erp] {
        if let Some(pb) = &progress {
            pb.set_message(format!("Staging {}", system));
        }
        match stage::stage_system(&project, system).await {
            Ok(staged) => {
                let rows: usize = staged.iter().map(|t| t.rows).sum();
                println!(
                    "  \u{2713} staged {} ({} tables, {} rows)",
                    system,
                    staged.len(),
                    rows
                );
            }
            Err(e) => {
                return Err(fail(
                    &progress,
                    &format!("{} staging", system),
                    e,
                    EXIT_STAGING,
                ))
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.set_message("Building warehouse");
    }
    match build::build(&project, global.verbose).await {
        Ok(built) => {
            let rows: usize = built.iter().map(|r| r.rows).sum();
            println!(
                "  \u{2713} built warehouse ({} relations, {} rows)",
                built.len(),
                rows
            );
        }
        Err(e) => return Err(fail(&progress, "warehouse build", e, EXIT_WAREHOUSE)),
    }
    if let Some(pb) = &progress {
        pb.inc(1);
    }

    if let Some(pb) = &progress {
        pb.set_message("Publishing views");
    }
    match publish::publish(&project).await {
        Ok(ViewsStatus::Ready) => println!("  \u{2713} published views"),
        Ok(ViewsStatus::NotReady { missing }) => {
            // unexpected straight after a successful build, but not fatal
            println!(
                "  - view publication skipped (missing: {})",
                missing.join(", ")
            );
        }
        Err(e) => return Err(fail(&progress, "view publication", e, EXIT_WAREHOUSE)),
    }
    if let Some(pb) = &progress {
        pb.inc(1);
        pb.finish_with_message("Complete");
    }

    println!(
        "\nRun {} finished in {:.1}s",
        run_id,
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
