//! Status command: read-only report over the stores
//!
//! Reports staging and warehouse relation row counts, view readiness, and
//! a few sample rows per view. Store files that do not exist yet are
//! reported as absent rather than created.

use anyhow::Result;
use serde::Serialize;
use sl_core::catalog::{self, SourceSystem};
use sl_db::Database;
use std::path::Path;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{load_project, open_store, ProjectContext};

/// Rows shown per view in the table output
const VIEW_SAMPLE_ROWS: usize = 3;

#[derive(Debug, Serialize)]
struct RelationStatus {
    relation: String,
    /// None when the relation does not exist in its store
    rows: Option<usize>,
}

#[derive(Debug, Serialize)]
struct StoreStatus {
    store: String,
    path: String,
    present: bool,
    relations: Vec<RelationStatus>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    project: String,
    stores: Vec<StoreStatus>,
    views_ready: bool,
    missing: Vec<String>,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let report = gather_report(&project).await?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_table(&project, &report).await?;
        }
    }

    Ok(())
}

async fn gather_report(project: &ProjectContext) -> Result<StatusReport> {
    let mut stores = Vec::with_capacity(3);

    for (label, path, relations) in [
        (
            "staging_crm",
            project.crm_store(),
            staging_relations(SourceSystem::Crm),
        ),
        (
            "staging_erp",
            project.erp_store(),
            staging_relations(SourceSystem::Erp),
        ),
        (
            "warehouse",
            project.warehouse_store(),
            catalog::WAREHOUSE_RELATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    ] {
        stores.push(store_status(label, &path, &relations).await?);
    }

    let warehouse = &stores[2];
    let missing: Vec<String> = warehouse
        .relations
        .iter()
        .filter(|r| r.rows.is_none())
        .map(|r| r.relation.clone())
        .collect();

    Ok(StatusReport {
        project: project.config.name.clone(),
        views_ready: missing.is_empty(),
        missing,
        stores,
    })
}

fn staging_relations(system: SourceSystem) -> Vec<String> {
    catalog::tables_for(system)
        .iter()
        .map(|t| t.staging_relation.to_string())
        .collect()
}

/// Inspect one store file without creating it
async fn store_status(label: &str, path: &Path, relations: &[String]) -> Result<StoreStatus> {
    let mut status = StoreStatus {
        store: label.to_string(),
        path: path.display().to_string(),
        present: path.exists(),
        relations: Vec::with_capacity(relations.len()),
    };

    if !status.present {
        for relation in relations {
            status.relations.push(RelationStatus {
                relation: relation.clone(),
                rows: None,
            });
        }
        return Ok(status);
    }

    let db = open_store(path)?;
    for relation in relations {
        let rows = if db.relation_exists(relation).await? {
            Some(
                db.query_count(&format!(
                    "SELECT * FROM {}",
                    sl_core::sql::quote_ident(relation)
                ))
                .await?,
            )
        } else {
            None
        };
        status.relations.push(RelationStatus {
            relation: relation.clone(),
            rows,
        });
    }

    Ok(status)
}

async fn print_table(project: &ProjectContext, report: &StatusReport) -> Result<()> {
    println!("Project: {}", report.project);

    for store in &report.stores {
        if store.present {
            println!("\n{} ({}):", store.store, store.path);
            for relation in &store.relations {
                match relation.rows {
                    Some(rows) => println!("  {} ({} rows)", relation.relation, rows),
                    None => println!("  {} (absent)", relation.relation),
                }
            }
        } else {
            println!("\n{} ({}): store file not found", store.store, store.path);
        }
    }

    if report.views_ready {
        println!("\nViews: ready");
        let db = open_store(&project.warehouse_store())?;
        for view in catalog::VIEWS {
            println!("  {}:", view);
            if !db.relation_exists(view).await? {
                println!("    (not published - run `sl publish`)");
                continue;
            }
            let rows = db
                .query_sample_rows(
                    &format!("SELECT * FROM {}", sl_core::sql::quote_ident(view)),
                    VIEW_SAMPLE_ROWS,
                )
                .await?;
            for row in rows {
                println!("    {}", row);
            }
        }
    } else {
        println!("\nViews: not ready (missing: {})", report.missing.join(", "));
    }

    Ok(())
}
