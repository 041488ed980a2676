//! Catalog query commands.

use clap::Args;

use capreg_catalog::{Catalog, Entry, registry};
use capreg_core::config::AppConfig;
use capreg_core::error::AppError;
use capreg_core::result::AppResult;

use crate::output;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only entries with this type tag
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Maximum number of entries
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Number of entries to skip
    #[arg(short, long, default_value_t = 0)]
    pub offset: usize,
}

/// Arguments for the get command
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Entry identity
    pub id: String,
}

/// Print live entries, ordered by id
pub async fn list(args: &ListArgs, config: &AppConfig) -> AppResult<()> {
    let session = super::bootstrap(&config.plugins, None).await?;

    output::print_json(&select(&session.catalog, args))
}

/// Print one live entry
pub async fn get(args: &GetArgs, config: &AppConfig) -> AppResult<()> {
    let session = super::bootstrap(&config.plugins, None).await?;

    let entry = session
        .catalog
        .get(&args.id)
        .ok_or_else(|| AppError::not_found(format!("Entry '{}' not found", args.id)))?;

    output::print_json(&entry)
}

fn select(catalog: &Catalog, args: &ListArgs) -> Vec<Entry> {
    let limit = args.limit.unwrap_or(usize::MAX);
    match &args.kind {
        Some(kind) => registry::paginate(catalog.list_by_type(kind), limit, args.offset),
        None => catalog.list_paginated(limit, args.offset),
    }
}
