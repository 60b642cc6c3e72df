//! Export local state as CSV, `db.json` or a backup document.

use std::fs;
use std::path::Path;

use nursery_admin::{Backup, csv};
use tracing::info;

use super::CommandError;

pub fn csv(out: &Path) -> Result<(), CommandError> {
    let (_, local) = super::context()?;
    let store = local.load_store();
    fs::write(out, csv::export_products(store.products()))?;
    info!(products = store.products().len(), out = %out.display(), "csv written");
    Ok(())
}

pub fn db(out: &Path) -> Result<(), CommandError> {
    let (_, local) = super::context()?;
    let store = local.load_store();
    fs::write(out, store.to_snapshot().to_json_pretty()?)?;
    info!(out = %out.display(), "db.json written");
    Ok(())
}

pub fn backup(out: &Path) -> Result<(), CommandError> {
    let (_, local) = super::context()?;
    let store = local.load_store();
    fs::write(out, Backup::capture(&store).to_json_pretty()?)?;
    info!(out = %out.display(), "backup written");
    Ok(())
}
