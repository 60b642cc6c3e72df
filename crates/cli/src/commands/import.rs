//! Upsert products from a semicolon CSV file.

use std::fs;
use std::path::Path;

use nursery_admin::csv;
use tracing::{info, warn};

use super::CommandError;

pub fn run(file: &Path) -> Result<(), CommandError> {
    let (_, local) = super::context()?;
    let content = fs::read_to_string(file)?;
    let parsed = csv::import_products(&content);
    if parsed.skipped > 0 {
        warn!(skipped = parsed.skipped, "some rows could not be parsed");
    }

    let mut store = local.load_store();
    let summary = store.import_products(parsed.products);
    local.save_store(&store)?;
    info!(
        updated = summary.updated,
        inserted = summary.inserted,
        "import saved"
    );
    Ok(())
}
