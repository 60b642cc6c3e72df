//! Restore from a backup file, and the seed-dataset reset.
//!
//! Both replace the current local state, so both insist on `--yes`.

use std::fs;
use std::path::Path;

use nursery_admin::Backup;
use tracing::info;

use super::CommandError;

pub fn run(file: &Path, yes: bool) -> Result<(), CommandError> {
    if !yes {
        return Err(CommandError::ConfirmationRequired);
    }
    let backup: Backup = serde_json::from_str(&fs::read_to_string(file)?)?;

    let (_, local) = super::context()?;
    let mut store = local.load_store();
    store.restore(backup);
    local.save_store(&store)?;
    info!(file = %file.display(), "backup restored");
    Ok(())
}

pub fn reset(yes: bool) -> Result<(), CommandError> {
    if !yes {
        return Err(CommandError::ConfirmationRequired);
    }
    let (_, local) = super::context()?;
    let mut store = local.load_store();
    store.reset();
    local.save_store(&store)?;
    info!("state reset to the seed dataset");
    Ok(())
}
