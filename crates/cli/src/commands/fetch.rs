//! Pull the published `db.json` into the local data directory.

use nursery_admin::{Store, snapshot};
use tracing::info;

use super::CommandError;

pub async fn run(url: Option<String>) -> Result<(), CommandError> {
    let (config, local) = super::context()?;
    let url = url
        .or_else(|| config.remote_db_url.clone())
        .ok_or(CommandError::MissingUrl)?;

    let snapshot = snapshot::fetch(&url, config.proxy_timeout).await?;
    let store = Store::from_snapshot(snapshot);
    local.save_store(&store)?;
    info!(
        products = store.products().len(),
        categories = store.categories().len(),
        dir = %local.dir().display(),
        "remote snapshot saved"
    );
    Ok(())
}
