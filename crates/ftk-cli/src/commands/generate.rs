use std::path::Path;

use anyhow::Result;
use ftk_config::Config;
use tracing::info;

use super::{Toolkit, emit};
use crate::cli::Cli;

pub async fn handle(
    cli: &Cli,
    config: &Config,
    file_id: &str,
    page_name: &str,
    output: Option<&Path>,
) -> Result<()> {
    let toolkit = Toolkit::new(cli, config).await?;
    info!("Generating icon pack for page '{}'", page_name);
    let pack = toolkit.icon_pack(file_id, Some(page_name)).await?;
    emit(output, &pack.export_json()?).await
}
