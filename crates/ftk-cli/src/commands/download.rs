use std::path::Path;

use anyhow::Result;
use ftk_config::Config;
use ftk_core::FigmaInput;
use tracing::info;

use super::Toolkit;
use crate::cli::{Cli, IconArgs};

pub async fn handle(
    cli: &Cli,
    config: &Config,
    input: &FigmaInput,
    output: Option<&Path>,
    icon: &IconArgs,
) -> Result<()> {
    let toolkit = Toolkit::new(cli, config).await?;
    let pack = toolkit.icon_pack(&input.file, input.page.as_deref()).await?;

    let dir = output.unwrap_or(Path::new("."));
    let written = pack.save_icons(dir, &icon.save_options()).await?;
    info!("Saved {} icons to {}", written.len(), dir.display());
    Ok(())
}
