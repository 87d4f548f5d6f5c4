use std::path::Path;

use anyhow::Result;
use ftk_config::Config;
use ftk_core::FigmaInput;
use ftk_pack::write_react;
use tracing::info;

use super::Toolkit;
use crate::cli::Cli;

pub async fn handle(cli: &Cli, config: &Config, input: &FigmaInput, output: &Path) -> Result<()> {
    let toolkit = Toolkit::new(cli, config).await?;
    let pack = toolkit.icon_pack(&input.file, input.page.as_deref()).await?;

    info!("Generating React icon pack in {}", output.display());
    for path in write_react(&pack, output).await? {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
