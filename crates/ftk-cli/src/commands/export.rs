use std::path::Path;

use anyhow::Result;
use ftk_config::Config;
use ftk_core::FigmaInput;

use super::{Toolkit, emit};
use crate::cli::Cli;

pub async fn handle(
    cli: &Cli,
    config: &Config,
    input: &FigmaInput,
    output: Option<&Path>,
) -> Result<()> {
    let toolkit = Toolkit::new(cli, config).await?;
    let pack = toolkit.icon_pack(&input.file, input.page.as_deref()).await?;
    emit(output, &pack.export_json()?).await
}
