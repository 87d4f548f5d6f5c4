use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use ftk_config::Config;
use ftk_engine::Session;
use ftk_pack::emit::angular::write_template;
use ftk_pack::{ComponentJson, angular_template};
use tracing::info;

use super::Toolkit;
use crate::cli::Cli;

pub async fn handle(cli: &Cli, config: &Config, input: &Path) -> Result<()> {
    let toolkit = Toolkit::new(cli, config).await?;

    if !input.exists() {
        let shown = std::path::absolute(input).unwrap_or_else(|_| input.to_path_buf());
        bail!("No components JSON found at {}", shown.display());
    }
    let json = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let manifest = ComponentJson::parse(&json)?;

    let session = toolkit.session(&manifest.file_id).await?;
    let page = session.page(&manifest.page_name)?;
    let components = Session::components(&[page]);
    let result = toolkit.loader(&manifest.file_id).download(&components).await?;

    // Render everything before touching the file system
    let mut templates: Vec<(PathBuf, String)> = Vec::with_capacity(manifest.mappings.len());
    for mapping in &manifest.mappings {
        let component = Session::component(&components, &mapping.name)?;
        let svg = Session::export(&result, component.name())?;
        let template = angular_template(svg)
            .with_context(|| format!("Failed to convert '{}'", mapping.name))?;
        templates.push((mapping.output.clone(), template));
    }

    for (path, template) in &templates {
        write_template(path, template).await?;
        info!("Generated {}", path.display());
    }
    Ok(())
}
