//! React icon component: a CSS module of masks plus a typed `Icon` component

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use heck::ToShoutySnakeCase;
use tracing::debug;

use crate::emit::write_file;
use crate::{IconPack, Result};

pub const CSS_FILE: &str = "Icon.module.css";
pub const TSX_FILE: &str = "Icon.tsx";

const BASE_RULE: &str = ".icon { width: 24px;height: 24px;display: inline-block;background-position: center center;background-repeat: no-repeat;background-size: contain;background-color: grey; }";

/// One mask rule per icon after the shared `.icon` rule.
pub fn render_css(pack: &IconPack) -> String {
    let mut lines = vec![BASE_RULE.to_string()];
    for (name, inner) in pack.iter() {
        let svg = format!(
            r#"<svg viewBox="0 0 24 24" fill="currentColor" xmlns="http://www.w3.org/2000/svg">{}</svg>"#,
            inner
        );
        lines.push(format!(
            ".{} {{ mask-image: url(data:image/svg+xml;base64,{}); }}",
            name,
            STANDARD.encode(svg)
        ));
    }
    lines.join("\n")
}

/// `ICON` enum, `IconProps` and the `Icon` component.
pub fn render_tsx(pack: &IconPack) -> String {
    let mut out = String::new();
    out.push_str("import clsx from 'clsx'\n");
    out.push_str("import { CSSProperties, FunctionComponent } from 'react'\n");
    out.push_str("import styles from './Icon.module.css'\n\n");

    out.push_str("export enum ICON {\n");
    let members: Vec<String> = pack
        .names()
        .map(|name| format!("  {} = '{}'", enum_member(name), quote(name)))
        .collect();
    out.push_str(&members.join(",\n"));
    if !members.is_empty() {
        out.push('\n');
    }
    out.push_str("}\n\n");

    out.push_str("export interface IconProps {\n");
    out.push_str("  icon: ICON\n");
    out.push_str("  className?: string\n");
    out.push_str("  style?: CSSProperties\n");
    out.push_str("}\n\n");

    out.push_str(
        "export const Icon: FunctionComponent<IconProps> = ({ icon, className, style }) => {\n",
    );
    out.push_str(
        "  return <div className={clsx(styles[`${icon}`], className, styles['icon'], 'icon')} style={style}></div>\n",
    );
    out.push_str("}\n");
    out
}

/// Write `Icon.module.css` and `Icon.tsx` into `dir`.
pub async fn write_react(pack: &IconPack, dir: &Path) -> Result<Vec<PathBuf>> {
    let css = dir.join(CSS_FILE);
    debug!("Generating {}", css.display());
    write_file(&css, render_css(pack)).await?;

    let tsx = dir.join(TSX_FILE);
    debug!("Generating {}", tsx.display());
    write_file(&tsx, render_tsx(pack)).await?;

    Ok(vec![css, tsx])
}

fn enum_member(name: &str) -> String {
    let member = name.to_shouty_snake_case();
    match member.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => member,
        _ => format!("ICON_{}", member),
    }
}

fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
