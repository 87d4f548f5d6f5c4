//! Streaming SVG optimizer
//!
//! Rewrites exported SVG in a single pass over the event stream: non-visual
//! nodes are dropped, matching presentation attributes are stripped and
//! whitespace-only text is removed. With `inner_only` the root `<svg>` wrapper
//! is dropped as well, since every emitter re-creates it with its own size and
//! fill.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// Elements that never render.
const NON_VISUAL: &[&[u8]] = &[b"desc", b"metadata"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    #[serde(default = "default_true")]
    pub remove_title: bool,

    /// Drop `display="none"`, `visibility="hidden"` and `opacity="0"` subtrees
    #[serde(default = "default_true")]
    pub remove_hidden: bool,

    /// Attribute names matching this pattern (whole name) are removed. Empty
    /// keeps every attribute.
    #[serde(default = "default_remove_attrs")]
    pub remove_attrs: String,

    /// Return the children of the root `<svg>` only
    #[serde(default = "default_true")]
    pub inner_only: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            remove_title: true,
            remove_hidden: true,
            remove_attrs: default_remove_attrs(),
            inner_only: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_remove_attrs() -> String {
    "fill|stroke.*".to_string()
}

pub struct SvgOptimizer {
    options: OptimizeOptions,
    remove_attrs: Option<Regex>,
}

impl SvgOptimizer {
    pub fn new(options: OptimizeOptions) -> Result<Self> {
        let remove_attrs = Some(options.remove_attrs.as_str())
            .filter(|p| !p.is_empty())
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
            .transpose()?;

        Ok(Self {
            options,
            remove_attrs,
        })
    }

    pub fn optimize(&self, svg: &str) -> Result<String> {
        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Vec::with_capacity(svg.len()));

        // Open elements, counting the one being processed
        let mut depth = 0usize;
        // Depth of the element whose subtree is being dropped
        let mut skip: Option<usize> = None;
        // Escaped character data since the last markup event. The reader
        // splits text at every entity reference.
        let mut text = String::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                PackError::svg(format!("{} at position {}", e, reader.error_position()))
            })?;

            match &event {
                Event::Text(chunk) => {
                    text.push_str(std::str::from_utf8(chunk).map_err(PackError::svg)?);
                    continue;
                }
                Event::GeneralRef(entity) => {
                    text.push('&');
                    text.push_str(std::str::from_utf8(entity).map_err(PackError::svg)?);
                    text.push(';');
                    continue;
                }
                _ => {}
            }
            let keep = skip.is_none() && depth > 0;
            write_text(&mut writer, std::mem::take(&mut text), keep)?;

            match event {
                Event::Eof => break,
                Event::Start(elem) => {
                    depth += 1;
                    if skip.is_some() {
                        continue;
                    }
                    if self.drops(&elem)? {
                        skip = Some(depth);
                        continue;
                    }
                    if depth == 1 && self.unwraps(&elem) {
                        continue;
                    }
                    writer
                        .write_event(Event::Start(self.strip_attrs(&elem)?))
                        .map_err(PackError::svg)?;
                }
                Event::End(elem) => {
                    let closing = depth;
                    depth = depth.saturating_sub(1);
                    if let Some(level) = skip {
                        if closing == level {
                            skip = None;
                        }
                        continue;
                    }
                    if closing == 1 && self.options.inner_only && elem.local_name().as_ref() == b"svg" {
                        continue;
                    }
                    writer.write_event(Event::End(elem)).map_err(PackError::svg)?;
                }
                Event::Empty(elem) => {
                    if skip.is_some() || self.drops(&elem)? {
                        continue;
                    }
                    if depth == 0 && self.unwraps(&elem) {
                        continue;
                    }
                    writer
                        .write_event(Event::Empty(self.strip_attrs(&elem)?))
                        .map_err(PackError::svg)?;
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                other => {
                    if skip.is_none() {
                        writer.write_event(other).map_err(PackError::svg)?;
                    }
                }
            }
        }

        if depth != 0 {
            return Err(PackError::svg("unexpected end of document"));
        }

        String::from_utf8(writer.into_inner()).map_err(PackError::svg)
    }

    /// Whether `elem` is the root wrapper to leave out.
    fn unwraps(&self, elem: &BytesStart<'_>) -> bool {
        self.options.inner_only && elem.local_name().as_ref() == b"svg"
    }

    fn drops(&self, elem: &BytesStart<'_>) -> Result<bool> {
        let name = elem.local_name();
        if NON_VISUAL.contains(&name.as_ref()) {
            return Ok(true);
        }
        if self.options.remove_title && name.as_ref() == b"title" {
            return Ok(true);
        }
        if !self.options.remove_hidden {
            return Ok(false);
        }

        for attr in elem.attributes() {
            let attr = attr.map_err(PackError::svg)?;
            let value = attr.value.as_ref();
            let hidden = match attr.key.as_ref() {
                b"display" => value == b"none",
                b"visibility" => value == b"hidden",
                b"opacity" => value == b"0",
                _ => false,
            };
            if hidden {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn strip_attrs(&self, elem: &BytesStart<'_>) -> Result<BytesStart<'static>> {
        let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let mut out = BytesStart::new(name);

        for attr in elem.attributes() {
            let attr = attr.map_err(PackError::svg)?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(PackError::svg)?;
            if self.remove_attrs.as_ref().is_some_and(|re| re.is_match(key)) {
                continue;
            }
            // Values are copied still escaped
            out.push_attribute((attr.key.as_ref(), attr.value.as_ref()));
        }

        Ok(out)
    }
}

/// Optimize with a one-off optimizer.
pub fn optimize(svg: &str, options: &OptimizeOptions) -> Result<String> {
    SvgOptimizer::new(options.clone())?.optimize(svg)
}

/// Write one run of escaped text, dropping it when whitespace-only.
fn write_text(writer: &mut Writer<Vec<u8>>, text: String, keep: bool) -> Result<()> {
    if !keep || text.trim().is_empty() {
        return Ok(());
    }
    writer
        .write_event(Event::Text(BytesText::from_escaped(collapse_whitespace(&text))))
        .map_err(PackError::svg)?;
    Ok(())
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
