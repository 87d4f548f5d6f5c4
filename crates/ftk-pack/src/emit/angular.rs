//! Angular component templates
//!
//! Elements whose `id` carries an instruction become attribute bindings:
//!
//! - `$fill(primary, accent)` → `[attr.fill]="color(['primary', 'accent'], '<old fill>')"`
//! - `$stroke(primary)` → `[attr.stroke]="color(['primary'])"`
//! - `$href(avatar)` → `fill="url(#image-<uuid>)"` and a `<pattern>` whose
//!   `<image>` is bound with `[attr.xlink:href]="image(['avatar'])"`
//!
//! The instruction `id` is removed, as are the root `width` and `height`.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emit::write_file;
use crate::{PackError, Result};

static ID_INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$(fill|stroke|href)\(([a-zA-Z0-9\s,]+)\)").expect("valid instruction regex")
});

/// `components.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentJson {
    pub file_id: String,
    pub page_name: String,
    #[serde(default)]
    pub mappings: Vec<ComponentMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMapping {
    /// Component name in the page
    pub name: String,
    /// Template file to write
    pub output: PathBuf,
}

impl ComponentJson {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Fill,
    Stroke,
    Href,
}

impl Target {
    fn attr(self) -> &'static str {
        match self {
            Target::Fill => "fill",
            Target::Stroke => "stroke",
            Target::Href => "href",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub target: Target,
    pub args: Vec<String>,
}

impl Instruction {
    /// `['a', 'b']`
    fn arg_list(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|a| format!("'{}'", a)).collect();
        format!("[{}]", args.join(", "))
    }
}

/// Parse an element id such as `$fill(primary, accent)`.
pub fn parse_id(id: &str) -> Option<Instruction> {
    let caps = ID_INSTRUCTION.captures(id)?;
    let target = match &caps[1] {
        "fill" => Target::Fill,
        "stroke" => Target::Stroke,
        _ => Target::Href,
    };
    let args = caps[2]
        .split(',')
        .map(|a| a.split_whitespace().collect::<String>())
        .collect();
    Some(Instruction { target, args })
}

/// Rewrite a raw SVG export into an Angular template.
pub fn angular_template(svg: &str) -> Result<String> {
    TemplateWriter::new(|| format!("image-{}", Uuid::new_v4())).rewrite(svg)
}

/// Write a rendered template, creating parent directories.
pub async fn write_template(path: &Path, template: &str) -> Result<()> {
    write_file(path, template).await
}

struct TemplateWriter<F> {
    next_id: F,
    /// `(pattern id, image binding)` collected for the closing `<defs>`
    patterns: Vec<(String, String)>,
}

impl<F: FnMut() -> String> TemplateWriter<F> {
    fn new(next_id: F) -> Self {
        Self {
            next_id,
            patterns: Vec::new(),
        }
    }

    fn rewrite(mut self, svg: &str) -> Result<String> {
        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Vec::with_capacity(svg.len()));
        let mut depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                PackError::svg(format!("{} at position {}", e, reader.error_position()))
            })?;

            match event {
                Event::Eof => break,
                Event::Start(elem) => {
                    depth += 1;
                    let elem = self.rewrite_element(&elem, depth == 1)?;
                    writer.write_event(Event::Start(elem)).map_err(PackError::svg)?;
                }
                Event::Empty(elem) => {
                    let root = depth == 0;
                    let elem = self.rewrite_element(&elem, root)?;
                    if root && !self.patterns.is_empty() {
                        let end = elem.to_end().into_owned();
                        writer.write_event(Event::Start(elem)).map_err(PackError::svg)?;
                        self.write_defs(&mut writer)?;
                        writer.write_event(Event::End(end)).map_err(PackError::svg)?;
                    } else {
                        writer.write_event(Event::Empty(elem)).map_err(PackError::svg)?;
                    }
                }
                Event::End(elem) => {
                    if depth == 1 {
                        self.write_defs(&mut writer)?;
                    }
                    depth = depth.saturating_sub(1);
                    writer.write_event(Event::End(elem)).map_err(PackError::svg)?;
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                other => {
                    if depth > 0 {
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

    fn rewrite_element(&mut self, elem: &BytesStart<'_>, root: bool) -> Result<BytesStart<'static>> {
        let mut attrs: Vec<(String, String)> = Vec::new();
        for attr in elem.attributes() {
            let attr = attr.map_err(PackError::svg)?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(PackError::svg)?;
            if root && (key == "width" || key == "height") {
                continue;
            }
            let raw = std::str::from_utf8(&attr.value).map_err(PackError::svg)?;
            let value = unescape(raw).map_err(PackError::svg)?;
            attrs.push((key.to_string(), value.into_owned()));
        }

        let instruction = attrs
            .iter()
            .find(|(k, _)| k == "id")
            .and_then(|(_, v)| parse_id(v));
        if let Some(instruction) = instruction {
            attrs.retain(|(k, _)| k != "id");
            self.apply(&mut attrs, &instruction);
        }

        let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let mut out = BytesStart::new(name);
        for (key, value) in &attrs {
            push_attr(&mut out, key, value);
        }
        Ok(out)
    }

    fn apply(&mut self, attrs: &mut Vec<(String, String)>, instruction: &Instruction) {
        match instruction.target {
            Target::Href => {
                let id = (self.next_id)();
                set_attr(attrs, "fill", format!("url(#{})", id));
                self.patterns
                    .push((id, format!("image({})", instruction.arg_list())));
            }
            Target::Fill | Target::Stroke => {
                let target = instruction.target.attr();
                let default = attrs
                    .iter()
                    .position(|(k, _)| k == target)
                    .map(|i| attrs.remove(i).1);
                let binding = match default {
                    Some(value) => format!("color({}, '{}')", instruction.arg_list(), value),
                    None => format!("color({})", instruction.arg_list()),
                };
                attrs.push((format!("[attr.{}]", target), binding));
            }
        }
    }

    fn write_defs(&mut self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        if self.patterns.is_empty() {
            return Ok(());
        }
        writer
            .write_event(Event::Start(BytesStart::new("defs")))
            .map_err(PackError::svg)?;
        for (id, binding) in self.patterns.drain(..) {
            let mut pattern = BytesStart::new("pattern");
            push_attr(&mut pattern, "id", &id);
            push_attr(&mut pattern, "patternContentUnits", "objectBoundingBox");
            push_attr(&mut pattern, "width", "100%");
            push_attr(&mut pattern, "height", "100%");

            let mut image = BytesStart::new("image");
            push_attr(&mut image, "preserveAspectRatio", "none");
            push_attr(&mut image, "width", "1");
            push_attr(&mut image, "height", "1");
            push_attr(&mut image, "[attr.xlink:href]", &binding);

            writer.write_event(Event::Start(pattern)).map_err(PackError::svg)?;
            writer.write_event(Event::Empty(image)).map_err(PackError::svg)?;
            writer
                .write_event(Event::End(BytesEnd::new("pattern")))
                .map_err(PackError::svg)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("defs")))
            .map_err(PackError::svg)
    }
}

fn set_attr(attrs: &mut Vec<(String, String)>, key: &str, value: String) {
    match attrs.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value,
        None => attrs.push((key.to_string(), value)),
    }
}

/// Bindings contain single quotes, so only `<`, `>`, `&` and `"` are escaped.
fn push_attr(elem: &mut BytesStart<'_>, key: &str, value: &str) {
    let escaped: Cow<'_, str> = match partial_escape(value) {
        Cow::Borrowed(v) if !v.contains('"') => Cow::Borrowed(v),
        v => Cow::Owned(v.replace('"', "&quot;")),
    };
    elem.push_attribute((key.as_bytes(), escaped.as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(svg: &str) -> String {
        let mut n = 0;
        TemplateWriter::new(|| {
            n += 1;
            format!("image-{}", n)
        })
        .rewrite(svg)
        .unwrap()
    }

    #[test]
    fn test_parse_id() {
        let parsed = parse_id("$fill(primary, accent)").unwrap();
        assert_eq!(parsed.target, Target::Fill);
        assert_eq!(parsed.args, vec!["primary", "accent"]);

        assert_eq!(parse_id("$href(avatar)").unwrap().target, Target::Href);
        assert!(parse_id("Vector").is_none());
        assert!(parse_id("$color(a)").is_none());
        assert!(parse_id("$fill()").is_none());
    }

    #[test]
    fn test_root_size_removed() {
        let out = template(r#"<svg width="24" height="24" viewBox="0 0 24 24"><rect width="4" height="4"/></svg>"#);
        assert_eq!(
            out,
            r#"<svg viewBox="0 0 24 24"><rect width="4" height="4"/></svg>"#
        );
    }

    #[test]
    fn test_fill_binding_keeps_default() {
        let out = template(r##"<svg><path id="$fill(primary, accent)" d="M0" fill="#FF0000"/></svg>"##);
        assert_eq!(
            out,
            r##"<svg><path d="M0" [attr.fill]="color(['primary', 'accent'], '#FF0000')"/></svg>"##
        );
    }

    #[test]
    fn test_stroke_binding_without_default() {
        let out = template(r#"<svg><path id="$stroke(line)" d="M0"/></svg>"#);
        assert_eq!(
            out,
            r#"<svg><path d="M0" [attr.stroke]="color(['line'])"/></svg>"#
        );
    }

    #[test]
    fn test_href_creates_pattern() {
        let out = template(r##"<svg width="40" height="40"><circle id="$href(avatar)" r="20" fill="#C4C4C4"/></svg>"##);
        assert_eq!(
            out,
            concat!(
                r#"<svg><circle r="20" fill="url(#image-1)"/>"#,
                r#"<defs><pattern id="image-1" patternContentUnits="objectBoundingBox" width="100%" height="100%">"#,
                r#"<image preserveAspectRatio="none" width="1" height="1" [attr.xlink:href]="image(['avatar'])"/>"#,
                r#"</pattern></defs></svg>"#
            )
        );
    }

    #[test]
    fn test_plain_ids_untouched() {
        let out = template(r#"<svg><g id="layer"><path id="Vector" d="M0"/></g></svg>"#);
        assert_eq!(out, r#"<svg><g id="layer"><path id="Vector" d="M0"/></g></svg>"#);
    }

    #[test]
    fn test_escaped_values_survive() {
        let out = template(r#"<svg><text id="$fill(ink)" data-x="a &amp; &quot;b&quot;">Tom &amp; Jerry</text></svg>"#);
        assert_eq!(
            out,
            r#"<svg><text data-x="a &amp; &quot;b&quot;" [attr.fill]="color(['ink'])">Tom &amp; Jerry</text></svg>"#
        );
    }

    #[test]
    fn test_uuid_pattern_ids() {
        let out = angular_template(r#"<svg><rect id="$href(a, b)"/></svg>"#).unwrap();
        let re = Regex::new(r#"fill="url\(#(image-[0-9a-f-]{36})\)".*<pattern id="([^"]+)""#).unwrap();
        let caps = re.captures(&out).unwrap();
        assert_eq!(&caps[1], &caps[2]);
        assert!(out.contains("image(['a', 'b'])"));
    }

    #[test]
    fn test_malformed_svg_is_error() {
        assert!(angular_template("<svg><g></svg>").is_err());
    }

    #[test]
    fn test_component_json() {
        let json = r#"{
            "fileId": "abc",
            "pageName": "Components",
            "mappings": [{ "name": "avatar", "output": "src/app/avatar.component.svg" }]
        }"#;
        let parsed = ComponentJson::parse(json).unwrap();
        assert_eq!(parsed.file_id, "abc");
        assert_eq!(parsed.page_name, "Components");
        assert_eq!(parsed.mappings[0].output, PathBuf::from("src/app/avatar.component.svg"));
    }

    #[tokio::test]
    async fn test_write_template_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/icon.component.svg");
        write_template(&path, "<svg/>").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg/>");
    }
}
