//! A loaded document and the lookups commands run against it

use ftk_core::{Document, Node, Role, extract, find_named, pages};
use ftk_pack::IconPack;
use ftk_remote::DocumentClient;
use tracing::info;

use crate::{ComponentLoader, EngineError, LoadResult, Result};

pub struct Session {
    file_id: String,
    document: Document,
}

impl Session {
    /// Fetch `file_id`. Failing to load the document is fatal.
    pub async fn load(client: &dyn DocumentClient, file_id: impl Into<String>) -> Result<Self> {
        let file_id = file_id.into();
        info!("Loading Figma document '{}'", file_id);
        let document = client.fetch_document(&file_id).await?;
        Ok(Self::from_document(file_id, document))
    }

    pub fn from_document(file_id: impl Into<String>, document: Document) -> Self {
        Self {
            file_id: file_id.into(),
            document,
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> &Node {
        &self.document.root
    }

    /// All pages, or the pages called `name`. Naming a page that does not
    /// exist is an error.
    pub fn pages(&self, name: Option<&str>) -> Result<Vec<&Node>> {
        let found = pages(self.root(), name);
        match name {
            Some(name) if found.is_empty() => Err(EngineError::PageNotFound(name.to_string())),
            _ => Ok(found),
        }
    }

    /// First page called `name`.
    pub fn page(&self, name: &str) -> Result<&Node> {
        find_named([self.root()], Role::Page, name)
            .ok_or_else(|| EngineError::PageNotFound(name.to_string()))
    }

    /// Components anywhere under the given pages, in document order.
    pub fn components<'a>(pages: &[&'a Node]) -> Vec<&'a Node> {
        extract(pages.iter().copied(), Some(Role::Component))
    }

    /// Components under the selected pages (all pages when `page` is `None`).
    pub fn components_in(&self, page: Option<&str>) -> Result<Vec<&Node>> {
        let pages = self.pages(page)?;
        Ok(Self::components(&pages))
    }

    pub fn component<'a>(components: &[&'a Node], name: &str) -> Result<&'a Node> {
        components
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| EngineError::ComponentNotFound(name.to_string()))
    }

    /// Download every component under `page` (all pages when `None`) into an
    /// unoptimized pack. Components without content are left out.
    pub async fn icon_pack(&self, page: Option<&str>, loader: &ComponentLoader) -> Result<IconPack> {
        let components = self.components_in(page)?;
        let result = loader.download(&components).await?;
        Ok(IconPack::from(result.into_icons()))
    }

    /// Downloaded SVG for `name`, or `MissingExport`.
    pub fn export<'r>(result: &'r LoadResult, name: &str) -> Result<&'r str> {
        result
            .get(name)
            .ok_or_else(|| EngineError::MissingExport(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadStats, LoadedComponent};

    fn session() -> Session {
        let root = Node::other(
            "DOCUMENT",
            "0:0",
            "Document",
            vec![
                Node::page(
                    "0:1",
                    "Icons",
                    vec![Node::component("1", "star"), Node::component("2", "heart")],
                ),
                Node::page("0:2", "Colors", vec![Node::component("3", "red")]),
            ],
        );
        Session::from_document("file", Document::new("Design", root))
    }

    #[test]
    fn test_components_in_named_page() {
        let session = session();
        let components = session.components_in(Some("Icons")).unwrap();
        let names: Vec<_> = components.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["star", "heart"]);
    }

    #[test]
    fn test_components_in_all_pages() {
        let session = session();
        assert_eq!(session.components_in(None).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_page() {
        let session = session();
        let err = session.components_in(Some("Nope")).unwrap_err();
        assert!(matches!(err, EngineError::PageNotFound(ref p) if p == "Nope"));
        assert_eq!(err.to_string(), "Page 'Nope' doesn't exist");
        assert!(session.page("Nope").is_err());
        assert_eq!(session.page("Colors").unwrap().id(), "0:2");
    }

    #[test]
    fn test_missing_component() {
        let session = session();
        let components = session.components_in(None).unwrap();
        assert_eq!(Session::component(&components, "red").unwrap().id(), "3");
        let err = Session::component(&components, "blue").unwrap_err();
        assert_eq!(err.to_string(), "Component 'blue' doesn't exist");
    }

    #[test]
    fn test_missing_export() {
        let result = LoadResult {
            components: vec![LoadedComponent {
                id: "1".to_string(),
                name: "star".to_string(),
                content: None,
            }],
            stats: LoadStats::default(),
        };
        let err = Session::export(&result, "star").unwrap_err();
        assert_eq!(err.to_string(), "No SVG export found for 'star'");
    }
}
