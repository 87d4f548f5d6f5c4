//! Document tree model
//!
//! The remote API tags every node with a free-form `type` string. On the way in
//! that tag is folded into [`Node`], so the rest of the workspace matches on a
//! closed set of roles instead of comparing strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Wire tag for pages.
pub const PAGE_TYPE: &str = "CANVAS";
/// Wire tag for components.
pub const COMPONENT_TYPE: &str = "COMPONENT";

/// A loaded design file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawDocument", into = "RawDocument")]
pub struct Document {
    pub name: String,
    pub root: Node,
}

impl Document {
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Page,
    Component,
    Other,
}

/// Fields shared by every node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Unique within the document
    pub id: String,
    /// Not unique
    pub name: String,
    pub children: Vec<Node>,
}

impl Frame {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

/// An exportable vector asset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Component {
    pub frame: Frame,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Page(Frame),
    Component(Component),
    Other {
        /// Original wire tag, e.g. `DOCUMENT` or `FRAME`
        kind: String,
        frame: Frame,
    },
}

impl Node {
    pub fn page(id: impl Into<String>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Page(Frame::new(id, name).with_children(children))
    }

    pub fn component(id: impl Into<String>, name: impl Into<String>) -> Self {
        Node::Component(Component {
            frame: Frame::new(id, name),
            description: None,
        })
    }

    pub fn other(
        kind: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Other {
            kind: kind.into(),
            frame: Frame::new(id, name).with_children(children),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Node::Page(_) => Role::Page,
            Node::Component(_) => Role::Component,
            Node::Other { .. } => Role::Other,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Node::Page(frame) | Node::Other { frame, .. } => frame,
            Node::Component(component) => &component.frame,
        }
    }

    pub fn id(&self) -> &str {
        &self.frame().id
    }

    pub fn name(&self) -> &str {
        &self.frame().name
    }

    pub fn children(&self) -> &[Node] {
        &self.frame().children
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Node::Component(component) => Some(component),
            _ => None,
        }
    }

    fn wire_type(&self) -> &str {
        match self {
            Node::Page(_) => PAGE_TYPE,
            Node::Component(_) => COMPONENT_TYPE,
            Node::Other { kind, .. } => kind,
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentMeta {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: String,
    document: RawNode,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    components: HashMap<String, ComponentMeta>,
}

impl RawNode {
    fn into_node(self, components: &HashMap<String, ComponentMeta>) -> Node {
        let children = self
            .children
            .into_iter()
            .map(|child| child.into_node(components))
            .collect();
        let frame = Frame {
            id: self.id,
            name: self.name,
            children,
        };

        match self.kind.as_str() {
            PAGE_TYPE => Node::Page(frame),
            COMPONENT_TYPE => {
                let description = components
                    .get(&frame.id)
                    .map(|meta| meta.description.clone())
                    .filter(|d| !d.is_empty());
                Node::Component(Component { frame, description })
            }
            _ => Node::Other {
                kind: self.kind,
                frame,
            },
        }
    }

    fn from_node(node: &Node, components: &mut HashMap<String, ComponentMeta>) -> Self {
        if let Node::Component(Component {
            frame,
            description: Some(description),
        }) = node
        {
            components.insert(
                frame.id.clone(),
                ComponentMeta {
                    description: description.clone(),
                },
            );
        }

        Self {
            id: node.id().to_string(),
            name: node.name().to_string(),
            kind: node.wire_type().to_string(),
            children: node
                .children()
                .iter()
                .map(|child| RawNode::from_node(child, components))
                .collect(),
        }
    }
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let root = raw.document.into_node(&raw.components);
        Document {
            name: raw.name,
            root,
        }
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        let mut components = HashMap::new();
        let document = RawNode::from_node(&doc.root, &mut components);
        RawDocument {
            name: doc.name,
            document,
            components,
        }
    }
}
