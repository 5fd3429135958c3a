//! Rich-content rendering.
//!
//! Abstracts, parameter descriptions and return values are sequences of typed
//! inline nodes. Rendering flattens them to plain text: styling is dropped,
//! references become the referenced symbol's name. Node types this module
//! doesn't know are an error so that format drift surfaces immediately.

use serde_json::Value;

use crate::pointer::{query_array, query_str};
use crate::resolve::Resolver;
use crate::{InflateError, Result};

/// Inline node types the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Text,
    CodeVoice,
    InlineHead,
    Styled,
    Reference,
}

impl NodeKind {
    fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "text" => NodeKind::Text,
            "codeVoice" => NodeKind::CodeVoice,
            "inlineHead" => NodeKind::InlineHead,
            "emphasis" | "strong" | "newTerm" | "superscript" => NodeKind::Styled,
            "reference" => NodeKind::Reference,
            _ => return None,
        })
    }
}

/// Flattens content node sequences, resolving references through a [`Resolver`].
pub struct Renderer<'a> {
    resolver: &'a Resolver<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Render an optional node sequence. `None` renders as the empty string.
    pub fn render(&self, nodes: Option<&Value>) -> Result<String> {
        let mut out = String::new();
        if let Some(nodes) = nodes {
            self.render_into(nodes, &mut out)?;
        }
        Ok(out)
    }

    fn render_into(&self, nodes: &Value, out: &mut String) -> Result<()> {
        let Value::Array(nodes) = nodes else {
            return Err(InflateError::UnexpectedShape {
                pointer: "inline content".to_string(),
                expected: "array",
            });
        };
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node(&self, node: &Value, out: &mut String) -> Result<()> {
        // Untyped nodes carry no text.
        let Some(kind) = query_str(node, "/type")? else {
            return Ok(());
        };
        let kind =
            NodeKind::parse(kind).ok_or_else(|| InflateError::UnknownContentKind(kind.to_string()))?;
        match kind {
            NodeKind::Text => out.push_str(query_str(node, "/text")?.unwrap_or_default()),
            NodeKind::CodeVoice => out.push_str(query_str(node, "/code")?.unwrap_or_default()),
            NodeKind::InlineHead => {
                self.render_children(node, out)?;
                out.push_str(": ");
            }
            NodeKind::Styled => self.render_children(node, out)?,
            NodeKind::Reference => {
                if let Some(id) = query_str(node, "/identifier")? {
                    out.push_str(&self.resolver.resolve(id));
                }
            }
        }
        Ok(())
    }

    fn render_children(&self, node: &Value, out: &mut String) -> Result<()> {
        for child in query_array(node, "/inlineContent")?.unwrap_or_default() {
            self.render_node(child, out)?;
        }
        Ok(())
    }
}
