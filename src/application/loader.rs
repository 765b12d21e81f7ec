//! Document Loader: parse a xacro source file into the arena document

use std::fs;
use std::path::Path;

use generational_arena::Index;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Attribute, Document, Element};

type ParseError = Box<dyn std::error::Error + Send + Sync>;

/// Parse the xacro file at `path` into a document tree.
///
/// Any read or parse failure is fatal and reported with the offending
/// path; no later stage runs after a load error.
pub fn load_document(path: &Path) -> ApplicationResult<Document> {
    let content = fs::read_to_string(path).map_err(|e| ApplicationError::DocumentLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    let doc = parse_document(&content).map_err(|e| ApplicationError::DocumentLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        "load_document: {} parsed, {} nodes",
        path.display(),
        doc.node_count()
    );
    Ok(doc)
}

/// Parse xacro content into a document tree.
///
/// Attribute namespaces are resolved while reading and stored next to the
/// raw qnames, so re-serialization reproduces the source declarations
/// (the xacro namespace keeps its original prefix, no synthetic alias).
/// Text and tails are kept un-trimmed. Comments, processing instructions
/// and doctypes are not part of the model.
pub fn parse_document(content: &str) -> Result<Document, ParseError> {
    let mut reader = NsReader::from_str(content);
    let mut doc = Document::new();
    // Open-element stack; the last entry is the insertion point.
    let mut stack: Vec<Index> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let idx = open_element(&reader, &mut doc, stack.last().copied(), &e)?;
                stack.push(idx);
            }
            Event::Empty(e) => {
                open_element(&reader, &mut doc, stack.last().copied(), &e)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                let chunk = e.unescape()?;
                attach_text(&mut doc, stack.last().copied(), &chunk);
            }
            Event::CData(e) => {
                let raw = String::from_utf8_lossy(&e.into_inner()).into_owned();
                attach_text(&mut doc, stack.last().copied(), &raw);
            }
            Event::Eof => break,
            // declaration, comments, PIs, doctype
            _ => {}
        }
    }

    if doc.root().is_none() {
        return Err("document has no root element".into());
    }
    Ok(doc)
}

fn open_element(
    reader: &NsReader<&[u8]>,
    doc: &mut Document,
    parent: Option<Index>,
    start: &BytesStart,
) -> Result<Index, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr?;
        let (resolved, _) = reader.resolve_attribute(attr.key);
        let namespace = match resolved {
            ResolveResult::Bound(ns) => {
                Some(String::from_utf8_lossy(ns.into_inner()).into_owned())
            }
            _ => None,
        };
        element.attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            namespace,
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(doc.insert_node(element, parent))
}

/// Attach character data at the current insertion point.
///
/// Text before the first child belongs to the open element; text after a
/// child becomes that child's tail. Content outside the root is ignored.
fn attach_text(doc: &mut Document, open: Option<Index>, chunk: &str) {
    let Some(open_idx) = open else {
        return;
    };
    let last_child = doc
        .get_node(open_idx)
        .and_then(|n| n.children.last().copied());

    match last_child {
        Some(child_idx) => {
            if let Some(child) = doc.get_node_mut(child_idx) {
                child.element.tail.get_or_insert_with(String::new).push_str(chunk);
            }
        }
        None => {
            if let Some(node) = doc.get_node_mut(open_idx) {
                node.element.text.get_or_insert_with(String::new).push_str(chunk);
            }
        }
    }
}
