//! Serialize the document tree back to xacro XML

use std::io;

use generational_arena::Index;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::Document;

/// Serialize `doc` with the utf-8 declaration the flattening tool expects.
///
/// Attributes are written in source order under their original qnames, so
/// namespace declarations survive verbatim. Elements without children or
/// text collapse to the self-closing form.
pub fn write_document(doc: &Document) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    if let Some(root) = doc.root() {
        write_element(doc, root, &mut writer)?;
    }
    Ok(writer.into_inner())
}

fn write_element(doc: &Document, idx: Index, writer: &mut Writer<Vec<u8>>) -> io::Result<()> {
    let Some(node) = doc.get_node(idx) else {
        return Ok(());
    };

    let mut start = BytesStart::new(node.element.name.as_str());
    for attr in &node.element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if node.children.is_empty() && node.element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &node.element.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for &child in &node.children {
            write_element(doc, child, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(node.element.name.as_str())))?;
    }

    if let Some(tail) = &node.element.tail {
        writer.write_event(Event::Text(BytesText::new(tail)))?;
    }
    Ok(())
}
