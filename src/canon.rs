//! Re-serializes a parsed document into the compact text that gets embedded.
//!
//! Whitespace-only text nodes are dropped; everything else is written back in
//! document order. There is no XML declaration in the output.

use std::borrow::Cow;

use roxmltree::{Document, Namespace, Node, NodeType, ParsingOptions};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

pub fn canonicalize(text: &str) -> Result<String, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;

    let mut xml = String::with_capacity(text.len());
    let mut doctype = doctype(text, doc.root_element().range().start);
    for node in doc.root().children() {
        let start = node.range().start;
        if let Some((_, decl)) = doctype.take_if(|(offset, _)| *offset < start) {
            xml.push_str(&decl);
        }
        write_node(&mut xml, node);
    }
    Ok(xml)
}

fn write_node(xml: &mut String, node: Node) {
    match node.node_type() {
        NodeType::Root => {
            for child in node.children() {
                write_node(xml, child);
            }
        }
        NodeType::Element => write_element(xml, node),
        NodeType::Text => {
            let text = node.text().unwrap_or_default();
            if !is_blank(text) {
                escape_text(xml, text);
            }
        }
        NodeType::Comment => {
            xml.push_str("<!--");
            xml.push_str(node.text().unwrap_or_default());
            xml.push_str("-->");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                xml.push_str("<?");
                xml.push_str(pi.target);
                if let Some(value) = pi.value {
                    xml.push(' ');
                    xml.push_str(value);
                }
                xml.push_str("?>");
            }
        }
    }
}

fn write_element(xml: &mut String, node: Node) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name(), false);

    xml.push('<');
    xml.push_str(&name);

    for ns in declared_namespaces(node) {
        match ns.name() {
            Some(prefix) => {
                xml.push_str(" xmlns:");
                xml.push_str(prefix);
            }
            None => xml.push_str(" xmlns"),
        }
        xml.push_str("=\"");
        escape_attribute(xml, ns.uri());
        xml.push('"');
    }

    for attr in node.attributes() {
        xml.push(' ');
        xml.push_str(&qualified_name(node, attr.namespace(), attr.name(), true));
        xml.push_str("=\"");
        escape_attribute(xml, attr.value());
        xml.push('"');
    }

    // an element holding only blank text still gets an end tag
    if !node.has_children() {
        xml.push_str("/>");
        return;
    }

    xml.push('>');
    for child in node.children() {
        write_node(xml, child);
    }
    xml.push_str("</");
    xml.push_str(&name);
    xml.push('>');
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Namespaces that come into scope on `node` rather than being inherited.
fn declared_namespaces<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = &'a Namespace<'input>> {
    let parent = node.parent_element();
    node.namespaces().filter(move |ns| {
        ns.uri() != XML_NS
            && !parent.is_some_and(|parent| {
                parent
                    .namespaces()
                    .any(|outer| outer.name() == ns.name() && outer.uri() == ns.uri())
            })
    })
}

fn qualified_name<'a>(
    node: Node,
    namespace: Option<&str>,
    local: &'a str,
    attribute: bool,
) -> Cow<'a, str> {
    let Some(uri) = namespace else {
        return Cow::Borrowed(local);
    };
    if uri == XML_NS {
        return Cow::Owned(format!("xml:{local}"));
    }

    // unprefixed attributes are never in a namespace, so skip the default one
    let prefix = node
        .namespaces()
        .filter(|ns| ns.uri() == uri)
        .find(|ns| !attribute || ns.name().is_some())
        .and_then(|ns| ns.name());

    match prefix {
        Some(prefix) => Cow::Owned(format!("{prefix}:{local}")),
        None => Cow::Borrowed(local),
    }
}

fn escape_text(xml: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => xml.push_str("&amp;"),
            '<' => xml.push_str("&lt;"),
            '>' => xml.push_str("&gt;"),
            _ => xml.push(ch),
        }
    }
}

fn escape_attribute(xml: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => xml.push_str("&amp;"),
            '<' => xml.push_str("&lt;"),
            '"' => xml.push_str("&quot;"),
            '\t' => xml.push_str("&#9;"),
            '\n' => xml.push_str("&#10;"),
            '\r' => xml.push_str("&#13;"),
            _ => xml.push(ch),
        }
    }
}

/// Locates `<!DOCTYPE ...>` in the prolog. Returns its byte offset and the
/// declaration with every whitespace run collapsed to a single space.
fn doctype(text: &str, prolog_end: usize) -> Option<(usize, String)> {
    let prolog = &text[..prolog_end];
    let mut offset = 0;
    while offset < prolog.len() {
        let rest = &prolog[offset..];
        if rest.starts_with("<?") {
            offset += rest.find("?>")? + 2;
        } else if rest.starts_with("<!--") {
            offset += rest.find("-->")? + 3;
        } else if rest.starts_with("<!DOCTYPE") {
            let len = declaration_len(rest)?;
            let decl = rest[..len].split_whitespace().collect::<Vec<_>>().join(" ");
            return Some((offset, decl));
        } else {
            offset += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

fn declaration_len(decl: &str) -> Option<usize> {
    let bytes = decl.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => i += 1 + decl[i + 1..].find(quote as char)?,
            b'<' if decl[i..].starts_with("<!--") => i += decl[i..].find("-->")? + 2,
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}
