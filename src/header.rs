//! Escaping and chunked emission of the C string array.

use std::num::NonZeroUsize;

pub const DEFAULT_ARRAY_NAME: &str = "gladestring";
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(96).unwrap();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStyle {
    /// Name of the `static const char` array.
    pub array_name: String,
    /// Characters per string literal, before the trailing-quote extension.
    pub chunk_size: NonZeroUsize,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            array_name: DEFAULT_ARRAY_NAME.to_owned(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Backslash-escapes every `"`. Nothing else is touched, backslashes included.
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Splits escaped text into windows of `size` characters. A window is
/// stretched by one when the next character is a quote, so `\"` stays whole.
pub struct Chunks<'a> {
    rest: &'a str,
    size: usize,
}

pub fn chunks(text: &str, size: NonZeroUsize) -> Chunks<'_> {
    Chunks {
        rest: text,
        size: size.get(),
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = match self.rest.char_indices().nth(self.size) {
            Some((i, '"')) => i + 1,
            Some((i, _)) => i,
            None => self.rest.len(),
        };
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

/// Renders the complete header for already canonicalized document text.
pub fn render(canonical: &str, style: &HeaderStyle) -> String {
    let escaped = escape_quotes(canonical);
    let lines = escaped.len() / style.chunk_size.get() + 1;

    let mut header = String::with_capacity(escaped.len() + lines * 5 + 64);
    header.push_str("static const char ");
    header.push_str(&style.array_name);
    header.push_str(" [] =\n{\n");
    for chunk in chunks(&escaped, style.chunk_size) {
        header.push_str("  \"");
        header.push_str(chunk);
        header.push_str("\"\n");
    }
    header.push_str("};\n");
    header
}
