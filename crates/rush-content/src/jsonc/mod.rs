//! JSON with comments: permissive parsing and format-preserving updates

mod parser;
mod render;
mod style;

pub use style::{JsoncStyle, LineEnding, Quote};

use serde_json::Value;

use crate::error::Result;
use parser::Node;
use render::Emitter;

/// A parsed JSONC document that can re-emit itself with a new value.
///
/// # Examples
///
/// ```
/// use rush_content::JsoncDocument;
/// use serde_json::json;
///
/// let source = "{\n  // tools\n  \"projects\": []\n}\n";
/// let doc = JsoncDocument::parse(source).unwrap();
///
/// let mut value = doc.value().clone();
/// value["projects"] = json!(["a"]);
///
/// assert_eq!(
///     doc.update(&value),
///     "{\n  // tools\n  \"projects\": [\n    \"a\"\n  ]\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsoncDocument {
    source: String,
    root: Node,
    style: JsoncStyle,
}

impl JsoncDocument {
    /// Parse source text, capturing its formatting style.
    pub fn parse(source: &str) -> Result<Self> {
        let parsed = parser::parse(source)?;
        let style = JsoncStyle::detect(source, &parsed.stats);
        tracing::debug!(bytes = source.len(), indent = ?style.indent, "parsed jsonc document");
        Ok(Self {
            source: source.to_string(),
            root: parsed.root,
            style,
        })
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed value.
    pub fn value(&self) -> &Value {
        &self.root.value
    }

    /// The detected formatting style.
    pub fn style(&self) -> &JsoncStyle {
        &self.style
    }

    /// Render `new` over the original text using the detected style.
    ///
    /// Passing the parsed value back in returns the source unchanged.
    pub fn update(&self, new: &Value) -> String {
        self.update_with_style(new, &self.style)
    }

    /// Render `new` over the original text using an explicit style for any
    /// content that has to be generated.
    pub fn update_with_style(&self, new: &Value, style: &JsoncStyle) -> String {
        let emitter = Emitter {
            src: &self.source,
            style,
        };
        let span = self.root.span.clone();
        let mut out = String::with_capacity(self.source.len() + 64);
        out.push_str(&self.source[..span.start]);
        emitter.emit(&self.root, new, "", &mut out);
        out.push_str(&self.source[span.end..]);
        out
    }
}

/// Parse JSONC text into a value.
pub fn parse(source: &str) -> Result<Value> {
    Ok(parser::parse(source)?.root.value)
}

/// Detect the formatting style of JSONC text.
pub fn analyze(source: &str) -> Result<JsoncStyle> {
    let parsed = parser::parse(source)?;
    Ok(JsoncStyle::detect(source, &parsed.stats))
}

/// Render `new` over `source`, preserving everything that did not change.
pub fn update(source: &str, new: &Value) -> Result<String> {
    Ok(JsoncDocument::parse(source)?.update(new))
}

/// Render a value as a fresh document in the given style, with a trailing
/// newline.
pub fn to_string_styled(value: &Value, style: &JsoncStyle) -> String {
    let emitter = Emitter { src: "", style };
    let mut out = String::new();
    emitter.render_fresh(value, "", &mut out);
    out.push_str(style.line_ending.as_str());
    out
}
