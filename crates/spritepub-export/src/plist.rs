//! Minimal XML property-list encoder.
//!
//! Only the value types the atlas descriptors need are supported. Dictionary
//! keys are emitted in sorted order, so output does not depend on the order
//! entries were inserted.

use std::collections::BTreeMap;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
<plist version=\"1.0\">\n";

/// A property-list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Array(Vec<PlistValue>),
    Dictionary(BTreeMap<String, PlistValue>),
}

impl PlistValue {
    /// Creates an empty dictionary.
    pub fn dictionary() -> Self {
        PlistValue::Dictionary(BTreeMap::new())
    }

    /// Returns the dictionary entries, if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, PlistValue>> {
        match self {
            PlistValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up `key` if this is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }

    /// Encodes the value as a complete XML plist document.
    pub fn to_xml(&self) -> String {
        let mut out = String::from(XML_HEADER);
        write_value(&mut out, self, 0);
        out.push_str("</plist>\n");
        out
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        PlistValue::Integer(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Boolean(value)
    }
}

impl From<BTreeMap<String, PlistValue>> for PlistValue {
    fn from(value: BTreeMap<String, PlistValue>) -> Self {
        PlistValue::Dictionary(value)
    }
}

fn write_value(out: &mut String, value: &PlistValue, depth: usize) {
    let indent = "\t".repeat(depth);
    match value {
        PlistValue::String(s) => {
            out.push_str(&format!("{}<string>{}</string>\n", indent, escape(s)));
        }
        PlistValue::Integer(n) => {
            out.push_str(&format!("{}<integer>{}</integer>\n", indent, n));
        }
        PlistValue::Boolean(true) => out.push_str(&format!("{}<true/>\n", indent)),
        PlistValue::Boolean(false) => out.push_str(&format!("{}<false/>\n", indent)),
        PlistValue::Array(items) if items.is_empty() => {
            out.push_str(&format!("{}<array/>\n", indent));
        }
        PlistValue::Array(items) => {
            out.push_str(&format!("{}<array>\n", indent));
            for item in items {
                write_value(out, item, depth + 1);
            }
            out.push_str(&format!("{}</array>\n", indent));
        }
        PlistValue::Dictionary(dict) if dict.is_empty() => {
            out.push_str(&format!("{}<dict/>\n", indent));
        }
        PlistValue::Dictionary(dict) => {
            out.push_str(&format!("{}<dict>\n", indent));
            let key_indent = "\t".repeat(depth + 1);
            for (key, item) in dict {
                out.push_str(&format!("{}<key>{}</key>\n", key_indent, escape(key)));
                write_value(out, item, depth + 1);
            }
            out.push_str(&format!("{}</dict>\n", indent));
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
