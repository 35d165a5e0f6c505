use quick_xml::se::Serializer;
use serde::Serialize;

use super::{EncodeError, Encoder};

const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// XML encoder backed by quick-xml's serde support.
///
/// Struct names become the root element unless `root_tag` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlEncoder {
    pub pretty_print: bool,
    pub root_tag: Option<String>,
}

impl XmlEncoder {
    pub fn new(pretty_print: bool) -> Self {
        Self {
            pretty_print,
            root_tag: None,
        }
    }

    pub fn with_root_tag(mut self, root_tag: impl Into<String>) -> Self {
        self.root_tag = Some(root_tag.into());
        self
    }
}

impl Encoder for XmlEncoder {
    fn encode(&self, data: &dyn erased_serde::Serialize) -> Result<Vec<u8>, EncodeError> {
        let mut output = String::new();
        let mut serializer = match self.root_tag.as_deref() {
            Some(root) => Serializer::with_root(&mut output, Some(root))?,
            None => Serializer::new(&mut output),
        };
        if self.pretty_print {
            serializer.indent(' ', 2);
        }

        data.serialize(serializer)?;
        Ok(output.into_bytes())
    }

    fn content_type(&self) -> &str {
        CONTENT_TYPE
    }
}
