use std::path::PathBuf;

use serde::Deserialize;
use serde::de::{Deserializer, Error as _};
use serde_json::Value;

use super::options::OptionsPatch;
use super::table::Table;

/// Kind-tagged attachment payload. Unknown wire tags land in `Unrecognized`
/// instead of failing the parse; the pipeline rejects them per descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Tabular(Table),
    File(PathBuf),
    Image(PathBuf),
    Unrecognized(String),
}

impl Content {
    pub fn kind(&self) -> &str {
        match self {
            Content::Text(_) => "text",
            Content::Tabular(_) => "tabular",
            Content::File(_) => "file",
            Content::Image(_) => "image",
            Content::Unrecognized(kind) => kind,
        }
    }
}

/// One request to embed a unit of content into the outgoing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub content: Content,
    pub options: Option<OptionsPatch>,
}

impl Descriptor {
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Content::Text(text.into()))
    }

    pub fn tabular(table: Table) -> Self {
        Self::new(Content::Tabular(table))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Content::File(path.into()))
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::new(Content::Image(path.into()))
    }

    pub fn with_options(mut self, patch: OptionsPatch) -> Self {
        self.options = Some(patch);
        self
    }

    fn new(content: Content) -> Self {
        Self {
            content,
            options: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    kind: String,
    #[serde(default)]
    input: Value,
    #[serde(default)]
    options: Option<OptionsPatch>,
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDescriptor::deserialize(deserializer)?;
        let content = match raw.kind.as_str() {
            "text" => Content::Text(serde_json::from_value(raw.input).map_err(D::Error::custom)?),
            "tabular" => {
                Content::Tabular(serde_json::from_value(raw.input).map_err(D::Error::custom)?)
            }
            "file" => Content::File(serde_json::from_value(raw.input).map_err(D::Error::custom)?),
            "image" => Content::Image(serde_json::from_value(raw.input).map_err(D::Error::custom)?),
            _ => Content::Unrecognized(raw.kind),
        };

        Ok(Descriptor {
            content,
            options: raw.options,
        })
    }
}

/// Wire form of a batch: a single descriptor object or an ordered array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptorBatch {
    Many(Vec<Descriptor>),
    One(Descriptor),
}

impl IntoIterator for DescriptorBatch {
    type Item = Descriptor;
    type IntoIter = std::vec::IntoIter<Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            DescriptorBatch::Many(descriptors) => descriptors.into_iter(),
            DescriptorBatch::One(descriptor) => vec![descriptor].into_iter(),
        }
    }
}
