use super::options::TextFormat;

/// One atomic piece of the multipart message body.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text {
        content: String,
        format: TextFormat,
    },
    /// Blank-line spacer between attachments.
    Separator {
        lines: u32,
    },
    File {
        filename: String,
        mime_type: String,
        data: Vec<u8>,
    },
    Image {
        content_id: String,
        subtype: String,
        data: Vec<u8>,
        inline: bool,
    },
}

impl Part {
    pub fn plain(content: impl Into<String>) -> Self {
        Part::Text {
            content: content.into(),
            format: TextFormat::Plain,
        }
    }

    pub fn markup(content: impl Into<String>) -> Self {
        Part::Text {
            content: content.into(),
            format: TextFormat::Markup,
        }
    }
}
