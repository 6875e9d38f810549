use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Plain,
    Markup,
}

/// Fully resolved per-attachment behavior. Every field is concrete.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    pub inline: bool,
    pub delete_source: bool,
    pub append_break: bool,
    pub break_count: u32,
    pub text_format: TextFormat,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            inline: false,
            delete_source: false,
            append_break: true,
            break_count: 1,
            text_format: TextFormat::Plain,
        }
    }
}

/// Partial override; absent fields inherit the defaults.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub inline: Option<bool>,
    pub delete_source: Option<bool>,
    pub append_break: Option<bool>,
    pub break_count: Option<u32>,
    pub text_format: Option<TextFormat>,
}

pub fn resolve(defaults: &DeliveryOptions, patch: Option<&OptionsPatch>) -> DeliveryOptions {
    let Some(patch) = patch else {
        return defaults.clone();
    };

    DeliveryOptions {
        inline: patch.inline.unwrap_or(defaults.inline),
        delete_source: patch.delete_source.unwrap_or(defaults.delete_source),
        append_break: patch.append_break.unwrap_or(defaults.append_break),
        break_count: patch.break_count.unwrap_or(defaults.break_count),
        text_format: patch.text_format.unwrap_or(defaults.text_format),
    }
}
