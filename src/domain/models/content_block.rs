use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockStyle {
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, alias = "backgroundColor")]
    pub background_color: Option<String>,
    #[serde(default, alias = "fontSize")]
    pub font_size: Option<u32>,
}

/// One entry of an email builder layout. Order is meaningful and owned by the caller.
///
/// Any `type` the renderer does not know deserializes to [`ContentBlock::Unknown`]
/// and is skipped at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading {
        content: String,
        #[serde(default)]
        level: Option<u8>,
        #[serde(default)]
        style: BlockStyle,
    },
    Paragraph {
        content: String,
        #[serde(default)]
        style: BlockStyle,
    },
    Button {
        text: String,
        url: String,
        #[serde(default)]
        style: BlockStyle,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        width: Option<String>,
        #[serde(default)]
        style: BlockStyle,
    },
    Divider {
        #[serde(default)]
        thickness: Option<u32>,
        #[serde(default)]
        style: BlockStyle,
    },
    Spacer {
        #[serde(default)]
        height: Option<u32>,
    },
    #[serde(other)]
    Unknown,
}
