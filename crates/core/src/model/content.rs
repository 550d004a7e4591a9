use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("content item `{kind}` has malformed data: {reason}")]
    MalformedData { kind: String, reason: String },
}

//
// ─── CONTENT ITEMS ─────────────────────────────────────────────────────────────
//

/// One block of lesson content, keyed by the `type` tag of the course file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawContentItem")]
pub enum ContentItem {
    /// A paragraph of text.
    Text(String),
    /// A bullet list.
    List(Vec<String>),
    /// An embeddable video. The source goes into the player as written, so
    /// relative and protocol-relative paths are kept.
    Video(String),
    /// A collapsible tip box.
    Tip(TipBox),
    /// The lesson's action row; hosts the completion control.
    Actions(ActionBlock),
    /// A `type` tag this player does not know. Renders nothing.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TipBox {
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionBlock {
    #[serde(default)]
    pub download: Option<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadLink {
    pub url: String,
    pub text: String,
}

impl ContentItem {
    /// The tag this item was loaded from.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::List(_) => "list",
            ContentItem::Video(_) => "video",
            ContentItem::Tip(_) => "tip",
            ContentItem::Actions(_) => "actions",
            ContentItem::Unsupported(kind) => kind,
        }
    }

    #[must_use]
    pub fn is_actions(&self) -> bool {
        matches!(self, ContentItem::Actions(_))
    }
}

//
// ─── RAW (as found in the course file) ─────────────────────────────────────────
//

#[derive(Deserialize)]
struct RawContentItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

fn malformed(kind: &str, err: &serde_json::Error) -> ContentError {
    ContentError::MalformedData {
        kind: kind.to_owned(),
        reason: err.to_string(),
    }
}

impl TryFrom<RawContentItem> for ContentItem {
    type Error = ContentError;

    fn try_from(raw: RawContentItem) -> Result<Self, Self::Error> {
        let RawContentItem { kind, data } = raw;
        let item = match kind.as_str() {
            "text" => ContentItem::Text(
                serde_json::from_value(data).map_err(|e| malformed(&kind, &e))?,
            ),
            "list" => ContentItem::List(
                serde_json::from_value(data).map_err(|e| malformed(&kind, &e))?,
            ),
            "video" => {
                let src: String =
                    serde_json::from_value(data).map_err(|e| malformed(&kind, &e))?;
                ContentItem::Video(src.trim().to_owned())
            }
            "tip" => ContentItem::Tip(
                serde_json::from_value(data).map_err(|e| malformed(&kind, &e))?,
            ),
            "actions" => {
                let block = if data.is_null() {
                    ActionBlock::default()
                } else {
                    serde_json::from_value(data).map_err(|e| malformed(&kind, &e))?
                };
                ContentItem::Actions(block)
            }
            _ => ContentItem::Unsupported(kind),
        };
        Ok(item)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
