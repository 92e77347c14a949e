use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use figscope_core::document::Document;
use figscope_core::node::{BoundingBox, FillColor, FontStyle, Node, NodeType, ShapeType};

const API_BASE: &str = "https://api.figma.com/v1";
const TOKEN_HEADER: &str = "X-FIGMA-TOKEN";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum FigmaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Figma API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    Document(String),
}

// ── Client ────────────────────────────────────────────────────────────

/// Thin wrapper over one authenticated GET against the Figma file endpoint.
pub struct FigmaClient {
    http: reqwest::blocking::Client,
}

impl FigmaClient {
    pub fn new() -> Result<Self, FigmaError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http })
    }

    /// Fetch one file and parse it into a document.
    ///
    /// Blocking on the calling thread: the viewer is single-threaded, and a
    /// fetch runs to completion or failure with no cancellation beyond the
    /// client's own timeouts.
    pub fn fetch_file(&self, access_token: &str, file_key: &str) -> Result<Document, FigmaError> {
        let url = format!("{}/files/{}", API_BASE, file_key.trim());
        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, access_token.trim())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FigmaError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        log::info!("fetched file {} ({} bytes)", file_key.trim(), body.len());
        parse_document(&body)
    }
}

/// Pull the human-readable message out of a Figma error body; fall back to
/// the raw body when it isn't the usual `{"status": ..., "err": ...}` shape.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        err: Option<String>,
        message: Option<String>,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e
            .err
            .or(e.message)
            .unwrap_or_else(|| body.trim().to_string()),
        Err(_) => body.trim().to_string(),
    }
}

// ── Wire format ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileResponse {
    name: String,
    #[serde(rename = "lastModified")]
    last_modified: Option<String>,
    version: Option<String>,
    document: Option<WireNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireNode {
    id: String,
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    children: Vec<WireNode>,
    #[serde(rename = "absoluteBoundingBox")]
    absolute_bounding_box: Option<WireBoundingBox>,
    fills: Vec<WirePaint>,
    #[serde(rename = "shapeType")]
    shape_type: Option<String>,
    characters: Option<String>,
    style: Option<WireTypeStyle>,
}

#[derive(Debug, Deserialize)]
struct WireBoundingBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WirePaint {
    color: Option<WireColor>,
}

#[derive(Debug, Deserialize)]
struct WireColor {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTypeStyle {
    #[serde(rename = "fontFamily")]
    font_family: Option<String>,
    #[serde(rename = "fontSize")]
    font_size: Option<f64>,
}

// ── Parsing ───────────────────────────────────────────────────────────

/// Parse a Figma file response into the document model.
///
/// The drawable list is `document.children[0].children` — the top-level
/// children of the first page. Wire nodes without a bounding box cannot be
/// fit or drawn and are dropped with a log line; every other optional field
/// is carried as `None` and judged per node at render time.
pub fn parse_document(json: &str) -> Result<Document, FigmaError> {
    let file: FileResponse = serde_json::from_str(json)?;

    let root = file
        .document
        .ok_or_else(|| FigmaError::Document("response has no document root".to_string()))?;
    let mut pages = root.children;
    if pages.is_empty() {
        return Err(FigmaError::Document("document has no pages".to_string()));
    }
    let page = pages.remove(0);

    let mut nodes = Vec::with_capacity(page.children.len());
    for wire in page.children {
        if let Some(node) = to_node(wire) {
            nodes.push(node);
        }
    }

    log::info!(
        "parsed document '{}': {} drawable nodes on page '{}'",
        file.name,
        nodes.len(),
        page.name
    );

    Ok(Document {
        name: file.name,
        last_modified: file.last_modified,
        version: file.version,
        nodes,
    })
}

fn to_node(wire: WireNode) -> Option<Node> {
    let bounding_box = match wire.absolute_bounding_box {
        Some(b) => BoundingBox::new(b.x, b.y, b.width, b.height),
        None => {
            log::warn!(
                "dropping node {} ({}): no bounding box",
                wire.id,
                wire.node_type
            );
            return None;
        }
    };

    let fill = wire
        .fills
        .first()
        .and_then(|p| p.color.as_ref())
        .map(|c| FillColor::new(c.r, c.g, c.b, c.a));

    let font = wire.style.as_ref().and_then(|s| {
        match (s.font_family.as_ref(), s.font_size) {
            (Some(family), Some(size)) => Some(FontStyle {
                family: family.clone(),
                size,
            }),
            _ => None,
        }
    });

    Some(Node {
        id: wire.id,
        name: wire.name,
        node_type: NodeType::from_tag(&wire.node_type),
        shape_type: wire.shape_type.as_deref().map(ShapeType::from_tag),
        bounding_box,
        fill,
        characters: wire.characters,
        font,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "Wireframes",
        "lastModified": "2026-05-14T09:30:00Z",
        "version": "1234567890",
        "role": "viewer",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [
                {
                    "id": "0:1",
                    "name": "Page 1",
                    "type": "CANVAS",
                    "children": [
                        {
                            "id": "1:2",
                            "name": "Card",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": { "x": 10.0, "y": 20.0, "width": 200.0, "height": 100.0 },
                            "fills": [ { "blendMode": "NORMAL", "type": "SOLID", "color": { "r": 1.0, "g": 0.5, "b": 0.25, "a": 0.75 } } ]
                        },
                        {
                            "id": "1:3",
                            "name": "Start",
                            "type": "SHAPE_WITH_TEXT",
                            "shapeType": "ELLIPSE",
                            "characters": "Start",
                            "absoluteBoundingBox": { "x": 0.0, "y": 0.0, "width": 80.0, "height": 80.0 },
                            "fills": [ { "color": { "r": 0.0, "g": 1.0, "b": 0.0, "a": 1.0 } } ]
                        },
                        {
                            "id": "1:4",
                            "name": "Label",
                            "type": "TEXT",
                            "characters": "Hello",
                            "style": { "fontFamily": "Inter", "fontWeight": 400, "fontSize": 14.0 },
                            "absoluteBoundingBox": { "x": 5.0, "y": 5.0, "width": 60.0, "height": 18.0 },
                            "fills": [ { "color": { "r": 0.0, "g": 0.0, "b": 0.0, "a": 1.0 } } ]
                        },
                        {
                            "id": "1:5",
                            "name": "Arrow",
                            "type": "CONNECTOR",
                            "absoluteBoundingBox": { "x": 0.0, "y": 0.0, "width": 40.0, "height": 4.0 }
                        },
                        {
                            "id": "1:6",
                            "name": "Ghost",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": null
                        },
                        {
                            "id": "1:7",
                            "name": "NoFill",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": { "x": 1.0, "y": 1.0, "width": 2.0, "height": 2.0 }
                        },
                        {
                            "id": "1:8",
                            "name": "Odd",
                            "type": "SHAPE_WITH_TEXT",
                            "shapeType": "TRIANGLE_UP",
                            "characters": "?",
                            "absoluteBoundingBox": { "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0 },
                            "fills": [ { "color": { "r": 0.5, "g": 0.5, "b": 0.5, "a": 1.0 } } ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_fixture() {
        let doc = parse_document(FIXTURE).unwrap();
        assert_eq!(doc.name, "Wireframes");
        assert_eq!(doc.last_modified.as_deref(), Some("2026-05-14T09:30:00Z"));
        assert_eq!(doc.version.as_deref(), Some("1234567890"));
        // 1:6 has no bounding box and is dropped
        assert_eq!(doc.node_count(), 6);

        let card = &doc.nodes[0];
        assert_eq!(card.id, "1:2");
        assert_eq!(card.node_type, NodeType::Rectangle);
        assert_eq!(card.shape_type, None);
        assert!((card.bounding_box.x - 10.0).abs() < 1e-10);
        assert!((card.bounding_box.width - 200.0).abs() < 1e-10);
        let fill = card.fill.expect("card has a fill");
        assert!((fill.a - 0.75).abs() < 1e-6);

        let start = &doc.nodes[1];
        assert_eq!(start.node_type, NodeType::ShapeWithText);
        assert_eq!(start.shape_type, Some(ShapeType::Ellipse));
        assert_eq!(start.characters.as_deref(), Some("Start"));

        let label = &doc.nodes[2];
        assert_eq!(label.node_type, NodeType::Text);
        let font = label.font.as_ref().expect("text node has a font");
        assert_eq!(font.family, "Inter");
        assert!((font.size - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_type_is_kept_as_other() {
        let doc = parse_document(FIXTURE).unwrap();
        let arrow = doc.nodes.iter().find(|n| n.id == "1:5").unwrap();
        assert_eq!(arrow.node_type, NodeType::Other);
    }

    #[test]
    fn test_missing_fill_parses_as_none() {
        let doc = parse_document(FIXTURE).unwrap();
        let no_fill = doc.nodes.iter().find(|n| n.id == "1:7").unwrap();
        assert!(no_fill.fill.is_none());
    }

    #[test]
    fn test_unhandled_shape_tag_parses_as_other() {
        let doc = parse_document(FIXTURE).unwrap();
        let odd = doc.nodes.iter().find(|n| n.id == "1:8").unwrap();
        assert_eq!(odd.shape_type, Some(ShapeType::Other));
    }

    #[test]
    fn test_missing_document_root() {
        let err = parse_document(r#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, FigmaError::Document(_)));
    }

    #[test]
    fn test_document_without_pages() {
        let err = parse_document(
            r#"{"name": "x", "document": {"id": "0:0", "type": "DOCUMENT", "children": []}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FigmaError::Document(_)));
    }

    #[test]
    fn test_garbage_body_is_a_json_error() {
        let err = parse_document("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, FigmaError::Json(_)));
    }

    #[test]
    fn test_page_without_children_yields_empty_document() {
        let doc = parse_document(
            r#"{"name": "x", "document": {"id": "0:0", "type": "DOCUMENT",
                "children": [{"id": "0:1", "type": "CANVAS"}]}}"#,
        )
        .unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_api_error_message_extraction() {
        assert_eq!(
            api_error_message(r#"{"status": 403, "err": "Invalid token"}"#),
            "Invalid token"
        );
        assert_eq!(api_error_message("upstream timeout"), "upstream timeout");
    }
}
