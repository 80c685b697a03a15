#![forbid(unsafe_code)]

//! JSON parser for DOM events forwarded by the page script.
//!
//! [`parse_dom_event`] accepts one JSON object per DOM event, with a `kind`
//! naming the DOM event type, and returns the matching [`InputEvent`].
//! Coordinates are CSS pixels (`clientX`/`clientY`).
//!
//! ```json
//! {"kind":"mousedown","x":120.5,"y":48}
//! {"kind":"touchmove","touches":[{"id":0,"x":10,"y":20}]}
//! {"kind":"resize","width":1280,"height":800}
//! ```
//!
//! Page events the widget does not react to (keyboard, wheel, focus) parse
//! to `Ok(None)`. Unrecognised kinds are an error so that a misspelled
//! forwarder is caught early.

use fab_core::event::{InputEvent, TouchPoint};
use fab_core::geometry::{Point, Size};
use serde::Deserialize;

/// Errors from parsing forwarded DOM events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown event kind.
    UnknownKind(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownKind(kind) => write!(f, "unknown event kind: {kind}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawTouch {
    #[serde(default)]
    id: u32,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    touches: Vec<RawTouch>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    path: Option<String>,
}

impl RawInput {
    fn point(&self) -> Result<Point, InputParseError> {
        let x = self.x.ok_or(InputParseError::MissingField("x"))?;
        let y = self.y.ok_or(InputParseError::MissingField("y"))?;
        Ok(Point::new(x, y))
    }

    fn size(&self) -> Result<Size, InputParseError> {
        let width = self.width.ok_or(InputParseError::MissingField("width"))?;
        let height = self.height.ok_or(InputParseError::MissingField("height"))?;
        Ok(Size::new(width, height))
    }

    fn touch_points(&self) -> Vec<TouchPoint> {
        self.touches
            .iter()
            .map(|t| TouchPoint::new(t.id, t.x, t.y))
            .collect()
    }
}

/// Parse one forwarded DOM event.
///
/// Returns `Ok(None)` for page events the widget ignores and `Err` for
/// malformed JSON, missing fields, or unknown kinds.
pub fn parse_dom_event(json: &str) -> Result<Option<InputEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let event = match raw.kind.as_str() {
        "mousedown" => InputEvent::MouseDown(raw.point()?),
        "mousemove" => InputEvent::MouseMove(raw.point()?),
        "mouseup" => InputEvent::MouseUp,
        "touchstart" => InputEvent::TouchStart(raw.touch_points()),
        "touchmove" => InputEvent::TouchMove(raw.touch_points()),
        "touchend" | "touchcancel" => InputEvent::TouchEnd,
        "mouseenter" => InputEvent::HoverEnter,
        "mouseleave" => InputEvent::HoverExit,
        "click" => InputEvent::Click,
        "resize" => InputEvent::Resize(raw.size()?),
        "measure" => InputEvent::Measure(raw.size()?),
        "dismiss" => InputEvent::DismissModal,
        "navigate" => InputEvent::Navigate(raw.path.ok_or(InputParseError::MissingField("path"))?),
        "keydown" | "keyup" | "wheel" | "focus" | "blur" | "scroll" => return Ok(None),
        other => return Err(InputParseError::UnknownKind(other.to_owned())),
    };
    Ok(Some(event))
}
