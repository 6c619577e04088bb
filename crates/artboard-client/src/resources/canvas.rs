//! Canvas mutation: elements on a design's canvas

use crate::{ArtboardClient, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Kind of a canvas element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Styled text block
    Text,
    /// Placed image, referencing an asset
    Image,
    /// Vector shape
    Shape,
}

/// An element placed on a design's canvas
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasElement {
    /// Unique identifier, `el_` prefixed
    pub id: String,
    /// Element kind
    pub kind: ElementKind,
    /// Left edge, in canvas pixels
    pub x: f64,
    /// Top edge, in canvas pixels
    pub y: f64,
    /// Width in canvas pixels
    pub width: f64,
    /// Height in canvas pixels
    pub height: f64,
    /// Clockwise rotation in degrees
    #[serde(default)]
    pub rotation: f64,
    /// Kind-specific payload: text runs, asset reference, or path data
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Parameters for placing a new element
#[derive(Debug, Clone, Serialize)]
pub struct NewElement {
    kind: ElementKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    content: serde_json::Value,
}

impl NewElement {
    /// A new element with the given kind, position, and size
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            rotation: None,
            content: serde_json::Value::Null,
        }
    }

    /// Rotate the element, clockwise degrees
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Attach the kind-specific payload
    pub fn with_content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }
}

/// Partial update for an existing element; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<serde_json::Value>,
}

impl ElementUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the left edge
    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Move the top edge
    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Resize horizontally
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Resize vertically
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Rotate, clockwise degrees
    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Replace the kind-specific payload
    pub fn content(mut self, content: serde_json::Value) -> Self {
        self.content = Some(content);
        self
    }
}

/// Canvas operations, obtained from [`ArtboardClient::canvas`]
#[derive(Debug)]
pub struct Canvas<'a> {
    client: &'a ArtboardClient,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(client: &'a ArtboardClient) -> Self {
        Self { client }
    }

    /// Place a new element on the design's canvas
    pub async fn add_element(
        &self,
        design_id: &str,
        element: &NewElement,
    ) -> Result<CanvasElement> {
        self.client
            .post(
                &format!("designs/{design_id}/elements"),
                serde_json::to_value(element)?,
            )
            .await
    }

    /// Apply a partial update to an element
    pub async fn update_element(
        &self,
        design_id: &str,
        element_id: &str,
        update: &ElementUpdate,
    ) -> Result<CanvasElement> {
        self.client
            .patch(
                &format!("designs/{design_id}/elements/{element_id}"),
                serde_json::to_value(update)?,
            )
            .await
    }

    /// Remove an element from the canvas
    pub async fn remove_element(&self, design_id: &str, element_id: &str) -> Result<()> {
        self.client
            .delete(&format!("designs/{design_id}/elements/{element_id}"))
            .await
    }

    /// Restack the canvas: element ids in back-to-front order.
    ///
    /// Ids missing from `order` keep their relative stacking below the
    /// reordered ones; unknown ids are rejected with a validation error.
    pub async fn reorder(&self, design_id: &str, order: &[&str]) -> Result<()> {
        self.client
            .post_no_content(
                &format!("designs/{design_id}/elements/reorder"),
                json!({ "order": order }),
            )
            .await
    }
}
