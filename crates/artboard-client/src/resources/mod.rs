//! Typed wrappers over the Artboard REST resources
//!
//! Each resource borrows the client and translates method calls into
//! endpoint paths and serde-modelled records. All calls go through the
//! client's retry policy.

pub mod api_keys;
pub mod assets;
pub mod billing;
pub mod canvas;
pub mod designs;
pub mod renders;
pub mod templates;
pub mod usage;

pub use api_keys::{ApiKey, ApiKeys, CreatedApiKey};
pub use assets::{Asset, Assets};
pub use billing::{Billing, Invoice, Plan};
pub use canvas::{Canvas, CanvasElement, ElementKind, ElementUpdate, NewElement};
pub use designs::{CreateDesign, Design, Designs};
pub use renders::{BatchJob, RenderBatch, RenderFormat, RenderJob, RenderRequest, Renders};
pub use templates::{Template, Templates};
pub use usage::{Usage, UsageSummary};
