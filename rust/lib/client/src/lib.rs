//! Palet HTTP client.
//!
//! [`ResourceClient`] speaks the backend's REST contract for one resource
//! type; [`EntityEditor`] drives a single create/edit form session on top
//! of it. Both are generic over the entity, so companies and pallets share
//! one implementation.
//!
//! # Usage
//!
//! ```ignore
//! use palet_client::{EntityEditor, ResourceClient};
//! use palet_core::Pallet;
//!
//! let editor = EntityEditor::new(ResourceClient::<Pallet>::new("http://localhost:5000"));
//! editor.open_edit(7).await?;
//! editor.set_field("price", "275").await?;
//! editor.submit().await?;
//! ```

mod debounce;
mod editor;
mod error;
mod resource;

pub use debounce::Debouncer;
pub use editor::{Confirm, Deleted, EntityEditor, FormState, Mode};
pub use error::ApiError;
pub use resource::{Ack, ClientOptions, ResourceClient};
