//! Palet domain core.
//!
//! Everything here is pure: records in, records out. The host (CLI,
//! web page, tests) marshals raw input into these types and renders
//! whatever comes back.

pub mod collate;
pub mod desi;
pub mod filter;
pub mod form;
pub mod i18n;
pub mod model;
pub mod validate;

pub use desi::{desi, round2, DesiBreakdown, DesiInput};
pub use filter::{
    details_url, filter_and_sort, ExportLinks, FilterSpec, FilteredView, Listable, SortDirection,
    SortKey, SortSpec, UnknownSortOrder, ViewContext,
};
pub use form::{Editable, Field, FieldKind, FormValues};
pub use i18n::{classify_backend_message, Locale, Message};
pub use model::{Company, Pallet, Resource, BLOCK_QUANTITY};
pub use validate::{validate, FieldError, Problem, ValidationErrors};
