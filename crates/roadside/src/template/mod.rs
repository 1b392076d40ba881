//! Footprint templates and the catalog loader.
//!
//! A template is a closed outline in its own frame (meters): horizontal center
//! at `x = 0`, front edge on `y = 0`, body extending into `+y`. `width` runs
//! along the road, `length` away from it.
//!
//! The loader never fails a whole catalog: a record with a missing or unusable
//! outline becomes a plain rectangle and the substitution is noted.

mod catalog;
mod types;

pub use catalog::{
    catalog_from_json, load_catalog, Catalog, CatalogNote, TemplateRecord, FALLBACK_LENGTH_M,
    FALLBACK_WIDTH_M,
};
pub use types::{FootprintTemplate, TemplateIssue};
