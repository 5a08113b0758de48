//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shule_sdk::prelude::*;
//!
//! let transport = Arc::new(HttpTransport::new(&ClientConfig::default(), Session::anonymous()));
//! let courses: ResourceStore<Course> = ResourceStore::new(transport);
//! ```

pub use crate::{
    filtered_rows, get_as, visible_rows, ClientConfig, ClientError, EntityId, FieldRule,
    FilterState, FormField, FormSession, FormValue, HttpTransport, Method, PageView, PageWindow,
    RequestBody, Resource, ResourceStore, Session, StoreEvent, StoreOp, Transport,
    ValidationErrors, ALL, DEFAULT_PAGE_SIZE,
};
