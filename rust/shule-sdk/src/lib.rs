//! # shule-sdk
//!
//! Rust client SDK for the Shule school-management REST backend.
//!
//! Every admin screen in the product does the same four things: fetch a
//! collection, derive the visible page from search text and filters,
//! edit one record in a draft form, and persist the draft back. This
//! crate is that pattern, once:
//!
//! - [`Transport`]: one normalized HTTP round trip (JSON or multipart)
//! - [`ResourceStore`]: the client-side copy of one collection, kept in
//!   sync by full refetch on mount and confirmed patches on mutation
//! - [`view`]: pure filter + paginate derivation
//! - [`FormSession`]: a validated draft with create-vs-update dispatch
//!
//! ## Example
//!
//! ```rust,ignore
//! use shule_sdk::prelude::*;
//!
//! let transport = Arc::new(HttpTransport::new(
//!     &ClientConfig::default(),
//!     Session::authenticated(token),
//! ));
//! let students: ResourceStore<Student> = ResourceStore::new(transport);
//! students.load().await?;
//!
//! let page = visible_rows(
//!     &students.snapshot().await,
//!     &FilterState::with_search("comp"),
//!     PageWindow::first(5),
//! );
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod form;
pub mod prelude;
pub mod session;
pub mod store;
pub mod transport;
pub mod view;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use entity::{EntityId, Resource};
pub use error::ClientError;
pub use form::{FieldRule, FormSession, ValidationErrors};
pub use session::Session;
pub use store::{ResourceStore, StoreEvent, StoreOp};
pub use transport::{
    get_as, FormField, FormValue, HttpTransport, Method, RequestBody, Transport,
};
pub use view::{filtered_rows, visible_rows, FilterState, PageView, PageWindow, ALL};

pub use serde_json::Value;
