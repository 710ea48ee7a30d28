//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the
//! generation form, the overlay selection and any pending notice.

mod form;
mod model;

pub use form::*;
pub use model::*;
