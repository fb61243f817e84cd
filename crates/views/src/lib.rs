//! Server-side HTML rendering for coaster-reviews.
//!
//! Every page is a plain function from typed view data to a `String` of
//! HTML. Pages share one [`layout`](layout::render) with the navigation bar,
//! the flash message and the like-button script.
//!
//! # Example
//!
//! ```
//! use coaster_views::{PageContext, pages};
//!
//! let ctx = PageContext::anonymous();
//! let html = pages::login(&ctx, None);
//! assert!(html.contains("<form"));
//! ```

mod escape;
mod flash;
pub mod layout;
pub mod pages;

pub use escape::html_escape;
pub use flash::Flash;
pub use layout::PageContext;
