//! Template rendering.
//!
//! [`Renderer`] wraps a MiniJinja environment whose loader is rooted at a
//! directory (the working directory for the command line). Templates are
//! looked up by path relative to that root; see [`loader`] for the rules.
//!
//! Printing or looping over an undefined variable is an error, not an empty
//! string, so a template that needs a key the data file does not define fails
//! before anything is written. Testing a missing key with `{% if %}` is
//! simply false, so optional keys still work.

pub mod engine;
pub mod filters;
pub mod loader;

pub use engine::Renderer;
pub use filters::register_filters;
