//! # parmlib-render
//!
//! Builds a parmlib member from a YAML data file and a Jinja template.
//!
//! The work is a straight pipeline:
//!
//! 1. [`InputData::load`] reads the data file (ISO-8859-1) into a mapping
//! 2. [`Renderer::render`] merges it into a template, injecting `now` and
//!    `source_file`
//! 3. [`MemberTarget::write`] writes the rendered text to the member path
//!
//! [`build_member`] runs all three. The member is fully rendered in memory
//! before the target is touched, so a data or template error never leaves a
//! half-written member behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use parmlib_render::{build_member, BuildRequest};
//!
//! let request = BuildRequest::new("templates/ieasys.j2", "sysa.yaml", "IEASYS00");
//! build_member(&request)?;
//! # Ok::<(), parmlib_render::Error>(())
//! ```
//!
//! ## Template variables
//!
//! Every top-level key of the data file is a variable. In addition:
//!
//! - `now`: the render time in UTC. Prints like `2024-05-01 12:34:56+00:00`,
//!   supports `now.strftime('%Y')`, `now.isoformat()`, `now.year` and friends
//! - `source_file`: the data file path as given
//!
//! Keys in the data file take precedence over both; see [`context`].

pub mod context;
pub mod data;
pub mod error;
pub mod output;
pub mod template;
pub mod timestamp;

use std::path::PathBuf;

pub use context::RenderContext;
pub use data::InputData;
pub use error::{Error, Result};
pub use output::MemberTarget;
pub use template::Renderer;
pub use timestamp::Timestamp;

/// The dataset members are nominally destined for.
pub const DEFAULT_DATASET: &str = "SYS1.PARMLIB";

/// Everything needed to build one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Template name, relative to `template_root`.
    pub template: String,
    /// Path of the YAML data file.
    pub data: PathBuf,
    /// Path the member is written to.
    pub member: PathBuf,
    /// Directory templates are resolved against.
    pub template_root: PathBuf,
}

impl BuildRequest {
    /// A request resolving templates against the current directory.
    pub fn new(
        template: impl Into<String>,
        data: impl Into<PathBuf>,
        member: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template: template.into(),
            data: data.into(),
            member: member.into(),
            template_root: PathBuf::from("."),
        }
    }

    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.template_root = root.into();
        self
    }
}

/// Loads, renders and writes one member.
///
/// Returns the rendered text on success.
pub fn build_member(request: &BuildRequest) -> Result<String> {
    let data = InputData::load(&request.data)?;
    let renderer = Renderer::new(&request.template_root);
    let output = renderer.render(&request.template, &data)?;
    MemberTarget::new(&request.member).write(&output)?;
    Ok(output)
}
