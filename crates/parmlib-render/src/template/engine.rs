//! The MiniJinja-backed renderer.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

use super::filters::register_filters;
use super::loader::directory_loader;
use crate::context::RenderContext;
use crate::data::InputData;
use crate::error::{Error, Result};

/// Renders templates found under a root directory.
///
/// The renderer is an ordinary value: each caller builds its own, nothing is
/// shared between instances.
///
/// # Example
///
/// ```rust,no_run
/// use parmlib_render::{InputData, Renderer};
///
/// let data = InputData::load("db2.yaml")?;
/// let output = Renderer::new(".").render("templates/ieasys.j2", &data)?;
/// # Ok::<(), parmlib_render::Error>(())
/// ```
pub struct Renderer {
    env: Environment<'static>,
    root: PathBuf,
}

impl Renderer {
    /// Creates a renderer whose templates are resolved under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();

        let mut env = Environment::new();
        // Printing or iterating an undefined value fails; `{% if missing %}` is false.
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);
        env.set_debug(true);
        // Members are plain text: never HTML-escape, whatever the extension.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_loader(directory_loader(root.clone()));
        register_filters(&mut env);

        Self { env, root }
    }

    /// The directory templates are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Renders `template` with `data`, stamping `now` at the moment of the
    /// call.
    pub fn render(&self, template: &str, data: &InputData) -> Result<String> {
        let ctx = RenderContext::new(data);
        self.render_context(template, &ctx)
    }

    /// Renders `template` with a prepared context.
    pub fn render_context(&self, template: &str, ctx: &RenderContext) -> Result<String> {
        let tmpl = self.env.get_template(template).map_err(|err| {
            if err.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound(template.to_string())
            } else {
                Error::from(err)
            }
        })?;

        log::debug!(
            "rendering {} (root {}) with {} variables",
            template,
            self.root.display(),
            ctx.values().len()
        );
        Ok(tmpl.render(ctx.values())?)
    }

    /// Renders template source directly, without going through the loader.
    ///
    /// Includes inside `source` still resolve under the root.
    pub fn render_str(&self, source: &str, ctx: &RenderContext) -> Result<String> {
        Ok(self.env.render_str(source, ctx.values())?)
    }
}

impl Default for Renderer {
    /// A renderer rooted at the current working directory.
    fn default() -> Self {
        Self::new(".")
    }
}
