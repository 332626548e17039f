//! Filesystem template loader.
//!
//! Template names are `/`-separated paths relative to a root directory.
//! Empty and `.` segments are skipped, so a leading `/` does not make a name
//! absolute: `/a/b.j2` resolves to `<root>/a/b.j2`, as Jinja's
//! `FileSystemLoader` does. Names containing `..` never resolve, so templates
//! cannot reach outside the root through `{% include %}` or the command line.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::{Error, ErrorKind};

/// Maps a template name to a path under `root`.
///
/// Returns `None` for names that must not resolve.
pub fn resolve(root: &Path, name: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut pushed = false;
    for segment in name.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment if std::path::MAIN_SEPARATOR != '/'
                && segment.contains(std::path::MAIN_SEPARATOR) =>
            {
                return None
            }
            segment => {
                path.push(segment);
                pushed = true;
            }
        }
    }

    pushed.then_some(path)
}

/// Builds a loader callback for [`minijinja::Environment::set_loader`].
///
/// A name that does not resolve, or whose file does not exist, yields
/// `Ok(None)` so the engine reports it as "template not found". Other read
/// failures are surfaced with the I/O error attached.
pub fn directory_loader(
    root: PathBuf,
) -> impl Fn(&str) -> Result<Option<String>, Error> + Send + Sync + 'static {
    move |name| {
        let Some(path) = resolve(&root, name) else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                log::debug!("loaded template {} from {}", name, path.display());
                Ok(Some(source))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template {}", path.display()),
            )
            .with_source(err)),
        }
    }
}
