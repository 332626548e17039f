//! MiniJinja filter registration.

use minijinja::{Environment, Error, ErrorKind, Value};

use crate::timestamp::Timestamp;

/// Registers the member-building filters on a minijinja environment.
///
/// # Arguments
///
/// * `env` - The MiniJinja environment to register filters on
pub fn register_filters(env: &mut Environment<'static>) {
    // Usage: {{ now | strftime('%Y.%j') }}, same as now.strftime('%Y.%j')
    env.add_filter(
        "strftime",
        |value: Value, format: String| -> Result<String, Error> {
            match value.downcast_object_ref::<Timestamp>() {
                Some(ts) => ts.strftime(&format),
                None => Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("strftime expects a timestamp, got {}", value.kind()),
                )),
            }
        },
    );
}
