//! Fixture placeholder resolution.
//!
//! Case paths may reference values captured by earlier cases with
//! `{{key}}`. Resolution happens right before the request is built; a key
//! that was never written is a missing prerequisite, not a crash.

mod parser;

pub use parser::{Placeholder, parse_placeholders};

use probe_domain::FixtureState;

use crate::error::{HarnessError, HarnessResult};

/// Substitutes every `{{key}}` in `template` with the rendered fixture
/// value.
///
/// # Errors
///
/// Returns `HarnessError::MissingFixture` naming the first key that has no
/// value.
pub fn resolve_placeholders(template: &str, fixtures: &FixtureState) -> HarnessResult<String> {
    let placeholders = parse_placeholders(template);
    if placeholders.is_empty() {
        return Ok(template.to_string());
    }

    let mut resolved = String::with_capacity(template.len());
    let mut cursor = 0;
    for placeholder in placeholders {
        let value = fixtures
            .render(&placeholder.name)
            .ok_or_else(|| HarnessError::MissingFixture(placeholder.name.clone()))?;
        resolved.push_str(&template[cursor..placeholder.span.start]);
        resolved.push_str(&value);
        cursor = placeholder.span.end;
    }
    resolved.push_str(&template[cursor..]);

    Ok(resolved)
}
