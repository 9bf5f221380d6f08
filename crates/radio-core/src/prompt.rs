use std::io::ErrorKind;
use std::path::Path;

use crate::error::PromptError;

/// Template text followed by every past name, comma-joined with no spaces.
///
/// History is included verbatim: no dedup, no sorting, no cap.
pub fn build(past_names: &[String], template_path: &Path) -> Result<String, PromptError> {
    let template = std::fs::read_to_string(template_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PromptError::TemplateNotFound(template_path.to_path_buf()),
        _ => PromptError::Io {
            path: template_path.to_path_buf(),
            source: e,
        },
    })?;
    Ok(format!("{template}{}", past_names.join(",")))
}
