//! Status-driven cell styling

use std::collections::HashMap;

use itsreport_core::{ReportError, StyleDescriptor};

use crate::registry::{StyleHandle, StyleRegistry};

/// Registered status styles of one report
pub type StatusStyles = HashMap<String, StyleHandle>;

/// Mapped style of a status value, if it has one
pub fn status_style(status: Option<&str>, styles: &StatusStyles) -> Option<StyleHandle> {
    status.and_then(|s| styles.get(s)).copied()
}

/// Style for a status value, falling back to `default` for unknown or absent
/// statuses
pub fn style_for(status: Option<&str>, styles: &StatusStyles, default: StyleHandle) -> StyleHandle {
    status_style(status, styles).unwrap_or(default)
}

/// Register every status descriptor of a style bundle
pub fn register_status_styles(
    registry: &mut StyleRegistry,
    descriptors: &HashMap<String, StyleDescriptor>,
) -> Result<StatusStyles, ReportError> {
    descriptors
        .iter()
        .map(|(status, descriptor)| Ok((status.clone(), registry.register(descriptor)?)))
        .collect()
}
