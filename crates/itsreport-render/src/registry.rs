//! Workbook-scoped style registry
//!
//! Every distinct [`StyleDescriptor`] is registered once and referenced by a
//! small integer handle. Handle 0 means "no style"; the calendar grid relies
//! on it to tell untouched cells from painted ones.

use std::collections::HashMap;

use itsreport_core::{ReportError, StyleDescriptor};

/// Opaque reference to a registered style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(u32);

impl StyleHandle {
    /// The reserved "no style" handle
    pub const NONE: StyleHandle = StyleHandle(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// Style table of one workbook
#[derive(Debug, Default)]
pub struct StyleRegistry {
    descriptors: Vec<StyleDescriptor>,
    handles: HashMap<StyleDescriptor, StyleHandle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, returning the existing handle for an equal one
    pub fn register(&mut self, descriptor: &StyleDescriptor) -> Result<StyleHandle, ReportError> {
        if let Some(handle) = self.handles.get(descriptor) {
            return Ok(*handle);
        }
        descriptor.validate()?;
        let id = u32::try_from(self.descriptors.len() + 1)
            .map_err(|_| ReportError::InvalidStyle("style table is full".into()))?;
        let handle = StyleHandle(id);
        self.descriptors.push(descriptor.clone());
        self.handles.insert(descriptor.clone(), handle);
        Ok(handle)
    }

    /// Register an optional descriptor; `None` maps to [`StyleHandle::NONE`]
    pub fn register_opt(
        &mut self,
        descriptor: Option<&StyleDescriptor>,
    ) -> Result<StyleHandle, ReportError> {
        descriptor.map_or(Ok(StyleHandle::NONE), |d| self.register(d))
    }

    pub fn get(&self, handle: StyleHandle) -> Option<&StyleDescriptor> {
        let index = handle.0.checked_sub(1)?;
        self.descriptors.get(index as usize)
    }

    /// Number of distinct styles registered
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered styles in handle order
    pub fn iter(&self) -> impl Iterator<Item = (StyleHandle, &StyleDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (StyleHandle(i as u32 + 1), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itsreport_core::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_descriptors_share_a_handle() {
        let mut registry = StyleRegistry::new();
        let a = registry.register(&StyleDescriptor::header()).unwrap();
        let b = registry.register(&StyleDescriptor::header()).unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_descriptors_get_distinct_handles() {
        let mut registry = StyleRegistry::new();
        let a = registry.register(&StyleDescriptor::new().fill(Color::rgb(0xFF0000))).unwrap();
        let b = registry.register(&StyleDescriptor::new().fill(Color::rgb(0x00FF00))).unwrap();
        assert_ne!(a, b);
        assert!(!a.is_none());
        assert_eq!(registry.get(b).unwrap().fill, Some(Color::rgb(0x00FF00)));
    }

    #[test]
    fn none_handle_resolves_to_nothing() {
        let registry = StyleRegistry::new();
        assert!(registry.get(StyleHandle::NONE).is_none());
        assert!(StyleHandle::default().is_none());
    }

    #[test]
    fn invalid_descriptor_is_rejected_and_not_stored() {
        let mut registry = StyleRegistry::new();
        let result = registry.register(&StyleDescriptor::new().font_size(0));
        assert!(matches!(result, Err(ReportError::InvalidStyle(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn optional_registration() {
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.register_opt(None).unwrap(), StyleHandle::NONE);
        let style = StyleDescriptor::data_region();
        let handle = registry.register_opt(Some(&style)).unwrap();
        assert_eq!(registry.iter().next(), Some((handle, &style)));
    }
}
