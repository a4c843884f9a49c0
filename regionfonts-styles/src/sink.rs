//! The resource seam between the engine and whatever hosts the stylesheets.

/// Fixed identifier of the rule resource; at most one exists at a time.
pub const RULES_ELEMENT_ID: &str = "regionfonts-custom-styles";

/// The two kinds of stylesheet resource the engine owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Remote stylesheet that loads the font files. Content is a URL.
    FontSource,
    /// Inline stylesheet binding selectors to families. Content is CSS.
    Rules,
}

/// Opaque token for an installed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(pub u64);

/// A place stylesheet resources can be installed into and removed from.
///
/// Removal is by kind, matched through a stable marker the sink knows about
/// (an endpoint substring for font sources, `RULES_ELEMENT_ID` for rules),
/// never by handle. Implementations do not fail; a resource that cannot load
/// is simply inert.
pub trait ResourceSink {
    fn install(&mut self, kind: ResourceKind, content: &str) -> ResourceHandle;

    /// Remove every resource of `kind`, returning how many were removed.
    fn remove_all_of_kind(&mut self, kind: ResourceKind) -> usize;
}

impl<T: ResourceSink + ?Sized> ResourceSink for &mut T {
    fn install(&mut self, kind: ResourceKind, content: &str) -> ResourceHandle {
        (**self).install(kind, content)
    }

    fn remove_all_of_kind(&mut self, kind: ResourceKind) -> usize {
        (**self).remove_all_of_kind(kind)
    }
}

impl<T: ResourceSink + ?Sized> ResourceSink for Box<T> {
    fn install(&mut self, kind: ResourceKind, content: &str) -> ResourceHandle {
        (**self).install(kind, content)
    }

    fn remove_all_of_kind(&mut self, kind: ResourceKind) -> usize {
        (**self).remove_all_of_kind(kind)
    }
}
