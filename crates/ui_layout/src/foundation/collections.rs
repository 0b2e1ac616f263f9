//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to an element living in an [`ElementTree`](crate::ui::ElementTree)
    ///
    /// Handles stay valid until the element is destroyed; a destroyed handle is
    /// never reused for a different element.
    pub struct ElementId;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<ElementId, T>;
