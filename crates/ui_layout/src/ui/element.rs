//! Element nodes
//!
//! An [`Element`] is the per-node state stored in the
//! [`ElementTree`](super::ElementTree) arena: unified area and constraints,
//! derived pixel geometry and the tree links. All mutation goes through the
//! tree so that layout and events stay consistent; this module only exposes
//! read access plus the [`ElementBehaviour`] override points.

use super::cached_rect::CachedRect;
use super::error::UiError;
use super::geometry::{AspectMode, Rect, Size};
use super::units::{UDim, URect, USize, UVector3};
use crate::foundation::collections::ElementId;
use crate::foundation::math::Quat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal placement inside the parent's content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    /// Position is measured from the left edge
    #[default]
    Left,
    /// Position is measured from the centre
    Centre,
    /// Position is measured from the right edge
    Right,
}

/// Vertical placement inside the parent's content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    /// Position is measured from the top edge
    #[default]
    Top,
    /// Position is measured from the centre
    Centre,
    /// Position is measured from the bottom edge
    Bottom,
}

fn not_implemented() -> UiError {
    UiError::invalid_request("This function isn't implemented for this type of element.")
}

/// Per-type behaviour of an element
///
/// Widget types implement this to carve decoration out of their area, to
/// anchor a subtree to an off-screen surface, or to opt into content-driven
/// sizing. The content hooks fail with [`UiError::InvalidRequest`] unless
/// overridden.
pub trait ElementBehaviour: fmt::Debug {
    /// Inner (client) rectangle for a given outer rectangle
    fn inner_rect(&self, outer: Rect) -> Rect {
        outer
    }

    /// Root container size for this element and its subtree, if it differs
    /// from the display
    fn root_container_size(&self) -> Option<Size> {
        None
    }

    /// Size of the content
    fn content_size(&self) -> Result<Size, UiError> {
        Err(not_implemented())
    }

    /// Lower bound of the width reserved for content, as a function of the
    /// element width (`scale * element_width + offset`)
    fn content_width_lower_bound(&self) -> Result<UDim, UiError> {
        Err(not_implemented())
    }

    /// Lower bound of the height reserved for content, as a function of the
    /// element height
    fn content_height_lower_bound(&self) -> Result<UDim, UiError> {
        Err(not_implemented())
    }

    /// Whether the content fits in an inner area of the given size
    fn content_fits(&self, _content_area: Size) -> Result<bool, UiError> {
        Err(not_implemented())
    }

    /// Slack added to the content size when sizing to content
    fn adjust_size_to_content_epsilon(&self) -> f32 {
        1.0 / 64.0
    }
}

/// Behaviour of a bare element: no decoration, no content
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainElement;

impl ElementBehaviour for PlainElement {}

/// Node state of one element
#[derive(Debug)]
pub struct Element {
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,

    pub(crate) area: URect,
    pub(crate) horizontal_alignment: HorizontalAlignment,
    pub(crate) vertical_alignment: VerticalAlignment,
    pub(crate) min_size: USize,
    pub(crate) max_size: USize,
    pub(crate) aspect_mode: AspectMode,
    pub(crate) aspect_ratio: f32,
    pub(crate) pixel_aligned: bool,
    pub(crate) rotation: Quat,
    pub(crate) pivot: UVector3,
    pub(crate) non_client: bool,
    pub(crate) adjust_width_to_content: bool,
    pub(crate) adjust_height_to_content: bool,

    pub(crate) pixel_size: Size,
    pub(crate) outer_rect: CachedRect,
    pub(crate) inner_rect: CachedRect,

    pub(crate) behaviour: Box<dyn ElementBehaviour>,
}

impl Element {
    pub(crate) fn new(behaviour: Box<dyn ElementBehaviour>, pixel_aligned: bool) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            area: URect::default(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            min_size: USize::zero(),
            max_size: USize::zero(),
            aspect_mode: AspectMode::Ignore,
            aspect_ratio: 1.0,
            pixel_aligned,
            rotation: Quat::identity(),
            pivot: UVector3::new(UDim::relative(0.5), UDim::relative(0.5), UDim::relative(0.5)),
            non_client: false,
            adjust_width_to_content: false,
            adjust_height_to_content: false,
            pixel_size: Size::zero(),
            outer_rect: CachedRect::new(),
            inner_rect: CachedRect::new(),
            behaviour,
        }
    }

    /// Parent element, if attached
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Children in order
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Unified area
    pub fn area(&self) -> URect {
        self.area
    }

    /// Horizontal alignment
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Vertical alignment
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Minimum size, resolved against the root container
    pub fn min_size(&self) -> USize {
        self.min_size
    }

    /// Maximum size, resolved against the root container; zero components are unbounded
    pub fn max_size(&self) -> USize {
        self.max_size
    }

    /// Aspect mode
    pub fn aspect_mode(&self) -> AspectMode {
        self.aspect_mode
    }

    /// Aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Whether size and position snap to whole pixels
    pub fn is_pixel_aligned(&self) -> bool {
        self.pixel_aligned
    }

    /// Rotation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Rotation pivot
    pub fn pivot(&self) -> UVector3 {
        self.pivot
    }

    /// Whether this element is laid out against the parent's outer rect
    pub fn is_non_client(&self) -> bool {
        self.non_client
    }

    /// Whether the width follows the content
    pub fn is_width_adjusted_to_content(&self) -> bool {
        self.adjust_width_to_content
    }

    /// Whether the height follows the content
    pub fn is_height_adjusted_to_content(&self) -> bool {
        self.adjust_height_to_content
    }

    /// Whether either axis follows the content
    pub fn is_size_adjusted_to_content(&self) -> bool {
        self.adjust_width_to_content || self.adjust_height_to_content
    }

    /// Last computed pixel size
    pub fn pixel_size(&self) -> Size {
        self.pixel_size
    }

    /// Cached unclipped outer rect (may be invalid)
    pub fn outer_rect_cache(&self) -> &CachedRect {
        &self.outer_rect
    }

    /// Cached unclipped inner rect (may be invalid)
    pub fn inner_rect_cache(&self) -> &CachedRect {
        &self.inner_rect
    }

    /// Behaviour object
    pub fn behaviour(&self) -> &dyn ElementBehaviour {
        self.behaviour.as_ref()
    }
}
