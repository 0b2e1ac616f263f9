//! Element tree and area resolution
//!
//! The tree owns every element in a slot map arena. Parents list their
//! children in order, children point back at their parent without owning it.
//!
//! Layout is eager and synchronous: every mutating call recomputes the
//! element's pixel size, refreshes its cached rects and walks down into the
//! children whose content area actually changed before any event fires.
//! Children whose content area only moved get their caches invalidated
//! without a pixel size recomputation.

use super::backend::RenderBackend;
use super::cached_rect::RectKind;
use super::element::{Element, ElementBehaviour, HorizontalAlignment, PlainElement, VerticalAlignment};
use super::error::UiError;
use super::geometry::{AspectMode, Rect, Size};
use super::units::{UDim, URect, USize, UVector2, UVector3};
use crate::config::UiConfig;
use crate::events::{ElementEvent, EventSystem, EventType};
use crate::foundation::collections::{ElementId, HandleMap};
use crate::foundation::math::utils::align_to_pixels;
use crate::foundation::math::{Quat, Vec2};
use bitflags::bitflags;

bitflags! {
    /// Which content areas of an element changed during an area update
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct AreaChange: u8 {
        /// Outer rect moved
        const NON_CLIENT_MOVED = 1;
        /// Outer rect resized
        const NON_CLIENT_SIZED = 1 << 1;
        /// Inner rect moved
        const CLIENT_MOVED = 1 << 2;
        /// Inner rect resized
        const CLIENT_SIZED = 1 << 3;
    }
}

/// Arena of elements plus the event system they fire into
#[derive(Debug)]
pub struct ElementTree {
    pub(crate) elements: HandleMap<Element>,
    pub(crate) events: EventSystem,
    display_size: Size,
    default_pixel_aligned: bool,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl ElementTree {
    /// Create an empty tree anchored to a display of the given size
    pub fn new(display_size: Size) -> Self {
        Self {
            elements: HandleMap::with_key(),
            events: EventSystem::new(),
            display_size,
            default_pixel_aligned: true,
        }
    }

    /// Create an empty tree anchored to a backend's display
    pub fn from_backend(backend: &dyn RenderBackend) -> Self {
        Self::new(backend.display_size())
    }

    /// Create an empty tree from configuration
    pub fn with_config(config: &UiConfig) -> Self {
        let mut tree = Self::new(config.display_size);
        tree.default_pixel_aligned = config.default_pixel_aligned;
        tree
    }

    // ------------------------------------------------------------------
    // Arena access
    // ------------------------------------------------------------------

    pub(crate) fn node(&self, id: ElementId) -> Result<&Element, UiError> {
        self.elements.get(id).ok_or(UiError::UnknownElement(id))
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Result<&mut Element, UiError> {
        self.elements.get_mut(id).ok_or(UiError::UnknownElement(id))
    }

    /// Read access to an element
    pub fn element(&self, id: ElementId) -> Result<&Element, UiError> {
        self.node(id)
    }

    /// Returns true if `id` refers to a live element
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the tree holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements without a parent
    pub fn roots(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, e)| e.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Event system reference
    pub fn events(&self) -> &EventSystem {
        &self.events
    }

    /// Event system mutable reference
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    pub(crate) fn fire(&mut self, event_type: EventType, source: ElementId) {
        self.events.fire(ElementEvent::new(event_type, source));
    }

    // ------------------------------------------------------------------
    // Creation and destruction
    // ------------------------------------------------------------------

    /// Create a detached element with default settings
    pub fn create_element(&mut self) -> ElementId {
        self.create_element_with(PlainElement)
    }

    /// Create a detached element with a custom behaviour
    pub fn create_element_with(&mut self, behaviour: impl ElementBehaviour + 'static) -> ElementId {
        let id = self
            .elements
            .insert(Element::new(Box::new(behaviour), self.default_pixel_aligned));
        log::trace!("Created element {:?}", id);
        id
    }

    /// Replace an element's behaviour and lay it out again
    pub fn set_behaviour(&mut self, id: ElementId, behaviour: impl ElementBehaviour + 'static) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        node.behaviour = Box::new(behaviour);
        node.inner_rect.invalidate();
        self.notify_screen_area_changed(id, true, true)?;
        self.adjust_size_to_content(id)
    }

    /// Destroy an element
    ///
    /// The element is detached from its parent first. Its children are not
    /// destroyed: they are detached, laid out again as parentless elements
    /// and returned so the caller can decide what to do with them.
    pub fn destroy_element(&mut self, id: ElementId) -> Result<Vec<ElementId>, UiError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.detach(parent, id);
            self.events
                .fire(ElementEvent::about(EventType::ChildRemoved, parent, id));
        }

        let orphans = std::mem::take(&mut self.node_mut(id)?.children);
        for &child in &orphans {
            self.elements[child].parent = None;
            self.events
                .fire(ElementEvent::about(EventType::ChildRemoved, id, child));
        }

        self.events.remove_element(id);
        self.elements.remove(id);
        log::debug!("Destroyed element {:?}, orphaned {} children", id, orphans.len());

        for &child in &orphans {
            self.notify_screen_area_changed(child, true, true)?;
        }
        Ok(orphans)
    }

    // ------------------------------------------------------------------
    // Root container
    // ------------------------------------------------------------------

    /// Size of the display parentless elements are laid out against
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Change the display size and lay out every parentless element again
    pub fn notify_display_size_changed(&mut self, size: Size) -> Result<(), UiError> {
        log::debug!("Display size changed to {}x{}", size.width, size.height);
        self.display_size = size;
        for root in self.roots() {
            self.notify_screen_area_changed(root, true, true)?;
        }
        Ok(())
    }

    /// Root container size for an element
    ///
    /// The nearest element on the path to the root whose behaviour reports a
    /// container size wins; otherwise the display size is used.
    pub fn root_container_size(&self, id: ElementId) -> Result<Size, UiError> {
        self.node(id)?;
        Ok(self.root_size_of(id))
    }

    fn root_size_of(&self, id: ElementId) -> Size {
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = &self.elements[cur];
            if let Some(size) = node.behaviour.root_container_size() {
                return size;
            }
            current = node.parent;
        }
        self.display_size
    }

    // ------------------------------------------------------------------
    // Area resolution
    // ------------------------------------------------------------------

    /// Last computed pixel size
    pub fn pixel_size(&self, id: ElementId) -> Result<Size, UiError> {
        Ok(self.node(id)?.pixel_size)
    }

    /// Compute the pixel size from the current settings without storing it
    pub fn calculate_pixel_size(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Result<Size, UiError> {
        self.node(id)?;
        Ok(self.calculate_pixel_size_impl(id, skip_all_pixel_alignment))
    }

    pub(crate) fn calculate_pixel_size_impl(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Size {
        let node = &self.elements[id];

        // min/max are screen-scale limits, so they resolve against the root
        // container rather than the parent
        let root_size = self.root_size_of(id);
        let mut abs_min = node.min_size.resolve(root_size);
        let abs_max = node.max_size.resolve(root_size);

        let mut ret = node
            .area
            .size
            .resolve(self.base_pixel_size_impl(id, skip_all_pixel_alignment));

        // max size takes precedence over min size
        if abs_max.width != 0.0 && abs_min.width > abs_max.width {
            abs_min.width = abs_max.width;
            log::debug!("{:?}: MinSize width exceeds MaxSize width, using MaxSize", id);
        }
        if abs_max.height != 0.0 && abs_min.height > abs_max.height {
            abs_min.height = abs_max.height;
            log::debug!("{:?}: MinSize height exceeds MaxSize height, using MaxSize", id);
        }

        if ret.width < abs_min.width {
            ret.width = abs_min.width;
        } else if abs_max.width != 0.0 && ret.width > abs_max.width {
            ret.width = abs_max.width;
        }

        if ret.height < abs_min.height {
            ret.height = abs_min.height;
        } else if abs_max.height != 0.0 && ret.height > abs_max.height {
            ret.height = abs_max.height;
        }

        if node.aspect_mode != AspectMode::Ignore {
            ret.scale_to_aspect(node.aspect_mode, node.aspect_ratio);

            // Bring the size back within the hard limits, keeping the ratio.
            // Only one limit is honoured when min, max and ratio conflict.
            if ret.width < abs_min.width {
                ret.height *= abs_min.width / ret.width;
                ret.width = abs_min.width;
            } else if ret.height < abs_min.height {
                ret.width *= abs_min.height / ret.height;
                ret.height = abs_min.height;
            } else if abs_max.width != 0.0 && ret.width > abs_max.width {
                ret.height *= abs_max.width / ret.width;
                ret.width = abs_max.width;
            } else if abs_max.height != 0.0 && ret.height > abs_max.height {
                ret.width *= abs_max.height / ret.height;
                ret.height = abs_max.height;
            }

            if ret.width < abs_min.width
                || ret.height < abs_min.height
                || (abs_max.width != 0.0 && ret.width > abs_max.width)
                || (abs_max.height != 0.0 && ret.height > abs_max.height)
            {
                log::warn!(
                    "{:?}: aspect ratio {} cannot satisfy both MinSize and MaxSize",
                    id,
                    node.aspect_ratio
                );
            }
        }

        if node.pixel_aligned && !skip_all_pixel_alignment {
            ret.width = align_to_pixels(ret.width);
            ret.height = align_to_pixels(ret.height);
        }

        ret
    }

    /// Pixel size of the parent, or the root container size without one
    pub fn parent_pixel_size(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Result<Size, UiError> {
        let node = self.node(id)?;
        Ok(match node.parent {
            Some(parent) if skip_all_pixel_alignment => self.calculate_pixel_size_impl(parent, true),
            Some(parent) => self.elements[parent].pixel_size,
            None => self.root_size_of(id),
        })
    }

    /// Size the element's unified size is resolved against
    ///
    /// That is the parent's client (inner) or non-client (outer) content
    /// area depending on the element's non-client flag, or the root container
    /// for a parentless element.
    pub fn base_pixel_size(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Result<Size, UiError> {
        self.node(id)?;
        Ok(self.base_pixel_size_impl(id, skip_all_pixel_alignment))
    }

    fn base_pixel_size_impl(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Size {
        let node = &self.elements[id];
        match node.parent {
            Some(parent) => self
                .content_area_impl(parent, node.non_client, skip_all_pixel_alignment)
                .size(),
            None => self.root_size_of(id),
        }
    }

    fn content_area_impl(&self, id: ElementId, non_client: bool, skip_all_pixel_alignment: bool) -> Rect {
        let kind = if non_client { RectKind::Outer } else { RectKind::Inner };
        self.rect_impl(id, kind, skip_all_pixel_alignment)
    }

    pub(crate) fn rect_impl(&self, id: ElementId, kind: RectKind, skip_all_pixel_alignment: bool) -> Rect {
        let node = &self.elements[id];
        let cache = match kind {
            RectKind::Outer => &node.outer_rect,
            RectKind::Inner => &node.inner_rect,
        };
        let generator = |skip: bool| self.generate_rect(id, kind, skip);
        if skip_all_pixel_alignment {
            cache.get_fresh(true, generator)
        } else {
            cache.get(generator)
        }
    }

    fn generate_rect(&self, id: ElementId, kind: RectKind, skip_all_pixel_alignment: bool) -> Rect {
        match kind {
            RectKind::Outer => self.generate_outer_rect(id, skip_all_pixel_alignment),
            RectKind::Inner => {
                let outer = self.rect_impl(id, RectKind::Outer, skip_all_pixel_alignment);
                self.elements[id].behaviour.inner_rect(outer)
            }
        }
    }

    fn generate_outer_rect(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Rect {
        let node = &self.elements[id];
        let parent_rect = match node.parent {
            None => Rect::from_position_size(Vec2::zeros(), self.root_size_of(id)),
            Some(parent) => self.content_area_impl(parent, node.non_client, skip_all_pixel_alignment),
        };

        let parent_size = parent_rect.size();
        let pixel_size = if skip_all_pixel_alignment {
            self.calculate_pixel_size_impl(id, true)
        } else {
            node.pixel_size
        };

        let mut offset = parent_rect.min + node.area.min.resolve(parent_size);

        match node.horizontal_alignment {
            HorizontalAlignment::Left => {}
            HorizontalAlignment::Centre => offset.x += (parent_size.width - pixel_size.width) * 0.5,
            HorizontalAlignment::Right => offset.x += parent_size.width - pixel_size.width,
        }

        match node.vertical_alignment {
            VerticalAlignment::Top => {}
            VerticalAlignment::Centre => offset.y += (parent_size.height - pixel_size.height) * 0.5,
            VerticalAlignment::Bottom => offset.y += parent_size.height - pixel_size.height,
        }

        if node.pixel_aligned && !skip_all_pixel_alignment {
            offset.x = align_to_pixels(offset.x);
            offset.y = align_to_pixels(offset.y);
        }

        Rect::from_position_size(offset, pixel_size)
    }

    /// Unclipped outer rect, from cache when valid
    pub fn unclipped_outer_rect(&self, id: ElementId) -> Result<Rect, UiError> {
        self.node(id)?;
        Ok(self.rect_impl(id, RectKind::Outer, false))
    }

    /// Unclipped inner rect, from cache when valid
    pub fn unclipped_inner_rect(&self, id: ElementId) -> Result<Rect, UiError> {
        self.node(id)?;
        Ok(self.rect_impl(id, RectKind::Inner, false))
    }

    /// Outer rect bypassing the cache (see [`CachedRect::get_fresh`](super::CachedRect::get_fresh))
    pub fn outer_rect_fresh(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Result<Rect, UiError> {
        self.node(id)?;
        let generator = |skip: bool| self.generate_rect(id, RectKind::Outer, skip);
        Ok(self.elements[id].outer_rect.get_fresh(skip_all_pixel_alignment, generator))
    }

    /// Inner rect bypassing the cache
    pub fn inner_rect_fresh(&self, id: ElementId, skip_all_pixel_alignment: bool) -> Result<Rect, UiError> {
        self.node(id)?;
        let generator = |skip: bool| self.generate_rect(id, RectKind::Inner, skip);
        Ok(self.elements[id].inner_rect.get_fresh(skip_all_pixel_alignment, generator))
    }

    /// Area client children are laid out in
    pub fn client_child_content_area(&self, id: ElementId) -> Result<Rect, UiError> {
        self.child_content_area(id, false)
    }

    /// Area non-client children are laid out in
    pub fn non_client_child_content_area(&self, id: ElementId) -> Result<Rect, UiError> {
        self.child_content_area(id, true)
    }

    /// Content area for client (`false`) or non-client (`true`) children
    pub fn child_content_area(&self, id: ElementId, non_client: bool) -> Result<Rect, UiError> {
        self.node(id)?;
        Ok(self.content_area_impl(id, non_client, false))
    }

    // ------------------------------------------------------------------
    // Area updates
    // ------------------------------------------------------------------

    /// Unified area
    pub fn area(&self, id: ElementId) -> Result<URect, UiError> {
        Ok(self.node(id)?.area)
    }

    /// Unified position
    pub fn position(&self, id: ElementId) -> Result<UVector2, UiError> {
        Ok(self.node(id)?.area.min)
    }

    /// Unified size
    pub fn size(&self, id: ElementId) -> Result<USize, UiError> {
        Ok(self.node(id)?.area.size)
    }

    /// Set position and size
    pub fn set_area(&mut self, id: ElementId, position: UVector2, size: USize) -> Result<(), UiError> {
        self.set_area_impl(id, position, size, false, true, true)
    }

    /// Set the area from a unified rect
    pub fn set_area_rect(&mut self, id: ElementId, area: URect) -> Result<(), UiError> {
        self.set_area(id, area.min, area.size)
    }

    /// Set the area from x, y, width and height
    pub fn set_area_dims(&mut self, id: ElementId, x: UDim, y: UDim, width: UDim, height: UDim) -> Result<(), UiError> {
        self.set_area(id, UVector2::new(x, y), USize::new(width, height))
    }

    /// Set the position, keeping the size
    pub fn set_position(&mut self, id: ElementId, position: UVector2) -> Result<(), UiError> {
        let size = self.node(id)?.area.size;
        self.set_area(id, position, size)
    }

    /// Set the horizontal position
    pub fn set_x_position(&mut self, id: ElementId, x: UDim) -> Result<(), UiError> {
        let position = self.node(id)?.area.min;
        self.set_position(id, UVector2::new(x, position.y))
    }

    /// Set the vertical position
    pub fn set_y_position(&mut self, id: ElementId, y: UDim) -> Result<(), UiError> {
        let position = self.node(id)?.area.min;
        self.set_position(id, UVector2::new(position.x, y))
    }

    /// Set the size, keeping the position
    pub fn set_size(&mut self, id: ElementId, size: USize) -> Result<(), UiError> {
        self.set_size_impl(id, size, true)
    }

    pub(crate) fn set_size_impl(&mut self, id: ElementId, size: USize, adjust_size_to_content: bool) -> Result<(), UiError> {
        let position = self.node(id)?.area.min;
        self.set_area_impl(id, position, size, false, true, adjust_size_to_content)
    }

    /// Set the width
    pub fn set_width(&mut self, id: ElementId, width: UDim) -> Result<(), UiError> {
        let size = self.node(id)?.area.size;
        self.set_size(id, USize::new(width, size.height))
    }

    /// Set the height
    pub fn set_height(&mut self, id: ElementId, height: UDim) -> Result<(), UiError> {
        let size = self.node(id)?.area.size;
        self.set_size(id, USize::new(size.width, height))
    }

    /// Set the area with full control over the update
    ///
    /// With `top_left_sizing` the new position is only applied if the pixel
    /// size actually changed, which keeps the opposite edge fixed when a
    /// top/left drag runs into a size limit. `fire_events` gates the events
    /// only; children are always brought up to date.
    pub fn set_area_impl(
        &mut self,
        id: ElementId,
        position: UVector2,
        size: USize,
        top_left_sizing: bool,
        fire_events: bool,
        adjust_size_to_content: bool,
    ) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        let old_size = node.pixel_size;
        node.area.set_size(size);

        let sized = self.calculate_pixel_size_impl(id, false) != old_size;
        if !top_left_sizing || sized {
            self.elements[id].area.set_position(position);
        }

        self.update_screen_area(id, adjust_size_to_content, false, fire_events)
    }

    /// Recompute pixel size and rects after something that may affect them
    /// changed, and propagate to the affected children
    pub fn notify_screen_area_changed(
        &mut self,
        id: ElementId,
        adjust_size_to_content: bool,
        force_layout_children: bool,
    ) -> Result<(), UiError> {
        self.node(id)?;
        self.update_screen_area(id, adjust_size_to_content, force_layout_children, true)
    }

    pub(crate) fn update_screen_area(
        &mut self,
        id: ElementId,
        adjust_size_to_content: bool,
        force_layout_children: bool,
        fire_events: bool,
    ) -> Result<(), UiError> {
        let old_size = self.elements[id].pixel_size;
        let new_size = self.calculate_pixel_size_impl(id, false);
        self.elements[id].pixel_size = new_size;
        let sized = new_size != old_size;

        // pixel size must be stored before the outer rect is regenerated
        let old_position = self.elements[id].outer_rect.current().min;
        self.elements[id].outer_rect.invalidate();
        let moved = self.rect_impl(id, RectKind::Outer, false).min != old_position;

        let flags = self.handle_area_changes(id, moved, sized);
        log::trace!("{:?}: area update moved={} sized={} flags={:?}", id, moved, sized, flags);

        if !self.elements[id].children.is_empty() {
            let client = force_layout_children || flags.contains(AreaChange::CLIENT_SIZED);
            let non_client = force_layout_children || flags.contains(AreaChange::NON_CLIENT_SIZED);
            if client || non_client {
                self.perform_child_layout(id, client, non_client, fire_events)?;
            } else if flags.intersects(AreaChange::CLIENT_MOVED | AreaChange::NON_CLIENT_MOVED) {
                self.move_children(id, flags, fire_events);
            }
        }

        if moved && fire_events {
            self.fire(EventType::Moved, id);
        }

        if sized {
            if fire_events {
                self.fire(EventType::Sized, id);
            }
            if adjust_size_to_content {
                self.adjust_size_to_content(id)?;
            }
        }

        Ok(())
    }

    /// Refresh the inner rect after the outer one changed and report which
    /// content areas moved or resized
    fn handle_area_changes(&self, id: ElementId, moved: bool, sized: bool) -> AreaChange {
        let mut flags = AreaChange::empty();
        if moved {
            flags |= AreaChange::NON_CLIENT_MOVED;
        }
        if sized {
            flags |= AreaChange::NON_CLIENT_SIZED;
        }
        if flags.is_empty() {
            return flags;
        }

        let cache = &self.elements[id].inner_rect;
        let was_valid = cache.is_valid();
        let old_inner = cache.current();
        cache.invalidate();
        let new_inner = self.rect_impl(id, RectKind::Inner, false);

        if !was_valid || new_inner.min != old_inner.min {
            flags |= AreaChange::CLIENT_MOVED;
        }
        if !was_valid || new_inner.size() != old_inner.size() {
            flags |= AreaChange::CLIENT_SIZED;
        }
        flags
    }

    fn perform_child_layout(&mut self, id: ElementId, client: bool, non_client: bool, fire_events: bool) -> Result<(), UiError> {
        let children = self.elements[id].children.clone();
        for child in children {
            let affected = if self.elements[child].non_client { non_client } else { client };
            if affected {
                self.update_screen_area(child, true, false, fire_events)?;
            }
        }
        Ok(())
    }

    fn move_children(&mut self, id: ElementId, flags: AreaChange, fire_events: bool) {
        let children = self.elements[id].children.clone();
        for child in children {
            let affected = if self.elements[child].non_client {
                flags.contains(AreaChange::NON_CLIENT_MOVED)
            } else {
                flags.contains(AreaChange::CLIENT_MOVED)
            };
            if affected {
                self.handle_position_change_recursively(child, fire_events);
            }
        }
    }

    /// The content area this element sits in moved without resizing: its
    /// pixel size stands, only the rects need regenerating
    fn handle_position_change_recursively(&mut self, id: ElementId, fire_events: bool) {
        let old_position = self.elements[id].outer_rect.current().min;
        self.elements[id].outer_rect.invalidate();
        // pixel alignment can absorb a sub-pixel move of the content area
        let moved = self.rect_impl(id, RectKind::Outer, false).min != old_position;
        if !moved {
            return;
        }

        let flags = self.handle_area_changes(id, true, false);
        self.move_children(id, flags, fire_events);
        if fire_events {
            self.fire(EventType::Moved, id);
        }
    }

    // ------------------------------------------------------------------
    // Layout settings
    // ------------------------------------------------------------------

    /// Set the horizontal alignment
    pub fn set_horizontal_alignment(&mut self, id: ElementId, alignment: HorizontalAlignment) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.horizontal_alignment == alignment {
            return Ok(());
        }
        node.horizontal_alignment = alignment;
        self.notify_screen_area_changed(id, true, false)?;
        self.fire(EventType::HorizontalAlignmentChanged, id);
        Ok(())
    }

    /// Set the vertical alignment
    pub fn set_vertical_alignment(&mut self, id: ElementId, alignment: VerticalAlignment) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.vertical_alignment == alignment {
            return Ok(());
        }
        node.vertical_alignment = alignment;
        self.notify_screen_area_changed(id, true, false)?;
        self.fire(EventType::VerticalAlignmentChanged, id);
        Ok(())
    }

    /// Set the minimum size (resolved against the root container)
    pub fn set_min_size(&mut self, id: ElementId, size: USize) -> Result<(), UiError> {
        self.node_mut(id)?.min_size = size;
        self.notify_screen_area_changed(id, true, false)
    }

    /// Set the maximum size (resolved against the root container, zero is unbounded)
    pub fn set_max_size(&mut self, id: ElementId, size: USize) -> Result<(), UiError> {
        self.node_mut(id)?.max_size = size;
        self.notify_screen_area_changed(id, true, false)
    }

    /// Set the aspect mode
    pub fn set_aspect_mode(&mut self, id: ElementId, mode: AspectMode) -> Result<(), UiError> {
        self.node_mut(id)?.aspect_mode = mode;
        self.notify_screen_area_changed(id, true, false)
    }

    /// Set the aspect ratio (width / height)
    pub fn set_aspect_ratio(&mut self, id: ElementId, ratio: f32) -> Result<(), UiError> {
        self.node_mut(id)?.aspect_ratio = ratio;
        self.notify_screen_area_changed(id, true, false)
    }

    /// Set whether size and position snap to whole pixels
    pub fn set_pixel_aligned(&mut self, id: ElementId, pixel_aligned: bool) -> Result<(), UiError> {
        self.node_mut(id)?.pixel_aligned = pixel_aligned;
        self.notify_screen_area_changed(id, true, false)
    }

    /// Set whether the element is laid out against the parent's outer rect
    pub fn set_non_client(&mut self, id: ElementId, non_client: bool) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.non_client == non_client {
            return Ok(());
        }
        node.non_client = non_client;
        self.notify_screen_area_changed(id, true, false)?;
        self.fire(EventType::NonClientChanged, id);
        Ok(())
    }

    /// Set the rotation
    pub fn set_rotation(&mut self, id: ElementId, rotation: Quat) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.rotation == rotation {
            return Ok(());
        }
        node.rotation = rotation;
        self.fire(EventType::Rotated, id);
        Ok(())
    }

    /// Set the rotation pivot
    pub fn set_pivot(&mut self, id: ElementId, pivot: UVector3) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.pivot == pivot {
            return Ok(());
        }
        node.pivot = pivot;
        self.fire(EventType::Rotated, id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Parent of an element
    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>, UiError> {
        Ok(self.node(id)?.parent)
    }

    /// Children of an element in order
    pub fn children(&self, id: ElementId) -> Result<&[ElementId], UiError> {
        Ok(&self.node(id)?.children)
    }

    /// Number of children
    pub fn child_count(&self, id: ElementId) -> Result<usize, UiError> {
        Ok(self.node(id)?.children.len())
    }

    /// Child at `index`
    pub fn child_at_index(&self, id: ElementId, index: usize) -> Result<ElementId, UiError> {
        self.node(id)?
            .children
            .get(index)
            .copied()
            .ok_or_else(|| UiError::invalid_request(format!("child index {} out of range", index)))
    }

    /// Position of `child` among the children of `id`
    pub fn child_index(&self, id: ElementId, child: ElementId) -> Result<Option<usize>, UiError> {
        Ok(self.node(id)?.children.iter().position(|&c| c == child))
    }

    /// Returns true if `candidate` is a direct child of `id`
    pub fn is_child(&self, id: ElementId, candidate: ElementId) -> Result<bool, UiError> {
        Ok(self.node(id)?.children.contains(&candidate))
    }

    /// Returns true if `candidate` is an ancestor (parent, grandparent, ...) of `id`
    pub fn is_ancestor(&self, id: ElementId, candidate: ElementId) -> Result<bool, UiError> {
        self.node(id)?;
        Ok(self.is_ancestor_impl(id, candidate))
    }

    fn is_ancestor_impl(&self, id: ElementId, candidate: ElementId) -> bool {
        let mut current = self.elements[id].parent;
        while let Some(ancestor) = current {
            if ancestor == candidate {
                return true;
            }
            current = self.elements[ancestor].parent;
        }
        false
    }

    /// Attach `child` under `id`
    ///
    /// A child attached elsewhere is detached from its old parent first
    /// (which fires `ChildRemoved` there). Adding an existing child is a
    /// no-op. Adding an element to itself or to one of its descendants fails.
    pub fn add_child(&mut self, id: ElementId, child: ElementId) -> Result<(), UiError> {
        self.node(id)?;
        self.node(child)?;

        if id == child {
            return Err(UiError::invalid_request(
                "Can't make element its own child - add_child(e, e) is forbidden.",
            ));
        }
        if self.is_ancestor_impl(id, child) {
            return Err(UiError::invalid_request(
                "Can't add an ancestor of an element as its child - that would create a cycle.",
            ));
        }
        if self.elements[id].children.contains(&child) {
            return Ok(());
        }

        if let Some(old_parent) = self.elements[child].parent {
            self.detach(old_parent, child);
            self.events
                .fire(ElementEvent::about(EventType::ChildRemoved, old_parent, child));
        }

        self.elements[id].children.push(child);
        self.elements[child].parent = Some(id);
        log::debug!("Added {:?} as child of {:?}", child, id);

        self.notify_screen_area_changed(child, true, true)?;
        self.events
            .fire(ElementEvent::about(EventType::ChildAdded, id, child));
        Ok(())
    }

    /// Detach `child` from `id` without destroying it
    ///
    /// Removing an element that is not a child is a silent no-op. The
    /// detached element is laid out again against the root container.
    pub fn remove_child(&mut self, id: ElementId, child: ElementId) -> Result<(), UiError> {
        self.node(id)?;
        self.node(child)?;

        if !self.detach(id, child) {
            return Ok(());
        }
        log::debug!("Removed {:?} from {:?}", child, id);

        self.notify_screen_area_changed(child, true, true)?;
        self.events
            .fire(ElementEvent::about(EventType::ChildRemoved, id, child));
        Ok(())
    }

    /// Unlink without layout or events; returns whether `child` was in the list
    fn detach(&mut self, id: ElementId, child: ElementId) -> bool {
        let children = &mut self.elements[id].children;
        let found = match children.iter().position(|&c| c == child) {
            Some(index) => {
                children.remove(index);
                true
            }
            None => false,
        };
        if self.elements[child].parent == Some(id) {
            self.elements[child].parent = None;
        }
        found
    }

    /// Attach `child` and move it to `index`
    pub fn add_child_at_index(&mut self, id: ElementId, child: ElementId, index: usize) -> Result<(), UiError> {
        self.add_child(id, child)?;
        self.move_child_element_to_index(id, child, index)
    }

    /// Detach the child at `index`
    pub fn remove_child_at_index(&mut self, id: ElementId, index: usize) -> Result<ElementId, UiError> {
        let child = self.child_at_index(id, index)?;
        self.remove_child(id, child)?;
        Ok(child)
    }

    /// Move the child at `from` so it is inserted before the child currently
    /// at `to` (clamped to the end); out of range `from` is ignored
    pub fn move_child_to_index(&mut self, id: ElementId, from: usize, to: usize) -> Result<(), UiError> {
        let children = &mut self.node_mut(id)?.children;
        let mut to = to.min(children.len());
        if from == to || from >= children.len() {
            return Ok(());
        }

        let child = children.remove(from);
        if from < to {
            to -= 1;
        }
        children.insert(to, child);

        self.fire(EventType::ChildOrderChanged, id);
        Ok(())
    }

    /// Move `child` to `index` (see [`ElementTree::move_child_to_index`])
    pub fn move_child_element_to_index(&mut self, id: ElementId, child: ElementId, index: usize) -> Result<(), UiError> {
        let from = self
            .child_index(id, child)?
            .ok_or_else(|| UiError::invalid_request("element is not a child of this element"))?;
        self.move_child_to_index(id, from, index)
    }

    /// Move `child` by `delta` positions (the result is clamped at zero)
    pub fn move_child_by_delta(&mut self, id: ElementId, child: ElementId, delta: isize) -> Result<(), UiError> {
        let from = self
            .child_index(id, child)?
            .ok_or_else(|| UiError::invalid_request("element is not a child of this element"))?;
        let to = from.saturating_add_signed(delta);
        self.move_child_to_index(id, from, to)
    }

    /// Swap the children at two indices; out of range or equal indices are ignored
    pub fn swap_children(&mut self, id: ElementId, first: usize, second: usize) -> Result<(), UiError> {
        let children = &mut self.node_mut(id)?.children;
        if first < children.len() && second < children.len() && first != second {
            children.swap(first, second);
            self.fire(EventType::ChildOrderChanged, id);
        }
        Ok(())
    }

    /// Swap two children by element; elements that are not children are ignored
    pub fn swap_child_elements(&mut self, id: ElementId, first: ElementId, second: ElementId) -> Result<(), UiError> {
        if first == second {
            return Ok(());
        }
        match (self.child_index(id, first)?, self.child_index(id, second)?) {
            (Some(a), Some(b)) => self.swap_children(id, a, b),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draw `root` and its subtree, parents before children
    pub fn render(&self, root: ElementId, backend: &mut dyn RenderBackend) -> Result<(), UiError> {
        self.node(root)?;
        backend.begin_pass()?;
        self.draw_subtree(root, backend)?;
        backend.end_pass()?;
        Ok(())
    }

    fn draw_subtree(&self, id: ElementId, backend: &mut dyn RenderBackend) -> Result<(), UiError> {
        let node = &self.elements[id];
        backend.draw_element(id, self.rect_impl(id, RectKind::Outer, false), &node.rotation)?;
        for &child in &node.children {
            self.draw_subtree(child, backend)?;
        }
        Ok(())
    }
}
