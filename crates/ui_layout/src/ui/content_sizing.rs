//! Sizing elements to their content
//!
//! Two strategies are available. The direct one inverts the content lower
//! bound reported by the element's behaviour: if the content area is at
//! least `scale * element + offset`, the smallest element holding content of
//! size `c` is `(c - offset) / scale`. The bisection one searches a one
//! parameter family of sizes for the smallest that passes the behaviour's
//! `content_fits` test, which works for content (wrapped text) whose extent
//! depends on the element size.

use super::cached_rect::RectKind;
use super::error::UiError;
use super::geometry::{AspectMode, Size};
use super::tree::ElementTree;
use super::units::{UDim, USize};
use crate::events::EventType;
use crate::foundation::collections::ElementId;

impl ElementTree {
    /// Set whether the width follows the content
    pub fn set_adjust_width_to_content(&mut self, id: ElementId, value: bool) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.adjust_width_to_content == value {
            return Ok(());
        }
        node.adjust_width_to_content = value;
        self.adjust_size_to_content(id)?;
        self.fire(EventType::IsSizeAdjustedToContentChanged, id);
        Ok(())
    }

    /// Set whether the height follows the content
    pub fn set_adjust_height_to_content(&mut self, id: ElementId, value: bool) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.adjust_height_to_content == value {
            return Ok(());
        }
        node.adjust_height_to_content = value;
        self.adjust_size_to_content(id)?;
        self.fire(EventType::IsSizeAdjustedToContentChanged, id);
        Ok(())
    }

    /// Resize the element so its content fits exactly (direct strategy)
    ///
    /// Does nothing unless width or height follows the content. Adjusted
    /// axes become absolute; with an aspect mode set, both axes become
    /// absolute and the ratio is restored by growing the element.
    pub fn adjust_size_to_content(&mut self, id: ElementId) -> Result<(), UiError> {
        let node = self.node(id)?;
        if !node.is_size_adjusted_to_content() {
            return Ok(());
        }

        let adjust_width = node.adjust_width_to_content;
        let adjust_height = node.adjust_height_to_content;
        let aspect_mode = node.aspect_mode;
        let aspect_ratio = node.aspect_ratio;
        let epsilon = node.behaviour.adjust_size_to_content_epsilon();
        let content = node.behaviour.content_size()?;

        let mut new_pixel_size = node.pixel_size;
        if adjust_width {
            let f = self.element_width_lower_bound_as_func_of_content_width(id)?;
            new_pixel_size.width = ((content.width + epsilon) * f.scale + f.offset).ceil();
        }
        if adjust_height {
            let f = self.element_height_lower_bound_as_func_of_content_height(id)?;
            new_pixel_size.height = ((content.height + epsilon) * f.scale + f.offset).ceil();
        }

        if aspect_mode != AspectMode::Ignore {
            let mode = match (adjust_width, adjust_height) {
                (true, true) => AspectMode::Expand,
                (true, false) => AspectMode::AdjustHeight,
                _ => AspectMode::AdjustWidth,
            };
            new_pixel_size.scale_to_aspect(mode, aspect_ratio);
        }

        let mut new_size = self.node(id)?.area.size;
        if adjust_width || aspect_mode != AspectMode::Ignore {
            new_size.width = UDim::px(new_pixel_size.width);
        }
        if adjust_height || aspect_mode != AspectMode::Ignore {
            new_size.height = UDim::px(new_pixel_size.height);
        }

        log::trace!(
            "{:?}: sizing to content {}x{} -> {}x{}",
            id,
            content.width,
            content.height,
            new_pixel_size.width,
            new_pixel_size.height
        );
        self.set_size_impl(id, new_size, false)
    }

    /// Smallest element width as a function of the content width
    ///
    /// Fails if the behaviour's width lower bound does not depend on the
    /// element width.
    pub fn element_width_lower_bound_as_func_of_content_width(&self, id: ElementId) -> Result<UDim, UiError> {
        let bound = self.node(id)?.behaviour.content_width_lower_bound()?;
        if bound.scale == 0.0 {
            return Err(UiError::invalid_request(
                "Content width doesn't depend on the element width.",
            ));
        }
        Ok(UDim::new(1.0 / bound.scale, -bound.offset / bound.scale))
    }

    /// Smallest element height as a function of the content height
    pub fn element_height_lower_bound_as_func_of_content_height(&self, id: ElementId) -> Result<UDim, UiError> {
        let bound = self.node(id)?.behaviour.content_height_lower_bound()?;
        if bound.scale == 0.0 {
            return Err(UiError::invalid_request(
                "Content height doesn't depend on the element height.",
            ));
        }
        Ok(UDim::new(1.0 / bound.scale, -bound.offset / bound.scale))
    }

    /// Whether the content fits in the element's current inner rect
    pub fn content_fits(&self, id: ElementId) -> Result<bool, UiError> {
        self.node(id)?;
        let inner = self.rect_impl(id, RectKind::Inner, false);
        self.elements[id].behaviour.content_fits(inner.size())
    }

    /// Whether the content would fit if the element had the given pixel size
    ///
    /// The element is resized temporarily without firing events and then
    /// restored to its previous unified size.
    pub fn content_fits_for_specified_element_size(&mut self, id: ElementId, element_size: Size) -> Result<bool, UiError> {
        let area = self.node(id)?.area;
        let probe = USize::px(element_size.width, element_size.height);

        self.set_area_impl(id, area.min, probe, false, false, false)?;
        let inner = self.rect_impl(id, RectKind::Inner, false);
        let fits = self.elements[id].behaviour.content_fits(inner.size());
        self.set_area_impl(id, area.min, area.size, false, false, false)?;

        fits
    }

    /// Smallest size from a one parameter family that fits the content
    ///
    /// `size_func` maps an integer parameter `p` to the size
    /// `(width.scale * p + width.offset, height.scale * p + height.offset)`.
    /// The search runs over `[floor(domain_min), ceil(domain_max)]`; sizes at
    /// or above `domain_max` are assumed to fit, sizes at or below
    /// `domain_min` never do, and negative sizes never fit.
    pub fn size_adjusted_to_content_bisection(
        &mut self,
        id: ElementId,
        size_func: USize,
        domain_min: f32,
        domain_max: f32,
    ) -> Result<Size, UiError> {
        self.node(id)?;

        // parameters are bounded to the i32 range so the search below cannot overflow
        let mut lo = i64::from(clamp_parameter(domain_min.floor()));
        let mut hi = i64::from(clamp_parameter(domain_max.ceil()));
        if lo >= hi {
            return Err(UiError::invalid_request("Length of domain is 0."));
        }

        // grow the domain to a power of two so every step halves it exactly
        let length = (hi - lo) as u64;
        lo -= (length.next_power_of_two() - length) as i64;

        loop {
            let param = (lo + hi + 1) / 2;
            let element_size = size_func.resolve(Size::new(param as f32, param as f32));
            if hi <= lo + 1 {
                return Ok(element_size);
            }

            let param_f = param as f32;
            if param_f <= domain_min {
                lo = param;
            } else if param_f >= domain_max
                || (element_size.width >= 0.0
                    && element_size.height >= 0.0
                    && self.content_fits_for_specified_element_size(id, element_size)?)
            {
                hi = param;
            } else {
                lo = param;
            }
        }
    }
}

fn clamp_parameter(value: f32) -> i32 {
    if value.is_nan() {
        0
    } else {
        value.clamp(i32::MIN as f32, i32::MAX as f32) as i32
    }
}
