use super::{tree, FixedInner};
use crate::foundation::math::Vec2;
use crate::ui::{
    AspectMode, HorizontalAlignment, Rect, Size, UDim, URect, USize, UVector2,
    VerticalAlignment,
};
use approx::assert_relative_eq;

#[test]
fn test_relative_sizing() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::percent(50.0, 25.0)).unwrap();
    tree.add_child(root, child).unwrap();

    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 100.0));
    assert_eq!(tree.pixel_size(child).unwrap(), Size::new(50.0, 25.0));

    let inner_child = tree.create_element();
    tree.add_child(child, inner_child).unwrap();
    tree.set_size(inner_child, USize::percent(200.0, 100.0)).unwrap();

    assert_eq!(tree.pixel_size(inner_child).unwrap(), Size::new(100.0, 25.0));
}

#[test]
fn test_relative_positioning() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_position(child, UVector2::new(UDim::percent(50.0), UDim::percent(50.0)))
        .unwrap();
    tree.set_size(child, USize::px(10.0, 10.0)).unwrap();
    tree.add_child(root, child).unwrap();

    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(50.0, 50.0, 60.0, 60.0));
}

#[test]
fn test_min_max_size() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();

    tree.set_max_size(root, USize::px(50.0, 50.0)).unwrap();
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(50.0, 50.0));
    assert_eq!(tree.size(root).unwrap(), USize::px(100.0, 100.0));

    tree.set_max_size(root, USize::px(75.0, 75.0)).unwrap();
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(75.0, 75.0));
    assert_eq!(tree.size(root).unwrap(), USize::px(100.0, 100.0));

    tree.set_max_size(root, USize::px(1000.0, 1000.0)).unwrap();
    tree.set_min_size(root, USize::px(125.0, 125.0)).unwrap();
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(125.0, 125.0));
    assert_eq!(tree.size(root).unwrap(), USize::px(100.0, 100.0));
}

#[test]
fn test_max_size_wins_over_min_size() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(150.0, 150.0)).unwrap();
    tree.set_min_size(root, USize::px(200.0, 200.0)).unwrap();
    tree.set_max_size(root, USize::px(100.0, 100.0)).unwrap();

    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 100.0));
}

#[test]
fn test_max_width_wins_with_unbounded_height() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_min_size(root, USize::px(60.0, 0.0)).unwrap();
    tree.set_max_size(root, USize::px(50.0, 0.0)).unwrap();

    assert_eq!(tree.pixel_size(root).unwrap().width, 50.0);
}

#[test]
fn test_min_max_resolve_against_root_container() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::percent(10.0, 10.0)).unwrap();
    tree.set_min_size(child, USize::percent(50.0, 0.0)).unwrap();
    tree.add_child(root, child).unwrap();

    // half the 800px display, not half the 100px parent
    assert_eq!(tree.pixel_size(child).unwrap(), Size::new(400.0, 10.0));
}

#[test]
fn test_horizontal_left_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 0.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(50.0, 0.0)).unwrap();
    tree.add_child(root, child).unwrap();

    assert_eq!(tree.element(root).unwrap().horizontal_alignment(), HorizontalAlignment::Left);
    assert_eq!(tree.element(child).unwrap().horizontal_alignment(), HorizontalAlignment::Left);
    assert_eq!(tree.unclipped_outer_rect(root).unwrap(), Rect::new(0.0, 0.0, 100.0, 0.0));
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 0.0, 50.0, 0.0));

    tree.set_position(child, UVector2::px(10.0, 0.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(10.0, 0.0, 60.0, 0.0));
}

#[test]
fn test_horizontal_centre_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 0.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(50.0, 0.0)).unwrap();
    tree.add_child(root, child).unwrap();

    tree.set_horizontal_alignment(child, HorizontalAlignment::Centre).unwrap();
    assert_eq!(tree.unclipped_outer_rect(root).unwrap(), Rect::new(0.0, 0.0, 100.0, 0.0));
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(25.0, 0.0, 75.0, 0.0));

    tree.set_position(child, UVector2::px(10.0, 0.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(35.0, 0.0, 85.0, 0.0));
}

#[test]
fn test_horizontal_right_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 0.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(50.0, 0.0)).unwrap();
    tree.add_child(root, child).unwrap();

    tree.set_horizontal_alignment(child, HorizontalAlignment::Right).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(50.0, 0.0, 100.0, 0.0));

    tree.set_position(child, UVector2::px(-10.0, 0.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(40.0, 0.0, 90.0, 0.0));
}

#[test]
fn test_vertical_top_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(0.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(0.0, 50.0)).unwrap();
    tree.add_child(root, child).unwrap();

    assert_eq!(tree.element(child).unwrap().vertical_alignment(), VerticalAlignment::Top);
    assert_eq!(tree.unclipped_outer_rect(root).unwrap(), Rect::new(0.0, 0.0, 0.0, 100.0));
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 0.0, 0.0, 50.0));

    tree.set_position(child, UVector2::px(0.0, 5.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 5.0, 0.0, 55.0));
}

#[test]
fn test_vertical_centre_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(0.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(0.0, 50.0)).unwrap();
    tree.add_child(root, child).unwrap();

    tree.set_vertical_alignment(child, VerticalAlignment::Centre).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 25.0, 0.0, 75.0));

    tree.set_position(child, UVector2::px(0.0, 5.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 30.0, 0.0, 80.0));
}

#[test]
fn test_vertical_bottom_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(0.0, 100.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::px(0.0, 50.0)).unwrap();
    tree.add_child(root, child).unwrap();

    tree.set_vertical_alignment(child, VerticalAlignment::Bottom).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 50.0, 0.0, 100.0));

    tree.set_position(child, UVector2::px(0.0, -5.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 45.0, 0.0, 95.0));
}

#[test]
fn test_aspect_locking() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();

    assert_eq!(tree.element(root).unwrap().aspect_mode(), AspectMode::Ignore);
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 100.0));

    tree.set_aspect_mode(root, AspectMode::Shrink).unwrap();
    tree.set_aspect_ratio(root, 1.0 / 2.0).unwrap();
    assert_relative_eq!(tree.pixel_size(root).unwrap(), Size::new(50.0, 100.0));

    tree.set_aspect_mode(root, AspectMode::Expand).unwrap();
    tree.set_aspect_ratio(root, 1.0 / 2.0).unwrap();
    assert_relative_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 200.0));

    tree.set_aspect_mode(root, AspectMode::Shrink).unwrap();
    tree.set_aspect_ratio(root, 2.0).unwrap();
    assert_relative_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 50.0));

    tree.set_aspect_mode(root, AspectMode::Expand).unwrap();
    tree.set_aspect_ratio(root, 2.0).unwrap();
    assert_relative_eq!(tree.pixel_size(root).unwrap(), Size::new(200.0, 100.0));
}

#[test]
fn test_aspect_mode_respects_max_size() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();
    tree.set_max_size(root, USize::px(0.0, 150.0)).unwrap();
    tree.set_aspect_ratio(root, 0.5).unwrap();
    tree.set_aspect_mode(root, AspectMode::Expand).unwrap();

    // expanding to 100x200 breaks the max height, the ratio is kept
    assert_relative_eq!(tree.pixel_size(root).unwrap(), Size::new(75.0, 150.0));
}

#[test]
fn test_zero_aspect_ratio_collapses_width() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::px(100.0, 50.0)).unwrap();
    tree.set_aspect_mode(root, AspectMode::Shrink).unwrap();

    tree.set_aspect_ratio(root, 0.0).unwrap();
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(0.0, 50.0));

    tree.set_aspect_ratio(root, 2.0).unwrap();
    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(100.0, 50.0));
}

#[test]
fn test_pixel_alignment() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_position(root, UVector2::px(0.2, 0.2)).unwrap();
    tree.set_size(root, USize::px(100.0, 100.0)).unwrap();

    assert!(tree.element(root).unwrap().is_pixel_aligned());
    assert_eq!(tree.unclipped_outer_rect(root).unwrap(), Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_relative_eq!(
        tree.outer_rect_fresh(root, true).unwrap(),
        Rect::new(0.2, 0.2, 100.2, 100.2)
    );

    tree.set_pixel_aligned(root, false).unwrap();
    assert_relative_eq!(
        tree.unclipped_outer_rect(root).unwrap(),
        Rect::new(0.2, 0.2, 100.2, 100.2)
    );
}

#[test]
fn test_area_round_trips_exactly() {
    let mut tree = tree();
    let id = tree.create_element();
    let position = UVector2::new(UDim::new(0.333_333, 7.1), UDim::new(-0.25, 1e-3));
    let size = USize::new(UDim::new(0.1, -3.3), UDim::new(2.5, 0.0));

    tree.set_area(id, position, size).unwrap();

    assert_eq!(tree.area(id).unwrap(), URect::new(position, size));
    assert_eq!(tree.position(id).unwrap(), position);
    assert_eq!(tree.size(id).unwrap(), size);
}

#[test]
fn test_area_setters() {
    let mut tree = tree();
    let id = tree.create_element();
    tree.set_area_dims(id, UDim::px(1.0), UDim::px(2.0), UDim::px(30.0), UDim::px(40.0))
        .unwrap();
    assert_eq!(tree.unclipped_outer_rect(id).unwrap(), Rect::new(1.0, 2.0, 31.0, 42.0));

    tree.set_x_position(id, UDim::px(10.0)).unwrap();
    tree.set_y_position(id, UDim::px(20.0)).unwrap();
    tree.set_width(id, UDim::relative(0.5)).unwrap();
    tree.set_height(id, UDim::px(5.0)).unwrap();
    assert_eq!(tree.unclipped_outer_rect(id).unwrap(), Rect::new(10.0, 20.0, 410.0, 25.0));

    let area = URect::from_dims(UDim::px(0.0), UDim::px(0.0), UDim::relative(1.0), UDim::relative(1.0));
    tree.set_area_rect(id, area).unwrap();
    assert_eq!(tree.pixel_size(id).unwrap(), Size::new(800.0, 600.0));
}

#[test]
fn test_top_left_sizing_keeps_position_when_size_is_stuck() {
    let mut tree = tree();
    let id = tree.create_element();
    tree.set_max_size(id, USize::px(100.0, 100.0)).unwrap();
    tree.set_size(id, USize::px(150.0, 150.0)).unwrap();

    tree.set_area_impl(id, UVector2::px(10.0, 10.0), USize::px(120.0, 120.0), true, true, true)
        .unwrap();
    assert_eq!(tree.position(id).unwrap(), UVector2::zero());
    assert_eq!(tree.size(id).unwrap(), USize::px(120.0, 120.0));

    tree.set_area_impl(id, UVector2::px(10.0, 10.0), USize::px(80.0, 80.0), true, true, true)
        .unwrap();
    assert_eq!(tree.position(id).unwrap(), UVector2::px(10.0, 10.0));
    assert_eq!(tree.unclipped_outer_rect(id).unwrap(), Rect::new(10.0, 10.0, 90.0, 90.0));
}

#[test]
fn test_cached_rects_match_fresh_computation() {
    let mut tree = tree();
    let root = tree.create_element_with(crate::ui::Panel::with_border(3.0));
    let child = tree.create_element();
    let grandchild = tree.create_element();
    tree.add_child(root, child).unwrap();
    tree.add_child(child, grandchild).unwrap();

    let check = |tree: &crate::ui::ElementTree| {
        for id in [root, child, grandchild] {
            assert_eq!(
                tree.unclipped_outer_rect(id).unwrap(),
                tree.outer_rect_fresh(id, false).unwrap()
            );
            assert_eq!(
                tree.unclipped_inner_rect(id).unwrap(),
                tree.inner_rect_fresh(id, false).unwrap()
            );
            assert_eq!(
                tree.pixel_size(id).unwrap(),
                tree.calculate_pixel_size(id, false).unwrap()
            );
        }
    };

    tree.set_area(root, UVector2::px(5.0, 5.0), USize::px(300.0, 200.0)).unwrap();
    check(&tree);
    tree.set_area(child, UVector2::new(UDim::percent(10.0), UDim::px(4.0)), USize::percent(50.0, 50.0))
        .unwrap();
    check(&tree);
    tree.set_size(grandchild, USize::new(UDim::new(0.5, 3.0), UDim::relative(1.0)))
        .unwrap();
    tree.set_horizontal_alignment(grandchild, HorizontalAlignment::Right).unwrap();
    check(&tree);
    tree.set_position(root, UVector2::px(50.0, 60.0)).unwrap();
    check(&tree);
    tree.set_size(root, USize::px(111.0, 77.0)).unwrap();
    check(&tree);
    tree.set_vertical_alignment(child, VerticalAlignment::Bottom).unwrap();
    check(&tree);
    tree.notify_display_size_changed(Size::new(1024.0, 768.0)).unwrap();
    check(&tree);
}

#[test]
fn test_display_size_change_relayouts_roots() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_size(root, USize::percent(50.0, 50.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::percent(50.0, 100.0)).unwrap();
    tree.add_child(root, child).unwrap();
    assert_eq!(tree.pixel_size(child).unwrap(), Size::new(200.0, 300.0));

    tree.notify_display_size_changed(Size::new(1000.0, 400.0)).unwrap();

    assert_eq!(tree.pixel_size(root).unwrap(), Size::new(500.0, 200.0));
    assert_eq!(tree.pixel_size(child).unwrap(), Size::new(250.0, 200.0));
}

#[test]
fn test_fresh_rect_skipping_alignment_follows_unaligned_parent() {
    let mut tree = tree();
    let root = tree.create_element();
    tree.set_area(root, UVector2::px(0.4, 0.0), USize::px(10.5, 10.0)).unwrap();
    let child = tree.create_element();
    tree.set_size(child, USize::percent(100.0, 100.0)).unwrap();
    tree.add_child(root, child).unwrap();

    // aligned: 10.5 rounds away from zero
    assert_eq!(tree.unclipped_outer_rect(child).unwrap(), Rect::new(0.0, 0.0, 11.0, 10.0));

    let fresh = tree.outer_rect_fresh(child, true).unwrap();
    assert_relative_eq!(fresh.min, Vec2::new(0.4, 0.0));
    assert_relative_eq!(fresh.size(), Size::new(10.5, 10.0));
}

#[test]
fn test_inner_rect_comes_from_behaviour() {
    let mut tree = tree();
    let root = tree.create_element_with(FixedInner);
    tree.set_area(root, UVector2::px(100.0, 100.0), USize::px(300.0, 300.0)).unwrap();

    assert_eq!(tree.unclipped_inner_rect(root).unwrap(), Rect::new(110.0, 110.0, 160.0, 160.0));
    assert_eq!(tree.client_child_content_area(root).unwrap(), Rect::new(110.0, 110.0, 160.0, 160.0));
    assert_eq!(
        tree.non_client_child_content_area(root).unwrap(),
        Rect::new(100.0, 100.0, 400.0, 400.0)
    );
}
