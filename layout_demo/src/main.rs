//! Layout demo application
//!
//! Builds a small dialog, resizes the display and prints the resolved
//! rectangles. Pass a `.toml` or `.ron` path to load settings from a file.

use thiserror::Error;
use ui_layout::prelude::*;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Layout error: {0}")]
    Layout(#[from] UiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

struct Dialog {
    window: ElementId,
    title: ElementId,
    message: ElementId,
    ok_button: ElementId,
}

impl Dialog {
    fn build(tree: &mut ElementTree) -> Result<Self, DemoError> {
        let window = tree.create_element_with(Panel::with_title(2.0, 20.0));
        tree.set_size(window, USize::percent(50.0, 40.0))?;
        tree.set_min_size(window, USize::px(240.0, 160.0))?;
        tree.set_horizontal_alignment(window, HorizontalAlignment::Centre)?;
        tree.set_vertical_alignment(window, VerticalAlignment::Centre)?;

        // the title bar sits in the frame, outside the client area
        let title = tree.create_element_with(Label::new("Layout demo").with_padding(2.0));
        tree.set_non_client(title, true)?;
        tree.set_adjust_width_to_content(title, true)?;
        tree.set_adjust_height_to_content(title, true)?;
        tree.add_child(window, title)?;

        let message = tree.create_element_with(
            Label::new("Every element is positioned relative to its parent.")
                .with_padding(4.0)
                .wrapped(),
        );
        tree.set_area(message, UVector2::px(0.0, 0.0), USize::new(UDim::relative(1.0), UDim::px(48.0)))?;
        tree.add_child(window, message)?;

        let ok_button = tree.create_element();
        tree.set_area(
            ok_button,
            UVector2::px(-8.0, -8.0),
            USize::new(UDim::new(0.25, 0.0), UDim::px(24.0)),
        )?;
        tree.set_horizontal_alignment(ok_button, HorizontalAlignment::Right)?;
        tree.set_vertical_alignment(ok_button, VerticalAlignment::Bottom)?;
        tree.add_child(window, ok_button)?;

        Ok(Self {
            window,
            title,
            message,
            ok_button,
        })
    }

    fn log_layout(&self, tree: &ElementTree) -> Result<(), DemoError> {
        for (name, id) in [
            ("window", self.window),
            ("title", self.title),
            ("message", self.message),
            ("ok", self.ok_button),
        ] {
            let rect = tree.unclipped_outer_rect(id)?;
            log::info!(
                "{:>8}: ({:>6.1}, {:>6.1}) - ({:>6.1}, {:>6.1})",
                name,
                rect.min.x,
                rect.min.y,
                rect.max.x,
                rect.max.y
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => UiConfig::load_from_file(path)?,
        None => UiConfig::default(),
    };
    ui_layout::foundation::logging::init_with_filter(&config.log_filter);

    log::info!("Starting layout demo");
    let mut tree = ElementTree::with_config(&config);
    tree.events_mut().subscribe(EventType::Sized, |event: &ElementEvent| {
        log::debug!("{:?} resized", event.source);
        false
    });

    let dialog = Dialog::build(&mut tree)?;
    dialog.log_layout(&tree)?;

    // narrowest message width that still shows the text in three lines
    let size_func = USize::new(UDim::relative(1.0), UDim::px(56.0));
    let narrow = tree.size_adjusted_to_content_bisection(dialog.message, size_func, 0.0, 1000.0)?;
    log::info!("Message fits in {}x{}", narrow.width, narrow.height);

    let display = config.display_size;
    let resized = Size::new(display.width * 0.5, display.height * 0.5);
    log::info!("Display resized to {}x{}", resized.width, resized.height);
    tree.notify_display_size_changed(resized)?;
    dialog.log_layout(&tree)?;

    let mut renderer = NullRenderer::new(resized);
    tree.render(dialog.window, &mut renderer)?;
    log::info!("Rendered {} elements", renderer.draw_calls().len());

    Ok(())
}
