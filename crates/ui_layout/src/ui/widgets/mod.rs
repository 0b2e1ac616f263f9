//! UI widgets module
//!
//! Element behaviours for the common cases: decorated panels, text labels
//! and subtrees anchored to an off-screen surface.

pub mod panel;
pub mod label;
pub mod surface;

pub use panel::Panel;
pub use label::Label;
pub use surface::RenderSurface;
