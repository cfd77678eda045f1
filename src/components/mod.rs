//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod icons;
mod navigation;
mod sidebar;

pub mod jukebox;
pub mod outputs;
pub mod search_expression;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use icons::*;
pub use navigation::*;
pub use outputs::{OutputsPanel, VolumeSignal};
pub use search_expression::SearchExpression;
pub use sidebar::*;
// Views are accessed via views::ViewName
