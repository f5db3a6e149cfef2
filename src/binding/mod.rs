//! Observer binding module
//! 
//! Keeps one piece of state in sync with any number of views. Views pull
//! state on notify; dual-bound views also push user edits back through a
//! parser.

pub mod bound_view;
pub mod fields;
pub mod observable;

pub use bound_view::{BoundView, ChangeCallback, ParseFn, RenderFn, ViewHandle};
pub use fields::{
    classify_digits, component_renderer, digit_field_parser, progress_percent, progress_renderer,
    sanitize_digits, title_parser, title_renderer, FieldInput,
};
pub use observable::{ObservableProperty, Observer};
