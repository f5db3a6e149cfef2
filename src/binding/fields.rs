//! Binding glue for clock fields, the progress bar and the title

use tracing::debug;

use super::{
    bound_view::{ParseFn, RenderFn, ViewHandle},
    observable::ObservableProperty,
};
use crate::{
    state::{ClockValue, Component},
    utils::format::fill_decimal_places,
};

/// Renders one clock component, zero padded to `width`
pub fn component_renderer<V: ViewHandle + 'static>(component: Component, width: usize) -> RenderFn<ClockValue, V> {
    Box::new(move |clock: &ClockValue, view: &V| {
        view.write(&fill_decimal_places(&clock.component(component).to_string(), width));
    })
}

/// Keep only the last `width` characters of `raw`
pub fn sanitize_digits(raw: &str, width: usize) -> &str {
    let len = raw.chars().count();
    if len <= width {
        return raw;
    }
    let skip = raw
        .char_indices()
        .nth(len - width)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &raw[skip..]
}

/// Outcome of checking a field's raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// Complete and valid; carries the parsed number
    Accept(u64),
    /// Valid so far but shorter than the field
    Incomplete,
    /// Contains characters outside `0-9`
    Reject,
}

/// Classify the raw text of a digit field of `width` characters
pub fn classify_digits(raw: &str, width: usize) -> FieldInput {
    let digits = sanitize_digits(raw, width);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return FieldInput::Reject;
    }
    if digits.chars().count() < width {
        return FieldInput::Incomplete;
    }
    match digits.parse::<u64>() {
        Ok(value) => FieldInput::Accept(value),
        Err(_) => FieldInput::Reject,
    }
}

/// Parser for a digit field editing one clock component.
///
/// Accepted input sets the component and notifies every view. Rejected input
/// notifies too, which re-renders the last good value over the bad text.
/// Incomplete input is left alone while the user is still typing. `on_accept`
/// runs after the clock changed and before the views are notified.
pub fn digit_field_parser<F>(component: Component, width: usize, on_accept: F) -> ParseFn<ClockValue>
where
    F: Fn(&ClockValue) + 'static,
{
    Box::new(move |property: &ObservableProperty<ClockValue>, raw: &str| {
        match classify_digits(raw, width) {
            FieldInput::Accept(value) => {
                debug!("Setting {:?} to {}", component, value);
                property.update_state(|clock| clock.set_component(component, value));
                property.with_state(|clock| on_accept(clock));
                property.notify();
            }
            FieldInput::Incomplete => {}
            FieldInput::Reject => {
                debug!("Rejected {:?} input {:?}", component, raw);
                property.notify();
            }
        }
    })
}

/// Elapsed share of the session in percent, clamped to `0..=100`.
///
/// A zero-length session counts as complete.
pub fn progress_percent(total_seconds: u64, initial_total_seconds: u64) -> u8 {
    if initial_total_seconds == 0 {
        return 100;
    }
    let elapsed = initial_total_seconds.saturating_sub(total_seconds) as u128;
    let percent = elapsed * 100 / initial_total_seconds as u128;
    percent.min(100) as u8
}

/// Renders the progress bar from the clock and the current session length
pub fn progress_renderer<V, F>(initial_total_seconds: F) -> RenderFn<ClockValue, V>
where
    V: ViewHandle + 'static,
    F: Fn() -> u64 + 'static,
{
    Box::new(move |clock: &ClockValue, view: &V| {
        let percent = progress_percent(clock.total_seconds(), initial_total_seconds());
        view.write(&percent.to_string());
        view.set_style("width", &format!("{}%", percent));
    })
}

pub fn title_renderer<V: ViewHandle + 'static>() -> RenderFn<String, V> {
    Box::new(|title: &String, view: &V| view.write(title))
}

/// Parser for the title field: trims whitespace, refuses blank titles
pub fn title_parser() -> ParseFn<String> {
    Box::new(|property: &ObservableProperty<String>, raw: &str| {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            property.set_state(trimmed.to_string());
        }
        property.notify();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binding::BoundView, views::MemoryView};
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_sanitize_keeps_last_characters() {
        assert_eq!(sanitize_digits("075", 2), "75");
        assert_eq!(sanitize_digits("7", 2), "7");
        assert_eq!(sanitize_digits("12345", 2), "45");
    }

    #[test]
    fn test_classify_digits() {
        assert_eq!(classify_digits("07", 2), FieldInput::Accept(7));
        assert_eq!(classify_digits("1", 2), FieldInput::Incomplete);
        assert_eq!(classify_digits("", 2), FieldInput::Incomplete);
        assert_eq!(classify_digits("a7", 2), FieldInput::Reject);
        assert_eq!(classify_digits("x07", 2), FieldInput::Accept(7));
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(10, 10), 0);
        assert_eq!(progress_percent(5, 10), 50);
        assert_eq!(progress_percent(0, 10), 100);
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(20, 10), 0);
    }

    fn clock_fields(
        total: u64,
    ) -> (
        Rc<ObservableProperty<ClockValue>>,
        Vec<Rc<BoundView<ClockValue, MemoryView>>>,
    ) {
        let property = Rc::new(ObservableProperty::new(ClockValue::from_secs(total)));
        let fields = [Component::Hours, Component::Minutes, Component::Seconds]
            .into_iter()
            .map(|component| {
                BoundView::dual(
                    MemoryView::new(""),
                    &property,
                    component_renderer(component, 2),
                    digit_field_parser(component, 2, |_| {}),
                )
            })
            .collect();
        property.notify();
        (property, fields)
    }

    fn texts(fields: &[Rc<BoundView<ClockValue, MemoryView>>]) -> Vec<String> {
        fields.iter().map(|f| f.view().read()).collect()
    }

    #[test]
    fn test_seconds_edit_updates_clock_and_siblings() {
        let (property, fields) = clock_fields(65);
        assert_eq!(texts(&fields), ["00", "01", "05"]);

        fields[2].view().input("07");

        assert_eq!(property.state().total_seconds(), 67);
        assert_eq!(texts(&fields), ["00", "01", "07"]);
    }

    #[test]
    fn test_overlong_minutes_edit_ripples_into_hours() {
        let (property, fields) = clock_fields(3661);

        fields[1].view().input("075");

        assert_eq!(property.state().total_seconds(), 3661 + 74 * 60);
        assert_eq!(texts(&fields), ["02", "15", "01"]);
    }

    #[test]
    fn test_invalid_edit_restores_field() {
        let (property, fields) = clock_fields(65);

        fields[2].view().input("0x");

        assert_eq!(property.state().total_seconds(), 65);
        assert_eq!(fields[2].view().read(), "05");
    }

    #[test]
    fn test_incomplete_edit_is_withheld() {
        let (property, fields) = clock_fields(65);

        fields[2].view().input("3");

        assert_eq!(property.state().total_seconds(), 65);
        assert_eq!(fields[2].view().read(), "3");
    }

    #[test]
    fn test_accept_hook_sees_new_value() {
        let property = Rc::new(ObservableProperty::new(ClockValue::from_secs(0)));
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let field = BoundView::dual(
            MemoryView::new("00"),
            &property,
            component_renderer(Component::Minutes, 2),
            digit_field_parser(Component::Minutes, 2, move |clock| sink.set(clock.total_seconds())),
        );

        field.view().input("02");

        assert_eq!(seen.get(), 120);
    }

    #[test]
    fn test_progress_view_sets_width() {
        let property = Rc::new(ObservableProperty::new(ClockValue::from_secs(30)));
        let bar = BoundView::one_way(MemoryView::new(""), &property, progress_renderer(|| 120));

        property.notify();

        assert_eq!(bar.view().read(), "75");
        assert_eq!(bar.view().style("width").as_deref(), Some("75%"));
    }

    #[test]
    fn test_title_rejects_blank() {
        let property = Rc::new(ObservableProperty::new(String::from("Timer 0")));
        let title = BoundView::dual(MemoryView::new(""), &property, title_renderer(), title_parser());

        title.view().input("   ");
        assert_eq!(property.get_state(), "Timer 0");
        assert_eq!(title.view().read(), "Timer 0");

        title.view().input(" Tea ");
        assert_eq!(title.view().read(), "Tea");
    }
}
