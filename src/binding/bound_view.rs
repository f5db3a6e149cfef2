//! Bound views: one external view paired with one observable property

use std::{
    fmt,
    rc::{Rc, Weak},
};
use tracing::debug;

use super::observable::{ObservableProperty, Observer};

/// Callback fired when the user finishes an edit on a view
pub type ChangeCallback = Rc<dyn Fn()>;

/// Minimal capability an external view has to offer the binding layer
pub trait ViewHandle {
    /// Currently displayed text
    fn read(&self) -> String;

    /// Replace the displayed text. Must not fire change callbacks.
    fn write(&self, text: &str);

    /// Register a callback fired on user edits
    fn on_change(&self, callback: ChangeCallback);

    /// Style affordance for render targets such as progress bars
    fn set_style(&self, _property: &str, _value: &str) {}

    /// Class affordance for state markers such as the alert state
    fn set_class(&self, _class: &str, _enabled: bool) {}
}

/// Pulls property state into the view
pub type RenderFn<T, V> = Box<dyn Fn(&T, &V)>;

/// Validates raw view text and decides whether to write it into the property
pub type ParseFn<T> = Box<dyn Fn(&ObservableProperty<T>, &str)>;

/// Observer side of a binding.
///
/// Holds a non-owning reference to its property; the property owns the
/// observer list, the controller owns the property.
pub struct BoundView<T, V> {
    view: V,
    property: Weak<ObservableProperty<T>>,
    render: RenderFn<T, V>,
    parse: Option<ParseFn<T>>,
}

impl<T: 'static, V: ViewHandle + 'static> BoundView<T, V> {
    /// Bind `view` to `property` and attach it as an observer.
    ///
    /// When `parse` is given the binding is dual: the view's change callback
    /// pushes its text back through `parse` into the property.
    pub fn new(
        view: V,
        property: &Rc<ObservableProperty<T>>,
        render: RenderFn<T, V>,
        parse: Option<ParseFn<T>>,
    ) -> Rc<Self> {
        let dual = parse.is_some();
        let bound = Rc::new_cyclic(|weak: &Weak<Self>| {
            if dual {
                let weak = weak.clone();
                view.on_change(Rc::new(move || {
                    if let Some(bound) = weak.upgrade() {
                        bound.update_as_subject();
                    }
                }));
            }
            Self {
                view,
                property: Rc::downgrade(property),
                render,
                parse,
            }
        });
        property.attach(bound.clone());
        bound
    }

    /// One-way binding: the view only ever receives updates
    pub fn one_way(view: V, property: &Rc<ObservableProperty<T>>, render: RenderFn<T, V>) -> Rc<Self> {
        Self::new(view, property, render, None)
    }

    /// Dual binding: user edits flow back through `parse`
    pub fn dual(
        view: V,
        property: &Rc<ObservableProperty<T>>,
        render: RenderFn<T, V>,
        parse: ParseFn<T>,
    ) -> Rc<Self> {
        Self::new(view, property, render, Some(parse))
    }

    /// Dual binding without a parser: the raw text is written straight into
    /// the property. Nothing is notified; the caller decides when to render.
    pub fn dual_direct(view: V, property: &Rc<ObservableProperty<T>>, render: RenderFn<T, V>) -> Rc<Self>
    where
        T: From<String>,
    {
        let write_through: ParseFn<T> = Box::new(|p: &ObservableProperty<T>, raw: &str| {
            p.set_state(T::from(raw.to_string()))
        });
        Self::new(view, property, render, Some(write_through))
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_dual(&self) -> bool {
        self.parse.is_some()
    }

    /// Push the view's current text into the property through the parser.
    ///
    /// One-way bindings never write to the property.
    pub fn update_as_subject(&self) {
        let (Some(parse), Some(property)) = (self.parse.as_ref(), self.property.upgrade()) else {
            return;
        };
        let raw = self.view.read();
        debug!("View edit received: {:?}", raw);
        property.set_state_with(raw.as_str(), |p, raw| parse(p, raw));
    }
}

impl<T, V> Observer for BoundView<T, V> {
    fn update_as_observer(&self) {
        if let Some(property) = self.property.upgrade() {
            property.with_state(|state| (self.render)(state, &self.view));
        }
    }
}

impl<T, V: fmt::Debug> fmt::Debug for BoundView<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundView")
            .field("view", &self.view)
            .field("dual", &self.parse.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::MemoryView;

    fn render_number() -> RenderFn<u32, MemoryView> {
        Box::new(|n: &u32, view: &MemoryView| view.write(&n.to_string()))
    }

    #[test]
    fn test_notify_renders_bound_views() {
        let property = Rc::new(ObservableProperty::new(3u32));
        let a = BoundView::one_way(MemoryView::new(""), &property, render_number());
        let b = BoundView::one_way(MemoryView::new(""), &property, render_number());

        property.set_state(12);
        property.notify();

        assert_eq!(a.view().read(), "12");
        assert_eq!(b.view().read(), "12");
    }

    #[test]
    fn test_one_way_view_never_writes_back() {
        let property = Rc::new(ObservableProperty::new(3u32));
        let bound = BoundView::one_way(MemoryView::new(""), &property, render_number());

        bound.view().input("99");
        bound.update_as_subject();

        assert_eq!(property.get_state(), 3);
        assert!(!bound.is_dual());
    }

    #[test]
    fn test_dual_view_edit_reaches_siblings() {
        let property = Rc::new(ObservableProperty::new(3u32));
        let parse: ParseFn<u32> = Box::new(|p: &ObservableProperty<u32>, raw: &str| {
            if let Ok(n) = raw.parse::<u32>() {
                p.set_state(n);
            }
            p.notify();
        });
        let editor = BoundView::dual(MemoryView::new("3"), &property, render_number(), parse);
        let sibling = BoundView::one_way(MemoryView::new("3"), &property, render_number());

        editor.view().input("0041");

        assert_eq!(property.get_state(), 41);
        assert_eq!(editor.view().read(), "41");
        assert_eq!(sibling.view().read(), "41");
    }

    #[test]
    fn test_rejected_edit_rerenders_last_good_value() {
        let property = Rc::new(ObservableProperty::new(5u32));
        let parse: ParseFn<u32> = Box::new(|p: &ObservableProperty<u32>, raw: &str| {
            if let Ok(n) = raw.parse::<u32>() {
                p.set_state(n);
            }
            p.notify();
        });
        let editor = BoundView::dual(MemoryView::new("5"), &property, render_number(), parse);

        editor.view().input("x");

        assert_eq!(property.get_state(), 5);
        assert_eq!(editor.view().read(), "5");
    }

    #[test]
    fn test_direct_dual_writes_raw_text_without_notify() {
        let property = Rc::new(ObservableProperty::new(String::from("Timer 0")));
        let render: RenderFn<String, MemoryView> = Box::new(|s: &String, view: &MemoryView| view.write(s));
        let editor = BoundView::dual_direct(MemoryView::new("Timer 0"), &property, render);
        let sibling = BoundView::one_way(
            MemoryView::new("Timer 0"),
            &property,
            Box::new(|s: &String, view: &MemoryView| view.write(s)),
        );

        editor.view().input("  raw text ");

        assert!(editor.is_dual());
        assert_eq!(property.get_state(), "  raw text ");
        assert_eq!(sibling.view().read(), "Timer 0");

        property.notify();
        assert_eq!(sibling.view().read(), "  raw text ");
    }
}
