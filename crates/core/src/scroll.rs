//! Scroll target resolution and same-page anchor handling.
//!
//! Layout is abstracted behind [`Layout`] so positions can be computed
//! against any rendered document (or a fixture in tests).

use serde::Serialize;

/// Opaque handle to a rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

/// Bounding box top edge, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
}

pub trait Layout {
    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<ElementRef>;

    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    fn rect(&self, element: &ElementRef) -> Option<Rect>;

    /// Current vertical scroll offset of the window.
    fn window_scroll_y(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    Offset(f64),
    Selector(String),
    Element(ElementRef),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrollContainer {
    Window,
    /// A scrollable element: its viewport-relative top and its own offset.
    Element { top: f64, scroll_top: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollCommand {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// URL fragment change to apply after an anchor scroll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryUpdate {
    pub fragment: String,
    /// Replace the current entry instead of pushing a new one.
    pub replace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorNavigation {
    pub scroll: ScrollCommand,
    pub history: HistoryUpdate,
}

/// Absolute scroll position for `target` inside `container`, minus `offset`.
///
/// Returns `None` when a selector or element cannot be located.
pub fn resolve_scroll_top(
    target: &ScrollTarget,
    container: &ScrollContainer,
    layout: &dyn Layout,
    offset: f64,
) -> Option<f64> {
    let element = match target {
        ScrollTarget::Offset(px) => return Some((px - offset).max(0.0)),
        ScrollTarget::Selector(selector) => layout.query(selector)?,
        ScrollTarget::Element(element) => element.clone(),
    };
    let rect = layout.rect(&element)?;

    let top = match container {
        ScrollContainer::Window => rect.top + layout.window_scroll_y() - offset,
        ScrollContainer::Element { top, scroll_top } => rect.top - top + scroll_top - offset,
    };
    Some(top.max(0.0))
}

/// Build a scroll command for `target`, or `None` if it cannot be resolved.
pub fn scroll_to(
    target: &ScrollTarget,
    container: &ScrollContainer,
    layout: &dyn Layout,
    offset: f64,
    behavior: ScrollBehavior,
) -> Option<ScrollCommand> {
    resolve_scroll_top(target, container, layout, offset).map(|top| ScrollCommand { top, behavior })
}

/// Fragment id of a same-page anchor, if `href` points at the current page.
fn same_page_fragment<'a>(href: &'a str, current_path: &str) -> Option<&'a str> {
    let (path, fragment) = href.split_once('#')?;
    if !path.is_empty() && path != current_path {
        return None;
    }
    (!fragment.is_empty()).then_some(fragment)
}

/// Intercept a click on `href` while at `current_path`.
///
/// Same-page anchors that resolve to an element produce a smooth window
/// scroll and a replace-style fragment update. Anything else returns `None`
/// and should navigate normally.
pub fn handle_anchor_click(
    href: &str,
    current_path: &str,
    layout: &dyn Layout,
    offset: f64,
) -> Option<AnchorNavigation> {
    let fragment = same_page_fragment(href, current_path)?;
    let element = layout.element_by_id(fragment)?;
    let scroll = scroll_to(
        &ScrollTarget::Element(element),
        &ScrollContainer::Window,
        layout,
        offset,
        ScrollBehavior::Smooth,
    )?;
    Some(AnchorNavigation {
        scroll,
        history: HistoryUpdate {
            fragment: format!("#{fragment}"),
            replace: true,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Page {
        tops: HashMap<String, f64>,
        scroll_y: f64,
    }

    impl Page {
        fn new(scroll_y: f64) -> Self {
            let tops = [("services", 400.0), ("contact", -50.0), ("faq", 1200.0)]
                .into_iter()
                .map(|(id, top)| (id.to_string(), top))
                .collect();
            Self { tops, scroll_y }
        }
    }

    impl Layout for Page {
        fn query(&self, selector: &str) -> Option<ElementRef> {
            selector
                .strip_prefix('#')
                .and_then(|id| self.element_by_id(id))
        }

        fn element_by_id(&self, id: &str) -> Option<ElementRef> {
            self.tops.contains_key(id).then(|| ElementRef(id.to_string()))
        }

        fn rect(&self, element: &ElementRef) -> Option<Rect> {
            self.tops.get(&element.0).map(|top| Rect { top: *top })
        }

        fn window_scroll_y(&self) -> f64 {
            self.scroll_y
        }
    }

    #[test]
    fn pixel_offset_subtracts_header_offset() {
        let page = Page::new(0.0);
        let top = resolve_scroll_top(&ScrollTarget::Offset(500.0), &ScrollContainer::Window, &page, 80.0);
        assert_eq!(top, Some(420.0));
    }

    #[test]
    fn window_target_adds_current_scroll() {
        let page = Page::new(300.0);
        let top = resolve_scroll_top(
            &ScrollTarget::Selector("#services".into()),
            &ScrollContainer::Window,
            &page,
            80.0,
        );
        assert_eq!(top, Some(620.0));
    }

    #[test]
    fn element_container_is_relative_to_its_top() {
        let page = Page::new(999.0);
        let container = ScrollContainer::Element { top: 100.0, scroll_top: 50.0 };
        let top = resolve_scroll_top(
            &ScrollTarget::Element(ElementRef("faq".into())),
            &container,
            &page,
            0.0,
        );
        assert_eq!(top, Some(1150.0));
    }

    #[test]
    fn result_is_clamped_at_zero() {
        let page = Page::new(0.0);
        let top = resolve_scroll_top(
            &ScrollTarget::Selector("#contact".into()),
            &ScrollContainer::Window,
            &page,
            20.0,
        );
        assert_eq!(top, Some(0.0));
    }

    #[test]
    fn unknown_selector_is_none() {
        let page = Page::new(0.0);
        let target = ScrollTarget::Selector("#missing".into());
        assert_eq!(resolve_scroll_top(&target, &ScrollContainer::Window, &page, 0.0), None);
    }

    #[test]
    fn same_page_anchor_scrolls_smoothly_and_replaces_history() {
        let page = Page::new(100.0);
        for href in ["#services", "/eye-care#services"] {
            let nav = handle_anchor_click(href, "/eye-care", &page, 80.0).unwrap();
            assert_eq!(nav.scroll.top, 420.0);
            assert_eq!(nav.scroll.behavior, ScrollBehavior::Smooth);
            assert_eq!(nav.history.fragment, "#services");
            assert!(nav.history.replace);
        }
    }

    #[test]
    fn other_links_are_not_intercepted() {
        let page = Page::new(0.0);
        assert!(handle_anchor_click("/gynecology#services", "/eye-care", &page, 0.0).is_none());
        assert!(handle_anchor_click("/eye-care", "/eye-care", &page, 0.0).is_none());
        assert!(handle_anchor_click("#", "/eye-care", &page, 0.0).is_none());
        assert!(handle_anchor_click("#nowhere", "/eye-care", &page, 0.0).is_none());
    }
}
