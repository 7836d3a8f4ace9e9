//! Overlay menu state machine
//!
//! One authoritative open/closed flag for the collapsible navigation
//! surface. Navigation always forces it closed; a pointer press on the
//! backdrop closes it; presses inside the panel are ignored.

use crate::routing::NavigationEvent;
use crate::transition::AnimationConfig;
use std::time::Duration;
use tracing::debug;

/// Where a pointer press landed relative to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRegion {
    /// The menu panel itself
    Inside,
    /// Anywhere outside the panel, including the backdrop
    Outside,
    /// The button that opens and closes the menu
    Toggle,
}

type MenuHook = Box<dyn FnMut(bool)>;

/// Open/closed state of the overlay menu
pub struct OverlayMenu {
    open: bool,
    stagger: Duration,
    slide: Duration,
    hooks: Vec<MenuHook>,
}

impl OverlayMenu {
    /// Create a closed menu
    pub fn new() -> Self {
        Self::with_config(&AnimationConfig::default())
    }

    /// Create a closed menu with timing from the animation config
    pub fn with_config(config: &AnimationConfig) -> Self {
        Self {
            open: false,
            stagger: Duration::from_millis(config.menu_stagger_ms),
            slide: Duration::from_millis(config.menu_slide_ms),
            hooks: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Register a hook called with the new state whenever it flips
    pub fn on_change<F>(&mut self, hook: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Flip the state
    pub fn toggle(&mut self) {
        let next = !self.open;
        self.set(next);
    }

    /// Open the menu; returns whether the state changed
    pub fn open(&mut self) -> bool {
        self.set(true)
    }

    /// Close the menu; returns whether the state changed
    pub fn close(&mut self) -> bool {
        self.set(false)
    }

    /// Force the menu closed on every navigation, changed path or not
    pub fn on_navigation(&mut self, event: &NavigationEvent) {
        if self.close() {
            debug!(path = %event.path, "Menu closed by navigation");
        }
    }

    /// Handle a pointer press
    pub fn pointer_down(&mut self, region: MenuRegion) {
        match region {
            MenuRegion::Inside => {}
            MenuRegion::Outside => {
                if self.close() {
                    debug!("Menu closed by outside press");
                }
            }
            MenuRegion::Toggle => self.toggle(),
        }
    }

    /// Entry delay of the `index`-th menu item
    pub fn item_delay(&self, index: usize) -> Duration {
        self.stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Duration of the panel slide
    pub fn slide_duration(&self) -> Duration {
        self.slide
    }

    fn set(&mut self, open: bool) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        debug!(open, "Menu state");
        for hook in &mut self.hooks {
            hook(open);
        }
        true
    }
}

impl Default for OverlayMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OverlayMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayMenu")
            .field("open", &self.open)
            .field("stagger", &self.stagger)
            .field("slide", &self.slide)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ViewId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event(path: &str, changed: bool) -> NavigationEvent {
        NavigationEvent {
            path: path.to_string(),
            previous: None,
            view: ViewId::from("home"),
            changed,
        }
    }

    fn counting(menu: &mut OverlayMenu) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        menu.on_change(move |open| sink.borrow_mut().push(open));
        seen
    }

    #[test]
    fn test_toggle_and_absolute_setters() {
        let mut menu = OverlayMenu::new();
        assert!(!menu.is_open());
        menu.toggle();
        assert!(menu.is_open());
        assert!(!menu.open());
        assert!(menu.close());
        assert!(!menu.close());
    }

    #[test]
    fn test_navigation_forces_close() {
        let mut menu = OverlayMenu::new();
        menu.open();
        menu.on_navigation(&event("/", false));
        assert!(!menu.is_open());

        menu.on_navigation(&event("/about", true));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_outside_press() {
        let mut menu = OverlayMenu::new();
        let seen = counting(&mut menu);

        menu.pointer_down(MenuRegion::Outside);
        assert!(!menu.is_open());
        assert!(seen.borrow().is_empty());

        menu.pointer_down(MenuRegion::Toggle);
        menu.pointer_down(MenuRegion::Inside);
        assert!(menu.is_open());
        menu.pointer_down(MenuRegion::Outside);
        assert!(!menu.is_open());
        menu.pointer_down(MenuRegion::Outside);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_item_delay_staggers() {
        let menu = OverlayMenu::new();
        assert_eq!(menu.item_delay(0), Duration::ZERO);
        assert_eq!(menu.item_delay(3), Duration::from_millis(300));
        assert_eq!(menu.slide_duration(), Duration::from_millis(400));
    }
}
