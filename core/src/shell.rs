//! Shell wiring the router, transition coordinator and overlay menu
//!
//! The router owns navigation state. The coordinator and the menu observe
//! it through router subscriptions, in that order, so every navigation
//! updates the active link, starts (or skips) a transition and closes the
//! menu.

use crate::config::SiteConfig;
use crate::error::Result;
use crate::menu::{MenuRegion, OverlayMenu};
use crate::routing::{nav_items, NavItem, NavigationEvent, Router, Subscription, ViewId};
use crate::transition::{CompletionToken, RenderEngine, TransitionCoordinator, TransitionState};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Single-threaded navigation shell for one site
pub struct Shell<E: RenderEngine + 'static> {
    router: Router,
    coordinator: Rc<RefCell<TransitionCoordinator<E>>>,
    menu: Rc<RefCell<OverlayMenu>>,
}

impl<E: RenderEngine + 'static> Shell<E> {
    /// Validate the configuration and mount the initial view
    pub fn new(config: &SiteConfig, engine: E) -> Result<Self> {
        config.validate()?;
        let table = config.route_table()?;
        let router = Router::new(table, config.initial_path.clone());

        let coordinator = Rc::new(RefCell::new(TransitionCoordinator::new(
            engine,
            router.current_view().clone(),
            config.animation.clone(),
        )));
        let menu = Rc::new(RefCell::new(OverlayMenu::with_config(&config.animation)));

        let observer = Rc::clone(&coordinator);
        router.subscribe(move |event| observer.borrow_mut().on_navigation(event));
        let observer = Rc::clone(&menu);
        router.subscribe(move |event| observer.borrow_mut().on_navigation(event));

        info!(
            routes = router.table().len(),
            initial = router.current_path(),
            mode = ?config.animation.mode,
            "Shell ready"
        );

        Ok(Self {
            router,
            coordinator,
            menu,
        })
    }

    /// Navigate to a path
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.router.navigate(path);
    }

    /// Go back to the previous path
    pub fn go_back(&mut self) -> bool {
        self.router.go_back()
    }

    /// Register an additional navigation listener
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&NavigationEvent) + 'static,
    {
        self.router.subscribe(listener)
    }

    /// Report an animation completion from the engine
    pub fn complete(&self, token: CompletionToken) -> bool {
        self.coordinator.borrow_mut().complete(token)
    }

    pub fn toggle_menu(&self) {
        self.menu.borrow_mut().toggle();
    }

    pub fn pointer_down(&self, region: MenuRegion) {
        self.menu.borrow_mut().pointer_down(region);
    }

    pub fn menu_open(&self) -> bool {
        self.menu.borrow().is_open()
    }

    /// Register a hook called whenever the menu opens or closes
    pub fn on_menu_change<F>(&self, hook: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.menu.borrow_mut().on_change(hook);
    }

    /// Register a hook called on every transition state change
    pub fn on_transition_change<F>(&self, hook: F)
    where
        F: FnMut(&TransitionState) + 'static,
    {
        self.coordinator.borrow_mut().on_change(hook);
    }

    /// Navigation entries with the active flag for the current path
    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items(self.router.table(), self.router.current_path())
    }

    /// Delay before the `index`-th overlay menu item animates in
    pub fn menu_item_delay(&self, index: usize) -> std::time::Duration {
        self.menu.borrow().item_delay(index)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_path(&self) -> &str {
        self.router.current_path()
    }

    pub fn transition_state(&self) -> TransitionState {
        self.coordinator.borrow().state().clone()
    }

    /// View currently on screen
    pub fn active_view(&self) -> ViewId {
        self.coordinator.borrow().state().active_view().clone()
    }

    pub fn live_token(&self) -> Option<CompletionToken> {
        self.coordinator.borrow().live_token()
    }

    /// Borrow the render engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        f(self.coordinator.borrow().engine())
    }

    /// Mutably borrow the render engine
    pub fn with_engine_mut<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(self.coordinator.borrow_mut().engine_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{RecordingEngine, TransitionPhase};

    fn shell() -> Shell<RecordingEngine> {
        Shell::new(&SiteConfig::default(), RecordingEngine::new()).unwrap()
    }

    fn settle(shell: &Shell<RecordingEngine>) {
        while let Some(token) = shell.live_token() {
            shell.with_engine_mut(|e| e.finish(token));
            assert!(shell.complete(token));
        }
    }

    #[test]
    fn test_initial_view_mounted() {
        let shell = shell();
        assert_eq!(shell.active_view(), ViewId::from("hero"));
        assert_eq!(shell.with_engine(|e| e.mounted().to_vec()), vec![ViewId::from("hero")]);
        assert!(shell.nav_items()[0].active);
    }

    #[test]
    fn test_navigation_drives_all_components() {
        let mut shell = shell();
        shell.toggle_menu();
        assert!(shell.menu_open());

        shell.navigate("/projects");
        assert!(!shell.menu_open());
        assert_eq!(shell.transition_state().phase(), TransitionPhase::Exiting);
        let active: Vec<_> = shell.nav_items().into_iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Projects");

        settle(&shell);
        assert_eq!(
            shell.transition_state(),
            TransitionState::Idle(ViewId::from("projects"))
        );
    }

    #[test]
    fn test_go_back_transitions() {
        let mut shell = shell();
        shell.navigate("/about");
        settle(&shell);
        assert!(shell.go_back());
        assert_eq!(shell.current_path(), "/");
        settle(&shell);
        assert_eq!(shell.active_view(), ViewId::from("hero"));
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let mut config = SiteConfig::default();
        config.routes.push(config.routes[0].clone());
        assert!(Shell::new(&config, RecordingEngine::new()).is_err());
    }

    #[test]
    fn test_menu_item_delay_uses_config() {
        let shell = shell();
        assert_eq!(shell.menu_item_delay(2).as_millis(), 200);
    }
}
