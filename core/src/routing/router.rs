//! Router implementation for managing navigation state
//!
//! The router owns the current path, resolves it through the route table
//! and notifies subscribers synchronously on every navigation.

use super::route::{RouteTable, ViewId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Default number of history entries to keep
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Current and previous location, owned by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_path: String,
    previous_path: Option<String>,
}

impl NavigationState {
    /// Create a state positioned at the initial path
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current_path: initial_path.into(),
            previous_path: None,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn previous_path(&self) -> Option<&str> {
        self.previous_path.as_deref()
    }

    fn move_to(&mut self, path: String) {
        let previous = std::mem::replace(&mut self.current_path, path);
        self.previous_path = Some(previous);
    }
}

/// Payload delivered to every subscriber on navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Path navigated to
    pub path: String,
    /// Path that was current before this navigation
    pub previous: Option<String>,
    /// View the path resolves to
    pub view: ViewId,
    /// False when navigating to the already-current path
    pub changed: bool,
}

/// Router behaviour options
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Whether to keep navigation history for `go_back`
    pub enable_history: bool,
    /// Maximum number of history entries
    pub max_history: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            enable_history: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl RouterOptions {
    /// Disable navigation history
    pub fn without_history(mut self) -> Self {
        self.enable_history = false;
        self
    }

    /// Set maximum history size
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

type SharedListener = Rc<RefCell<dyn FnMut(&NavigationEvent)>>;

#[derive(Default)]
struct ListenerRegistry {
    entries: Vec<(u64, SharedListener)>,
    next_id: u64,
}

impl ListenerRegistry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Capability to deregister a router listener.
///
/// Dropping it leaves the listener registered. Calling `unsubscribe`
/// more than once is a no-op.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    /// Remove the listener; returns whether it was still registered
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|(id, _)| *id != self.id);
        let removed = registry.entries.len() != before;
        if removed {
            debug!(listener = self.id, "Listener unsubscribed");
        }
        removed
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Main router that owns navigation state and the route table
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    state: NavigationState,
    /// Navigation history (most recent first)
    history: Vec<String>,
    options: RouterOptions,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl Router {
    /// Create a router positioned at `initial_path`
    pub fn new(table: RouteTable, initial_path: impl Into<String>) -> Self {
        Self::with_options(table, initial_path, RouterOptions::default())
    }

    /// Create a router with explicit options
    pub fn with_options(
        table: RouteTable,
        initial_path: impl Into<String>,
        options: RouterOptions,
    ) -> Self {
        let state = NavigationState::new(initial_path);
        debug!(
            initial = state.current_path(),
            view = %table.resolve(state.current_path()),
            "Router created"
        );
        Self {
            table,
            state,
            history: Vec::new(),
            options,
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
        }
    }

    /// The live path
    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    /// The view the live path resolves to
    pub fn current_view(&self) -> &ViewId {
        self.table.resolve(self.state.current_path())
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigation history, most recent first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Navigate to `path` and notify every subscriber.
    ///
    /// Navigating to the current path changes nothing but still notifies.
    /// Unknown paths are not an error; they resolve to the fallback view.
    pub fn navigate(&mut self, path: impl Into<String>) {
        let path = path.into();
        let changed = path != self.state.current_path;

        if changed {
            self.push_history(self.state.current_path.clone());
            self.state.move_to(path);
        }

        debug!(path = self.state.current_path(), changed, "Navigate");
        self.notify(changed);
    }

    /// Go back to the previous route in history
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        let target = self.history.remove(0);
        let changed = target != self.state.current_path;
        self.state.move_to(target);

        debug!(path = self.state.current_path(), "Navigate back");
        self.notify(changed);
        true
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.options.enable_history && !self.history.is_empty()
    }

    /// Register a listener invoked on every navigation, in subscription order
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&NavigationEvent) + 'static,
    {
        let mut registry = self.listeners.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let listener: SharedListener = Rc::new(RefCell::new(listener));
        registry.entries.push((id, listener));
        debug!(listener = id, "Listener subscribed");

        Subscription {
            id,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn push_history(&mut self, path: String) {
        if !self.options.enable_history || self.options.max_history == 0 {
            return;
        }
        self.history.insert(0, path);
        if self.history.len() > self.options.max_history {
            self.history.truncate(self.options.max_history);
        }
    }

    fn notify(&self, changed: bool) {
        let event = NavigationEvent {
            path: self.state.current_path.clone(),
            previous: self.state.previous_path.clone(),
            view: self.current_view().clone(),
            changed,
        };

        // Snapshot so listeners may subscribe or unsubscribe while dispatching
        let snapshot: Vec<(u64, SharedListener)> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            (&mut *listener.borrow_mut())(&event);
        }
    }
}
