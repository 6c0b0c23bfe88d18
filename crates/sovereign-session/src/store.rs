//! Tab Store
//!
//! Single owner of the browsing session. Every operation runs to completion,
//! leaves the collection consistent, notifies subscribers and saves.
//!
//! Only the active tab has a live content surface. Each (re)load of that
//! surface gets a new generation; ready signals carrying an older
//! [`LoadTicket`] are dropped.

use serde::Serialize;
use sovereign_routing::RoutingPolicy;
use sovereign_tabs::{NavigationController, Tab, TabCollection, TabError};

use crate::events::{StoreEvent, SubscriptionId};
use crate::persistence::SessionPersistence;

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Identifies one load of the active surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LoadTicket {
    pub tab_id: String,
    pub generation: u64,
}

/// What the host should mount as the content surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceTarget {
    pub tab_id: String,
    pub target_url: String,
    pub ticket: LoadTicket,
}

pub struct TabStore {
    collection: TabCollection,
    policy: RoutingPolicy,
    persistence: Box<dyn SessionPersistence>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    /// Generation of the active surface
    generation: u64,
}

impl TabStore {
    /// Load the previous session, or start with one blank tab.
    pub fn restore<P>(persistence: P, policy: RoutingPolicy) -> Self
    where
        P: SessionPersistence + 'static,
    {
        let collection = match persistence.load() {
            Some(collection) => {
                tracing::info!(
                    tab_count = collection.len(),
                    active_tab_id = %collection.active_tab_id,
                    "Restored session"
                );
                collection
            }
            None => {
                tracing::info!("No prior session, starting with a blank tab");
                TabCollection::seeded()
            }
        };

        let mut store = Self {
            collection,
            policy,
            persistence: Box::new(persistence),
            listeners: Vec::new(),
            next_subscription: 0,
            generation: 0,
        };
        store.mount_active();
        store.persist();
        store
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    pub fn list_tabs(&self) -> &[Tab] {
        &self.collection.tabs
    }

    pub fn get_tab(&self, id: &str) -> Option<&Tab> {
        self.collection.get(id)
    }

    pub fn active_tab_id(&self) -> &str {
        &self.collection.active_tab_id
    }

    pub fn active_tab(&self) -> &Tab {
        match self.collection.active_tab() {
            Some(tab) => tab,
            // The active id always names a member; the collection is never empty
            None => &self.collection.tabs[0],
        }
    }

    /// Copy of the whole collection, as it would be saved.
    pub fn snapshot(&self) -> TabCollection {
        self.collection.clone()
    }

    /// Append a tab and make it active. Returns its id.
    pub fn open_tab(&mut self, initial_input: Option<&str>) -> String {
        let tab = match initial_input.map(str::trim).filter(|input| !input.is_empty()) {
            Some(input) => NavigationController::new(&self.policy).open(input),
            None => Tab::blank(),
        };
        let id = tab.id.clone();
        let navigated = (!tab.is_blank()).then(|| navigated_event(&tab));

        self.collection.tabs.push(tab);
        self.collection.active_tab_id = id.clone();
        self.mount_active();

        tracing::info!(tab_id = %id, tab_count = self.collection.len(), "Opened tab");

        self.emit(StoreEvent::TabOpened { tab_id: id.clone() });
        if let Some(event) = navigated {
            self.emit(event);
        }
        self.emit(StoreEvent::ActiveTabChanged { tab_id: id.clone() });
        self.persist();
        id
    }

    /// Remove a tab. Closing the active tab activates the last remaining one;
    /// closing the only tab replaces it with a blank tab.
    pub fn close_tab(&mut self, id: &str) -> sovereign_tabs::Result<()> {
        let index = self
            .collection
            .position(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;
        let was_active = self.collection.active_tab_id == id;

        let closed = self.collection.tabs.remove(index);
        tracing::info!(tab_id = %closed.id, was_active, "Closed tab");
        self.emit(StoreEvent::TabClosed {
            tab_id: closed.id.clone(),
        });

        if let Some(last) = self.collection.tabs.last() {
            if was_active {
                self.collection.active_tab_id = last.id.clone();
                self.activate_current();
            }
        } else {
            let tab = Tab::blank();
            let tab_id = tab.id.clone();
            self.collection.tabs.push(tab);
            self.collection.active_tab_id = tab_id.clone();

            tracing::info!(tab_id = %tab_id, "Replaced last closed tab with a blank tab");
            self.emit(StoreEvent::TabOpened { tab_id });
            self.activate_current();
        }

        self.persist();
        Ok(())
    }

    /// Make `id` the active tab. Unknown ids are ignored.
    pub fn switch_to(&mut self, id: &str) -> bool {
        if self.collection.position(id).is_none() {
            tracing::debug!(tab_id = %id, "Ignoring switch to unknown tab");
            return false;
        }
        if self.collection.active_tab_id == id {
            return true;
        }

        self.collection.active_tab_id = id.to_string();
        tracing::info!(tab_id = %id, "Switched tab");
        self.activate_current();
        self.persist();
        true
    }

    pub fn navigate(&mut self, id: &str, input: &str) -> sovereign_tabs::Result<()> {
        self.with_tab(id, |nav, tab| {
            nav.navigate(tab, input, false);
            true
        })
        .ok_or_else(|| TabError::NotFound(id.to_string()))?;

        self.finish_navigation(id);
        Ok(())
    }

    pub fn navigate_active(&mut self, input: &str) {
        let id = self.collection.active_tab_id.clone();
        if let Err(e) = self.navigate(&id, input) {
            tracing::warn!(tab_id = %id, error = %e, "Active tab vanished during navigation");
        }
    }

    /// Dashboard hand-off: reuse the active tab if it is blank, otherwise
    /// open a new one. Returns the id of the tab that received the input.
    pub fn open_in_active_or_new(&mut self, input: &str) -> String {
        if input.trim().is_empty() {
            return self.collection.active_tab_id.clone();
        }
        if self.active_tab().is_blank() {
            let id = self.collection.active_tab_id.clone();
            self.navigate_active(input);
            id
        } else {
            self.open_tab(Some(input))
        }
    }

    pub fn back(&mut self, id: &str) -> bool {
        self.step(id, |nav, tab| nav.back(tab))
    }

    pub fn forward(&mut self, id: &str) -> bool {
        self.step(id, |nav, tab| nav.forward(tab))
    }

    pub fn toggle_proxy_override(&mut self, id: &str) -> bool {
        self.step(id, |nav, tab| nav.toggle_proxy_override(tab))
    }

    pub fn reload(&mut self, id: &str) -> bool {
        self.step(id, |nav, tab| nav.reload(tab))
    }

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// The surface the host should currently show.
    pub fn active_surface(&self) -> SurfaceTarget {
        let tab = self.active_tab();
        SurfaceTarget {
            tab_id: tab.id.clone(),
            target_url: tab.raw_url.clone(),
            ticket: LoadTicket {
                tab_id: tab.id.clone(),
                generation: self.generation,
            },
        }
    }

    /// Content-ready signal from the surface. Returns `false` when the signal
    /// is stale or there was nothing loading.
    pub fn content_ready(&mut self, ticket: &LoadTicket) -> bool {
        let current = ticket.tab_id == self.collection.active_tab_id
            && ticket.generation == self.generation;
        if !current {
            tracing::warn!(
                tab_id = %ticket.tab_id,
                generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale content-ready signal"
            );
            return false;
        }

        match self.collection.get_mut(&ticket.tab_id) {
            Some(tab) if tab.is_loading => tab.is_loading = false,
            _ => return false,
        }

        self.emit(StoreEvent::LoadFinished {
            tab_id: ticket.tab_id.clone(),
        });
        self.persist();
        true
    }

    fn with_tab<F>(&mut self, id: &str, f: F) -> Option<bool>
    where
        F: FnOnce(&NavigationController<'_>, &mut Tab) -> bool,
    {
        let nav = NavigationController::new(&self.policy);
        let tab = self.collection.get_mut(id)?;
        Some(f(&nav, tab))
    }

    fn step<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&NavigationController<'_>, &mut Tab) -> bool,
    {
        let changed = self.with_tab(id, f).unwrap_or(false);
        if changed {
            self.finish_navigation(id);
        }
        changed
    }

    fn finish_navigation(&mut self, id: &str) {
        if self.collection.active_tab_id == id {
            self.generation += 1;
        }
        if let Some(event) = self.collection.get(id).map(navigated_event) {
            self.emit(event);
        }
        self.persist();
    }

    /// Tear down the old surface and load the active tab into a fresh one.
    fn mount_active(&mut self) {
        self.generation += 1;
        let active_tab_id = self.collection.active_tab_id.clone();
        if let Some(tab) = self.collection.get_mut(&active_tab_id) {
            tab.is_loading = !tab.is_blank();
        }
    }

    fn activate_current(&mut self) {
        self.mount_active();
        let tab_id = self.collection.active_tab_id.clone();
        self.emit(StoreEvent::ActiveTabChanged { tab_id });
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.collection) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }
}

fn navigated_event(tab: &Tab) -> StoreEvent {
    StoreEvent::Navigated {
        tab_id: tab.id.clone(),
        display_url: tab.display_url.clone(),
        use_proxy: tab.is_proxy_active,
    }
}
