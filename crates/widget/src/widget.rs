//! Cart widget lifecycle.
//!
//! [`CartWidget`] owns the cart state and sequences every flow as
//! identity → backend → mirror → render. Flows never fail outward: read
//! failures degrade the dropdown per [`FetchFailurePolicy`], write failures
//! become a page alert and leave state as it was.

use carrito_core::{CartItem, IdentityToken, ItemId};

use crate::client::CartClient;
use crate::config::{FetchFailurePolicy, WidgetConfig};
use crate::identity::resolve_identity;
use crate::notices;
use crate::page::{DeleteAction, Page};
use crate::render;
use crate::state::{CartState, Mirror};
use crate::storage::KeyValueStore;

/// Result of [`CartWidget::add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Persisted; carries the stored item with its backend id.
    Added(CartItem),
    /// Refused locally: an item with the same name is already in the cart.
    Duplicate,
    /// The backend rejected the add or could not be reached.
    Failed,
}

impl AddOutcome {
    /// Whether the item was added.
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Result of [`CartWidget::remove_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Deleted and the dropdown refreshed.
    Removed,
    /// The backend rejected the delete or could not be reached.
    Failed,
}

/// Navbar cart dropdown bound to one page.
pub struct CartWidget<S, P> {
    client: CartClient,
    store: S,
    page: P,
    state: CartState,
    fetch_fallback: FetchFailurePolicy,
}

impl<S: KeyValueStore, P: Page> CartWidget<S, P> {
    /// Create a widget with an empty cart.
    pub fn new(client: CartClient, store: S, page: P, config: &WidgetConfig) -> Self {
        Self {
            client,
            store,
            page,
            state: CartState::default(),
            fetch_fallback: config.fetch_fallback,
        }
    }

    /// Current cart state.
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The page the widget renders into.
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Mutable access to the page.
    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The backing page storage.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the page storage.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Resolve the identity used to scope requests.
    pub fn identity(&mut self) -> Option<IdentityToken> {
        resolve_identity(&mut self.store)
    }

    /// Page-load entry point: load and render the cart.
    ///
    /// Does nothing on pages without the dropdown. Returns whether it ran.
    pub async fn init(&mut self) -> bool {
        if !self.page.has_dropdown() {
            tracing::debug!("No cart dropdown on page; skipping init");
            return false;
        }

        self.refresh().await;
        true
    }

    /// Fetch the cart, update state and mirror, render, update the badge.
    pub async fn refresh(&mut self) {
        let identity = self.identity();

        match self.client.try_fetch_cart(identity.as_ref()).await {
            Ok(items) => {
                Mirror::write(&mut self.store, &items);
                self.state.replace(items);
            }
            Err(e) => {
                tracing::error!(error = %e, policy = ?self.fetch_fallback, "Failed to load cart");
                let fallback = match self.fetch_fallback {
                    FetchFailurePolicy::Empty => Vec::new(),
                    FetchFailurePolicy::Mirror => Mirror::read(&self.store).unwrap_or_default(),
                };
                self.state.replace(fallback);
            }
        }

        self.redraw();
    }

    /// Add `item` to the cart.
    ///
    /// Refused without a network call when an item with the same name is
    /// already in the cart.
    pub async fn add_item(&mut self, item: CartItem) -> AddOutcome {
        if self.state.contains_name(&item.name) {
            tracing::info!(name = %item.name, "Duplicate add refused");
            self.page.alert(notices::ALREADY_IN_CART);
            return AddOutcome::Duplicate;
        }

        let identity = self.identity();
        match self.client.add_item(&item, identity.as_ref()).await {
            Ok(saved) => {
                self.state.push(saved.clone());
                Mirror::write(&mut self.store, self.state.items());
                self.redraw();
                AddOutcome::Added(saved)
            }
            Err(e) => {
                tracing::error!(name = %item.name, error = %e, "Failed to add cart item");
                self.page
                    .alert(&notices::with_detail(notices::ADD_FAILED, e.user_message()));
                AddOutcome::Failed
            }
        }
    }

    /// Remove the item with `id`, then rerun the page-load sequence.
    ///
    /// A blank id is refused before any request is made.
    pub async fn remove_item(&mut self, id: &ItemId) -> RemoveOutcome {
        let identity = self.identity();
        match self.client.try_remove_item(id, identity.as_ref()).await {
            Ok(()) => {
                if self.state.remove(id) {
                    Mirror::write(&mut self.store, self.state.items());
                }
                self.init().await;
                RemoveOutcome::Removed
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to remove cart item");
                self.page
                    .alert(&notices::with_detail(notices::REMOVE_FAILED, e.user_message()));
                RemoveOutcome::Failed
            }
        }
    }

    /// Run a delete action captured by a rendered row.
    pub async fn handle(&mut self, action: DeleteAction) -> RemoveOutcome {
        self.remove_item(action.id()).await
    }

    /// Empty the cart on the backend, then locally.
    ///
    /// Local state and the mirror are only dropped once the backend agrees.
    pub async fn clear_cart(&mut self) -> bool {
        let identity = self.identity();
        match self.client.try_clear_cart(identity.as_ref()).await {
            Ok(()) => {
                self.state.clear();
                Mirror::remove(&mut self.store);
                self.redraw();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear cart");
                self.page
                    .alert(&notices::with_detail(notices::CLEAR_FAILED, e.user_message()));
                false
            }
        }
    }

    /// Reset the dropdown to empty without a network call (logout).
    ///
    /// Cart state and the mirror are left alone.
    pub fn clear_ui(&mut self) {
        render::clear(&mut self.page);
    }

    /// Split the widget back into its page storage and page.
    pub fn into_parts(self) -> (S, P) {
        (self.store, self.page)
    }

    fn redraw(&mut self) {
        render::render(&mut self.page, self.state.items());
        render::update_indicator(&mut self.page, self.state.items());
    }
}
