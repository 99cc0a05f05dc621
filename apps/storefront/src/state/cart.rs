//! # Cart State
//!
//! The shared cart store: one authoritative cart per session, persisted to a
//! snapshot slot after every change.
//!
//! ## Thread Safety
//! The cart lives behind `Arc<Mutex<T>>`: every handle is a cheap clone of
//! the same store, and each read-modify-write runs under the lock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Dispatch                                  │
//! │                                                                         │
//! │  add_line / update_quantity / remove_item / clear_cart / check_out      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌─────────────── lock ───────────────────────────────────────────┐    │
//! │  │  cart.apply(&command) ──► Transition { next, events }          │    │
//! │  │  next = Some ──► commit, revision += 1, write snapshot          │    │
//! │  │  next = None ──► nothing stored                                 │    │
//! │  └─────────────── unlock ─────────────────────────────────────────┘    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  events ──► Notification::from_event ──► sink.notify                    │
//! │                                                                         │
//! │  NOTE: Snapshots are written in commit order. A failed write is         │
//! │        logged and the in-memory cart stays as committed.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use bunbo_core::snapshot;
use bunbo_core::{
    Cart, CartCommand, CartEvent, CartLine, CheckoutTotals, LineCandidate, Money, Transition,
};
use bunbo_storage::{SnapshotStorage, StorageResult};

use crate::notify::{Notification, NotificationSink};
use crate::state::config::CartConfig;

/// The committed cart plus a change counter.
#[derive(Debug, Default)]
struct CartSession {
    cart: Cart,
    /// Bumped on every committed change; lets readers notice updates.
    revision: u64,
}

struct StoreInner {
    session: Mutex<CartSession>,
    storage: Arc<dyn SnapshotStorage>,
    sink: Arc<dyn NotificationSink>,
    config: CartConfig,
}

/// Shared cart store handle.
///
/// Cloning is cheap; all clones see the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.lock();
        f.debug_struct("CartStore")
            .field("storage_key", &self.inner.config.storage_key)
            .field("lines", &session.cart.line_count())
            .field("revision", &session.revision)
            .finish()
    }
}

impl CartStore {
    /// Opens the store, hydrating it from the configured slot.
    ///
    /// An absent, unreadable or corrupt snapshot gives an empty cart; this
    /// never fails.
    pub fn open(
        storage: Arc<dyn SnapshotStorage>,
        sink: Arc<dyn NotificationSink>,
        config: CartConfig,
    ) -> Self {
        let cart = hydrate(storage.as_ref(), &config.storage_key);

        CartStore {
            inner: Arc::new(StoreInner {
                session: Mutex::new(CartSession { cart, revision: 0 }),
                storage,
                sink,
                config,
            }),
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of a dish. Non-positive quantities are ignored.
    pub fn add_line(&self, candidate: LineCandidate, quantity: i64) {
        debug!(id = %candidate.id, quantity, "add_line");
        self.dispatch(CartCommand::add(candidate, quantity));
    }

    /// Sets a line's quantity; 0 or less removes the line.
    pub fn update_quantity(&self, id: &str, quantity: i64) {
        debug!(id, quantity, "update_quantity");
        self.dispatch(CartCommand::update(id, quantity));
    }

    pub fn remove_item(&self, id: &str) {
        debug!(id, "remove_item");
        self.dispatch(CartCommand::remove(id));
    }

    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.dispatch(CartCommand::Clear);
    }

    /// Applies a command, persists the result and forwards its events.
    pub fn dispatch(&self, command: CartCommand) {
        let events = {
            let mut session = self.lock();
            let transition = session.cart.apply(&command);
            self.commit(&mut session, transition)
        };
        self.notify_all(&events);
    }

    /// Runs `f` on the cart and, if it succeeds, empties the cart without
    /// releasing the lock in between.
    ///
    /// Every line `f` saw is exactly the set of lines removed, so an order
    /// built here can never miss a line added concurrently. On `Err` the
    /// cart is left untouched.
    pub fn check_out<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Cart) -> Result<T, E>,
    {
        let (value, events) = {
            let mut session = self.lock();
            let value = f(&session.cart)?;
            let transition = session.cart.apply(&CartCommand::Clear);
            (value, self.commit(&mut session, transition))
        };
        debug!("check_out");
        self.notify_all(&events);
        Ok(value)
    }

    /// Deletes the snapshot slot and empties the cart without a toast.
    ///
    /// Unlike [`CartStore::clear_cart`], a storage failure is returned and
    /// the cart keeps its lines.
    pub fn reset(&self) -> StorageResult<()> {
        let key = &self.inner.config.storage_key;
        let mut session = self.lock();
        self.inner.storage.remove(key)?;

        if !session.cart.is_empty() {
            session.cart = Cart::new();
            session.revision += 1;
        }
        info!(key = %key, "cart snapshot removed");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let first = store.with_cart(|cart| cart.lines().first().cloned());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let session = self.lock();
        f(&session.cart)
    }

    /// Copy of the lines in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.with_cart(|cart| cart.lines().to_vec())
    }

    pub fn item_count(&self) -> u64 {
        self.with_cart(Cart::item_count)
    }

    pub fn subtotal(&self) -> Money {
        self.with_cart(Cart::subtotal)
    }

    pub fn line_count(&self) -> usize {
        self.with_cart(Cart::line_count)
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    /// Number of committed changes since the store was opened.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Subtotal, delivery fee and total under the configured pricing.
    pub fn checkout_totals(&self) -> CheckoutTotals {
        let pricing = self.inner.config.pricing();
        self.with_cart(|cart| pricing.totals(cart))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, CartSession> {
        // A panicking sink or caller cannot leave the cart half-updated:
        // commits replace the whole value.
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Commits `transition` into the locked session and returns its events.
    fn commit(&self, session: &mut CartSession, transition: Transition) -> Vec<CartEvent> {
        if let Some(next) = transition.next {
            session.cart = next;
            session.revision += 1;
            self.persist(&session.cart);
        }
        transition.events
    }

    fn notify_all(&self, events: &[CartEvent]) {
        for event in events {
            self.inner.sink.notify(Notification::from_event(event));
        }
    }

    fn persist(&self, cart: &Cart) {
        let key = &self.inner.config.storage_key;
        let encoded = match snapshot::encode(cart) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(key = %key, error = %e, "failed to encode cart snapshot");
                return;
            }
        };

        if let Err(e) = self.inner.storage.set(key, &encoded) {
            error!(key = %key, error = %e, "failed to persist cart snapshot");
        }
    }
}

/// Reads and decodes the snapshot slot.
fn hydrate(storage: &dyn SnapshotStorage, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no cart snapshot, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "cart snapshot unreadable, starting empty");
            return Cart::new();
        }
    };

    let decoded = snapshot::decode(&raw);
    if let Some(reason) = &decoded.malformed {
        warn!(key, reason = %reason, "cart snapshot malformed, starting empty");
    }
    if decoded.dropped > 0 {
        warn!(key, dropped = decoded.dropped, "dropped invalid cart snapshot entries");
    }

    info!(
        key,
        lines = decoded.cart.line_count(),
        items = decoded.cart.item_count(),
        "cart hydrated"
    );
    decoded.cart
}
