// ============================================================================
// spark-list - Lazy Channel
// A channel that only exists once somebody asks for it
// ============================================================================

use std::cell::OnceCell;
use std::rc::Rc;

use super::channel::Channel;
use crate::core::error::ObserverError;

/// A [`Channel`] materialized on first request and never recreated.
///
/// Publishing to a channel nobody asked for is a no-op, and
/// [`has_observers`](LazyChannel::has_observers) never allocates, so
/// publishers can skip building payloads nobody will see.
pub struct LazyChannel<E> {
    name: &'static str,
    cell: Rc<OnceCell<Channel<E>>>,
}

impl<E> Clone for LazyChannel<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<E: 'static> LazyChannel<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: Rc::new(OnceCell::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The channel, creating it on the first call.
    pub fn get(&self) -> &Channel<E> {
        self.cell.get_or_init(|| Channel::new(self.name))
    }

    /// Whether the channel has been created.
    pub fn is_created(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn has_observers(&self) -> bool {
        self.cell.get().is_some_and(Channel::has_observers)
    }

    /// Publish if the channel exists.
    pub fn publish(&self, event: &E) -> Result<(), ObserverError> {
        match self.cell.get() {
            Some(channel) => channel.publish(event),
            None => Ok(()),
        }
    }
}

impl<E> std::fmt::Debug for LazyChannel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyChannel")
            .field("name", &self.name)
            .field("created", &self.cell.get().is_some())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn not_created_until_requested() {
        let lazy: LazyChannel<i32> = LazyChannel::new("lazy");
        assert!(!lazy.is_created());
        assert!(!lazy.has_observers());

        // Publishing does not create it either
        lazy.publish(&1).unwrap();
        assert!(!lazy.is_created());

        let _ = lazy.get();
        assert!(lazy.is_created());
        assert!(!lazy.has_observers());
    }

    #[test]
    fn created_once_and_shared_by_clones() {
        let lazy: LazyChannel<i32> = LazyChannel::new("lazy");
        let clone = lazy.clone();

        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        let _sub = lazy.get().subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        assert!(clone.is_created());
        assert!(clone.has_observers());

        clone.publish(&5).unwrap();
        lazy.publish(&6).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn channel_keeps_its_name() {
        let lazy: LazyChannel<()> = LazyChannel::new("items_moved");
        assert_eq!(lazy.name(), "items_moved");
        assert_eq!(lazy.get().name(), "items_moved");
    }
}
