// ============================================================================
// spark-list - Core Types
// Event payloads and object identity
// ============================================================================

use std::rc::Rc;

// =============================================================================
// OBJECT IDENTITY
// =============================================================================

/// Stable identity of a tracked object.
///
/// Identity is not equality: two equal objects built separately get
/// different ids, while clones of one shared handle keep the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the allocation behind an `Rc`.
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        ObjectId(Rc::as_ptr(rc) as *const () as usize)
    }

    /// Build an id from a raw value (for objects with their own identity scheme).
    pub const fn from_raw(raw: usize) -> Self {
        ObjectId(raw)
    }

    pub const fn as_raw(self) -> usize {
        self.0
    }
}

// =============================================================================
// STRUCTURAL EVENTS
// =============================================================================

/// Payload of add, remove and replace events.
///
/// `items` is never empty. `index` is where the items were inserted, where
/// they were removed from, or which slot was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ListChange<T> {
    pub items: Vec<T>,
    pub index: usize,
}

impl<T> ListChange<T> {
    pub fn new(items: Vec<T>, index: usize) -> Self {
        Self { items, index }
    }

    pub fn single(item: T, index: usize) -> Self {
        Self {
            items: vec![item],
            index,
        }
    }

    /// Number of affected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Payload of move events: one item taken out at `from` and put back at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveChange<T> {
    pub items: Vec<T>,
    pub from: usize,
    pub to: usize,
}

impl<T> MoveChange<T> {
    pub fn new(item: T, from: usize, to: usize) -> Self {
        Self {
            items: vec![item],
            from,
            to,
        }
    }
}

// =============================================================================
// PROPERTY EVENTS
// =============================================================================

/// A property change forwarded from a tracked item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPropertyChange<T> {
    pub item: T,
    pub property: String,
}

// =============================================================================
// TESTS
// =============================================================================
