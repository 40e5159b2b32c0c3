// ============================================================================
// spark-list - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Observers usually need their own handle to a log, a counter or the list
/// itself; this saves the `let x = x.clone();` lines before each closure.
///
/// # Usage
///
/// ```rust
/// use spark_list::{cloned, ObservableList};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let list = ObservableList::from_vec(vec![1, 2]);
/// let hits = Rc::new(Cell::new(0));
///
/// let _sub = list.changed().subscribe(cloned!(hits => move |_| hits.set(hits.get() + 1)));
/// list.add(3).unwrap();
/// assert_eq!(hits.get(), 1);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Subscribe to a channel with automatic variable capturing.
///
/// Wraps `channel.subscribe(cloned!(... => move |event| ...))`.
///
/// # Usage
///
/// ```rust
/// use spark_list::{subscribe, ObservableList};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let list = ObservableList::from_vec(vec!["a"]);
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// // Clean syntax: channel, deps => |event| expression
/// let _sub = subscribe!(list.items_added(), log => |change| {
///     log.borrow_mut().push(change.index)
/// });
///
/// list.add("b").unwrap();
/// assert_eq!(*log.borrow(), vec![1]);
/// ```
#[macro_export]
macro_rules! subscribe {
    // Case 1: With dependencies
    ($channel:expr, $($deps:ident),+ => |$event:pat_param| $body:expr) => {
        $channel.subscribe($crate::cloned!($($deps),+ => move |$event| $body))
    };
    // Case 2: No dependencies
    ($channel:expr => |$event:pat_param| $body:expr) => {
        $channel.subscribe(move |$event| $body)
    };
}
