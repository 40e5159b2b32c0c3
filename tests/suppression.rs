use spark_list::{ListConfig, ObservableList, cloned, subscribe};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Counts resets and item-level add/remove events.
struct Recorder {
    resets: Rc<Cell<u32>>,
    added: Rc<RefCell<Vec<usize>>>,
    removed: Rc<RefCell<Vec<usize>>>,
    _subs: Vec<spark_list::Subscription>,
}

fn record<T: Clone + PartialEq + 'static>(list: &ObservableList<T>) -> Recorder {
    let resets = Rc::new(Cell::new(0));
    let added = Rc::new(RefCell::new(Vec::new()));
    let removed = Rc::new(RefCell::new(Vec::new()));

    let subs = vec![
        list.on_should_reset(cloned!(resets => move || resets.set(resets.get() + 1))),
        subscribe!(list.items_added(), added => |c| added.borrow_mut().push(c.len())),
        subscribe!(list.items_removed(), removed => |c| removed.borrow_mut().push(c.len())),
    ];

    Recorder {
        resets,
        added,
        removed,
        _subs: subs,
    }
}

#[test]
fn large_add_range_collapses_into_a_reset() {
    let list: ObservableList<u32> = ObservableList::new();
    let rec = record(&list);

    list.add_range(0..50).unwrap();

    assert_eq!(list.len(), 50);
    assert_eq!(rec.resets.get(), 1);
    assert!(rec.added.borrow().is_empty());
    assert!(list.are_change_notifications_enabled());
}

#[test]
fn small_ratio_add_range_is_one_item_event() {
    let list = ObservableList::from_vec((0..100).collect::<Vec<u32>>());
    let rec = record(&list);

    list.add_range(100..120).unwrap();

    assert_eq!(rec.resets.get(), 0);
    assert_eq!(*rec.added.borrow(), vec![20]);
}

#[test]
fn ten_items_never_reset() {
    // k must exceed the floor of 10, not just the ratio.
    let list: ObservableList<u32> = ObservableList::new();
    let rec = record(&list);

    list.add_range(0..10).unwrap();

    assert_eq!(rec.resets.get(), 0);
    assert_eq!(*rec.added.borrow(), vec![10]);
}

#[test]
fn eleven_items_into_an_empty_list_reset() {
    let list: ObservableList<u32> = ObservableList::new();
    let rec = record(&list);

    list.add_range(0..11).unwrap();
    assert_eq!(rec.resets.get(), 1);
}

#[test]
fn ratio_uses_length_before_the_operation() {
    // 20 / 30 > 0.3 and 20 > 10
    let list = ObservableList::from_vec((0..30).collect::<Vec<u32>>());
    let rec = record(&list);
    list.insert_range(5, 100..120).unwrap();
    assert_eq!(rec.resets.get(), 1);
    assert_eq!(list.get(5).unwrap(), 100);

    // 12 / 50 < 0.3
    list.remove_range(0, 12).unwrap();
    assert_eq!(rec.resets.get(), 1);
    assert_eq!(*rec.removed.borrow(), vec![12]);
}

#[test]
fn large_remove_range_resets() {
    let list = ObservableList::from_vec((0..40).collect::<Vec<u32>>());
    let rec = record(&list);

    let removed = list.remove_range(10, 20).unwrap();

    assert_eq!(removed, (10..30).collect::<Vec<u32>>());
    assert_eq!(list.len(), 20);
    assert_eq!(rec.resets.get(), 1);
    assert!(rec.removed.borrow().is_empty());
}

#[test]
fn large_remove_all_resets_once() {
    let list = ObservableList::from_vec((0..20).collect::<Vec<u32>>());
    let rec = record(&list);

    let victims: Vec<u32> = (0..15).collect();
    assert_eq!(list.remove_all(&victims).unwrap(), 15);

    assert_eq!(list.to_vec(), (15..20).collect::<Vec<u32>>());
    assert_eq!(rec.resets.get(), 1);
    assert!(rec.removed.borrow().is_empty());
}

#[test]
fn small_remove_all_emits_one_event_per_item() {
    let list = ObservableList::from_vec(vec!['a', 'b', 'c', 'd']);
    let rec = record(&list);

    assert_eq!(list.remove_all(&['b', 'z', 'd']).unwrap(), 2);
    assert_eq!(list.to_vec(), vec!['a', 'c']);
    assert_eq!(*rec.removed.borrow(), vec![1, 1]);
}

#[test]
fn custom_threshold_changes_the_policy() {
    let list = ObservableList::with_threshold((0..100).collect::<Vec<u32>>(), 0.1).unwrap();
    let rec = record(&list);

    list.add_range(100..120).unwrap();
    assert_eq!(rec.resets.get(), 1);

    let config = ListConfig::default().with_reset_min_count(100);
    let list = ObservableList::with_config(Vec::<u32>::new(), config).unwrap();
    let rec = record(&list);
    list.add_range(0..50).unwrap();
    assert_eq!(rec.resets.get(), 0);
    assert_eq!(*rec.added.borrow(), vec![50]);
}

#[test]
fn nested_scopes_collapse_to_one_reset() {
    let list = ObservableList::from_vec(vec![1, 2, 3]);
    let rec = record(&list);
    let changing = Rc::new(RefCell::new(Vec::new()));
    let _c = subscribe!(list.changing(), changing => |r| changing.borrow_mut().push(*r));

    let outer = list.suppress_change_notifications();
    list.add(4).unwrap();
    {
        let _inner = list.suppress_change_notifications();
        assert_eq!(list.suppression_depth(), 2);
        list.remove_at(0).unwrap();
        list.add_range(10..40).unwrap();
    }
    assert_eq!(list.suppression_depth(), 1);
    assert_eq!(rec.resets.get(), 0);
    assert!(changing.borrow().is_empty());

    outer.release().unwrap();

    assert_eq!(rec.resets.get(), 1);
    assert_eq!(*changing.borrow(), vec![true]);
    assert!(rec.added.borrow().is_empty());
    assert!(rec.removed.borrow().is_empty());
    assert_eq!(list.len(), 33);
}

#[test]
fn bulk_operation_inside_a_user_scope_does_not_reset_early() {
    let list: ObservableList<u32> = ObservableList::new();
    let rec = record(&list);

    let scope = list.suppress_change_notifications();
    list.add_range(0..100).unwrap();
    assert_eq!(rec.resets.get(), 0);

    drop(scope);
    assert_eq!(rec.resets.get(), 1);
}

#[test]
fn failing_reset_observer_surfaces_from_bulk_operation() {
    let list: ObservableList<u32> = ObservableList::with_config(
        Vec::new(),
        ListConfig::default().with_warn_on_unobserved_suppression(false),
    )
    .unwrap();
    let _fail = list.changed().try_subscribe(|reset| {
        if *reset {
            return Err("cannot re-render".into());
        }
        Ok(())
    });

    let err = list.add_range(0..50).unwrap_err();
    assert!(err.is_observer_failure());

    // Items landed and the scope closed regardless
    assert_eq!(list.len(), 50);
    assert!(list.are_change_notifications_enabled());
}

#[test]
fn item_property_changes_are_silent_while_suppressed() {
    let item = spark_list::PropertyNotifier::new();
    let list = ObservableList::from_vec(vec![item.clone()]);
    list.set_change_tracking_enabled(true);

    let hits = Rc::new(Cell::new(0));
    let _sub = list.item_changed().subscribe(cloned!(hits => move |_| hits.set(hits.get() + 1)));

    let scope = list.suppress_change_notifications();
    item.notify_changed("hidden").unwrap();
    scope.release().unwrap();
    item.notify_changed("visible").unwrap();

    assert_eq!(hits.get(), 1);
}
