use std::sync::mpsc;
use std::time::Duration;

use super::*;
use crate::WindowStyle;

fn framed() -> WindowStyle {
    WindowStyle::CAPTION | WindowStyle::RESIZABLE_BORDER
}

fn windows(handles: &[usize]) -> Vec<Window> {
    handles
        .iter()
        .map(|&h| Window::new(h, format!("Window {h}"), 1, "", framed()))
        .collect()
}

fn handles(snapshot: &Snapshot) -> Vec<usize> {
    snapshot.iter().map(Window::handle).collect()
}

#[test]
fn refresh_delivers_same_snapshot_to_every_subscriber() {
    // Arrange
    let bus = WindowBus::new();
    let (tx, rx) = mpsc::channel();
    let tx2 = tx.clone();
    bus.subscribe(move |s| tx.send(("a", s.generation(), handles(s))).unwrap());
    bus.subscribe(move |s| tx2.send(("b", s.generation(), handles(s))).unwrap());

    // Act
    let published = bus.refresh(&|| windows(&[1, 2]));

    // Assert
    assert!(published);
    let mut got: Vec<_> = rx.try_iter().collect();
    got.sort();
    assert_eq!(
        got,
        vec![("a", 1, vec![1, 2]), ("b", 1, vec![1, 2])]
    );
    assert_eq!(handles(&bus.current()), vec![1, 2]);
}

#[test]
fn empty_refresh_keeps_previous_snapshot_and_skips_callbacks() {
    // Arrange
    let bus = WindowBus::new();
    bus.publish(windows(&[7]));
    let (tx, rx) = mpsc::channel();
    bus.subscribe(move |s| tx.send(s.len()).unwrap());

    // Act
    let published = bus.refresh(&Vec::<Window>::new);

    // Assert
    assert!(!published);
    assert_eq!(rx.try_iter().count(), 0);
    assert_eq!(bus.current().generation(), 1);
    assert_eq!(handles(&bus.current()), vec![7]);
}

#[test]
fn new_subscriber_waits_for_next_refresh() {
    // Arrange
    let bus = WindowBus::new();
    bus.publish(windows(&[1]));
    let (tx, rx) = mpsc::channel();

    // Act
    bus.subscribe(move |s| tx.send(s.generation()).unwrap());

    // Assert
    assert_eq!(rx.try_iter().count(), 0);
    bus.publish(windows(&[1, 2]));
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn eager_subscriber_receives_current_snapshot() {
    // Arrange
    let bus = WindowBus::new();
    bus.publish(windows(&[3]));
    let (tx, rx) = mpsc::channel();

    // Act
    bus.subscribe_with_current(move |s| tx.send(handles(s)).unwrap());

    // Assert
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![vec![3]]);
}

#[test]
fn eager_subscriber_gets_nothing_before_first_publish() {
    let bus = WindowBus::new();
    let (tx, rx) = mpsc::channel::<u64>();
    bus.subscribe_with_current(move |s| tx.send(s.generation()).unwrap());
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn unsubscribe_stops_deliveries() {
    // Arrange
    let bus = WindowBus::new();
    let (tx, rx) = mpsc::channel();
    let sub = bus.subscribe(move |s| tx.send(s.generation()).unwrap());
    bus.publish(windows(&[1]));

    // Act
    bus.unsubscribe(sub);
    bus.publish(windows(&[2]));

    // Assert
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn unsubscribe_from_inside_callback_does_not_deadlock() {
    // Arrange
    let bus = Arc::new(WindowBus::new());
    let (sub_tx, sub_rx) = mpsc::channel::<Subscription>();
    let (tx, rx) = mpsc::channel();
    let inner_bus = bus.clone();
    let sub = bus.subscribe(move |s| {
        tx.send(s.generation()).unwrap();
        if let Ok(own) = sub_rx.try_recv() {
            inner_bus.unsubscribe(own);
        }
    });
    sub_tx.send(sub).unwrap();

    // Act
    bus.publish(windows(&[1]));
    bus.publish(windows(&[2]));

    // Assert
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![1]);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn stale_snapshot_is_not_delivered_after_newer_one() {
    // Arrange
    let bus = WindowBus::new();
    let (tx, rx) = mpsc::channel();
    let (_, subscriber) = bus.register(Box::new(move |s: &Snapshot| {
        tx.send(s.generation()).unwrap()
    }));
    let newer = Snapshot {
        generation: 5,
        windows: windows(&[1]).into(),
    };
    let older = Snapshot {
        generation: 4,
        windows: windows(&[1]).into(),
    };

    // Act
    subscriber.deliver(&newer);
    subscriber.deliver(&older);

    // Assert
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![5]);
}

#[test]
fn enumeration_runs_without_holding_the_snapshot_lock() {
    // Arrange
    let bus = WindowBus::new();
    bus.publish(windows(&[1]));

    // Act: the source reads the bus while enumerating.
    let published = bus.refresh(&|| {
        let seen = bus.current();
        windows(&[seen.len() + 10])
    });

    // Assert
    assert!(published);
    assert_eq!(handles(&bus.current()), vec![11]);
}

#[test]
fn concurrent_refreshes_never_overlap_one_subscription() {
    // Arrange
    let bus = Arc::new(WindowBus::new());
    let busy = Arc::new(AtomicBool::new(false));
    let overlapped = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();
    {
        let busy = busy.clone();
        let overlapped = overlapped.clone();
        bus.subscribe(move |s| {
            if busy.swap(true, Ordering::SeqCst) {
                overlapped.store(true, Ordering::SeqCst);
            }
            thread::sleep(Duration::from_millis(1));
            tx.send(s.generation()).unwrap();
            busy.store(false, Ordering::SeqCst);
        });
    }

    // Act
    let workers: Vec<_> = (0..4)
        .map(|t| {
            let bus = bus.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    bus.publish(windows(&[t * 100 + i + 1]));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    // Assert
    assert!(!overlapped.load(Ordering::SeqCst));
    let generations: Vec<u64> = rx.try_iter().collect();
    assert!(!generations.is_empty());
    assert!(generations.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(bus.current().generation(), 40);
}
