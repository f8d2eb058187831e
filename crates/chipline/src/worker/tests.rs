use crate::{
    ActorState, Chip, ChipKind, Generator, GeneratorConfig, SharedStorage, Worker,
};
use core::{num::NonZeroUsize, time::Duration};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Instant;

const WAKE_TIMEOUT: Duration = Duration::from_secs(5);

fn wait_for_state<R>(handle: &crate::ActorHandle<R>, state: ActorState) {
    let deadline = Instant::now() + WAKE_TIMEOUT;
    while handle.state() != state {
        assert!(
            Instant::now() < deadline,
            "{} never reached {state}",
            handle.name()
        );
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn solders_most_recent_chip_first() {
    let storage = SharedStorage::new();
    storage.produce(Chip::new(ChipKind::Small));
    storage.produce(Chip::new(ChipKind::Medium));
    storage.produce(Chip::new(ChipKind::Big));
    storage.finish();

    let mut soldered = Vec::new();
    let report = Worker::new().run(&storage, |chip: Chip| soldered.push(chip.kind()));

    assert_eq!(
        soldered,
        vec![ChipKind::Big, ChipKind::Medium, ChipKind::Small]
    );
    assert_eq!(report.processed, 3);
    assert_eq!(report.waits, 1);
    assert!(storage.is_empty());
}

#[test]
fn waiting_worker_is_woken_by_a_later_push() {
    let storage = Arc::new(SharedStorage::new());
    let (tx, rx) = mpsc::channel();
    let handle = Worker::new()
        .spawn(Arc::clone(&storage), move |item: u32| {
            tx.send(item).unwrap();
        })
        .unwrap();

    wait_for_state(&handle, ActorState::Waiting);
    storage.produce(7);
    assert_eq!(rx.recv_timeout(WAKE_TIMEOUT), Ok(7));

    wait_for_state(&handle, ActorState::Waiting);
    storage.produce(8);
    assert_eq!(rx.recv_timeout(WAKE_TIMEOUT), Ok(8));

    storage.finish();
    let report = handle.join().unwrap();
    assert_eq!(report.processed, 2);
    assert!(report.waits >= 2);
}

#[test]
fn worker_does_not_stop_on_empty_storage_alone() {
    let storage = Arc::new(SharedStorage::<u8>::new());
    let handle = Worker::new().spawn(Arc::clone(&storage), drop).unwrap();
    assert_eq!(handle.name(), "worker");

    wait_for_state(&handle, ActorState::Waiting);
    thread::sleep(Duration::from_millis(50));
    assert!(!handle.is_finished());
    assert_eq!(handle.state(), ActorState::Waiting);

    storage.finish();
    wait_for_state(&handle, ActorState::Finished);
    let report = handle.join().unwrap();
    assert_eq!(report.processed, 0);
}

#[test]
fn finishes_after_exactly_the_generated_items() {
    const ITEMS: u32 = 500;

    let storage = Arc::new(SharedStorage::new());
    let (tx, rx) = mpsc::channel();
    let worker = Worker::new()
        .spawn(Arc::clone(&storage), move |item: u32| {
            tx.send(item).unwrap();
        })
        .unwrap();

    let mut next: u32 = 0;
    let source = move || {
        next += 1;
        next
    };
    let config = GeneratorConfig {
        run_for: Duration::from_secs(60),
        interval: Duration::ZERO,
        max_items: NonZeroUsize::new(ITEMS as usize),
    };
    let generator = Generator::new(source, config)
        .spawn(Arc::clone(&storage))
        .unwrap();

    let produced = generator.join().unwrap();
    let consumed = worker.join().unwrap();
    assert_eq!(produced.produced, ITEMS as usize);
    assert_eq!(consumed.processed, ITEMS as usize);

    let mut seen: Vec<u32> = rx.try_iter().collect();
    seen.sort_unstable();
    assert_eq!(seen, (1..=ITEMS).collect::<Vec<_>>());
    assert!(storage.is_empty());
}

#[test]
fn paced_generator_and_worker_agree_on_totals() {
    let storage = Arc::new(SharedStorage::<Chip>::new());
    let worker = Worker::new()
        .spawn(Arc::clone(&storage), |chip: Chip| chip.solder(Duration::ZERO))
        .unwrap();

    let config = GeneratorConfig {
        run_for: Duration::from_millis(40),
        interval: Duration::from_millis(5),
        max_items: None,
    };
    let generator = Generator::new(Chip::random, config)
        .spawn(Arc::clone(&storage))
        .unwrap();

    let produced = generator.join().unwrap().produced;
    let report = worker.join().unwrap();
    assert!(produced >= 2);
    assert_eq!(report.processed, produced);
    assert!(report.waits >= 1);
}

#[test]
fn debug_shows_state() {
    assert_eq!(format!("{:?}", Worker::new()), "Worker { state: Idle }");
}
