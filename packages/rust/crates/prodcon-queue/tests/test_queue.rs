//! Integration tests for CircularQueue.

use prodcon_queue::{CircularQueue, QueueError};

#[test]
fn test_zero_capacity_rejected() {
    let err = CircularQueue::new(0).unwrap_err();
    assert_eq!(err, QueueError::ZeroCapacity);
}

#[test]
fn test_unallocatable_capacity_is_an_error() {
    let capacity = usize::MAX >> 3;
    let err = CircularQueue::new(capacity).unwrap_err();
    assert_eq!(err, QueueError::Alloc { capacity });
    assert!(err.to_string().contains("cannot allocate"));
}

#[test]
fn test_first_insert_keeps_end() {
    let mut q = CircularQueue::new(4).unwrap();
    let job = q.enqueue(7, 0).unwrap();
    assert_eq!(job.id, 0);
    assert_eq!(q.front(), 0);
    assert_eq!(q.end(), 0);
    assert_eq!(q.len(), 1);

    let job = q.enqueue(3, 1).unwrap();
    assert_eq!(job.id, 1);
    assert_eq!(q.end(), 1);
}

#[test]
fn test_fifo_order() {
    let mut q = CircularQueue::new(3).unwrap();
    for (serial, duration) in [(0, 5), (1, 2), (2, 9)] {
        q.enqueue(duration, serial).unwrap();
    }
    let drained: Vec<u64> = std::iter::from_fn(|| q.dequeue()).map(|j| j.serial).collect();
    assert_eq!(drained, vec![0, 1, 2]);
    assert!(q.is_empty());
    assert!(q.dequeue().is_none());
}

#[test]
fn test_full_queue_rejects_enqueue() {
    let mut q = CircularQueue::new(2).unwrap();
    q.enqueue(1, 0).unwrap();
    q.enqueue(1, 1).unwrap();
    assert!(q.is_full());
    assert_eq!(q.enqueue(1, 2), Err(QueueError::Full { capacity: 2 }));
    assert_eq!(q.len(), 2);
}

#[test]
fn test_wraparound_recycles_slot_ids() {
    let mut q = CircularQueue::new(3).unwrap();
    let mut ids = Vec::new();
    for serial in 0..7 {
        ids.push(q.enqueue(4, serial).unwrap().id);
        let job = q.dequeue().unwrap();
        assert_eq!(job.serial, serial);
    }
    assert_eq!(ids, vec![0, 0, 0, 0, 0, 0, 0]);

    let mut q = CircularQueue::new(3).unwrap();
    q.enqueue(1, 0).unwrap();
    q.enqueue(1, 1).unwrap();
    q.dequeue().unwrap();
    q.enqueue(1, 2).unwrap();
    let job = q.enqueue(1, 3).unwrap();
    assert_eq!(job.id, 0);
    assert_eq!(q.len(), 3);
    assert_eq!(q.front(), 1);
    assert_eq!(q.end(), 0);
}

#[test]
fn test_single_slot_queue() {
    let mut q = CircularQueue::new(1).unwrap();
    for serial in 0..3 {
        let job = q.enqueue(2, serial).unwrap();
        assert_eq!(job.id, 0);
        assert!(q.is_full());
        assert!(q.enqueue(2, 99).is_err());
        assert_eq!(q.dequeue().unwrap().serial, serial);
        assert!(q.is_empty());
        assert_eq!(q.front(), q.end());
    }
}

#[test]
fn test_len_never_exceeds_capacity() {
    let mut q = CircularQueue::new(4).unwrap();
    let mut serial = 0;
    for round in 0..20 {
        if round % 3 == 2 {
            q.dequeue();
        } else if q.enqueue(1, serial).is_ok() {
            serial += 1;
        }
        assert!(q.len() <= q.capacity());
        assert_eq!(q.iter().count(), q.len());
    }
}

#[test]
fn test_snapshot_display() {
    let mut q = CircularQueue::new(3).unwrap();
    assert_eq!(
        q.snapshot().to_string(),
        "Start index: 0     End index: 0\nCQ is empty"
    );

    q.enqueue(6, 0).unwrap();
    q.enqueue(2, 1).unwrap();
    let snapshot = q.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(
        snapshot.to_string(),
        "Start index: 0     End index: 1\nIndex: 0 - Value: {0,6}\nIndex: 1 - Value: {1,2}"
    );
}
