use std::sync::Arc;

use sortd::engine::concurrent::{ConcurrentSorter, OutputOrder};
use sortd::engine::sequential::{SequentialSorter, sort_sequentially};
use sortd::engine::{Array, SortStrategy};

fn sample_batch() -> Vec<Array> {
    vec![
        vec![3, 1, 2],
        vec![5, 4],
        vec![],
        vec![7, 7, -7, 0, 7],
        vec![i64::MAX, i64::MIN, 0],
        (0..500).rev().collect(),
        vec![42],
        vec![2, 2, 2, 1, 1],
    ]
}

fn is_sorted(array: &[i64]) -> bool {
    array.windows(2).all(|w| w[0] <= w[1])
}

fn as_multiset(arrays: &[Array]) -> Vec<Array> {
    let mut sorted: Vec<Array> = arrays
        .iter()
        .map(|a| {
            let mut a = a.clone();
            a.sort();
            a
        })
        .collect();
    sorted.sort();
    sorted
}

fn strategies() -> Vec<Box<dyn SortStrategy>> {
    vec![
        Box::new(SequentialSorter),
        Box::new(ConcurrentSorter::new(4, OutputOrder::Input)),
        Box::new(ConcurrentSorter::new(4, OutputOrder::Completion)),
        Box::new(ConcurrentSorter::new(1, OutputOrder::Completion)),
    ]
}

#[tokio::test]
async fn every_output_array_is_non_decreasing() {
    for strategy in strategies() {
        let sorted = strategy.sort_batch(sample_batch().into()).await.unwrap();
        assert!(sorted.iter().all(|a| is_sorted(a)), "{}", strategy.mode());
    }
}

#[tokio::test]
async fn multisets_preserved_one_to_one() {
    let input = sample_batch();
    for strategy in strategies() {
        let sorted = strategy.sort_batch(input.clone().into()).await.unwrap();
        assert_eq!(sorted.len(), input.len());
        assert_eq!(as_multiset(&sorted), as_multiset(&input), "{}", strategy.mode());
    }
}

#[tokio::test]
async fn input_is_not_mutated() {
    let batch: Arc<[Array]> = sample_batch().into();
    for strategy in strategies() {
        strategy.sort_batch(Arc::clone(&batch)).await.unwrap();
        assert_eq!(&*batch, sample_batch().as_slice());
    }
}

#[tokio::test]
async fn sequential_is_deterministic_and_order_preserving() {
    let input = sample_batch();
    let first = SequentialSorter.sort_batch(input.clone().into()).await.unwrap();
    let second = SequentialSorter.sort_batch(input.clone().into()).await.unwrap();
    assert_eq!(first, second);

    for (source, sorted) in input.iter().zip(&first) {
        let mut expected = source.clone();
        expected.sort();
        assert_eq!(*sorted, expected);
    }
}

#[tokio::test]
async fn concurrent_matches_sequential_as_a_set() {
    let input = sample_batch();
    let sequential = sort_sequentially(&input);
    let sorter = ConcurrentSorter::new(3, OutputOrder::Completion);
    let concurrent = sorter.sort_batch(input.into()).await.unwrap();

    let mut a = sequential.clone();
    let mut b = concurrent;
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[tokio::test]
async fn concurrent_input_order_matches_sequential_exactly() {
    let input = sample_batch();
    let sorter = ConcurrentSorter::new(3, OutputOrder::Input);
    let concurrent = sorter.sort_batch(input.clone().into()).await.unwrap();
    assert_eq!(concurrent, sort_sequentially(&input));
}

#[tokio::test]
async fn empty_batch_for_every_strategy() {
    for strategy in strategies() {
        let sorted = strategy.sort_batch(Vec::<Array>::new().into()).await.unwrap();
        assert!(sorted.is_empty());
    }
}

#[tokio::test]
async fn many_small_arrays_through_tight_pool() {
    let input: Vec<Array> = (0..1_000).map(|i| vec![i % 7, -i, i]).collect();
    let sorter = ConcurrentSorter::new(2, OutputOrder::Completion);
    let sorted = sorter.sort_batch(input.clone().into()).await.unwrap();
    assert_eq!(as_multiset(&sorted), as_multiset(&input));
}

#[tokio::test]
async fn shared_sorter_serves_parallel_batches() {
    let sorter = Arc::new(ConcurrentSorter::new(2, OutputOrder::Input));
    let calls: Vec<_> = (0..8)
        .map(|i| {
            let sorter = Arc::clone(&sorter);
            tokio::spawn(async move {
                let batch: Vec<Array> = vec![vec![i, 3, 1], vec![2, i]];
                sorter.sort_batch(batch.into()).await
            })
        })
        .collect();

    for (i, call) in futures::future::join_all(calls).await.into_iter().enumerate() {
        let sorted = call.unwrap().unwrap();
        let i = i as i64;
        let mut first = vec![i, 3, 1];
        first.sort();
        let mut second = vec![2, i];
        second.sort();
        assert_eq!(sorted, vec![first, second]);
    }
}
