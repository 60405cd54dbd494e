use houghmatch::lowlevel::{
    build_offsets, rank_top_n, vote, vote_bound, vote_cancellable, vote_into_cancellable,
};
use houghmatch::{
    Accumulator, CancelToken, EdgePointSet, HoughMatchError, LocateConfig, Locator, Offset,
    Point2D, ShapeModel,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::mpsc;
use std::thread;

/// Draws `count` distinct points in `[-radius, radius]^2`, in draw order.
fn random_shape(rng: &mut StdRng, count: usize, radius: i64) -> EdgePointSet {
    let mut seen = HashSet::new();
    let mut edges = EdgePointSet::new();
    while edges.len() < count {
        let p = Point2D::new(
            rng.random_range(-radius..=radius),
            rng.random_range(-radius..=radius),
        );
        if seen.insert(p) {
            edges.push(p);
        }
    }
    edges
}

fn translate(edges: &EdgePointSet, t: Offset) -> EdgePointSet {
    edges.iter().map(|&p| p + t).collect()
}

#[test]
fn empty_model_gives_all_zero_accumulator() {
    let table = build_offsets(Point2D::new(0, 0), &EdgePointSet::new()).unwrap();
    let scene: EdgePointSet = (0..50).map(|i| Point2D::new(i, i / 2)).collect();
    let (acc, stats) = vote::<u32>(&scene, &table, 64, 64).unwrap();
    assert_eq!(acc.dims(), (64, 64));
    assert!(acc.counts().iter().all(|&c| c == 0));
    assert_eq!(stats.cast + stats.dropped, 0);
}

#[test]
fn empty_scene_gives_all_zero_accumulator() {
    let model = EdgePointSet::from_points(vec![Point2D::new(1, 1), Point2D::new(-1, 0)]);
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();
    let (acc, _) = vote::<u16>(&EdgePointSet::new(), &table, 8, 8).unwrap();
    assert_eq!(acc.max_score(), 0);
}

#[test]
fn translated_shape_peaks_at_reference_plus_translation() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let model = random_shape(&mut rng, 40, 12);
        let reference = Point2D::new(rng.random_range(-3..=3), rng.random_range(-3..=3));
        let table = build_offsets(reference, &model).unwrap();

        let t = Offset::new(rng.random_range(30..90), rng.random_range(30..70));
        let scene = translate(&model, t);
        let (acc, _) = vote::<u32>(&scene, &table, 128, 100).unwrap();

        let expected = reference + t;
        assert_eq!(acc.score_at(expected), Some(table.len() as u32));
        assert_eq!(acc.max_score(), table.len() as u32);
    }
}

#[test]
fn cell_counts_never_exceed_vote_bound() {
    let mut rng = StdRng::seed_from_u64(99);
    let model = random_shape(&mut rng, 60, 4);
    let scene = random_shape(&mut rng, 80, 4);
    let scene = translate(&scene, Offset::new(10, 10));
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();

    let (acc, _) = vote::<u32>(&scene, &table, 24, 24).unwrap();
    let bound = vote_bound(scene.points(), table.offsets());
    assert!(u64::from(acc.max_score()) <= bound);
}

#[test]
fn out_of_bounds_candidates_are_silently_dropped() {
    let model = EdgePointSet::from_points(vec![Point2D::new(0, -2), Point2D::new(0, 2)]);
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();
    // Points on the scene border project half their votes off-grid.
    let scene = EdgePointSet::from_points(vec![Point2D::new(0, 0), Point2D::new(4, 4)]);
    let (acc, stats) = vote::<u32>(&scene, &table, 5, 5).unwrap();

    assert_eq!(stats.cast, 2);
    assert_eq!(stats.dropped, 2);
    assert_eq!(acc.total_votes(), 2);
    assert_eq!(acc.get(0, 2), Some(1));
    assert_eq!(acc.get(4, 2), Some(1));
}

#[test]
fn voting_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(2024);
    let model = random_shape(&mut rng, 30, 6);
    let scene = random_shape(&mut rng, 200, 20);
    let scene = translate(&scene, Offset::new(25, 25));
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();

    let (a, _) = vote::<u32>(&scene, &table, 50, 50).unwrap();
    let (b, _) = vote::<u32>(&scene, &table, 50, 50).unwrap();
    assert_eq!(a, b);
    assert_eq!(rank_top_n(&a, 100).unwrap(), rank_top_n(&b, 100).unwrap());
}

#[test]
fn counter_width_does_not_change_counts() {
    let mut rng = StdRng::seed_from_u64(5);
    let model = random_shape(&mut rng, 25, 5);
    let scene = translate(&random_shape(&mut rng, 60, 8), Offset::new(16, 16));
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();

    let (narrow, _) = vote::<u16>(&scene, &table, 32, 32).unwrap();
    let (wide, _) = vote::<u64>(&scene, &table, 32, 32).unwrap();
    let narrow: Vec<u64> = narrow.counts().iter().map(|&c| u64::from(c)).collect();
    assert_eq!(narrow, wide.counts());
}

#[test]
fn zero_sized_scene_is_rejected() {
    let table = build_offsets(Point2D::new(0, 0), &EdgePointSet::new()).unwrap();
    let err = vote::<u32>(&EdgePointSet::new(), &table, 0, 10).unwrap_err();
    assert_eq!(
        err,
        HoughMatchError::InvalidDimensions {
            width: 0,
            height: 10,
        }
    );
}

#[test]
fn cancelled_vote_returns_no_accumulator() {
    let model = EdgePointSet::from_points(vec![Point2D::new(0, 0)]);
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();
    let scene: EdgePointSet = (0..10).map(|i| Point2D::new(i, 0)).collect();

    let cancel = CancelToken::new();
    let ok = vote_cancellable::<u32>(&scene, &table, 10, 1, &cancel);
    assert!(ok.is_ok());

    cancel.cancel();
    let err = vote_cancellable::<u32>(&scene, &table, 10, 1, &cancel).unwrap_err();
    assert_eq!(err, HoughMatchError::Cancelled);

    let locator = Locator::new(ShapeModel::from_edges(Point2D::new(0, 0), &model).unwrap());
    let err = locator
        .locate_cancellable(&scene, 10, 1, 1, &cancel)
        .unwrap_err();
    assert_eq!(err, HoughMatchError::Cancelled);
}

#[test]
fn cancel_from_another_thread_stops_a_running_vote() {
    let model = EdgePointSet::from_points(vec![Point2D::new(0, 0), Point2D::new(0, 1)]);
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();
    let scene: Vec<Point2D> = (0..10).map(|x| Point2D::new(x, 1)).collect();
    let cancel = CancelToken::new();

    let (result, acc) = thread::scope(|s| {
        // Rendezvous channel: each send returns only once the voter has taken the point.
        let (tx, rx) = mpsc::sync_channel::<&Point2D>(0);
        let voter = s.spawn(|| {
            // Owned here so the channel closes when the voter returns.
            let rx = rx;
            let mut acc = Accumulator::<u32>::new(10, 2).unwrap();
            let result = vote_into_cancellable(&mut acc, rx.iter(), &table, &cancel);
            (result, acc)
        });

        for p in &scene[..5] {
            tx.send(p).unwrap();
        }
        cancel.cancel();
        // The voter polls the flag before this point; it may already have stopped.
        let _ = tx.send(&scene[5]);
        drop(tx);
        voter.join().unwrap()
    });

    assert_eq!(result, Err(HoughMatchError::Cancelled));
    // Points 0..=3 voted before the cancel; point 4 races with it.
    let votes = acc.total_votes();
    assert!(votes == 8 || votes == 10, "unexpected vote count {votes}");
    for x in 0..4 {
        assert_eq!(acc.get(x, 1), Some(1));
        assert_eq!(acc.get(x, 0), Some(1));
    }
    assert_eq!(acc.get(9, 1), Some(0));
}

#[test]
fn merge_of_partial_votes_equals_full_vote() {
    let mut rng = StdRng::seed_from_u64(11);
    let model = random_shape(&mut rng, 20, 5);
    let scene = translate(&random_shape(&mut rng, 90, 10), Offset::new(20, 20));
    let table = build_offsets(Point2D::new(0, 0), &model).unwrap();

    let (full, _) = vote::<u32>(&scene, &table, 40, 40).unwrap();

    let (head, tail) = scene.points().split_at(37);
    let mut merged = Accumulator::<u32>::new(40, 40).unwrap();
    let mut part = Accumulator::<u32>::new(40, 40).unwrap();
    houghmatch::lowlevel::vote_into(&mut merged, head, &table);
    houghmatch::lowlevel::vote_into(&mut part, tail, &table);
    merged.merge(&part).unwrap();
    assert_eq!(merged, full);
}

#[test]
fn locator_accumulate_uses_explicit_counter() {
    let model = EdgePointSet::from_points(vec![Point2D::new(0, 0), Point2D::new(1, 0)]);
    let locator = Locator::new(ShapeModel::from_edges(Point2D::new(0, 0), &model).unwrap())
        .with_config(LocateConfig::default());
    let scene = EdgePointSet::from_points(vec![Point2D::new(3, 3), Point2D::new(4, 3)]);
    let (acc, stats) = locator.accumulate::<u16>(&scene, 8, 8).unwrap();
    assert_eq!(acc.get(3, 3), Some(2u16));
    assert_eq!(stats.cast, 4);
}
