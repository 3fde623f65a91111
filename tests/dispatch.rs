use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use stencil_lib::{apply_filter, apply_filters, convolve, Channels, Filter, FilterBank, Matrix, ThreadPool};

fn random_channels(rng: &mut StdRng, width: usize, height: usize) -> Channels {
    let mut plane = || Matrix::from_fn(width, height, |_, _| rng.gen_range(0..=255)).unwrap();
    Channels::new(plane(), plane(), plane()).unwrap()
}

fn sequential(channels: &Channels, bank: &FilterBank, stride: usize) -> Vec<Channels> {
    bank.iter()
        .map(|filter| {
            let p = filter.same_padding();
            Channels::new(
                convolve(channels.red(), filter, p, stride).unwrap(),
                convolve(channels.green(), filter, p, stride).unwrap(),
                convolve(channels.blue(), filter, p, stride).unwrap(),
            )
            .unwrap()
        })
        .collect()
}

#[test]
fn dispatcher_matches_sequential_for_every_pool_size() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let channels = random_channels(&mut rng, 17, 11);
    let bank = FilterBank::random(&mut rng, 9, 3, -3, 3).unwrap();
    let expected = sequential(&channels, &bank, 1);

    for threads in [1, 2, 3, 4, 8, 16] {
        let pool = ThreadPool::new(threads).unwrap();
        let out = apply_filters(&pool, &channels, &bank, 1).unwrap();
        assert_eq!(out, expected, "threads = {threads}");
    }
}

#[test]
fn outputs_follow_filter_order_with_mixed_sizes() {
    let mut rng = StdRng::seed_from_u64(42);
    let channels = random_channels(&mut rng, 12, 9);

    let bank = FilterBank::new(vec![
        Filter::ones(7).unwrap(),
        Filter::identity(1).unwrap(),
        Filter::ones(5).unwrap(),
        Filter::identity(3).unwrap(),
        Filter::ones(3).unwrap(),
    ])
    .unwrap();

    let out = apply_filters(&ThreadPool::new(5).unwrap(), &channels, &bank, 1).unwrap();

    assert_eq!(out.len(), 5);
    assert_eq!(out[1], channels);
    assert_eq!(out[3], channels);
    for (filter, result) in bank.iter().zip(&out) {
        assert_eq!(result, &apply_filter(&channels, filter, 1).unwrap());
    }
}

#[test]
fn strided_dispatch_and_rectify() {
    let m = Matrix::from_fn(10, 10, |r, _| r as i32 + 1).unwrap();
    let neg = Filter::new(1, vec![-1]).unwrap();
    let channels = Channels::grey(m.clone());
    let bank = FilterBank::new(vec![Filter::ones(3).unwrap(), neg]).unwrap();

    let out = apply_filters(&ThreadPool::new(2).unwrap(), &channels, &bank, 3).unwrap();

    assert_eq!(out[0].shape(), stencil_lib::Shape::new(4, 4));
    assert!(out[1].red().as_slice().iter().all(|&x| x < 0));

    let rectified = out[1].clone().rectify();
    assert!(rectified.iter().all(|plane| plane.as_slice().iter().all(|&x| x == 0)));
    assert_eq!(rectified.clone().rectify(), rectified);
}

#[test]
fn inputs_are_untouched_by_dispatch() {
    let mut rng = StdRng::seed_from_u64(7);
    let channels = random_channels(&mut rng, 8, 8);
    let before = channels.clone();
    let bank = FilterBank::random(&mut rng, 3, 3, -5, 5).unwrap();

    let _ = apply_filters(&ThreadPool::new(3).unwrap(), &channels, &bank, 1).unwrap();
    assert_eq!(channels, before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dispatcher_is_pool_size_independent(
        seed in any::<u64>(),
        width in 3usize..12,
        height in 3usize..12,
        count in 1usize..6,
        threads in 1usize..9,
        stride in 1usize..3,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let channels = random_channels(&mut rng, width, height);
        let bank = FilterBank::random(&mut rng, count, 3, -4, 4).unwrap();

        let out = apply_filters(&ThreadPool::new(threads).unwrap(), &channels, &bank, stride).unwrap();
        prop_assert_eq!(out, sequential(&channels, &bank, stride));
    }
}
