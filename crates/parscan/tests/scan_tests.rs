use parscan::{
    Executor, FnCombine, RayonExecutor, ScanKind, SequenceView, SequenceViewMut, SerialExecutor,
    Sum, fork_join_scan, scan_seq, tiled_scan,
};

mod common;

// the workshop's test vector: exclusive scan gives
// [0, 3, 4, 11, 11, 12, 16, 21, 30] with a grand total of 32
const INPUT: [i64; 9] = [3, 1, 7, 0, 1, 4, 5, 9, 2];
const EXCLUSIVE: [i64; 9] = [0, 3, 4, 11, 11, 12, 16, 21, 30];
const INCLUSIVE: [i64; 9] = [3, 4, 11, 11, 12, 16, 21, 30, 32];
const TOTAL: i64 = 32;

#[test]
fn sequential_exclusive() {
    let mut output = [0_i64; 9];
    let total = scan_seq(&INPUT, &mut output, &Sum, ScanKind::Exclusive).unwrap();
    assert_eq!(output, EXCLUSIVE);
    assert_eq!(total, TOTAL);
}

#[test]
fn sequential_inclusive() {
    let mut output = [0_i64; 9];
    let total = scan_seq(&INPUT, &mut output, &Sum, ScanKind::Inclusive).unwrap();
    assert_eq!(output, INCLUSIVE);
    assert_eq!(total, TOTAL);
}

#[test]
fn tiled_exclusive() {
    for tile_count in [0, 1, 2, 3, 8, 9, 50] {
        let mut output = [0_i64; 9];
        let total = tiled_scan(&INPUT, &mut output, &Sum, ScanKind::Exclusive, tile_count).unwrap();
        assert_eq!(output, EXCLUSIVE, "tile_count={tile_count}");
        assert_eq!(total, TOTAL);
    }
}

#[test]
fn tiled_inclusive() {
    let mut output = [0_i64; 9];
    let total = tiled_scan(&INPUT, &mut output, &Sum, ScanKind::Inclusive, 4).unwrap();
    assert_eq!(output, INCLUSIVE);
    assert_eq!(total, TOTAL);
}

#[test]
fn fork_join_exclusive() {
    for grain_size in [0, 1, 2, 3, 8, 9, 50] {
        let mut output = [0_i64; 9];
        let total =
            fork_join_scan(&INPUT, &mut output, &Sum, ScanKind::Exclusive, grain_size).unwrap();
        assert_eq!(output, EXCLUSIVE, "grain_size={grain_size}");
        assert_eq!(total, TOTAL);
    }
}

#[test]
fn fork_join_inclusive() {
    let mut output = [0_i64; 9];
    let total = fork_join_scan(&INPUT, &mut output, &Sum, ScanKind::Inclusive, 2).unwrap();
    assert_eq!(output, INCLUSIVE);
    assert_eq!(total, TOTAL);
}

#[test]
fn all_identity_elements_scan_to_all_identity() {
    let input = [0_i64; 17];
    for kind in [ScanKind::Exclusive, ScanKind::Inclusive] {
        let mut output = [1_i64; 17];
        tiled_scan(&input, &mut output, &Sum, kind, 4).unwrap();
        assert_eq!(output, [0_i64; 17]);

        let mut output = [1_i64; 17];
        fork_join_scan(&input, &mut output, &Sum, kind, 3).unwrap();
        assert_eq!(output, [0_i64; 17]);
    }
}

#[test]
fn empty_input() {
    let input: [i64; 0] = [];
    let mut output: [i64; 0] = [];
    assert_eq!(
        scan_seq(&input, &mut output, &Sum, ScanKind::Exclusive).unwrap(),
        0
    );
    assert_eq!(
        tiled_scan(&input, &mut output, &Sum, ScanKind::Exclusive, 4).unwrap(),
        0
    );
    assert_eq!(
        fork_join_scan(&input, &mut output, &Sum, ScanKind::Exclusive, 0).unwrap(),
        0
    );
}

#[test]
fn single_element() {
    let input = [7_i64];
    let mut output = [99_i64];
    let total = tiled_scan(&input, &mut output, &Sum, ScanKind::Exclusive, 8).unwrap();
    assert_eq!(output, [0]);
    assert_eq!(total, 7);

    let total = fork_join_scan(&input, &mut output, &Sum, ScanKind::Inclusive, 1).unwrap();
    assert_eq!(output, [7]);
    assert_eq!(total, 7);
}

#[test]
fn mismatched_lengths_fail_fast() {
    let input = [1_i64, 2, 3];
    let mut output = [0_i64; 2];
    assert!(scan_seq(&input, &mut output, &Sum, ScanKind::Exclusive).is_err());
    assert!(tiled_scan(&input, &mut output, &Sum, ScanKind::Exclusive, 2).is_err());
    assert!(fork_join_scan(&input, &mut output, &Sum, ScanKind::Exclusive, 1).is_err());
    // nothing was written
    assert_eq!(output, [0, 0]);
}

// string concatenation is associative but *not* commutative, so this only
// passes if every merge puts the logically-earlier accumulation on the left
#[test]
fn non_commutative_combine() {
    let concat = FnCombine::new(|a: &String, b: &String| format!("{a}{b}"), String::new());
    let input: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    let expect_excl = ["", "a", "ab", "abc", "abcd"];

    for grain_size in 1..=6 {
        let mut output = vec![String::new(); 5];
        let total =
            fork_join_scan(&input, &mut output, &concat, ScanKind::Exclusive, grain_size).unwrap();
        assert_eq!(output, expect_excl, "grain_size={grain_size}");
        assert_eq!(total, "abcde");
    }
    for tile_count in 1..=6 {
        let mut output = vec![String::new(); 5];
        let total =
            tiled_scan(&input, &mut output, &concat, ScanKind::Inclusive, tile_count).unwrap();
        assert_eq!(output, ["a", "ab", "abc", "abcd", "abcde"]);
        assert_eq!(total, "abcde");
    }
}

#[test]
fn executors_take_strided_views() {
    use ndarray::{Array1, s};

    // every other element of 0..20
    let backing: Array1<i64> = Array1::from_iter(0..20);
    let strided = backing.slice(s![..; 2]);
    let dense: Vec<i64> = strided.iter().copied().collect();
    let (expected, expected_total) = common::oracle_scan(&dense, &Sum, ScanKind::Exclusive);

    let mut output = vec![0_i64; 10];
    let total = RayonExecutor
        .drive_tiled(
            SequenceView::from_array_view(strided),
            SequenceViewMut::from_slice(&mut output),
            &Sum,
            ScanKind::Exclusive,
            4,
        )
        .unwrap();
    assert_eq!(output, expected);
    assert_eq!(total, expected_total);
}

#[test]
fn serial_and_rayon_executors_agree() {
    let input = common::random_ints(501, 2488848289_u64);
    for kind in [ScanKind::Exclusive, ScanKind::Inclusive] {
        let mut serial_out = vec![0_i64; input.len()];
        let mut rayon_out = vec![0_i64; input.len()];

        let serial_total = SerialExecutor
            .drive_fork_join(
                SequenceView::from_slice(&input),
                SequenceViewMut::from_slice(&mut serial_out),
                &Sum,
                kind,
                16,
            )
            .unwrap();
        let rayon_total = RayonExecutor
            .drive_fork_join(
                SequenceView::from_slice(&input),
                SequenceViewMut::from_slice(&mut rayon_out),
                &Sum,
                kind,
                16,
            )
            .unwrap();

        assert_eq!(serial_out, rayon_out);
        assert_eq!(serial_total, rayon_total);
    }
}
