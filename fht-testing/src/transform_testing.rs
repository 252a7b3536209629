use alloc::vec::Vec;

use adrt_fht::{
    ImageFht, InPlaceFht, NaiveFht, Permutation, Scalar, Sign, SplitPolicy, Traversal,
    fht2_in_place, fht2_to_image,
};
use adrt_matrix::Matrix;
use adrt_matrix::dense::RowMajorMatrix;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::random_image;

const SIGNS: [Sign; 2] = [Sign::Positive, Sign::Negative];
const SPLITS: [SplitPolicy; 2] = [SplitPolicy::Balanced, SplitPolicy::PowerOfTwo];

/// Shapes covering single rows and columns, odd and even heights, and widths below the height.
fn shapes() -> impl Iterator<Item = (usize, usize)> {
    (1..=33).flat_map(|height| {
        [1, 2, 5, height, height + 3]
            .into_iter()
            .map(move |width| (height, width))
    })
}

fn in_place<T: Scalar>(
    image: &RowMajorMatrix<T>,
    sign: Sign,
    split: SplitPolicy,
    traversal: Traversal,
) -> (RowMajorMatrix<T>, Permutation) {
    let mut out = image.clone();
    let ledger = fht2_in_place(&mut out.as_view_mut(), sign, split, traversal);
    (out, ledger)
}

fn to_image<T: Scalar>(
    image: &RowMajorMatrix<T>,
    sign: Sign,
    split: SplitPolicy,
    traversal: Traversal,
) -> RowMajorMatrix<T> {
    let mut out = RowMajorMatrix::with_default(image.height(), image.width());
    fht2_to_image(&mut out.as_view_mut(), &image.as_view(), sign, split, traversal);
    out
}

pub fn test_engines_agree<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(1);
    for (height, width) in shapes() {
        let image = random_image::<T, _>(&mut rng, height, width);
        for sign in SIGNS {
            for split in SPLITS {
                let recursive = in_place(&image, sign, split, Traversal::Recursive);
                let iterative = in_place(&image, sign, split, Traversal::Iterative);
                assert_eq!(recursive, iterative, "{height}x{width} {sign:?} {split:?}");

                let recursive = to_image(&image, sign, split, Traversal::Recursive);
                let iterative = to_image(&image, sign, split, Traversal::Iterative);
                assert_eq!(recursive, iterative, "{height}x{width} {sign:?} {split:?}");
            }
        }
    }
}

pub fn test_ledger_is_bijection<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(2);
    for height in 1..=200 {
        let image = random_image::<T, _>(&mut rng, height, 3);
        for split in SPLITS {
            let (_, ledger) = in_place(&image, Sign::Positive, split, Traversal::Iterative);
            assert_eq!(ledger.len(), height);
            assert!(ledger.is_bijection(), "{split:?} height = {height}");
        }
    }
}

/// The power-of-two in-place transform, read in ledger order, equals the brute-force sums. So does
/// the balanced one on power-of-two heights, where both splits coincide.
pub fn test_in_place_matches_naive<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(3);
    for (height, width) in shapes() {
        let image = random_image::<T, _>(&mut rng, height, width);
        for sign in SIGNS {
            let expected = NaiveFht.transform(&image, sign, SplitPolicy::PowerOfTwo);
            let (out, ledger) =
                in_place(&image, sign, SplitPolicy::PowerOfTwo, Traversal::Iterative);
            assert_eq!(ledger.apply(&out), expected, "{height}x{width} {sign:?}");

            if height.is_power_of_two() {
                let (out, ledger) =
                    in_place(&image, sign, SplitPolicy::Balanced, Traversal::Recursive);
                assert_eq!(ledger.apply(&out), expected, "{height}x{width} {sign:?}");
            }
        }
    }
}

pub fn test_image_matches_naive<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(4);
    for (height, width) in shapes() {
        let image = random_image::<T, _>(&mut rng, height, width);
        for sign in SIGNS {
            for split in SPLITS {
                let expected = NaiveFht.transform(&image, sign, split);
                let out = to_image(&image, sign, split, Traversal::Iterative);
                assert_eq!(out, expected, "{height}x{width} {sign:?} {split:?}");
            }
        }
    }
}

pub fn test_image_leaves_source_untouched<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(5);
    let image = random_image::<T, _>(&mut rng, 17, 9);
    let snapshot = image.clone();
    let mut fht = ImageFht::new();
    let mut out = RowMajorMatrix::with_default(17, 9);
    for split in SPLITS {
        fht.transform(
            &mut out.as_view_mut(),
            &image.as_view(),
            Sign::Negative,
            split,
            Traversal::Recursive,
        );
        assert_eq!(image, snapshot);
        assert_ne!(out, snapshot);
    }
}

/// Reversing the columns turns one slope family into the other, ledger included.
pub fn test_sign_symmetry<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(6);
    for (height, width) in shapes() {
        let image = random_image::<T, _>(&mut rng, height, width);
        let mut reversed = image.clone();
        reversed.reverse_columns();
        for split in SPLITS {
            let (negative, negative_ledger) =
                in_place(&image, Sign::Negative, split, Traversal::Iterative);
            let (mut positive, positive_ledger) =
                in_place(&reversed, Sign::Positive, split, Traversal::Iterative);
            positive.reverse_columns();
            assert_eq!(negative, positive, "{height}x{width} {split:?}");
            assert_eq!(negative_ledger, positive_ledger, "{height}x{width} {split:?}");
        }
    }
}

/// One executor reused across shapes and settings behaves like fresh ones.
pub fn test_executor_reuse<T: Scalar>() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut in_place_fht = InPlaceFht::new(0);
    let mut image_fht = ImageFht::new();
    let images: Vec<RowMajorMatrix<T>> = [(12, 12), (5, 7), (12, 12), (31, 4)]
        .into_iter()
        .map(|(height, width)| random_image(&mut rng, height, width))
        .collect();
    for image in &images {
        for split in SPLITS {
            let (expected, expected_ledger) =
                in_place(image, Sign::Positive, split, Traversal::Recursive);
            let mut out = image.clone();
            let ledger = in_place_fht.transform(
                &mut out.as_view_mut(),
                Sign::Positive,
                split,
                Traversal::Iterative,
            );
            assert_eq!((out, ledger), (expected, expected_ledger));

            let expected = to_image(image, Sign::Negative, split, Traversal::Recursive);
            let mut out = RowMajorMatrix::with_default(image.height(), image.width());
            image_fht.transform(
                &mut out.as_view_mut(),
                &image.as_view(),
                Sign::Negative,
                split,
                Traversal::Iterative,
            );
            assert_eq!(out, expected);
        }
    }
}

/// Instantiates the conformance suite for one scalar type, in a module named after it.
#[macro_export]
macro_rules! test_fht_scalar {
    ($scalar:ident) => {
        $crate::paste::paste! {
            mod [<fht_ $scalar>] {
                #[test]
                fn engines_agree() {
                    $crate::test_engines_agree::<$scalar>();
                }

                #[test]
                fn ledger_is_bijection() {
                    $crate::test_ledger_is_bijection::<$scalar>();
                }

                #[test]
                fn in_place_matches_naive() {
                    $crate::test_in_place_matches_naive::<$scalar>();
                }

                #[test]
                fn image_matches_naive() {
                    $crate::test_image_matches_naive::<$scalar>();
                }

                #[test]
                fn image_leaves_source_untouched() {
                    $crate::test_image_leaves_source_untouched::<$scalar>();
                }

                #[test]
                fn sign_symmetry() {
                    $crate::test_sign_symmetry::<$scalar>();
                }

                #[test]
                fn executor_reuse() {
                    $crate::test_executor_reuse::<$scalar>();
                }
            }
        }
    };
}
