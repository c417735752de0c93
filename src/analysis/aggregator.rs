//! Merging of per-file aggregates.
//!
//! Each scanned file produces an independent [`Aggregate`]; this module
//! folds them into one. Merging is per-cell addition, so the result does
//! not depend on the order files finished scanning.

use crate::models::Aggregate;

/// Merge `addition` into `base`, summing counts per handler and level.
///
/// Handlers missing from `base` are added with zeroed counts first.
pub fn merge(base: &mut Aggregate, addition: Aggregate) {
    for (path, counts) in addition {
        base.counts_mut(&path).add(&counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, LevelCounts};

    fn aggregate(entries: &[(&str, &[(Level, u64)])]) -> Aggregate {
        let mut agg = Aggregate::new();
        for (path, levels) in entries {
            let counts = agg.counts_mut(path);
            for &(level, n) in *levels {
                for _ in 0..n {
                    counts.increment(level);
                }
            }
        }
        agg
    }

    fn merged(mut base: Aggregate, addition: Aggregate) -> Aggregate {
        merge(&mut base, addition);
        base
    }

    fn log1() -> Aggregate {
        aggregate(&[
            ("/api/v1/reviews/", &[(Level::Info, 2)]),
            ("/admin/dashboard/", &[(Level::Info, 1), (Level::Error, 1)]),
        ])
    }

    fn log2() -> Aggregate {
        aggregate(&[
            ("/admin/dashboard/", &[(Level::Info, 1), (Level::Error, 1)]),
            ("/api/v1/checkout/", &[(Level::Error, 1)]),
        ])
    }

    #[test]
    fn test_merge_two_files() {
        let mut overall = Aggregate::new();
        merge(&mut overall, log1());
        merge(&mut overall, log2());

        assert_eq!(overall.len(), 3);
        assert_eq!(overall.get("/api/v1/reviews/").map(|c| c.info), Some(2));

        let admin = overall.get("/admin/dashboard/").unwrap();
        assert_eq!(admin.info, 2);
        assert_eq!(admin.error, 2);

        assert_eq!(overall.get("/api/v1/checkout/").map(|c| c.error), Some(1));
    }

    #[test]
    fn test_merge_sums_overlapping_handler() {
        let mut base = aggregate(&[("/x/", &[(Level::Info, 2)])]);
        let addition = aggregate(&[
            ("/x/", &[(Level::Info, 1), (Level::Error, 1)]),
            ("/y/", &[(Level::Error, 1)]),
        ]);

        merge(&mut base, addition);

        let expected = aggregate(&[
            ("/x/", &[(Level::Info, 3), (Level::Error, 1)]),
            ("/y/", &[(Level::Error, 1)]),
        ]);
        assert_eq!(base, expected);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut base = log1();
        merge(&mut base, Aggregate::new());
        assert_eq!(base, log1());

        let mut empty = Aggregate::new();
        merge(&mut empty, log1());
        assert_eq!(empty, log1());
    }

    #[test]
    fn test_merge_is_commutative() {
        assert_eq!(merged(log1(), log2()), merged(log2(), log1()));
    }

    #[test]
    fn test_merge_is_associative() {
        let third = aggregate(&[
            ("/api/v1/reviews/", &[(Level::Critical, 4)]),
            ("/zzz/", &[]),
        ]);

        let left = merged(merged(log1(), log2()), third.clone());
        let right = merged(log1(), merged(log2(), third));
        assert_eq!(left, right);
    }

    #[test]
    fn test_fold_any_order() {
        let fold = |parts: Vec<Aggregate>| parts.into_iter().fold(Aggregate::new(), merged);
        let forward = fold(vec![log1(), log2()]);
        let backward = fold(vec![log2(), log1()]);
        assert_eq!(forward, backward);
        assert_eq!(forward.total_requests(), 7);
    }

    #[test]
    fn test_merge_keeps_zero_count_handlers() {
        let zero = aggregate(&[("/only-unknown/", &[])]);
        let combined = merged(zero, log2());
        assert_eq!(combined.get("/only-unknown/"), Some(&LevelCounts::new()));
    }
}
