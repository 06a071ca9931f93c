use proptest::prelude::*;

use sibyl_types::{QueryHash, Timestamp};

proptest! {
    /// The query hash is a pure function of its two inputs.
    #[test]
    fn query_hash_is_deterministic(query in ".{0,64}", granularity in 0u64..1_000_000) {
        prop_assert_eq!(
            QueryHash::compute(&query, granularity),
            QueryHash::compute(&query, granularity)
        );
    }

    /// Distinct granularities never collide for the same query text.
    #[test]
    fn query_hash_separates_granularities(
        query in ".{0,64}",
        g1 in 0u64..1_000_000,
        g2 in 0u64..1_000_000,
    ) {
        prop_assume!(g1 != g2);
        prop_assert_ne!(QueryHash::compute(&query, g1), QueryHash::compute(&query, g2));
    }

    /// `has_expired` agrees with plain arithmetic on the clock.
    #[test]
    fn expiry_matches_arithmetic(
        start in 0u64..1_000_000,
        duration in 0u64..1_000_000,
        now in 0u64..4_000_000,
    ) {
        let t = Timestamp::new(start);
        prop_assert_eq!(
            t.has_expired(duration, Timestamp::new(now)),
            now >= start + duration
        );
    }

    /// Elapsed time never goes negative and is exact when `now` is later.
    #[test]
    fn elapsed_is_saturating(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let earlier = Timestamp::new(a.min(b));
        let later = Timestamp::new(a.max(b));
        prop_assert_eq!(earlier.elapsed_since(later), a.max(b) - a.min(b));
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }
}
