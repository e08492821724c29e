//! Property tests for the perimeter record layout.

use proptest::prelude::*;
use swath_protocol::perimeter::{self, PathDelta, PerimeterRecord, WireError};

fn delta_strategy() -> impl Strategy<Value = PathDelta> {
    (any::<i16>(), any::<i16>()).prop_map(|(dx, dy)| PathDelta { dx, dy })
}

proptest! {
    #[test]
    fn roundtrip_preserves_everything(
        origin in (any::<i32>(), any::<i32>()),
        deltas in prop::collection::vec(delta_strategy(), 0..100),
    ) {
        let mut buffer = vec![0u8; perimeter::encoded_len(deltas.len() + 1)];
        let len = perimeter::encode_into(origin, &deltas, &mut buffer).unwrap();
        prop_assert_eq!(len, buffer.len());

        let record = PerimeterRecord::parse(&buffer).unwrap();
        prop_assert_eq!(record.origin(), origin);
        prop_assert_eq!(record.count(), deltas.len() + 1);

        let decoded: Vec<PathDelta> = record.deltas().collect();
        prop_assert_eq!(decoded, deltas);
    }

    #[test]
    fn misaligned_lengths_are_rejected(
        deltas in prop::collection::vec(delta_strategy(), 0..20),
        cut in 1usize..4,
    ) {
        let good_len = perimeter::encoded_len(deltas.len() + 1);
        let mut buffer = vec![0u8; good_len + 4];
        perimeter::encode_into((0, 0), &deltas, &mut buffer[..good_len]).unwrap();

        // Any length that is not origin + whole deltas must fail
        let result = PerimeterRecord::parse(&buffer[..good_len + cut]);
        prop_assert_eq!(result, Err(WireError::BadLength));
    }

    #[test]
    fn random_delta_reads_match_order(
        deltas in prop::collection::vec(delta_strategy(), 1..50),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut buffer = vec![0u8; perimeter::encoded_len(deltas.len() + 1)];
        perimeter::encode_into((17, -17), &deltas, &mut buffer).unwrap();

        let record = PerimeterRecord::parse(&buffer).unwrap();
        let index = pick.index(deltas.len());
        prop_assert_eq!(record.delta(index), Some(deltas[index]));
        prop_assert_eq!(record.delta(deltas.len()), None);
    }
}
