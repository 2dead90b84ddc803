use crate::core::distance::distance_miles;
use crate::domain::model::{Coordinates, LocationRecord, RankedLocation};

/// Candidates within `max_distance_miles` of `origin`, nearest first.
///
/// Candidates without coordinates are skipped. The radius is inclusive and
/// equal distances keep their input order.
pub fn rank_with_distances(
    origin: Coordinates,
    candidates: &[LocationRecord],
    max_distance_miles: u32,
) -> Vec<RankedLocation> {
    let mut ranked: Vec<RankedLocation> = candidates
        .iter()
        .filter_map(|candidate| {
            let coordinates = candidate.coordinates?;
            let distance = distance_miles(origin, coordinates);
            (distance <= max_distance_miles).then(|| RankedLocation {
                location: candidate.clone(),
                distance_miles: distance,
            })
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|r| r.distance_miles);
    ranked
}

pub fn rank_by_proximity(
    origin: Coordinates,
    candidates: &[LocationRecord],
    max_distance_miles: u32,
) -> Vec<LocationRecord> {
    rank_with_distances(origin, candidates, max_distance_miles)
        .into_iter()
        .map(|r| r.location)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    fn london() -> Coordinates {
        point(51.5074, -0.1278)
    }

    #[test]
    fn test_london_scenario() {
        let candidates = vec![
            LocationRecord::new("Manchester").with_coordinates(point(53.4808, -2.2426)),
            LocationRecord::new("Brighton").with_coordinates(point(50.8225, -0.1372)),
        ];

        let ranked = rank_by_proximity(london(), &candidates, 100);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].town, "Brighton");
    }

    #[test]
    fn test_sorted_nearest_first() {
        let candidates = vec![
            LocationRecord::new("Manchester").with_coordinates(point(53.4808, -2.2426)),
            LocationRecord::new("Brighton").with_coordinates(point(50.8225, -0.1372)),
            LocationRecord::new("London").with_coordinates(london()),
        ];

        let ranked = rank_with_distances(london(), &candidates, 500);
        let towns: Vec<&str> = ranked.iter().map(|r| r.location.town.as_str()).collect();
        let distances: Vec<u32> = ranked.iter().map(|r| r.distance_miles).collect();

        assert_eq!(towns, vec!["London", "Brighton", "Manchester"]);
        assert_eq!(distances, vec![0, 47, 163]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let same = point(50.8225, -0.1372);
        let candidates = vec![
            LocationRecord::new("Hove").with_coordinates(same),
            LocationRecord::new("Manchester").with_coordinates(point(53.4808, -2.2426)),
            LocationRecord::new("Brighton").with_coordinates(same),
        ];

        let ranked = rank_by_proximity(london(), &candidates, 500);
        let towns: Vec<&str> = ranked.iter().map(|r| r.town.as_str()).collect();

        assert_eq!(towns, vec!["Hove", "Brighton", "Manchester"]);
    }

    #[test]
    fn test_missing_coordinates_always_excluded() {
        let candidates = vec![
            LocationRecord::new("Nowhere"),
            LocationRecord::new("Brighton").with_coordinates(point(50.8225, -0.1372)),
        ];

        for max in [0, 47, 100, u32::MAX] {
            let ranked = rank_by_proximity(london(), &candidates, max);
            assert!(ranked.iter().all(|r| r.coordinates.is_some()));
            assert!(ranked.iter().all(|r| r.town != "Nowhere"));
        }
    }

    #[test]
    fn test_radius_is_inclusive() {
        let candidates =
            vec![LocationRecord::new("Brighton").with_coordinates(point(50.8225, -0.1372))];

        assert_eq!(rank_by_proximity(london(), &candidates, 47).len(), 1);
        assert!(rank_by_proximity(london(), &candidates, 46).is_empty());
    }

    #[test]
    fn test_never_exceeds_radius() {
        let candidates: Vec<LocationRecord> = (0..20)
            .map(|i| {
                LocationRecord::new(format!("Town {}", i))
                    .with_coordinates(point(50.0 + i as f64 * 0.25, -1.0 + i as f64 * 0.1))
            })
            .collect();

        for max in [5, 10, 25, 50, 100] {
            let ranked = rank_with_distances(london(), &candidates, max);
            assert!(ranked.iter().all(|r| r.distance_miles <= max));
            assert!(ranked
                .windows(2)
                .all(|w| w[0].distance_miles <= w[1].distance_miles));
        }
    }

    #[test]
    fn test_near_antipodal_candidate_is_outside_small_radius() {
        let origin = point(1.6606, 0.0);
        let candidates = vec![LocationRecord::new("Far side").with_coordinates(point(-1.6606, 180.0))];

        assert!(rank_by_proximity(origin, &candidates, 5).is_empty());
        assert!(rank_by_proximity(origin, &candidates, 100).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_by_proximity(london(), &[], 100).is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let candidates = vec![
            LocationRecord::new("Manchester").with_coordinates(point(53.4808, -2.2426)),
            LocationRecord::new("Brighton").with_coordinates(point(50.8225, -0.1372)),
        ];
        let before = candidates.clone();

        let _ = rank_by_proximity(london(), &candidates, 500);

        assert_eq!(candidates, before);
    }
}
