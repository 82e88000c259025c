use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use natcat::events::Earthquake;
use natcat::exposure::{match_exposures, rank_alerts};
use natcat::geo::{GeoPoint, HALF_CIRCUMFERENCE_KM, haversine_km};
use natcat::summary::summarize;
use natcat::treaty::{Peril, Treaty};
use natcat::types::{EventId, TreatyId};

fn point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

fn quakes() -> impl Strategy<Value = Vec<Earthquake>> {
    prop::collection::vec((point(), 4.0f64..8.0, 0i64..604_800), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (p, magnitude, secs))| Earthquake {
                id: EventId(format!("e{i}")),
                magnitude,
                latitude: p.latitude,
                longitude: p.longitude,
                place: "prop".to_string(),
                time: Utc.timestamp_opt(1_748_736_000 + secs, 0).unwrap(),
                depth_km: 10.0,
            })
            .collect()
    })
}

fn treaties() -> impl Strategy<Value = Vec<Treaty>> {
    prop::collection::vec((point(), 1.0f64..6_000.0, 0u64..5), 0..6).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (p, radius_km, limit_tier))| Treaty {
                id: TreatyId(format!("T{i}")),
                name: format!("Treaty {i}"),
                peril: Peril::Earthquake,
                region: format!("R{}", i % 2),
                latitude: p.latitude,
                longitude: p.longitude,
                radius_km,
                limit_usd: limit_tier * 25_000_000,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in point(), b in point()) {
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!((ab - ba).abs() < 1e-9, "{ab} vs {ba}");
    }

    #[test]
    fn distance_to_self_is_zero(a in point()) {
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn distance_is_bounded(a in point(), b in point()) {
        let d = haversine_km(a, b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        prop_assert!(d <= HALF_CIRCUMFERENCE_KM + 1e-6, "{d}");
    }

    #[test]
    fn record_exists_iff_within_radius(events in quakes(), book in treaties()) {
        let records = match_exposures(&events, &book);
        for e in &events {
            for t in &book {
                let inside = haversine_km(e.epicenter(), t.center()) <= t.radius_km;
                let hits = records
                    .iter()
                    .filter(|r| r.event.id == e.id && r.treaty.id == t.id)
                    .count();
                prop_assert_eq!(hits, usize::from(inside), "event {} treaty {}", e.id, t.id);
            }
        }
        for r in &records {
            prop_assert!(r.distance_km <= r.treaty.radius_km);
        }
    }

    #[test]
    fn matching_is_idempotent(events in quakes(), book in treaties()) {
        let first = match_exposures(&events, &book);
        let second = match_exposures(&events, &book);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn exposed_limit_counts_each_treaty_once(events in quakes(), book in treaties()) {
        let records = match_exposures(&events, &book);
        let stats = summarize(&events, &records);

        let expected: u64 = book
            .iter()
            .filter(|t| records.iter().any(|r| r.treaty.id == t.id))
            .map(|t| t.limit_usd)
            .sum();
        prop_assert_eq!(stats.total_exposed_limit, expected);
        prop_assert_eq!(stats.exposure_by_region.values().sum::<u64>(), expected);
        prop_assert_eq!(
            stats.bands.moderate + stats.bands.strong + stats.bands.major + stats.below_band,
            stats.total_events
        );
    }

    #[test]
    fn ranking_is_a_sorted_permutation(events in quakes(), book in treaties()) {
        let records = match_exposures(&events, &book);
        let ranked = rank_alerts(&records);
        prop_assert_eq!(ranked.len(), records.len());
        for w in ranked.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            prop_assert!(a.treaty.limit_usd >= b.treaty.limit_usd);
            if a.treaty.limit_usd == b.treaty.limit_usd {
                prop_assert!(a.event.time >= b.event.time);
            }
        }
    }
}
