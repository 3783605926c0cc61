#![cfg(feature = "async")]

use revgeo::{GeocoderBuilder, Place, SharedReverseGeocoder, lat_lng};

fn netherlands() -> Vec<Place> {
    vec![
        Place::new("Amsterdam", 52.3676, 4.9041),
        Place::new("Rotterdam", 51.9244, 4.4777),
        Place::new("Utrecht", 52.0907, 5.1214),
        Place::new("Berlin", 52.5200, 13.4050),
    ]
}

#[tokio::test]
async fn test_async_queries() {
    let geocoder = SharedReverseGeocoder::from_records(netherlands()).expect("Failed to build");

    let nearest = geocoder
        .nearest_neighbour_search_lat_lng_async(52.37, 4.90, 1)
        .await
        .expect("Nearest query failed");
    assert_eq!(nearest[0].name, "Amsterdam");

    let within = geocoder
        .radial_search_lat_lng_async(52.0, 4.8, 100_000.0, 10)
        .await
        .expect("Radial query failed");
    let names: Vec<&str> = within.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Rotterdam", "Utrecht", "Amsterdam"]);

    let by_record = geocoder
        .nearest_neighbour_search_async(Place::new("probe", 52.5, 13.4), 2)
        .await
        .expect("Nearest query failed");
    assert_eq!(by_record[0].name, "Berlin");
    assert_eq!(by_record[1].name, "Utrecht");
}

#[tokio::test]
async fn test_async_writes() {
    let geocoder: SharedReverseGeocoder<Place> = GeocoderBuilder::new()
        .build_shared()
        .expect("Failed to build");

    let added = geocoder
        .add_range_async(netherlands())
        .await
        .expect("Failed to add records");
    assert_eq!(added, 4);

    geocoder
        .add_async(Place::new("Den Haag", 52.0705, 4.3007))
        .await
        .expect("Failed to add record");
    geocoder.balance_async().await.expect("Balance failed");

    let stats = geocoder.stats();
    assert_eq!(stats.points, 5);
    assert_eq!(stats.height, 3);

    let hits = geocoder
        .radial_search_async(lat_lng(52.07, 4.30), 5_000.0, 10)
        .await
        .expect("Radial query failed");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Den Haag");
}

#[tokio::test]
async fn test_async_distance_queries() {
    let geocoder = SharedReverseGeocoder::from_records(netherlands()).expect("Failed to build");

    let nearest = geocoder
        .nearest_neighbour_search_with_distance_async(lat_lng(52.0, 4.8), 4)
        .await
        .expect("Nearest query failed");
    assert_eq!(nearest.len(), 4);
    assert_eq!(nearest[0].0.name, "Rotterdam");
    assert!((nearest[0].1 - 23_628.7).abs() < 10.0);
    assert_eq!(nearest[3].0.name, "Berlin");

    let within = geocoder
        .radial_search_with_distance_async(lat_lng(52.0, 4.8), 30_000.0, 10)
        .await
        .expect("Radial query failed");
    let names: Vec<&str> = within.iter().map(|(p, _)| p.name.as_str()).collect();
    assert_eq!(names, ["Rotterdam", "Utrecht"]);
    assert!(within.iter().all(|(_, meters)| *meters <= 30_000.0));

    assert!(
        geocoder
            .radial_search_with_distance_async(lat_lng(52.0, 4.8), f64::NAN, 10)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_async_errors_propagate() {
    let geocoder = SharedReverseGeocoder::from_records(netherlands()).expect("Failed to build");

    assert!(
        geocoder
            .add_async(Place::new("bad", f64::NAN, 0.0))
            .await
            .is_err()
    );
    assert!(
        geocoder
            .radial_search_lat_lng_async(52.0, 4.8, f64::NAN, 10)
            .await
            .is_err()
    );
    assert_eq!(geocoder.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_async_queries() {
    let geocoder = SharedReverseGeocoder::from_records(netherlands()).expect("Failed to build");

    let mut handles = Vec::new();
    for i in 0..16 {
        let geocoder = geocoder.clone();
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                geocoder
                    .add_async(Place::new(format!("extra{}", i), -30.0, i as f64))
                    .await
                    .expect("Failed to add record");
            }
            geocoder
                .nearest_neighbour_search_lat_lng_async(52.37, 4.90, 1)
                .await
                .expect("Nearest query failed")
        }));
    }

    for handle in handles {
        let nearest = handle.await.expect("Task panicked");
        assert_eq!(nearest[0].name, "Amsterdam");
    }
    assert_eq!(geocoder.len(), 8);
}
