//! Reverse geocoding a handful of coordinates against a small gazetteer.
//!
//! Run with: RUST_LOG=debug cargo run --example reverse_geocode --release

use revgeo::{DuplicatePolicy, GeocoderBuilder, Place, lat_lng};

fn gazetteer() -> Vec<Place> {
    vec![
        Place::new("Amsterdam", 52.3676, 4.9041).with_country_code("NL").with_population(921_402),
        Place::new("Rotterdam", 51.9244, 4.4777).with_country_code("NL").with_population(655_468),
        Place::new("Utrecht", 52.0907, 5.1214).with_country_code("NL").with_population(361_966),
        Place::new("Den Haag", 52.0705, 4.3007).with_country_code("NL").with_population(552_995),
        Place::new("Berlin", 52.5200, 13.4050).with_country_code("DE").with_population(3_878_100),
        Place::new("Paris", 48.8566, 2.3522).with_country_code("FR").with_population(2_102_650),
        Place::new("London", 51.5072, -0.1276).with_country_code("GB").with_population(8_945_309),
        Place::new("Brussels", 50.8503, 4.3517).with_country_code("BE").with_population(1_222_637),
        Place::new("Suva", -18.1416, 178.4419).with_country_code("FJ").with_population(93_970),
        Place::new("Apia", -13.8507, -171.7514).with_country_code("WS").with_population(35_974),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Reverse Geocoding Demo ===\n");

    let mut geocoder = GeocoderBuilder::new()
        .duplicate_policy(DuplicatePolicy::Skip)
        .records(gazetteer())
        .build()?;
    println!("Indexed {} places: {:?}\n", geocoder.len(), geocoder.stats());

    println!("1. Nearest place");
    for (lat, lng) in [(52.37, 4.90), (48.85, 2.29), (-16.0, 179.9)] {
        let hits = geocoder.nearest_neighbour_search_with_distance(&lat_lng(lat, lng), 1)?;
        if let Some(hit) = hits.first() {
            println!(
                "   ({:>7.3}, {:>8.3}) -> {} ({:.1} km)",
                lat,
                lng,
                hit.record.name,
                hit.distance_meters / 1000.0
            );
        }
    }

    println!("\n2. Places within 100 km of (52.0, 4.8)");
    for hit in geocoder.radial_search_with_distance(&lat_lng(52.0, 4.8), 100_000.0, 10)? {
        println!(
            "   {:<10} {:>6.1} km  pop {}",
            hit.record.name,
            hit.distance_meters / 1000.0,
            hit.record.population
        );
    }

    println!("\n3. Three places closest to Brussels");
    let brussels = Place::new("probe", 50.8503, 4.3517);
    for place in geocoder.nearest_neighbour_search(&brussels, 4)?.into_iter().skip(1) {
        println!("   {}", place.name);
    }

    println!("\n4. Incremental updates");
    geocoder.add(Place::new("Haarlem", 52.3874, 4.6462).with_country_code("NL"))?;
    geocoder.add(Place::new("Amsterdam (duplicate)", 52.3676, 4.9041))?;
    println!("   after add:     {:?}", geocoder.stats());
    geocoder.balance();
    println!("   after balance: {:?}", geocoder.stats());

    if let Err(e) = geocoder.add(Place::new("Nowhere", f64::NAN, 0.0)) {
        println!("   rejected: {}", e);
    }

    println!("\n5. Sorted by distance from Utrecht");
    let order: Vec<&str> = geocoder
        .sort_by_distance(&lat_lng(52.0907, 5.1214))?
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    println!("   {}", order.join(" < "));

    Ok(())
}
