use std::collections::HashMap;

use jobmap_core::airports::{AirportDb, AirportKind, AirportRecord, Surface};
use jobmap_core::filters::LegFilter;
use jobmap_core::legs::{clean_legs_with_flight, CargoJob, JobCatalogue, JobType, LegJobs};

fn init_logging() {
    let _ = simplelog::SimpleLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
    );
}

fn make_airport(lat: f64, lon: f64) -> AirportRecord {
    AirportRecord {
        lat,
        lon,
        size: 10000,
        runway: 5000,
        surface: Surface::Asphalt,
        ils: true,
        kind: AirportKind::Civil,
        msfs: vec![],
        xplane: vec![],
        fsx: vec![],
    }
}

fn world() -> AirportDb {
    AirportDb {
        airports: [
            ("AAAA".to_string(), make_airport(40.0, -100.0)),
            ("BBBB".to_string(), make_airport(40.0, -99.0)),
            ("CCCC".to_string(), make_airport(40.0, -98.0)),
        ]
        .into_iter()
        .collect(),
    }
}

fn trip_leg(jobs: Vec<CargoJob>) -> LegJobs {
    let mut map = HashMap::new();
    map.insert(JobType::TripOnly, jobs);
    LegJobs {
        direction: 90.0,
        distance: 53.0,
        jobs: map,
    }
}

fn cargo(kg: u32, pay: u32) -> CargoJob {
    CargoJob { pax: 0, kg, pay }
}

#[test]
fn test_assigned_leg_injected_with_zeroed_sale_totals() {
    init_logging();
    let airports = world();

    // The general catalogue's only job on AAAA-BBBB pays too little to
    // survive; the pilot's assigned job on the same leg pays enough.
    let mut catalogue = JobCatalogue::new();
    catalogue.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(100, 100)]));

    let mut flight = JobCatalogue::new();
    flight.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(250, 600)]));

    let filter = LegFilter {
        min_leg_pay: Some(500),
        ..Default::default()
    };

    let (legs, max) = clean_legs_with_flight(&catalogue, &flight, &airports, &filter).unwrap();
    let leg = &legs["AAAA-BBBB"];
    assert_eq!(leg.amount, 0);
    assert_eq!(leg.pay, 0);
    assert!(leg.filtered_jobs.is_empty());

    let totals = leg.flight.unwrap();
    assert_eq!(totals.pay, 600);
    assert_eq!(totals.kg, 250);
    assert_eq!(totals.pax, 0);

    // The general pass kept nothing, so the maximum is zero even though
    // the assigned leg weighs 250 kg.
    assert_eq!(max, 0);
}

#[test]
fn test_flight_totals_merged_into_surviving_leg() {
    let airports = world();

    let mut catalogue = JobCatalogue::new();
    catalogue.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(400, 900)]));

    let mut flight = JobCatalogue::new();
    flight.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(150, 300)]));

    let (legs, max) =
        clean_legs_with_flight(&catalogue, &flight, &airports, &LegFilter::default()).unwrap();

    let leg = &legs["AAAA-BBBB"];
    // Sale totals are untouched by the merge.
    assert_eq!(leg.amount, 400);
    assert_eq!(leg.pay, 900);
    assert_eq!(leg.filtered_jobs, vec![cargo(400, 900)]);
    assert_eq!(leg.flight.unwrap().pay, 300);
    assert_eq!(max, 400);
}

#[test]
fn test_flight_kg_ignores_passenger_jobs() {
    let airports = world();

    let catalogue = JobCatalogue::new();
    let mut flight = JobCatalogue::new();
    flight.insert(
        "AAAA-BBBB".to_string(),
        trip_leg(vec![
            CargoJob {
                pax: 2,
                kg: 50,
                pay: 300,
            },
            cargo(120, 200),
        ]),
    );

    let (legs, _) =
        clean_legs_with_flight(&catalogue, &flight, &airports, &LegFilter::default()).unwrap();

    let totals = legs["AAAA-BBBB"].flight.unwrap();
    assert_eq!(totals.pax, 2);
    // The passenger job's 50 kg does not count towards the weight total.
    assert_eq!(totals.kg, 120);
    assert_eq!(totals.pay, 500);
}

#[test]
fn test_assigned_jobs_pass_the_same_filters() {
    let airports = world();

    let catalogue = JobCatalogue::new();
    let mut flight = JobCatalogue::new();
    flight.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(100, 100)]));

    // The assigned leg is below the pay floor too, so it never shows up.
    let filter = LegFilter {
        min_leg_pay: Some(500),
        ..Default::default()
    };
    let (legs, _) = clean_legs_with_flight(&catalogue, &flight, &airports, &filter).unwrap();
    assert!(legs.is_empty());
}

#[test]
fn test_max_comes_from_general_pass_only() {
    let airports = world();

    let mut catalogue = JobCatalogue::new();
    catalogue.insert("AAAA-BBBB".to_string(), trip_leg(vec![cargo(200, 500)]));

    let mut flight = JobCatalogue::new();
    flight.insert("BBBB-CCCC".to_string(), trip_leg(vec![cargo(5000, 9000)]));

    let (legs, max) =
        clean_legs_with_flight(&catalogue, &flight, &airports, &LegFilter::default()).unwrap();

    assert_eq!(legs.len(), 2);
    assert_eq!(max, 200);
    assert_eq!(legs["BBBB-CCCC"].amount, 0);
    assert_eq!(legs["BBBB-CCCC"].flight.unwrap().kg, 5000);
}
