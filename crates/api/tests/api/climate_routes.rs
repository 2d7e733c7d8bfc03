use crate::helpers::{mock_stats, spawn_app, spawn_app_with_station, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{
    db::Error, ActiveStation, Precipitation, Station, StationTemperatures, MOST_ACTIVE_STATION,
};
use serde_json::json;
use std::{collections::BTreeMap, sync::Arc};
use time::macros::date;

fn daily(values: &[(&str, Option<f64>)]) -> BTreeMap<String, Option<f64>> {
    values
        .iter()
        .map(|(date, value)| (date.to_string(), *value))
        .collect()
}

#[tokio::test]
async fn precipitation_returns_one_map_of_dates() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_precipitation_last_year()
        .times(1)
        .returning(|| {
            Ok(Some(Precipitation {
                start: date!(2016 - 08 - 23),
                latest: date!(2017 - 08 - 23),
                values: daily(&[
                    ("2016-08-23", Some(0.0)),
                    ("2017-08-22", Some(0.5)),
                    ("2017-08-23", None),
                ]),
            }))
        });

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"2016-08-23": 0.0, "2017-08-22": 0.5, "2017-08-23": null}])
    );
}

#[tokio::test]
async fn precipitation_on_empty_dataset_is_not_found() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_precipitation_last_year()
        .times(1)
        .returning(|| Ok(None));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Dataset has no measurements."}));
}

#[tokio::test]
async fn stations_are_keyed_by_identifier_in_dataset_order() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_stations().times(1).returning(|| {
        Ok(vec![
            Station {
                station: String::from("USC00519397"),
                name: Some(String::from("WAIKIKI 717.2, HI US")),
                latitude: Some(21.2716),
                longitude: Some(-157.8168),
                elevation: Some(3.0),
            },
            Station {
                station: String::from("USC00513117"),
                name: Some(String::from("KANEOHE 838.1, HI US")),
                latitude: Some(21.4234),
                longitude: Some(-157.8015),
                elevation: None,
            },
        ])
    });

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"USC00519397": {"name": "WAIKIKI 717.2, HI US", "lat": 21.2716, "lng": -157.8168, "elevation": 3.0}},
            {"USC00513117": {"name": "KANEOHE 838.1, HI US", "lat": 21.4234, "lng": -157.8015, "elevation": null}}
        ])
    );
}

#[tokio::test]
async fn tobs_reports_the_fixed_station_by_default() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_most_active_station().never();
    climate_db
        .expect_station_temperatures()
        .withf(|station| station == MOST_ACTIVE_STATION)
        .times(1)
        .returning(|station| {
            Ok(Some(StationTemperatures {
                station: station.to_string(),
                start: date!(2016 - 08 - 18),
                latest: date!(2017 - 08 - 18),
                values: daily(&[("2016-08-18", Some(80.0)), ("2017-08-18", Some(79.0))]),
            }))
        });

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"USC00519281": {"2016-08-18": 80.0, "2017-08-18": 79.0}}])
    );
}

#[tokio::test]
async fn tobs_can_pick_the_station_with_most_observations() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_most_active_station()
        .times(1)
        .returning(|| Ok(Some(String::from("USC00513117"))));
    climate_db
        .expect_station_temperatures()
        .withf(|station| station == "USC00513117")
        .times(1)
        .returning(|station| {
            Ok(Some(StationTemperatures {
                station: station.to_string(),
                start: date!(2016 - 07 - 31),
                latest: date!(2017 - 07 - 31),
                values: daily(&[("2017-07-31", Some(72.0))]),
            }))
        });

    let test_app =
        spawn_app_with_station(Arc::new(climate_db), ActiveStation::MostObservations);
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"USC00513117": {"2017-07-31": 72.0}}]));
}

#[tokio::test]
async fn tobs_without_observations_is_not_found() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_station_temperatures()
        .times(1)
        .returning(|_| Ok(None));

    let test_app = spawn_app_with_station(
        Arc::new(climate_db),
        ActiveStation::Fixed(String::from("USC00000000")),
    );
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Station 'USC00000000' has no observations."})
    );
}

#[tokio::test]
async fn temperature_from_start_date() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .withf(|range| range.start == date!(2017 - 08 - 01) && range.end.is_none())
        .times(1)
        .returning(|_| Ok(Some(mock_stats())));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2017-08-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"min": 58.0, "max": 87.0, "avg": 74.59}]));
}

#[tokio::test]
async fn temperature_from_invalid_date_skips_storage() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_stats().never();

    let test_app = spawn_app(Arc::new(climate_db));

    for start in ["2020-13-01", "2019-02-29", "not-a-date", "error"] {
        let (status, body) = test_app.get_json(&format!("/api/v1.0/{}", start)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": format!("Date entered {} is not in proper format (yyyy-mm-dd) or is not a date", start)})
        );
    }
}

#[tokio::test]
async fn temperature_from_without_rows_is_not_found() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .times(1)
        .returning(|_| Ok(None));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2030-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Date entered 2030-01-01 yielded no result."})
    );
}

#[tokio::test]
async fn temperature_between_dates() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .withf(|range| {
            range.start == date!(2017 - 08 - 01) && range.end == Some(date!(2017 - 08 - 23))
        })
        .times(1)
        .returning(|_| Ok(Some(mock_stats())));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2017-08-01/2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"min": 58.0, "max": 87.0, "avg": 74.59}]));
}

#[tokio::test]
async fn reversed_range_never_queries_storage() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_stats().never();

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2017-08-23/2017-08-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Start date '2017-08-23' cannot be greater than the end date '2017-08-01'"})
    );
}

#[tokio::test]
async fn invalid_range_reports_each_date() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_stats().never();

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2017-02-30/2017-08-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Date not in proper format (yyyy-mm-dd) or is not a date <Start date '2017-02-30' = false | End date '2017-08-01' = true>"})
    );
}

#[tokio::test]
async fn range_without_rows_is_not_found() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .times(1)
        .returning(|_| Ok(None));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get_json("/api/v1.0/2030-01-01/2030-12-31").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Start date '2030-01-01' and End date '2030-12-31' yielded no result."})
    );
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_stations()
        .times(1)
        .returning(|| Err(Error::MissingTable(String::from("station"))));
    climate_db
        .expect_temperature_stats()
        .times(1)
        .returning(|_| Err(Error::Query(sqlx::Error::PoolClosed)));

    let test_app = spawn_app(Arc::new(climate_db));

    let (status, body) = test_app.get_json("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Storage unavailable: Dataset is missing table: station"})
    );

    let (status, body) = test_app.get_json("/api/v1.0/2017-08-01").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Storage unavailable: Failed to query sqlite"));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let climate_db = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_db));

    let (status, body) = test_app
        .get_json("/api/v1.0/2017-08-01/2017-08-23/extra")
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "No route for /api/v1.0/2017-08-01/2017-08-23/extra"})
    );
}
