use crate::dates::{format_date, parse_date, trailing_year_start, DateRange};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{collections::BTreeMap, path::Path, time::Duration};
use time::Date;
use utoipa::ToSchema;

/// Tables the service reads. It never creates or alters them. Views are not
/// accepted since the queries read `rowid` order.
const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Dataset is missing table: {0}")]
    MissingTable(String),
    #[error("Dataset contains a malformed date: {0}")]
    InvalidStoredDate(String),
}

/// Read-only queries over the station/measurement dataset.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Precipitation for every measurement in the year before the latest observation.
    async fn precipitation_last_year(&self) -> Result<Option<Precipitation>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Temperature observations for one station over the year before its own
    /// latest observation.
    async fn station_temperatures(
        &self,
        station: &str,
    ) -> Result<Option<StationTemperatures>, Error>;
    /// Station with the most measurement rows, ties broken by identifier.
    async fn most_active_station(&self) -> Result<Option<String>, Error>;
    async fn temperature_stats(&self, range: &DateRange)
        -> Result<Option<TemperatureStats>, Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Daily values keyed by `YYYY-MM-DD`. When several rows share a date the
/// last one read wins.
pub type DailyValues = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Precipitation {
    pub start: Date,
    pub latest: Date,
    pub values: DailyValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationTemperatures {
    pub station: String,
    pub start: Date,
    pub latest: Date,
    pub values: DailyValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Open the dataset read-only and verify it has the expected tables.
    pub async fn open(path: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(Path::new(path))
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let access = Self::from_pool(pool);
        access.health_check().await?;
        info!("sqlite dataset opened read-only at: {}", path);

        Ok(access)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check connectivity and that the station and measurement tables exist.
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        for table in REQUIRED_TABLES {
            let found: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
            if found == 0 {
                return Err(Error::MissingTable(table.to_string()));
            }
        }

        Ok(())
    }

    /// Drain the pool; called once the server has stopped accepting requests.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("sqlite dataset closed");
    }

    async fn latest_date(&self, station: Option<&str>) -> Result<Option<Date>, Error> {
        let latest: Option<String> = match station {
            Some(station) => {
                sqlx::query_scalar("SELECT MAX(date) FROM measurement WHERE station = ?")
                    .bind(station)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT MAX(date) FROM measurement")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        latest
            .map(|raw| parse_date(&raw).ok_or(Error::InvalidStoredDate(raw)))
            .transpose()
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation_last_year(&self) -> Result<Option<Precipitation>, Error> {
        let Some(latest) = self.latest_date(None).await? else {
            return Ok(None);
        };
        let start = trailing_year_start(latest);
        debug!(
            "precipitation window {} to {}",
            format_date(start),
            format_date(latest)
        );

        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT date, CAST(prcp AS REAL) FROM measurement
             WHERE date >= ?
             ORDER BY rowid",
        )
        .bind(format_date(start))
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Precipitation {
            start,
            latest,
            values: rows.into_iter().collect(),
        }))
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        // first row wins when an identifier is repeated
        let rows: Vec<(
            String,
            Option<String>,
            Option<f64>,
            Option<f64>,
            Option<f64>,
        )> = sqlx::query_as(
            "SELECT station,
                    name,
                    CAST(latitude AS REAL) AS latitude,
                    CAST(longitude AS REAL) AS longitude,
                    CAST(elevation AS REAL) AS elevation
             FROM station
             WHERE rowid IN (SELECT MIN(rowid) FROM station GROUP BY station)
             ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(station, name, latitude, longitude, elevation)| Station {
                    station,
                    name,
                    latitude,
                    longitude,
                    elevation,
                },
            )
            .collect())
    }

    async fn station_temperatures(
        &self,
        station: &str,
    ) -> Result<Option<StationTemperatures>, Error> {
        let Some(latest) = self.latest_date(Some(station)).await? else {
            return Ok(None);
        };
        let start = trailing_year_start(latest);
        debug!(
            "tobs window for {} is {} to {}",
            station,
            format_date(start),
            format_date(latest)
        );

        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            "SELECT m.date, CAST(m.tobs AS REAL)
             FROM measurement m
             JOIN station s ON m.station = s.station
             WHERE s.station = ? AND m.date >= ?
             ORDER BY m.rowid",
        )
        .bind(station)
        .bind(format_date(start))
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(StationTemperatures {
            station: station.to_string(),
            start,
            latest,
            values: rows.into_iter().collect(),
        }))
    }

    async fn most_active_station(&self) -> Result<Option<String>, Error> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(station)
    }

    async fn temperature_stats(
        &self,
        range: &DateRange,
    ) -> Result<Option<TemperatureStats>, Error> {
        let end_filter = if range.end.is_some() {
            "AND date <= ?"
        } else {
            ""
        };
        let query_sql = format!(
            "SELECT CAST(MIN(tobs) AS REAL), CAST(MAX(tobs) AS REAL), CAST(AVG(tobs) AS REAL)
             FROM measurement
             WHERE date >= ? {}",
            end_filter
        );

        let mut query = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(&query_sql)
            .bind(range.start_str());
        if let Some(end) = range.end_str() {
            query = query.bind(end);
        }
        let row = query.fetch_one(&self.pool).await?;

        Ok(match row {
            (Some(min), Some(max), Some(avg)) => Some(TemperatureStats { min, max, avg }),
            _ => None,
        })
    }
}
