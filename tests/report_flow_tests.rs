//! End-to-end report flow: seed CSVs into the repository, trigger a run,
//! poll it to completion, and check the rendered CSV.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;

use store_monitor::db::repository::{FullRepository, ReportRepository};
use store_monitor::db::{LocalRepository, SeedConfig, SeedLoader};
use store_monitor::models::time::{parse_timestamp, ReportClock};
use store_monitor::models::ReportStatus;
use store_monitor::services::report::{render_report_csv, trigger_report, CSV_HEADER};

const STATUS_CSV: &str = "\
store_id,status,timestamp_utc
store-a,active,2023-01-25 10:10:00.000000 UTC
store-a,inactive,2023-01-25 10:30:00.000000 UTC
store-a,active,2023-01-25 10:50:00.000000 UTC
store-b,active,2023-01-24 09:00:00.000000 UTC
store-b,active,2023-01-25 09:30:00.000000 UTC
";

const TIMEZONE_CSV: &str = "\
store_id,timezone_str
store-a,UTC
store-b,America/Chicago
";

const HOURS_CSV: &str = "\
store_id,day,start_time_local,end_time_local
store-a,2,09:00:00,18:00:00
";

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

async fn seeded_repository() -> LocalRepository {
    let status = csv_file(STATUS_CSV);
    let timezone = csv_file(TIMEZONE_CSV);
    let hours = csv_file(HOURS_CSV);

    let config = SeedConfig {
        status_path: status.path().to_string_lossy().into_owned(),
        timezone_path: timezone.path().to_string_lossy().into_owned(),
        hours_path: hours.path().to_string_lossy().into_owned(),
    };

    let repo = LocalRepository::new();
    SeedLoader::new(config).migrate(&repo).await.unwrap();
    repo
}

/// Reference "now": Wednesday 2023-01-25 11:00:00 UTC.
fn fixed_clock() -> ReportClock {
    ReportClock::Fixed(parse_timestamp("2023-01-25 11:00:00.000000").unwrap())
}

#[tokio::test]
async fn test_trigger_poll_and_render() {
    let repo = seeded_repository().await;
    let shared: Arc<dyn FullRepository> = Arc::new(repo.clone());

    let report_id = trigger_report(Arc::clone(&shared), fixed_clock())
        .await
        .unwrap();
    assert_eq!(report_id.len(), 8);

    // The record is visible (and possibly still in progress) right away.
    let record = repo.get_report(&report_id).await.unwrap().unwrap();
    assert!(matches!(
        record.status,
        ReportStatus::Progress | ReportStatus::Complete
    ));

    // Poll until the background run completes.
    let mut completed = None;
    for _ in 0..200 {
        let current = repo.get_report(&report_id).await.unwrap().unwrap();
        if current.is_complete() {
            completed = Some(current);
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let record = completed.expect("report never completed");

    // One row per store, in first-seen store order.
    assert_eq!(record.data.len(), 2);
    assert_eq!(record.data[0].store_id, "store-a");
    assert_eq!(record.data[1].store_id, "store-b");

    // store-a: three observations in the trailing hour, all inside the
    // Wednesday window, two of them active.
    let row_a = &record.data[0];
    assert_eq!(row_a.uptime_last_hour, 40.0);
    assert_eq!(row_a.downtime_last_hour, 20.0);

    // Every figure is non-negative and within its window's bounds.
    for row in &record.data {
        for (value, bound) in [
            (row.uptime_last_hour, 60.0),
            (row.downtime_last_hour, 60.0),
            (row.uptime_last_day, 24.0),
            (row.downtime_last_day, 24.0),
            (row.uptime_last_week, 168.0),
            (row.downtime_last_week, 168.0),
        ] {
            assert!(value >= 0.0);
            assert!(value <= bound);
        }
    }

    // The rendered CSV parses back to the same figures.
    let rendered = render_report_csv(&record.data).unwrap();
    let mut reader = csv::Reader::from_reader(rendered.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        CSV_HEADER.to_vec()
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "store-a");
    assert_eq!(rows[0][1].parse::<f64>().unwrap(), row_a.uptime_last_hour);
    assert_eq!(rows[0][4].parse::<f64>().unwrap(), row_a.downtime_last_hour);
}

#[tokio::test]
async fn test_unknown_report_id_is_absent() {
    let repo = seeded_repository().await;
    assert!(repo.get_report("00000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let repo = seeded_repository().await;
    let shared: Arc<dyn FullRepository> = Arc::new(repo.clone());

    let first = trigger_report(Arc::clone(&shared), fixed_clock())
        .await
        .unwrap();
    let second = trigger_report(Arc::clone(&shared), fixed_clock())
        .await
        .unwrap();
    assert_ne!(first, second);

    for report_id in [&first, &second] {
        let mut done = false;
        for _ in 0..200 {
            if repo
                .get_report(report_id)
                .await
                .unwrap()
                .unwrap()
                .is_complete()
            {
                done = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(done, "report {} never completed", report_id);
    }
}
