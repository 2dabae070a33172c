//! Full comparison runs over HTTP against a loopback server.

mod support;

use std::time::Duration;

use rust_decimal_macros::dec;

use fxcompare::app::{CompareService, Config};
use fxcompare::domain::{Analysis, IndeterminateReason, Side, SourceId};
use fxcompare::error::Error;
use support::fixtures::{
    cbr_daily, investing_legacy_page, investing_page, loopback_config, profinance_page,
};
use support::server::{Route, TestServer};
use support::source::pair;

const FEED: &str = "/scripts/XML_daily.asp";

/// Every provider answering, with `usd_cny` as the Investing USD/CNY quote.
fn healthy_routes(usd_cny: &str) -> Vec<(&'static str, Route)> {
    vec![
        (FEED, Route::xml(cbr_daily("93,2000", "129,5000"))),
        ("/currencies/usd-rub", Route::html(investing_page("93.44"))),
        ("/currencies/cny-rub", Route::html(investing_page("12.97"))),
        ("/currencies/usd-cny", Route::html(investing_page(usd_cny))),
        ("/chart/usdrub/", Route::html(profinance_page("93,5000"))),
        ("/chart/cnyrub/", Route::html(profinance_page("12,9800"))),
    ]
}

async fn service_for(server: &TestServer) -> CompareService {
    let config = Config::parse(&loopback_config(&server.url(""), "")).unwrap();
    CompareService::from_config(&config).unwrap()
}

#[tokio::test]
async fn small_gap_is_reported_without_signal() {
    let server = TestServer::start(healthy_routes("7.21")).await;
    let service = service_for(&server).await;

    let report = service.compare().await.unwrap();

    let usd_rub = &report.sections()[0];
    assert_eq!(usd_rub.pair, pair("USD/RUB"));
    let values: Vec<_> = usd_rub.quotes.iter().map(|q| (q.source, q.value)).collect();
    assert_eq!(
        values,
        vec![
            (SourceId::CentralBank, Some(dec!(93.2))),
            (SourceId::Investing, Some(dec!(93.44))),
            (SourceId::Profinance, Some(dec!(93.5))),
        ]
    );

    let cny_rub = &report.sections()[1];
    assert_eq!(cny_rub.quotes[0].value, Some(dec!(12.95)));

    assert_eq!(report.cross().value(), Some(dec!(93.5137)));
    let verdict = report.analysis().verdict().unwrap();
    assert_eq!(verdict.delta, dec!(0.0737));
    assert!(!verdict.threshold_exceeded);
    assert!(report.opportunity().is_none());
}

#[tokio::test]
async fn wide_gap_raises_signal() {
    let server = TestServer::start(healthy_routes("13.10")).await;
    let service = service_for(&server).await;

    let report = service.compare().await.unwrap();

    assert_eq!(report.cross().value(), Some(dec!(169.907)));
    let verdict = report.opportunity().expect("signal expected");
    assert_eq!(verdict.delta, dec!(76.467));
    assert_eq!(verdict.buy, Side::Direct);
    assert_eq!(verdict.sell, Side::Cross);
}

#[tokio::test]
async fn blocked_page_shows_as_missing_value() {
    let mut routes = healthy_routes("7.21");
    routes.retain(|(path, _)| *path != "/chart/usdrub/");
    routes.push(("/chart/usdrub/", Route::status(403)));
    let server = TestServer::start(routes).await;
    let service = service_for(&server).await;

    let report = service.compare().await.unwrap();

    let profinance = report.sections()[0]
        .quotes
        .iter()
        .find(|q| q.source == SourceId::Profinance)
        .unwrap();
    assert_eq!(profinance.value, None);
    assert!(report.analysis().verdict().is_some());
    assert_eq!(report.reading_counts(), (6, 1));
}

#[tokio::test]
async fn redesigned_page_falls_back_to_legacy_selector() {
    let mut routes = healthy_routes("7.21");
    routes.retain(|(path, _)| *path != "/currencies/usd-rub");
    routes.push(("/currencies/usd-rub", Route::html(investing_legacy_page("93.44"))));
    let server = TestServer::start(routes).await;
    let service = service_for(&server).await;

    let report = service.compare().await.unwrap();

    assert_eq!(report.direct().value(), Some(dec!(93.44)));
    assert_eq!(report.analysis().delta(), Some(dec!(0.0737)));
}

#[tokio::test]
async fn missing_leg_makes_analysis_indeterminate() {
    let mut routes = healthy_routes("7.21");
    routes.retain(|(path, _)| *path != "/currencies/usd-cny");
    let server = TestServer::start(routes).await;
    let service = service_for(&server).await;

    let report = service.compare().await.unwrap();

    assert_eq!(report.cross().value(), None);
    assert_eq!(
        *report.analysis(),
        Analysis::Indeterminate {
            reason: IndeterminateReason::MissingCross
        }
    );
}

#[tokio::test]
async fn feed_is_downloaded_once_per_run() {
    let server = TestServer::start(healthy_routes("7.21")).await;
    let service = service_for(&server).await;

    service.compare().await.unwrap();

    assert_eq!(server.hits(FEED), 1);
    assert_eq!(server.hits("/currencies/usd-rub"), 1);
}

#[tokio::test]
async fn requests_identify_as_browser() {
    let server = TestServer::start(healthy_routes("7.21")).await;
    let service = service_for(&server).await;

    service.compare().await.unwrap();

    let seen = server.seen();
    assert!(!seen.is_empty());
    for request in seen {
        let agent = request.user_agent.unwrap_or_default();
        assert!(agent.starts_with("Mozilla/5.0"), "unexpected agent {agent:?}");
    }
}

#[tokio::test]
async fn slow_page_times_out_alone() {
    let mut routes = healthy_routes("7.21");
    routes.retain(|(path, _)| *path != "/chart/cnyrub/");
    routes.push((
        "/chart/cnyrub/",
        Route::html(profinance_page("12,9800")).delayed(Duration::from_secs(10)),
    ));
    let server = TestServer::start(routes).await;
    let service = service_for(&server).await;

    let started = std::time::Instant::now();
    let report = service.compare().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(8));
    let slow = report.sections()[1]
        .quotes
        .iter()
        .find(|q| q.source == SourceId::Profinance)
        .unwrap();
    assert_eq!(slow.value, None);
    assert_eq!(report.analysis().delta(), Some(dec!(0.0737)));
}

#[tokio::test]
async fn disabled_source_is_left_out_of_report() {
    let server = TestServer::start(healthy_routes("7.21")).await;
    let mut config = Config::parse(&loopback_config(&server.url(""), "")).unwrap();
    config.sources.profinance.enabled = false;
    let service = CompareService::from_config(&config).unwrap();

    let report = service.compare().await.unwrap();

    assert!(report.sections()[0]
        .quotes
        .iter()
        .all(|q| q.source != SourceId::Profinance));
    assert_eq!(server.hits("/chart/usdrub/"), 0);
}

#[tokio::test]
async fn total_outage_is_an_error() {
    let server = TestServer::start(Vec::new()).await;
    let service = service_for(&server).await;

    let result = service.compare().await;

    assert!(matches!(result, Err(Error::AggregationFailed { attempted: 7 })));
}
