use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, Result};
use crate::events::{MockPortfolioEventSink, PortfolioEvent};
use crate::holdings::{HoldingsFilter, HoldingsQuery, RawHolding, Sector};
use crate::repository::{PortfolioRepositoryTrait, PortfolioSnapshot, StaticPortfolioRepository};
use crate::summary::{AdvisoryProfile, RiskLevel};
use crate::test_support::{raw, symbols};
use crate::views::{ViewMode, ViewParams};

/// Repository whose contents the test can swap between loads.
#[derive(Default)]
struct SwappableRepository {
    holdings: Mutex<Option<Vec<RawHolding>>>,
    loads: AtomicUsize,
}

impl SwappableRepository {
    fn with(holdings: Vec<RawHolding>) -> Arc<Self> {
        Arc::new(Self {
            holdings: Mutex::new(Some(holdings)),
            loads: AtomicUsize::new(0),
        })
    }

    fn set(&self, holdings: Option<Vec<RawHolding>>) {
        *self.holdings.lock().unwrap() = holdings;
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for SwappableRepository {
    async fn load_snapshot(&self) -> Result<PortfolioSnapshot> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.holdings.lock().unwrap().clone() {
            Some(holdings) => Ok(PortfolioSnapshot {
                source: "swappable".to_string(),
                holdings,
                ..PortfolioSnapshot::default()
            }),
            None => Err(Error::Repository("source offline".to_string())),
        }
    }

    fn source_name(&self) -> String {
        "swappable".to_string()
    }
}

fn two_raw() -> Vec<RawHolding> {
    vec![
        raw("A", 10, dec!(100), dec!(110), "Technology"),
        raw("B", 5, dec!(200), dec!(180), "Banking"),
    ]
}

fn build_service(repo: Arc<SwappableRepository>) -> (PortfolioService, MockPortfolioEventSink) {
    let sink = MockPortfolioEventSink::new();
    let service = PortfolioService::new(repo, Arc::new(sink.clone()));
    (service, sink)
}

#[tokio::test]
async fn snapshot_is_loaded_once_and_cached() {
    let repo = SwappableRepository::with(two_raw());
    let (service, sink) = build_service(repo.clone());

    assert_eq!(service.current_source().await, None);
    service.get_summary().await.unwrap();
    service.get_allocations().await.unwrap();
    service.get_holdings(&HoldingsQuery::default()).await.unwrap();

    assert_eq!(repo.loads(), 1);
    assert_eq!(service.current_source().await.as_deref(), Some("swappable"));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn summary_and_holdings_reflect_snapshot() {
    let (service, _) = build_service(SwappableRepository::with(two_raw()));

    let summary = service.get_summary().await.unwrap();
    assert_eq!(summary.total_value, dec!(2000));
    assert_eq!(summary.total_invested, dec!(2000));
    assert_eq!(summary.total_gain_loss, Decimal::ZERO);
    assert_eq!(summary.number_of_holdings, 2);

    let query = HoldingsQuery {
        filter: HoldingsFilter::by_sector(Sector::Banking),
        ..HoldingsQuery::default()
    };
    let holdings = service.get_holdings(&query).await.unwrap();
    assert_eq!(symbols(&holdings), vec!["B"]);

    let ranking = service.get_top_performers(5).await.unwrap();
    assert_eq!(symbols(&ranking.top), vec!["A"]);
    assert_eq!(symbols(&ranking.bottom), vec!["B"]);

    assert_eq!(
        service.get_sectors().await.unwrap(),
        vec![Sector::Banking, Sector::Technology]
    );
}

#[tokio::test]
async fn highlights_fail_on_empty_portfolio() {
    let (service, _) = build_service(SwappableRepository::with(vec![]));

    assert!(matches!(
        service.get_highlights().await.unwrap_err(),
        Error::EmptyPortfolio(_)
    ));
    let summary = service.get_summary().await.unwrap();
    assert_eq!(summary.total_value, Decimal::ZERO);
}

#[tokio::test]
async fn invalid_snapshot_is_rejected_at_load() {
    let repo = SwappableRepository::with(vec![raw("X", 1, dec!(0), dec!(10), "Energy")]);
    let (service, _) = build_service(repo);

    assert!(matches!(
        service.get_summary().await.unwrap_err(),
        Error::InvalidHolding { .. }
    ));
    assert_eq!(service.current_source().await, None);
}

#[tokio::test]
async fn snapshot_with_overflowing_totals_is_rejected_at_load() {
    let price = (Decimal::MAX / dec!(1.5)).trunc();
    let repo = SwappableRepository::with(vec![
        raw("A", 1, price, price, "Energy"),
        raw("B", 1, price, price, "Banking"),
    ]);
    let (service, _) = build_service(repo.clone());

    assert!(matches!(
        service.get_allocations().await.unwrap_err(),
        Error::InvalidHolding { ref symbol, .. } if symbol == "B"
    ));
    assert_eq!(service.current_source().await, None);

    repo.set(Some(two_raw()));
    assert_eq!(service.get_summary().await.unwrap().number_of_holdings, 2);
}

#[tokio::test]
async fn reload_replaces_cache_and_emits_event() {
    let repo = SwappableRepository::with(two_raw());
    let (service, sink) = build_service(repo.clone());
    service.get_summary().await.unwrap();

    let mut holdings = two_raw();
    holdings.push(raw("C", 1, dec!(50), dec!(50), "Energy"));
    repo.set(Some(holdings));

    assert_eq!(service.reload().await.unwrap(), 3);
    assert_eq!(service.get_summary().await.unwrap().number_of_holdings, 3);
    assert_eq!(repo.loads(), 2);
    assert_eq!(
        sink.events(),
        vec![PortfolioEvent::snapshot_reloaded("swappable", 3)]
    );
}

#[tokio::test]
async fn failed_reload_keeps_previous_snapshot() {
    let repo = SwappableRepository::with(two_raw());
    let (service, sink) = build_service(repo.clone());
    service.get_summary().await.unwrap();

    repo.set(None);
    let err = service.reload().await.unwrap_err();

    assert!(matches!(err, Error::Repository(_)));
    assert_eq!(service.get_summary().await.unwrap().number_of_holdings, 2);
    assert_eq!(
        sink.events(),
        vec![PortfolioEvent::reload_failed(
            "Repository error: source offline"
        )]
    );
}

#[tokio::test]
async fn advisory_override_replaces_repository_profile() {
    let advisory = AdvisoryProfile {
        diversification_score: dec!(6.4),
        risk_level: RiskLevel::High,
    };
    let service = PortfolioService::new(
        Arc::new(StaticPortfolioRepository::new()),
        Arc::new(MockPortfolioEventSink::new()),
    )
    .with_advisory(advisory);

    let summary = service.get_summary().await.unwrap();

    assert_eq!(summary.diversification_score, dec!(6.4));
    assert_eq!(summary.risk_level, RiskLevel::High);
}

#[tokio::test]
async fn view_and_performance_use_the_cached_snapshot() {
    let service = PortfolioService::new(
        Arc::new(StaticPortfolioRepository::new()),
        Arc::new(MockPortfolioEventSink::new()),
    );

    let view = service
        .get_view(&ViewParams::for_mode(ViewMode::Complete))
        .await
        .unwrap();
    let performance = service.get_performance().await.unwrap();

    assert_eq!(view.performance, Some(performance));
    assert_eq!(view.holdings.map(|h| h.len()), Some(15));
}
