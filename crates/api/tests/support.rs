#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use flashback_core::Clock;
use flashback_domain::{Card, Config, DatabaseConfig, SchedulerConfig};
use flashback_infra::ThreadSafeRandom;
use flashback_lib::context::AppContext;
use tempfile::TempDir;

/// Context under test plus the directory holding its database.
pub struct TestContext {
    pub ctx: AppContext,
    _temp_dir: TempDir,
}

impl std::ops::Deref for TestContext {
    type Target = AppContext;

    fn deref(&self) -> &AppContext {
        &self.ctx
    }
}

/// Clock frozen at one instant.
pub struct FrozenClock(pub DateTime<FixedOffset>);

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// 2017-06-01T12:00:00Z
pub fn noon() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("valid offset")
        .with_ymd_and_hms(2017, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            path: temp_dir.path().join("flashback.db").to_string_lossy().to_string(),
            pool_size: 4,
        },
        scheduler: SchedulerConfig::default(),
        ..Config::default()
    }
}

/// Fresh context over an empty database with a seeded random source and a
/// clock frozen at [`noon`].
pub async fn setup_test_context() -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let ctx = AppContext::new_with_services(
        test_config(&temp_dir),
        Arc::new(ThreadSafeRandom::seeded(7)),
        Arc::new(FrozenClock(noon())),
    )
    .await
    .expect("context should start");

    TestContext { ctx, _temp_dir: temp_dir }
}

/// Never-reviewed card created `age_days` before [`noon`].
pub fn new_card(id: &str, age_days: i64) -> Card {
    let now = noon().with_timezone(&Utc);
    Card::new(id.parse().expect("valid id"), "theme-Zm9v/0", now - Duration::days(age_days))
}

impl TestContext {
    pub async fn seed(&self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            let doc = card.to_document().expect("card encodes");
            self.store.put(card.id.as_str(), doc, None).await.expect("seed write succeeds");
        }
    }

    pub async fn card(&self, id: &str) -> Card {
        Card::from_document(self.store.get(id).await.expect("document exists"))
            .expect("document decodes")
    }

    /// Record a review of `id` at [`noon`] with the given new interval.
    pub async fn grade(&self, id: &str, interval_days: i64) {
        let now = noon().with_timezone(&Utc);
        let mut card = self.card(id).await;
        card.review_count += 1;
        card.interval = Some(flashback_domain::Interval::days(interval_days));
        card.last_review = Some(now);
        card.due = Some(now + Duration::days(interval_days));
        card.modified = now;
        let rev = card.rev.take();
        self.store
            .put(id, card.to_document().expect("card encodes"), rev.as_deref())
            .await
            .expect("grade write succeeds");
    }
}
