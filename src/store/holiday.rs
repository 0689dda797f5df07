use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use sqlx::MySqlPool;

use crate::model::holiday::Holiday;

/// Holidays are global and change rarely, so whole years are cached.
#[derive(Clone)]
pub struct HolidayCache {
    years: Cache<i32, Arc<Vec<Holiday>>>,
}

impl HolidayCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            years: Cache::builder()
                .max_capacity(32)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached holidays of `year`, running `load` only on a miss. Concurrent
    /// misses for the same year share one load.
    pub async fn get_or_load<F>(&self, year: i32, load: F) -> Result<Arc<Vec<Holiday>>, Arc<sqlx::Error>>
    where
        F: Future<Output = Result<Vec<Holiday>, sqlx::Error>>,
    {
        self.years
            .try_get_with(year, async move { load.await.map(Arc::new) })
            .await
    }

    pub async fn invalidate(&self, year: i32) {
        self.years.invalidate(&year).await;
    }
}

/// Holidays of `year`, through the cache.
pub async fn for_year(
    pool: &MySqlPool,
    cache: &HolidayCache,
    year: i32,
) -> Result<Arc<Vec<Holiday>>, Arc<sqlx::Error>> {
    cache.get_or_load(year, load_year(pool, year)).await
}

async fn load_year(pool: &MySqlPool, year: i32) -> Result<Vec<Holiday>, sqlx::Error> {
    sqlx::query_as::<_, Holiday>(
        r#"
        SELECT id, DATE_FORMAT(date, '%Y-%m-%d') AS date, name
        FROM holidays
        WHERE YEAR(date) = ?
        ORDER BY date, id
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &MySqlPool, date: NaiveDate, name: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO holidays (date, name) VALUES (?, ?)")
        .bind(date)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_id())
}

/// Loads the given years into the cache ahead of the first request.
pub async fn warmup_holiday_cache(
    pool: &MySqlPool,
    cache: &HolidayCache,
    years: &[i32],
) -> anyhow::Result<()> {
    let mut total = 0usize;
    for &year in years {
        let holidays = for_year(pool, cache, year)
            .await
            .map_err(|e| anyhow::anyhow!("Holiday load for {} failed: {}", year, e))?;
        total += holidays.len();
    }

    log::info!(
        "Holiday cache warmup complete: {} holidays across {} years",
        total,
        years.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn holiday(date: &str, name: &str) -> Holiday {
        Holiday {
            id: 1,
            date: date.into(),
            name: name.into(),
        }
    }

    #[actix_web::test]
    async fn second_lookup_is_served_from_cache() {
        let cache = HolidayCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_load(2024, async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![holiday("2024-03-25", "Holi")])
                })
                .await
                .unwrap();
            assert_eq!(got.len(), 1);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn failed_load_is_not_cached() {
        let cache = HolidayCache::new(Duration::from_secs(60));

        let failed = cache
            .get_or_load(2024, async { Err(sqlx::Error::PoolTimedOut) })
            .await;
        assert!(failed.is_err());

        let ok = cache
            .get_or_load(2024, async { Ok(vec![holiday("2024-01-26", "Republic Day")]) })
            .await
            .unwrap();
        assert_eq!(ok[0].name, "Republic Day");
    }

    #[actix_web::test]
    async fn invalidate_forces_reload() {
        let cache = HolidayCache::new(Duration::from_secs(60));
        cache
            .get_or_load(2024, async { Ok(Vec::new()) })
            .await
            .unwrap();

        cache.invalidate(2024).await;

        let reloaded = cache
            .get_or_load(2024, async { Ok(vec![holiday("2024-08-15", "Independence Day")]) })
            .await
            .unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[actix_web::test]
    async fn years_are_cached_independently() {
        let cache = HolidayCache::new(Duration::from_secs(60));
        cache
            .get_or_load(2024, async { Ok(vec![holiday("2024-12-25", "Christmas")]) })
            .await
            .unwrap();
        let other = cache
            .get_or_load(2025, async { Ok(Vec::new()) })
            .await
            .unwrap();
        assert!(other.is_empty());
    }
}
