//! Integration tests against a live Redis on localhost:6379.
//!
//! Ignored by default so the suite passes without a server; run with
//! `cargo test -- --ignored` when one is available. Keys are namespaced
//! per test and deleted up front, so reruns start clean.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stashkit_redis::{
    create_pool, CacheAsideLookup, CacheConfig, CacheError, CacheResult, EntitySource, RedisCache,
};

fn cache() -> Arc<RedisCache> {
    let pool = create_pool(&CacheConfig::default()).expect("pool construction");
    Arc::new(RedisCache::new(pool))
}

#[tokio::test]
#[ignore]
async fn exists_set_del_ladder() {
    let cache = cache();
    let key = "it:ladder";
    cache.del(&[key]).await;

    assert_eq!(cache.exists(key).await, 0);
    assert_eq!(cache.set_string(key, "v").await, 0);
    assert_eq!(cache.exists(key).await, 1);
    assert_eq!(cache.get_string(key).await.as_deref(), Some("v"));
    assert_eq!(cache.del(&[key]).await, 1);
    assert_eq!(cache.exists(key).await, 0);
}

#[tokio::test]
#[ignore]
async fn ttl_ladder() {
    let cache = cache();
    let key = "it:ttl";
    cache.del(&[key]).await;

    assert_eq!(cache.ttl(key).await, -2);

    cache.set_string(key, "v").await;
    assert_eq!(cache.ttl(key).await, -1);

    assert_eq!(cache.expire(key, 120).await, 1);
    let remaining = cache.ttl(key).await;
    assert!(remaining > 0 && remaining <= 120);

    assert_eq!(cache.persist(key).await, 1);
    assert_eq!(cache.ttl(key).await, -1);

    cache.del(&[key]).await;
}

#[tokio::test]
#[ignore]
async fn get_long_defaults() {
    let cache = cache();
    let key = "it:long";
    cache.del(&[key]).await;

    assert_eq!(cache.get_long(key).await, 0);
    assert_eq!(cache.get_long_or(key, 7, -1).await, 7);

    cache.set_long(key, 42).await;
    assert_eq!(cache.get_long(key).await, 42);
    assert_eq!(cache.get_long_or(key, 7, -1).await, 42);

    // An empty stored string counts as absent, not a parse failure.
    cache.set_string(key, "").await;
    assert_eq!(cache.get_long_or(key, 7, -1).await, 7);

    // A non-numeric stored value is the failure case.
    cache.set_string(key, "not-a-number").await;
    assert_eq!(cache.get_long_or(key, 7, -1).await, -1);
    assert!(cache.try_get_long(key).await.is_err());

    cache.del(&[key]).await;
}

#[tokio::test]
#[ignore]
async fn mget_preserves_request_order() {
    let cache = cache();
    cache.del(&["it:mget:a", "it:mget:b", "it:mget:c"]).await;

    cache.set_string("it:mget:a", "1").await;
    cache.set_string("it:mget:c", "3").await;

    let results = cache
        .mget_string(&["it:mget:a", "it:mget:b", "it:mget:c"])
        .await
        .expect("mget succeeds");
    assert_eq!(
        results,
        vec![
            ("it:mget:a".to_string(), Some("1".to_string())),
            ("it:mget:b".to_string(), None),
            ("it:mget:c".to_string(), Some("3".to_string())),
        ]
    );

    assert!(cache.mget_string(&[]).await.is_none());

    cache.del(&["it:mget:a", "it:mget:c"]).await;
}

#[tokio::test]
#[ignore]
async fn zrange_orders_by_score() {
    let cache = cache();
    let key = "it:zset";
    cache.del(&[key]).await;

    cache
        .zadd_multi(key, &[("c", 3.0), ("a", 1.0), ("b", 2.0)])
        .await;

    assert_eq!(
        cache.zrange(key, 0, -1).await.unwrap(),
        vec!["a", "b", "c"]
    );
    assert_eq!(
        cache.zrange_with_double_score(key, 0, -1).await.unwrap(),
        vec![
            ("a".to_string(), 1.0),
            ("b".to_string(), 2.0),
            ("c".to_string(), 3.0),
        ]
    );
    assert_eq!(
        cache.zrevrange(key, 0, -1).await.unwrap(),
        vec!["c", "b", "a"]
    );

    assert_eq!(cache.zrank(key, "b").await, 1);
    assert_eq!(cache.zrank(key, "missing").await, -1);
    assert_eq!(cache.zscore_double(key, "c").await, 3.0);
    assert_eq!(cache.zscore_double(key, "missing").await, -1.0);

    cache.del(&[key]).await;
}

#[tokio::test]
#[ignore]
async fn concurrent_incr_is_lost_update_free() {
    let cache = cache();
    let key = "it:counter";
    cache.del(&[key]).await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for _ in 0..25 {
                    cache.try_incr(key).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(cache.get_long(key).await, 200);
    cache.del(&[key]).await;
}

#[tokio::test]
#[ignore]
async fn get_string_ex_refreshes_ttl() {
    let cache = cache();
    let key = "it:getex";
    cache.del(&[key]).await;

    cache.set_string(key, "v").await;
    assert_eq!(cache.ttl(key).await, -1);

    assert_eq!(
        cache.get_string_ex(key, 300).await.as_deref(),
        Some("v")
    );
    let remaining = cache.ttl(key).await;
    assert!(remaining > 0 && remaining <= 300);

    cache.del(&[key]).await;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    id: String,
    balance: i64,
}

struct CountingSource {
    fetches: AtomicUsize,
}

#[async_trait]
impl EntitySource<Account> for CountingSource {
    async fn fetch(&self, id: &str) -> CacheResult<Option<Account>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if id == "acct-1" {
            Ok(Some(Account {
                id: id.to_string(),
                balance: 250,
            }))
        } else {
            Ok(None)
        }
    }
}

#[tokio::test]
#[ignore]
async fn cache_aside_populates_then_hits() {
    let cache = cache();
    let lookup = CacheAsideLookup::new(Arc::clone(&cache), "it:account");
    cache.del(&[lookup.key_for("acct-1").as_str()]).await;

    let source = CountingSource {
        fetches: AtomicUsize::new(0),
    };

    // First read misses and populates.
    let first = lookup.lookup(&source, "acct-1").await.unwrap();
    assert_eq!(first.balance, 250);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    // The populated entry carries roughly the 24h default TTL.
    let ttl = cache.ttl(&lookup.key_for("acct-1")).await;
    assert!(ttl > 86_000 && ttl <= 86_400);

    // Second read hits without touching the source.
    let second: Account = lookup.lookup(&source, "acct-1").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    // An entity the source does not know is a hard error.
    let err = lookup
        .lookup::<Account, _>(&source, "acct-9")
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::EntityNotFound(_)));

    cache.del(&[lookup.key_for("acct-1").as_str()]).await;
}

#[tokio::test]
#[ignore]
async fn integer_list_accessor_defaults() {
    let cache = cache();
    let key = "it:longlist";
    cache.del(&[key]).await;

    // Absent key: fixed forms default to 0, the tail pop and lindex
    // explicit forms surface the caller default, the head pop keeps 0.
    assert_eq!(cache.lindex_long(key, 0).await, 0);
    assert_eq!(cache.lindex_long_or(key, 0, 7).await, 7);
    assert_eq!(cache.rpop_long(key).await, 0);
    assert_eq!(cache.rpop_long_or(key, 7).await, 7);
    assert_eq!(cache.lpop_long_or(key, 7).await, 0);

    cache.rpush_long(key, &[5]).await;
    assert_eq!(cache.lindex_long_or(key, 0, 7).await, 5);
    assert_eq!(cache.lindex_long_or(key, 9, 7).await, 7);
    assert_eq!(cache.rpop_long_or(key, 7).await, 5);

    cache.del(&[key]).await;
}

#[tokio::test]
#[ignore]
async fn hget_long_or_keeps_zero_for_absent_field() {
    let cache = cache();
    let key = "it:longhash";
    cache.del(&[key]).await;

    assert_eq!(cache.hget_long_or(key, "missing", 99).await, 0);

    cache.hset_long(key, "present", 41).await;
    assert_eq!(cache.hget_long_or(key, "present", 99).await, 41);

    cache.del(&[key]).await;
}
