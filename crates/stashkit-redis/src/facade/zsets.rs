//! Sorted-set operations.
//!
//! Range reads come back as vectors so rank order survives; the
//! with-score forms pair each member with its score in that same order.
//! Integer-score forms truncate the store's double scores toward zero.

use super::{or_sentinel, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    // ---- member writes ------------------------------------------------

    /// Adds or updates one member, returning whether it was newly added.
    pub async fn try_zadd(&self, key: &str, member: &str, score: f64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.zadd(key, member, score).await?)
    }

    /// Adds or updates one member. Returns `1` when newly added, `0` when
    /// an existing member's score was updated, `-1` on failure.
    pub async fn zadd(&self, key: &str, member: &str, score: f64) -> i64 {
        let result = self.try_zadd(key, member, score).await.map(i64::from);
        or_sentinel("ZADD", key, result, -1)
    }

    /// Adds or updates several `(member, score)` pairs in one round-trip,
    /// returning the number newly added.
    pub async fn try_zadd_multi(&self, key: &str, pairs: &[(&str, f64)]) -> CacheResult<i64> {
        if pairs.is_empty() {
            return Ok(0);
        }
        let items: Vec<(f64, &str)> = pairs.iter().map(|(member, score)| (*score, *member)).collect();
        let mut conn = self.conn().await?;
        Ok(conn.zadd_multiple(key, &items).await?)
    }

    /// Batch member add. Returns the number newly added, `-1` on failure.
    pub async fn zadd_multi(&self, key: &str, pairs: &[(&str, f64)]) -> i64 {
        let result = self.try_zadd_multi(key, pairs).await;
        or_sentinel("ZADD", key, result, -1)
    }

    /// Adds or updates one integer member (stored as a decimal string).
    pub async fn try_zadd_long(&self, key: &str, member: i64, score: f64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.zadd(key, member, score).await?)
    }

    /// Adds or updates one integer member. Returns `1`/`0`/`-1`.
    pub async fn zadd_long(&self, key: &str, member: i64, score: f64) -> i64 {
        let result = self.try_zadd_long(key, member, score).await.map(i64::from);
        or_sentinel("ZADD", key, result, -1)
    }

    /// Adds or updates one typed member. Identity is the encoded bytes,
    /// so the serializer must be deterministic for equal values.
    pub async fn try_zadd_object<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        score: f64,
    ) -> CacheResult<bool> {
        let encoded = self.encode(member)?;
        let mut conn = self.conn().await?;
        Ok(conn.zadd(key, encoded, score).await?)
    }

    /// Adds or updates one typed member. Returns `1`/`0`/`-1`.
    pub async fn zadd_object<T: Serialize + ?Sized>(
        &self,
        key: &str,
        member: &T,
        score: f64,
    ) -> i64 {
        let result = self
            .try_zadd_object(key, member, score)
            .await
            .map(i64::from);
        or_sentinel("ZADD", key, result, -1)
    }

    // ---- cardinality and scores ---------------------------------------

    /// Counts a sorted set's members. An absent key counts `0`.
    pub async fn try_zcard(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.zcard(key).await?)
    }

    /// Counts members. Returns the count, `-1` on failure.
    pub async fn zcard(&self, key: &str) -> i64 {
        let result = self.try_zcard(key).await;
        or_sentinel("ZCARD", key, result, -1)
    }

    /// Counts members with scores in `[min, max]`.
    pub async fn try_zcount(&self, key: &str, min: f64, max: f64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.zcount(key, min, max).await?)
    }

    /// Counts members in a score range. Returns the count, `-1` on
    /// failure.
    pub async fn zcount(&self, key: &str, min: f64, max: f64) -> i64 {
        let result = self.try_zcount(key, min, max).await;
        or_sentinel("ZCOUNT", key, result, -1)
    }

    /// Increments a member's score by `delta`, returning the new score.
    /// A missing member is created at `delta`.
    pub async fn try_zincr_by(&self, key: &str, member: &str, delta: f64) -> CacheResult<f64> {
        let mut conn = self.conn().await?;
        Ok(conn.zincr(key, member, delta).await?)
    }

    /// Increments a member's score. Returns the new score, `-1.0` on
    /// failure.
    pub async fn zincr_by(&self, key: &str, member: &str, delta: f64) -> f64 {
        let result = self.try_zincr_by(key, member, delta).await;
        or_sentinel("ZINCRBY", key, result, -1.0)
    }

    /// Reads a member's score. An absent member is `Ok(None)`.
    pub async fn try_zscore(&self, key: &str, member: &str) -> CacheResult<Option<f64>> {
        let mut conn = self.conn().await?;
        Ok(conn.zscore(key, member).await?)
    }

    /// Reads a member's score. An absent member and any failure both map
    /// to `-1.0`.
    pub async fn zscore_double(&self, key: &str, member: &str) -> f64 {
        let result = self
            .try_zscore(key, member)
            .await
            .map(|score| score.unwrap_or(-1.0));
        or_sentinel("ZSCORE", key, result, -1.0)
    }

    /// Reads a member's score truncated toward zero. Absent and failure
    /// both map to `-1`.
    pub async fn zscore_long(&self, key: &str, member: &str) -> i64 {
        let result = self
            .try_zscore(key, member)
            .await
            .map(|score| score.map_or(-1, |s| s as i64));
        or_sentinel("ZSCORE", key, result, -1)
    }

    // ---- rank queries -------------------------------------------------

    /// Reads a member's ascending rank. An absent member is `Ok(None)`.
    pub async fn try_zrank(&self, key: &str, member: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrank(key, member).await?)
    }

    /// Reads ascending rank. Returns the rank, `-1` when the member is
    /// absent, `-2` on failure.
    pub async fn zrank(&self, key: &str, member: &str) -> i64 {
        let result = self
            .try_zrank(key, member)
            .await
            .map(|rank| rank.unwrap_or(-1));
        or_sentinel("ZRANK", key, result, -2)
    }

    /// Reads a member's descending rank. An absent member is `Ok(None)`.
    pub async fn try_zrevrank(&self, key: &str, member: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrank(key, member).await?)
    }

    /// Reads descending rank. Returns the rank, `-1` absent, `-2` on
    /// failure.
    pub async fn zrevrank(&self, key: &str, member: &str) -> i64 {
        let result = self
            .try_zrevrank(key, member)
            .await
            .map(|rank| rank.unwrap_or(-1));
        or_sentinel("ZREVRANK", key, result, -2)
    }

    // ---- rank ranges --------------------------------------------------

    /// Reads members between ranks `start` and `stop` inclusive, in
    /// ascending score order.
    pub async fn try_zrange(&self, key: &str, start: isize, stop: isize) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrange(key, start, stop).await?)
    }

    /// Ascending rank-range read. `None` on failure.
    pub async fn zrange(&self, key: &str, start: isize, stop: isize) -> Option<Vec<String>> {
        let result = self.try_zrange(key, start, stop).await.map(Some);
        or_sentinel("ZRANGE", key, result, None)
    }

    /// Ascending rank-range read of typed members.
    pub async fn try_zrange_object<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<T>> {
        let mut conn = self.conn().await?;
        let raw: Vec<Vec<u8>> = conn.zrange(key, start, stop).await?;
        self.decode_vec(raw)
    }

    /// Ascending typed rank-range read. `None` on failure.
    pub async fn zrange_object<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<T>> {
        let result = self.try_zrange_object(key, start, stop).await.map(Some);
        or_sentinel("ZRANGE", key, result, None)
    }

    /// Ascending rank-range read with scores, preserving rank order.
    pub async fn try_zrange_with_double_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrange_withscores(key, start, stop).await?)
    }

    /// Ascending rank-range read with double scores. `None` on failure.
    pub async fn zrange_with_double_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrange_with_double_score(key, start, stop)
            .await
            .map(Some);
        or_sentinel("ZRANGE", key, result, None)
    }

    /// Ascending rank-range read with scores truncated toward zero.
    pub async fn try_zrange_with_long_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<(String, i64)>> {
        let scored = self.try_zrange_with_double_score(key, start, stop).await?;
        Ok(truncate_scores(scored))
    }

    /// Ascending rank-range read with integer scores. `None` on failure.
    pub async fn zrange_with_long_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<(String, i64)>> {
        let result = self
            .try_zrange_with_long_score(key, start, stop)
            .await
            .map(Some);
        or_sentinel("ZRANGE", key, result, None)
    }

    /// Reads members between ranks `start` and `stop` inclusive, in
    /// descending score order.
    pub async fn try_zrevrange(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrange(key, start, stop).await?)
    }

    /// Descending rank-range read. `None` on failure.
    pub async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> Option<Vec<String>> {
        let result = self.try_zrevrange(key, start, stop).await.map(Some);
        or_sentinel("ZREVRANGE", key, result, None)
    }

    /// Descending rank-range read of typed members.
    pub async fn try_zrevrange_object<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<T>> {
        let mut conn = self.conn().await?;
        let raw: Vec<Vec<u8>> = conn.zrevrange(key, start, stop).await?;
        self.decode_vec(raw)
    }

    /// Descending typed rank-range read. `None` on failure.
    pub async fn zrevrange_object<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<T>> {
        let result = self.try_zrevrange_object(key, start, stop).await.map(Some);
        or_sentinel("ZREVRANGE", key, result, None)
    }

    /// Descending rank-range read with scores, preserving rank order.
    pub async fn try_zrevrange_with_double_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrange_withscores(key, start, stop).await?)
    }

    /// Descending rank-range read with double scores. `None` on failure.
    pub async fn zrevrange_with_double_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrevrange_with_double_score(key, start, stop)
            .await
            .map(Some);
        or_sentinel("ZREVRANGE", key, result, None)
    }

    /// Descending rank-range read with scores truncated toward zero.
    pub async fn try_zrevrange_with_long_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<(String, i64)>> {
        let scored = self
            .try_zrevrange_with_double_score(key, start, stop)
            .await?;
        Ok(truncate_scores(scored))
    }

    /// Descending rank-range read with integer scores. `None` on failure.
    pub async fn zrevrange_with_long_score(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<(String, i64)>> {
        let result = self
            .try_zrevrange_with_long_score(key, start, stop)
            .await
            .map(Some);
        or_sentinel("ZREVRANGE", key, result, None)
    }

    // ---- score ranges -------------------------------------------------

    /// Reads members with scores in `[min, max]`, ascending.
    pub async fn try_zrange_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrangebyscore(key, min, max).await?)
    }

    /// Ascending score-range read. `None` on failure.
    pub async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Option<Vec<String>> {
        let result = self.try_zrange_by_score(key, min, max).await.map(Some);
        or_sentinel("ZRANGEBYSCORE", key, result, None)
    }

    /// Ascending score-range read with an offset/count window.
    pub async fn try_zrange_by_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrangebyscore_limit(key, min, max, offset, count).await?)
    }

    /// Windowed ascending score-range read. `None` on failure.
    pub async fn zrange_by_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> Option<Vec<String>> {
        let result = self
            .try_zrange_by_score_limit(key, min, max, offset, count)
            .await
            .map(Some);
        or_sentinel("ZRANGEBYSCORE", key, result, None)
    }

    /// Ascending score-range read with scores.
    pub async fn try_zrange_by_score_with_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrangebyscore_withscores(key, min, max).await?)
    }

    /// Ascending score-range read with scores. `None` on failure.
    pub async fn zrange_by_score_with_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrange_by_score_with_score(key, min, max)
            .await
            .map(Some);
        or_sentinel("ZRANGEBYSCORE", key, result, None)
    }

    /// Ascending score-range read with scores and an offset/count window.
    pub async fn try_zrange_by_score_with_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn
            .zrangebyscore_limit_withscores(key, min, max, offset, count)
            .await?)
    }

    /// Windowed ascending score-range read with scores. `None` on
    /// failure.
    pub async fn zrange_by_score_with_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrange_by_score_with_score_limit(key, min, max, offset, count)
            .await
            .map(Some);
        or_sentinel("ZRANGEBYSCORE", key, result, None)
    }

    /// Reads members with scores in `[min, max]`, descending. Arguments
    /// are still `(min, max)`; the max-first wire order is handled here.
    pub async fn try_zrevrange_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrangebyscore(key, max, min).await?)
    }

    /// Descending score-range read. `None` on failure.
    pub async fn zrevrange_by_score(&self, key: &str, min: f64, max: f64) -> Option<Vec<String>> {
        let result = self.try_zrevrange_by_score(key, min, max).await.map(Some);
        or_sentinel("ZREVRANGEBYSCORE", key, result, None)
    }

    /// Descending score-range read with an offset/count window.
    pub async fn try_zrevrange_by_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn
            .zrevrangebyscore_limit(key, max, min, offset, count)
            .await?)
    }

    /// Windowed descending score-range read. `None` on failure.
    pub async fn zrevrange_by_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> Option<Vec<String>> {
        let result = self
            .try_zrevrange_by_score_limit(key, min, max, offset, count)
            .await
            .map(Some);
        or_sentinel("ZREVRANGEBYSCORE", key, result, None)
    }

    /// Descending score-range read with scores.
    pub async fn try_zrevrange_by_score_with_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrangebyscore_withscores(key, max, min).await?)
    }

    /// Descending score-range read with scores. `None` on failure.
    pub async fn zrevrange_by_score_with_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrevrange_by_score_with_score(key, min, max)
            .await
            .map(Some);
        or_sentinel("ZREVRANGEBYSCORE", key, result, None)
    }

    /// Descending score-range read with scores and an offset/count
    /// window.
    pub async fn try_zrevrange_by_score_with_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> CacheResult<Vec<(String, f64)>> {
        let mut conn = self.conn().await?;
        Ok(conn
            .zrevrangebyscore_limit_withscores(key, max, min, offset, count)
            .await?)
    }

    /// Windowed descending score-range read with scores. `None` on
    /// failure.
    pub async fn zrevrange_by_score_with_score_limit(
        &self,
        key: &str,
        min: f64,
        max: f64,
        offset: isize,
        count: isize,
    ) -> Option<Vec<(String, f64)>> {
        let result = self
            .try_zrevrange_by_score_with_score_limit(key, min, max, offset, count)
            .await
            .map(Some);
        or_sentinel("ZREVRANGEBYSCORE", key, result, None)
    }

    // ---- removals -----------------------------------------------------

    /// Removes members, returning the number actually removed.
    pub async fn try_zrem(&self, key: &str, members: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.zrem(key, members).await?)
    }

    /// Removes members. Returns the number removed, `-1` on failure.
    pub async fn zrem(&self, key: &str, members: &[&str]) -> i64 {
        let result = self.try_zrem(key, members).await;
        or_sentinel("ZREM", key, result, -1)
    }

    /// Removes members between ranks `start` and `stop` inclusive.
    pub async fn try_zrem_range_by_rank(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.zremrangebyrank(key, start, stop).await?)
    }

    /// Rank-range removal. Returns the number removed, `-1` on failure.
    pub async fn zrem_range_by_rank(&self, key: &str, start: isize, stop: isize) -> i64 {
        let result = self.try_zrem_range_by_rank(key, start, stop).await;
        or_sentinel("ZREMRANGEBYRANK", key, result, -1)
    }

    /// Removes members with scores in `[min, max]`.
    pub async fn try_zrem_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.zrembyscore(key, min, max).await?)
    }

    /// Score-range removal. Returns the number removed, `-1` on failure.
    pub async fn zrem_range_by_score(&self, key: &str, min: f64, max: f64) -> i64 {
        let result = self.try_zrem_range_by_score(key, min, max).await;
        or_sentinel("ZREMRANGEBYSCORE", key, result, -1)
    }
}

/// Truncates double scores toward zero, preserving order.
fn truncate_scores(scored: Vec<(String, f64)>) -> Vec<(String, i64)> {
    scored
        .into_iter()
        .map(|(member, score)| (member, score as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::truncate_scores;

    #[test]
    fn test_truncate_scores_preserves_order() {
        let scored = vec![
            ("a".to_string(), 1.9),
            ("b".to_string(), -2.7),
            ("c".to_string(), 3.0),
        ];
        assert_eq!(
            truncate_scores(scored),
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), -2),
                ("c".to_string(), 3),
            ]
        );
    }
}
