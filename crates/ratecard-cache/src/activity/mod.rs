//! Recent-activity feed backed by a capped Redis list

mod feed;

pub use feed::{RedisActivityFeed, ACTIVITY_FEED_KEY, DEFAULT_FEED_CAPACITY};
