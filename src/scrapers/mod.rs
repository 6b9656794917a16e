//! Site scrapers.
//!
//! Only one source is supported:
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | virshi.com.ua | [`virshi`] | Paginated author index, then one page per poem |
//!
//! A scraper exports a link-collection step and a poem-extraction step, both
//! generic over [`Fetch`](crate::fetch::Fetch).

pub mod virshi;
