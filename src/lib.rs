//! Listen Notes podcasts as a uniform media catalog.
//!
//! The [`adapter`] turns the paginated, rate-limited Listen Notes API into
//! four catalog operations: browsable genres, podcast listings, podcast
//! details with all episodes, and episode streams. Everything it returns is
//! serializable in the camelCase field names discovery hosts expect.
//!
//! ```no_run
//! use podcatalog::{adapter::{Adapter, ListenNotesAdapter}, config::Config};
//!
//! # async fn example() -> podcatalog::error::Result<()> {
//! let config = Config::with_api_key("0123456789abcdef".parse()?);
//! let adapter = ListenNotesAdapter::from_config(&config)?;
//! let genres = adapter.genres().await?;
//! # Ok(())
//! # }
//! ```
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
extern crate log;

pub mod adapter;
pub mod api_key;
pub mod catalog;
pub mod collect;
pub mod config;
pub mod error;
pub mod genres;
pub mod http;
pub mod listennotes;
pub mod normalize;
pub mod protocol;
pub mod streams;
