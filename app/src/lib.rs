//! alquran - typed client and page models for the alquran.cloud Quran API
//!
//! The client builds resource URLs, fetches with a bounded retry and decodes
//! typed responses. Pages bind those responses into table state.

pub mod config;
pub mod error;
pub mod endpoint;
pub mod models;
pub mod client;
pub mod table;
pub mod pages;

pub use config::{ClientArgs, ClientConfig, RetryPolicy, DEFAULT_BASE_URL};
pub use error::{ConfigError, RequestError};
pub use endpoint::{EditionFilter, Endpoint, Pagination, SectionKind};
pub use client::{HttpTransport, QuranClient, RawResponse, Transport};
pub use models::{
    Ayah, Direction, Edition, EditionFormat, EditionType, Envelope, Meta, Quran, QuranSurah,
    RevelationType, SajdaAyahs, SearchResults, SectionText, Surah, SurahReference,
};
pub use table::{DataTable, PageView, SortDirection, TableRow};
pub use pages::{Dashboard, Hero, HeroService, HomePage, HomeView};

/// Install the `tracing` fmt subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
