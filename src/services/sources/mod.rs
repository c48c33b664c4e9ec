//! Concrete quote providers.

pub mod cbr;
pub mod mfd;

use std::sync::Arc;

pub use cbr::CbrXmlSource;
pub use mfd::MfdTableSource;

use crate::config::{AppConfig, SourceKind};
use crate::services::market_data::QuoteSource;

/// Build the provider selected by the configuration.
pub fn build_source(config: &AppConfig) -> Arc<dyn QuoteSource> {
    match (config.source, config.source_url.as_deref()) {
        (SourceKind::Mfd, Some(url)) => Arc::new(MfdTableSource::with_url(url, config.request_timeout)),
        (SourceKind::Mfd, None) => Arc::new(MfdTableSource::new(config.request_timeout)),
        (SourceKind::Cbr, Some(url)) => Arc::new(CbrXmlSource::with_url(url, config.request_timeout)),
        (SourceKind::Cbr, None) => Arc::new(CbrXmlSource::new(config.request_timeout)),
    }
}
