mod field_extractor;
mod license_aggregator;
mod metadata_stamper;
mod outbound_resolver;

pub use field_extractor::{FieldExtractor, AVAILABLE_FIELDS, DEFAULT_FIELDS};
pub use license_aggregator::LicenseAggregator;
pub use metadata_stamper::MetadataStamper;
pub use outbound_resolver::{LicensePair, OutboundResolver};
