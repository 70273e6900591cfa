pub mod config;
pub mod dataset;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod explorer;
pub mod metadata;
pub mod output;
pub mod spectrum;
pub mod store;
pub mod table;
pub mod validate;

pub use dataset::{Dataset, DatasetRequest, load_dataset};
pub use domain::{AntibioticSelection, MissingPolicy, SpectraKind};
pub use encoding::{DriamsLabelEncoder, Encoding, LabelEncoder, MappingEncoder};
pub use error::DriamsError;
pub use explorer::DatasetExplorer;
pub use metadata::load_metadata;
pub use spectrum::Spectrum;
pub use store::PathStore;
pub use table::{Cell, Label, MetadataTable};
pub use validate::{SiteCheck, SiteValidator};
