pub mod abbreviation_reader;
pub mod crime_reader;
pub mod dataset_loader;
pub mod decode;

pub use abbreviation_reader::AbbreviationReader;
pub use crime_reader::{CrimeReadResult, CrimeReader};
pub use dataset_loader::DatasetLoader;
