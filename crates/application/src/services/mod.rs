pub mod answer_synthesizer;
pub mod directory_store;
pub mod host_directory;

pub use answer_synthesizer::AnswerSynthesizer;
pub use directory_store::DirectoryStore;
pub use host_directory::{DirectoryBuilder, HostDirectory};
