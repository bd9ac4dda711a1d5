pub mod analysis;
pub mod document_store;
pub mod intake;
pub mod lexicon;
pub mod sentiment;
pub mod word_cloud;
