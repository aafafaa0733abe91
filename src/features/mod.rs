// Feature engineering: indicator engine, sentiment source, row assembly

pub mod assembler;
pub mod frame;
pub mod indicators;
pub mod sentiment;

pub use assembler::FeatureAssembler;
pub use frame::FeatureFrame;
pub use sentiment::{FixedSentiment, SentimentSource, UniformSentiment};
