// The pre-trained classifier: artifact loading plus per-request prediction

pub mod artifact;
pub mod predictor;

pub use artifact::{LinearSignalModel, ModelBundle, SignalModel};
pub use predictor::{PredictedFrame, Predictor};
