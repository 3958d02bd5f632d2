pub mod aging;
pub mod entry;
pub mod hash;
pub mod history;
pub mod predictor;
pub mod replace;
pub mod scoreboard;
pub mod table;

pub use self::predictor::TagePredictor;
