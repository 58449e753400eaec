pub mod automata;
pub mod bsp;
pub mod config;
pub mod error;
pub mod generator;
pub mod map;
pub mod walk;

pub use automata::CellAutomataGenerator;
pub use bsp::BspGenerator;
pub use config::{
    BspConfig, CellAutomataConfig, DrunkardWalkConfig, EvaluationRule, GenerationParams,
};
pub use error::GeneratorError;
pub use generator::{ConfigUi, Generator, GeneratorKind, build_generator};
pub use map::{CellState, Map};
pub use walk::DrunkardWalkGenerator;
