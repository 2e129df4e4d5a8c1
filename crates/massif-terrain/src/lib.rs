//! Procedural heightfield generation: seeded diamond-square displacement and
//! debug visualization.

mod diamond_square;

pub mod debug_viz;

pub use diamond_square::{
    DiamondSquareGenerator, DiamondSquareParams, GenerateError, PassSpec, displacement_schedule,
};
