//! battallica: a scrolling vector-graphics arcade shooter.

pub mod behavior;
pub mod camera;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod palette;
pub mod pool;
pub mod shapes;
pub mod stats;
pub mod surface;
pub mod target_list;
pub mod terrain;

pub use compute::World;
pub use error::{GameError, Result};
