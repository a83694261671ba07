pub mod color;
pub mod config;
pub mod constants;
pub mod frame_loop;
pub mod linker;
pub mod math;
pub mod node;
pub mod state;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use frame_loop::*;
pub use linker::*;
pub use node::*;
pub use state::*;
