pub mod blow;
pub mod candle;
pub mod color;
pub mod config;
pub mod constants;
pub mod flame;
pub mod frame_data;
pub mod mesh;
pub mod scene;
pub mod scheduler;
pub mod session;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static FLAME_WGSL: &str = include_str!("../shaders/flame.wgsl");

pub use blow::*;
pub use candle::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use flame::*;
pub use frame_data::*;
pub use mesh::*;
pub use scene::*;
pub use scheduler::*;
pub use session::*;
