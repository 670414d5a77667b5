pub mod audio;
pub mod clock;
pub mod config;
pub mod constants;
pub mod disturbance;
pub mod error;
pub mod geom;
pub mod input;
pub mod particles;
pub mod reveal;
pub mod ripples;
pub mod rng;
pub mod scene;
pub mod snapshot;
pub mod stones;
pub mod tree;

pub use audio::*;
pub use clock::*;
pub use config::*;
pub use disturbance::*;
pub use error::*;
pub use input::*;
pub use particles::*;
pub use reveal::*;
pub use ripples::*;
pub use rng::*;
pub use scene::*;
pub use snapshot::*;
pub use stones::*;
pub use tree::*;
