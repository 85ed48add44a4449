pub mod axes;
pub mod clock;
pub mod color;
pub mod distribution;
pub mod fan;
pub mod geometry;
pub mod region;
pub mod scene;
pub mod speeds;
pub mod store;

pub use clock::{AnimationClock, Command, PlayState};
pub use color::{color_at, Rgba};
pub use geometry::{Point, Polygon};
pub use region::RegionLabel;
pub use scene::{draw, Diagram, DrawModel};
pub use speeds::{ParseError, SpeedSet, SpeedSetParser, ValidationMode};
pub use store::SpeedStore;
