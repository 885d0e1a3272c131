pub mod asset;
pub mod demand;
pub mod renewable;
pub mod types;

pub use asset::*;
pub use demand::*;
pub use renewable::*;
pub use types::*;
