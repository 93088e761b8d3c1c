pub mod helpers;
mod movement;
mod secret;

pub use movement::Movement;
pub use secret::Secret;
