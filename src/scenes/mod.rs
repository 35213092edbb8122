/// Concrete scenes the launcher can start.

pub mod invaders;
pub mod sandbox;

pub use invaders::SpaceInvadersScene;
pub use sandbox::SandboxScene;
