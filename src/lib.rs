/// A small scene-driven game loop for the terminal, with a Space Invaders
/// style shooter as its main scene.

pub mod assets;
pub mod canvas;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod input;
pub mod scene;
pub mod scenes;
pub mod vector;
