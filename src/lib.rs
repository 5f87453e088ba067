//! Society Sim - agent-based simulation of a small town
//!
//! Actors commute between homes, workplaces, shops and leisure venues,
//! keep their needs up, earn and spend money, make friends, pair up, raise
//! children, age and die. The engine is headless; presentation layers read
//! the world and the history after each step.

pub mod core;
pub mod entity;
pub mod simulation;
pub mod world;
