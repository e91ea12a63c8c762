//! Data models for Plater entities.
//!
//! This module contains the domain structures the rest of the crate works
//! with, the wire DTOs they are parsed from, and the `Resource` wrapper used
//! at the use-case boundary:
//!
//! - `User`: profile of the authenticated user
//! - `Recipe`: a recipe with ingredients, instructions and metadata
//! - `Resource`: loading/success/error states for UI consumers

pub mod recipe;
pub mod resource;
pub mod user;

pub use recipe::{Recipe, RecipeDto, RecipesResponse};
pub use resource::Resource;
pub use user::{User, UserDto};
