mod component;
mod controller;
mod dom;
mod flatten;
mod path_key;
mod render;
mod resolve;
mod search;
mod state;
mod types;

pub use component::FamilyTree;
pub use types::FamilyDataset;
