//! The bundled family payload.

use log::info;

use crate::components::family_tree::FamilyDataset;
use crate::error::Result;

const FAMILY_JSON: &str = include_str!("../data/family.json");

/// Parse the bundled dataset.
pub fn load() -> Result<FamilyDataset> {
	let data = parse(FAMILY_JSON)?;
	info!(
		"Loaded family of {} with {} other members",
		data.main_family.name,
		data.other_family_members.len()
	);
	Ok(data)
}

/// Parse a dataset from JSON text.
pub fn parse(json: &str) -> Result<FamilyDataset> {
	Ok(serde_json::from_str(json)?)
}
