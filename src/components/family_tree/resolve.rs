use super::path_key::{PathKey, Section};
use super::types::{FamilyDataset, PersonRef, Spouse};

/// How the target was found, which decides which regions must open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
	/// A bare name card inside the region at `path`.
	Leaf,
	/// A structured node; `path` ends with the node's own region.
	Node,
	/// A spouse card inside the region at `path`.
	Spouse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMatch {
	pub path: PathKey,
	pub kind: MatchKind,
}

impl PathMatch {
	/// Region keys that must be open for the target card to be mounted.
	///
	/// A node's own region stays as it is; leaf and spouse cards sit inside
	/// the region their path ends with.
	pub fn regions(&self) -> Vec<PathKey> {
		let trail = match self.kind {
			MatchKind::Node => self.path.parent(),
			MatchKind::Leaf | MatchKind::Spouse => self.path.clone(),
		};
		trail.prefixes().collect()
	}
}

/// Ancestor path from `root` to `target`, or `None` if the subtree doesn't
/// contain it. Children are searched depth-first in listed order and the
/// first match wins.
#[cfg(test)]
pub fn resolve_path(root: &PersonRef, target: &str, prefix: &PathKey) -> Option<PathKey> {
	resolve_match(root, target, prefix).map(|found| found.path)
}

pub fn resolve_match(root: &PersonRef, target: &str, prefix: &PathKey) -> Option<PathMatch> {
	let node = match root {
		PersonRef::Name(name) => {
			return (name == target).then(|| PathMatch {
				path: prefix.clone(),
				kind: MatchKind::Leaf,
			});
		}
		PersonRef::Node(node) => node,
	};

	let path = prefix.child(node.name.as_str());
	if node.name == target {
		return Some(PathMatch {
			path,
			kind: MatchKind::Node,
		});
	}
	let is_spouse = node.wife.as_deref() == Some(target)
		|| node.wives.iter().any(|spouse| spouse.name == target);
	if is_spouse {
		return Some(PathMatch {
			path,
			kind: MatchKind::Spouse,
		});
	}

	node.wives
		.iter()
		.flat_map(|spouse| spouse.children.iter())
		.chain(node.children.iter())
		.find_map(|child| resolve_match(child, target, &path))
}

/// First match among `children`, each resolved under `prefix`.
pub fn resolve_in_children(
	children: &[PersonRef],
	target: &str,
	prefix: &PathKey,
) -> Option<PathMatch> {
	children
		.iter()
		.find_map(|child| resolve_match(child, target, prefix))
}

/// One root under which the target was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
	pub sections: Vec<Section>,
	pub regions: Vec<PathKey>,
}

impl Location {
	fn card(sections: &[Section]) -> Self {
		Self {
			sections: sections.to_vec(),
			regions: Vec::new(),
		}
	}

	/// Section keys first, then regions from the outside in.
	pub fn keys(&self) -> Vec<PathKey> {
		self.sections
			.iter()
			.map(|section| section.key())
			.chain(self.regions.iter().cloned())
			.collect()
	}
}

const MAIN_WIVES: &[Section] = &[Section::MainFamily, Section::MainFamilyWives];
const OTHER_MEMBERS: &[Section] = &[Section::OtherMembers];

/// Tries every independent root of the dataset.
///
/// There is no single root: the head's spouses and each sibling's spouses
/// and children are separate subtrees, so every match is reported.
pub fn locate(data: &FamilyDataset, target: &str) -> Vec<Location> {
	let mut found = Vec::new();
	let main = &data.main_family;

	if main.name == target {
		found.push(Location::card(&[Section::MainFamily]));
	}
	for spouse in &main.wives {
		let prefix = PathKey::new().child(spouse.name.as_str());
		if let Some(location) = locate_in_spouse(spouse, target, &prefix, MAIN_WIVES) {
			found.push(location);
		}
	}

	for (i, member) in data.other_family_members.iter().enumerate() {
		if member.name == target || member.wife.as_deref() == Some(target) {
			found.push(Location::card(OTHER_MEMBERS));
		}
		for (j, spouse) in member.wives.iter().enumerate() {
			let prefix = PathKey::sibling(i, Some(j));
			if let Some(location) =
				locate_in_spouse(spouse, target, &prefix, OTHER_MEMBERS)
			{
				found.push(location);
			}
		}
		if let Some(hit) = resolve_in_children(&member.children, target, &PathKey::sibling(i, None))
		{
			found.push(Location {
				sections: OTHER_MEMBERS.to_vec(),
				regions: hit.regions(),
			});
		}
	}
	found
}

fn locate_in_spouse(
	spouse: &Spouse,
	target: &str,
	prefix: &PathKey,
	sections: &[Section],
) -> Option<Location> {
	if spouse.name == target {
		return Some(Location::card(sections));
	}
	resolve_in_children(&spouse.children, target, prefix).map(|hit| Location {
		sections: sections.to_vec(),
		regions: hit.regions(),
	})
}

/// Every key to open for `target`, in order and without repeats.
pub fn reveal_keys(locations: &[Location]) -> Vec<PathKey> {
	let mut keys: Vec<PathKey> = Vec::new();
	for key in locations.iter().flat_map(Location::keys) {
		if !keys.contains(&key) {
			keys.push(key);
		}
	}
	keys
}
