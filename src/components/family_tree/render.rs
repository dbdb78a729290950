use super::path_key::PathKey;
use super::types::{PersonRef, Spouse};

pub const WIFE: &str = "Wife";
pub const CHILD: &str = "Child";

/// What a person slot turns into on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeLayout {
	/// A card and nothing else.
	Leaf { name: String },
	/// A card followed by a collapsible region keyed by `region`.
	Branch {
		name: String,
		spouse: Option<String>,
		co_spouses: Vec<Spouse>,
		children: Vec<PersonRef>,
		region: PathKey,
	},
}

pub fn layout(node: &PersonRef, prefix: &PathKey) -> NodeLayout {
	let name = node.display_name().to_string();
	if node.is_leaf_name() || !node.has_family() {
		return NodeLayout::Leaf { name };
	}
	NodeLayout::Branch {
		region: prefix.child(name.as_str()),
		name,
		spouse: node.spouse().map(str::to_string),
		co_spouses: node.co_spouses().to_vec(),
		children: node.children().to_vec(),
	}
}

pub fn family_label(open: bool) -> &'static str {
	if open { "Hide Family" } else { "Show Family" }
}

pub fn children_label(open: bool) -> &'static str {
	if open { "Hide Children" } else { "Show Children" }
}

pub fn wives_label(count: usize) -> String {
	format!("Wives ({count})")
}
