use serde::Deserialize;

/// A person slot: either a bare name or a structured family node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
	Name(String),
	Node(FamilyNode),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FamilyNode {
	// A node without a name still has to render and key its region.
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub wife: Option<String>,
	#[serde(default)]
	pub wives: Vec<Spouse>,
	#[serde(default)]
	pub children: Vec<PersonRef>,
	#[serde(default)]
	pub relationship: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Spouse {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub children: Vec<PersonRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MainFamily {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub wives: Vec<Spouse>,
}

/// The whole payload: the family head with his spouses, and the head's
/// siblings with their own families.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FamilyDataset {
	pub main_family: MainFamily,
	#[serde(default)]
	pub other_family_members: Vec<FamilyNode>,
}

impl PersonRef {
	pub fn is_leaf_name(&self) -> bool {
		matches!(self, PersonRef::Name(_))
	}

	pub fn display_name(&self) -> &str {
		match self {
			PersonRef::Name(name) => name,
			PersonRef::Node(node) => &node.name,
		}
	}

	/// The single spouse (`wife`) of a structured node.
	pub fn spouse(&self) -> Option<&str> {
		match self {
			PersonRef::Name(_) => None,
			PersonRef::Node(node) => node.wife.as_deref(),
		}
	}

	/// The spouse list (`wives`) of a structured node.
	pub fn co_spouses(&self) -> &[Spouse] {
		match self {
			PersonRef::Name(_) => &[],
			PersonRef::Node(node) => &node.wives,
		}
	}

	pub fn children(&self) -> &[PersonRef] {
		match self {
			PersonRef::Name(_) => &[],
			PersonRef::Node(node) => &node.children,
		}
	}

	/// True when there is nothing to put behind a collapsible.
	pub fn has_family(&self) -> bool {
		self.spouse().is_some() || !self.co_spouses().is_empty() || !self.children().is_empty()
	}
}

impl From<&str> for PersonRef {
	fn from(name: &str) -> Self {
		PersonRef::Name(name.to_string())
	}
}

impl From<FamilyNode> for PersonRef {
	fn from(node: FamilyNode) -> Self {
		PersonRef::Node(node)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn bare_name_has_no_family() {
		let person = PersonRef::from("Abu");
		assert!(person.is_leaf_name());
		assert_eq!(person.display_name(), "Abu");
		assert_eq!(person.spouse(), None);
		assert!(person.children().is_empty());
		assert!(!person.has_family());
	}

	#[test]
	fn deserializes_mixed_children() {
		let json = r#"{
			"name": "Kunjan",
			"wife": "Safiya",
			"children": ["Koya", {"name": "Hamsa", "children": ["Silu"]}]
		}"#;
		let person: PersonRef = serde_json::from_str(json).unwrap();
		assert!(!person.is_leaf_name());
		assert_eq!(person.spouse(), Some("Safiya"));
		assert_eq!(person.children().len(), 2);
		assert!(person.children()[0].is_leaf_name());
		assert_eq!(person.children()[1].display_name(), "Hamsa");
		assert_eq!(person.children()[1].children(), &[PersonRef::from("Silu")]);
	}

	#[test]
	fn missing_name_becomes_empty() {
		let person: PersonRef = serde_json::from_str(r#"{"children": ["A"]}"#).unwrap();
		assert_eq!(person.display_name(), "");
		assert!(person.has_family());
	}

	#[test]
	fn nameless_spouses_parse_as_empty() {
		let json = r#"{
			"name": "C",
			"wives": [{"children": ["K"]}]
		}"#;
		let person: PersonRef = serde_json::from_str(json).unwrap();
		assert_eq!(person.co_spouses()[0].name, "");
		assert_eq!(person.co_spouses()[0].children, vec![PersonRef::from("K")]);

		let main: MainFamily = serde_json::from_str(r#"{"wives": []}"#).unwrap();
		assert_eq!(main.name, "");
	}

	#[test]
	fn structured_node_without_family_is_not_a_branch() {
		let person = PersonRef::from(FamilyNode {
			name: "Malu".into(),
			..Default::default()
		});
		assert!(!person.is_leaf_name());
		assert!(!person.has_family());
	}

	#[test]
	fn dataset_ignores_unknown_sections() {
		let json = r#"{
			"main_family": {"name": "Head", "wives": [{"name": "W", "children": ["C"]}]},
			"other_family_members": [],
			"second_generation": []
		}"#;
		let data: FamilyDataset = serde_json::from_str(json).unwrap();
		assert_eq!(data.main_family.wives[0].children, vec![PersonRef::from("C")]);
	}
}
