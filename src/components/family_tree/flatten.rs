use super::types::{FamilyDataset, PersonRef, Spouse};

/// Every name in the dataset, in page order.
///
/// Duplicates are kept: this is the search index, not a set.
pub fn flatten(data: &FamilyDataset) -> Vec<String> {
	let mut names = Vec::new();
	names.push(data.main_family.name.clone());
	for spouse in &data.main_family.wives {
		visit_spouse(spouse, &mut names);
	}
	for member in &data.other_family_members {
		names.push(member.name.clone());
		if let Some(wife) = &member.wife {
			names.push(wife.clone());
		}
		for spouse in &member.wives {
			visit_spouse(spouse, &mut names);
		}
		for child in &member.children {
			visit_person(child, &mut names);
		}
	}
	names
}

fn visit_spouse(spouse: &Spouse, names: &mut Vec<String>) {
	names.push(spouse.name.clone());
	for child in &spouse.children {
		visit_person(child, names);
	}
}

fn visit_person(person: &PersonRef, names: &mut Vec<String>) {
	names.push(person.display_name().to_string());
	if let Some(wife) = person.spouse() {
		names.push(wife.to_string());
	}
	for spouse in person.co_spouses() {
		visit_spouse(spouse, names);
	}
	for child in person.children() {
		visit_person(child, names);
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::family_tree::types::{FamilyNode, MainFamily};

	fn dataset() -> FamilyDataset {
		FamilyDataset {
			main_family: MainFamily {
				name: "Head".into(),
				wives: vec![Spouse {
					name: "A".into(),
					children: vec![
						"B".into(),
						FamilyNode {
							name: "C".into(),
							wife: Some("Cw".into()),
							children: vec!["D".into()],
							..Default::default()
						}
						.into(),
					],
				}],
			},
			other_family_members: vec![FamilyNode {
				name: "Sib".into(),
				wife: Some("SibW".into()),
				wives: vec![Spouse {
					name: "SibW2".into(),
					children: vec!["E".into()],
				}],
				children: vec!["F".into()],
				relationship: Some("Sibling of Head".into()),
			}],
		}
	}

	#[test]
	fn visits_in_page_order() {
		assert_eq!(
			flatten(&dataset()),
			vec!["Head", "A", "B", "C", "Cw", "D", "Sib", "SibW", "SibW2", "E", "F"]
		);
	}

	#[test]
	fn nested_co_spouses_follow_their_husband() {
		let mut data = dataset();
		data.main_family.wives[0].children.push(
			FamilyNode {
				name: "G".into(),
				wives: vec![
					Spouse {
						name: "Gw1".into(),
						children: vec!["K".into()],
					},
					Spouse {
						name: "Gw2".into(),
						children: Vec::new(),
					},
				],
				children: vec!["L".into()],
				..Default::default()
			}
			.into(),
		);
		let names = flatten(&data);
		assert_eq!(
			&names[..10],
			&["Head", "A", "B", "C", "Cw", "D", "G", "Gw1", "K", "Gw2"]
		);
		assert_eq!(names[10], "L");
		assert_eq!(names[11], "Sib");
	}

	#[test]
	fn stable_across_calls() {
		let data = dataset();
		assert_eq!(flatten(&data), flatten(&data));
	}

	#[test]
	fn keeps_duplicates() {
		let mut data = dataset();
		data.main_family.wives.push(Spouse {
			name: "A2".into(),
			children: vec!["B".into()],
		});
		let names = flatten(&data);
		assert_eq!(names.iter().filter(|n| *n == "B").count(), 2);
	}
}
