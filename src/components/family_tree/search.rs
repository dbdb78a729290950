/// Names containing `term`, ignoring case. `None` for a blank term, which
/// means "no search active" rather than "nothing found".
pub fn filter_names<'a>(names: &'a [String], term: &str) -> Option<Vec<&'a str>> {
	if term.trim().is_empty() {
		return None;
	}
	let needle = term.to_lowercase();
	Some(
		names
			.iter()
			.filter(|name| name.to_lowercase().contains(&needle))
			.map(String::as_str)
			.collect(),
	)
}

/// Splits `text` into runs, flagging the runs that match `term`
/// case-insensitively.
pub fn highlight_segments(text: &str, term: &str) -> Vec<(String, bool)> {
	if term.trim().is_empty() {
		return vec![(text.to_string(), false)];
	}
	let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();

	let mut parts = Vec::new();
	let mut plain_start = 0;
	let mut pos = 0;
	while pos < text.len() {
		if let Some(len) = match_len(&text[pos..], &needle) {
			if plain_start < pos {
				parts.push((text[plain_start..pos].to_string(), false));
			}
			parts.push((text[pos..pos + len].to_string(), true));
			pos += len;
			plain_start = pos;
		} else {
			pos += text[pos..].chars().next().map_or(1, char::len_utf8);
		}
	}
	if plain_start < text.len() {
		parts.push((text[plain_start..].to_string(), false));
	}
	parts
}

/// Byte length of the prefix of `hay` that lowercases to `needle`.
fn match_len(hay: &str, needle: &[char]) -> Option<usize> {
	let mut matched = 0;
	for (offset, c) in hay.char_indices() {
		for lower in c.to_lowercase() {
			if needle.get(matched) != Some(&lower) {
				return None;
			}
			matched += 1;
		}
		if matched == needle.len() {
			return Some(offset + c.len_utf8());
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn names() -> Vec<String> {
		["Aamina", "Kachallama", "Abu", "Ameena"]
			.iter()
			.map(|s| s.to_string())
			.collect()
	}

	#[test]
	fn partial_lowercase_term_matches() {
		let names = names();
		assert_eq!(filter_names(&names, "amina"), Some(vec!["Aamina"]));
		assert_eq!(filter_names(&names, "AB"), Some(vec!["Abu"]));
	}

	#[test]
	fn blank_term_is_no_search() {
		let names = names();
		assert_eq!(filter_names(&names, ""), None);
		assert_eq!(filter_names(&names, "   "), None);
		assert_eq!(filter_names(&names, "zzz"), Some(vec![]));
	}

	#[test]
	fn highlights_every_match() {
		assert_eq!(
			highlight_segments("Kachallama", "a"),
			vec![
				("K".to_string(), false),
				("a".to_string(), true),
				("ch".to_string(), false),
				("a".to_string(), true),
				("ll".to_string(), false),
				("a".to_string(), true),
				("m".to_string(), false),
				("a".to_string(), true),
			]
		);
	}

	#[test]
	fn highlight_keeps_original_case() {
		assert_eq!(
			highlight_segments("Aamina", "AMI"),
			vec![("A".to_string(), false), ("ami".to_string(), true), ("na".to_string(), false)]
		);
	}

	#[test]
	fn highlight_without_term_is_one_plain_run() {
		assert_eq!(highlight_segments("Abu", " "), vec![("Abu".to_string(), false)]);
	}
}
