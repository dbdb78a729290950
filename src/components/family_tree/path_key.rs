use std::fmt;

/// Top-level page sections that can be collapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
	MainFamily,
	MainFamilyWives,
	OtherMembers,
}

impl Section {
	fn as_str(self) -> &'static str {
		match self {
			Section::MainFamily => "mainFamily",
			Section::MainFamilyWives => "mainFamilyWives",
			Section::OtherMembers => "otherMembers",
		}
	}

	pub fn key(self) -> PathKey {
		PathKey::new().child(Segment::Section(self))
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
	Name(String),
	Section(Section),
	/// Positional prefix for the `member`-th other family member, or for its
	/// `spouse`-th wife. Needed where names alone don't identify the region.
	Sibling {
		member: usize,
		spouse: Option<usize>,
	},
}

impl From<&str> for Segment {
	fn from(name: &str) -> Self {
		Segment::Name(name.to_string())
	}
}

/// Ordered ancestry addressing one collapsible region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathKey(Vec<Segment>);

impl PathKey {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sibling(member: usize, spouse: Option<usize>) -> Self {
		Self::new().child(Segment::Sibling { member, spouse })
	}

	pub fn child(&self, segment: impl Into<Segment>) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment.into());
		Self(segments)
	}

	/// The key without its last segment; empty stays empty.
	pub fn parent(&self) -> Self {
		let mut segments = self.0.clone();
		segments.pop();
		Self(segments)
	}

	/// Every non-empty leading slice, shortest first.
	pub fn prefixes(&self) -> impl Iterator<Item = PathKey> + '_ {
		(1..=self.0.len()).map(|n| PathKey(self.0[..n].to_vec()))
	}

	/// Lookup string for the expansion map.
	///
	/// Segments are joined with `-`. Names escape `\`, `-` and a leading
	/// `@` or `#`, which are reserved for section and sibling segments. An
	/// empty name encodes as `\0` so it differs from the empty key.
	pub fn encode(&self) -> String {
		let mut out = String::new();
		for (i, segment) in self.0.iter().enumerate() {
			if i > 0 {
				out.push('-');
			}
			match segment {
				Segment::Name(name) => escape_into(name, &mut out),
				Segment::Section(section) => {
					out.push('@');
					out.push_str(section.as_str());
				}
				Segment::Sibling { member, spouse } => {
					out.push_str(&format!("#sibling{member}"));
					if let Some(spouse) = spouse {
						out.push_str(&format!(".{spouse}"));
					}
				}
			}
		}
		out
	}
}

fn escape_into(name: &str, out: &mut String) {
	if name.is_empty() {
		out.push_str("\\0");
		return;
	}
	for (i, c) in name.chars().enumerate() {
		match c {
			'\\' | '-' => out.push('\\'),
			'@' | '#' if i == 0 => out.push('\\'),
			_ => {}
		}
		out.push(c);
	}
}

impl fmt::Display for PathKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.encode())
	}
}

impl<S: Into<Segment>> FromIterator<S> for PathKey {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}
