//! Timing knobs for jump-to-person.

use log::debug;

/// Delays used when revealing and scrolling to a selected person.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
	/// Duration of the collapsible open animation, in milliseconds.
	pub transition_ms: u32,
	/// Wait after opening regions before the first scroll.
	pub settle_delay_ms: u32,
	/// Wait after the first scroll before the corrective one.
	pub corrective_delay_ms: u32,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			transition_ms: 200,
			settle_delay_ms: 350,
			corrective_delay_ms: 450,
		}
	}
}

impl TreeConfig {
	/// Raises delays that would fire before the open animation ends.
	pub fn validated(self) -> Self {
		let floor = self.transition_ms.saturating_add(50);
		if self.settle_delay_ms < floor || self.corrective_delay_ms < floor {
			debug!("Settle delays raised to {floor}ms");
		}
		Self {
			settle_delay_ms: self.settle_delay_ms.max(floor),
			corrective_delay_ms: self.corrective_delay_ms.max(floor),
			..self
		}
	}

	/// Inline style that hands the open animation length to the stylesheet.
	pub fn transition_style(&self) -> String {
		format!("--tree-transition: {}ms", self.transition_ms)
	}
}
