use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, info};

use super::path_key::PathKey;
use super::resolve::{locate, reveal_keys};
use super::types::FamilyDataset;
use crate::config::TreeConfig;

/// Where a selection currently is in reveal-then-scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	Resolving,
	WaitingForLayout,
	Scrolling,
}

/// What the controller needs from the page.
pub trait SelectionHost: Clone + 'static {
	/// Opens every key in one write.
	fn reveal(&self, keys: &[PathKey]);
	/// Runs `step` once newly opened regions have had `delay_ms` to settle.
	fn after_settle(&self, delay_ms: u32, step: Box<dyn FnOnce()>);
	/// Scrolls the card for `name` into view. False if it isn't mounted.
	fn scroll_to(&self, name: &str) -> bool;
	/// Highlights the selected card.
	fn mark_selected(&self, _name: &str) {}
}

#[derive(Debug, Default)]
struct Session {
	current: Option<String>,
	phase: Phase,
	generation: u64,
}

/// Drives jump-to-person: open the ancestry, wait for layout, scroll twice.
///
/// Deferred steps read the current selection when they run, so a late step
/// from an earlier selection scrolls to the newest target. Nothing is
/// cancelled.
pub struct SelectionController<H: SelectionHost> {
	data: Arc<FamilyDataset>,
	host: H,
	config: TreeConfig,
	session: Rc<RefCell<Session>>,
}

impl<H: SelectionHost> SelectionController<H> {
	pub fn new(data: Arc<FamilyDataset>, host: H, config: TreeConfig) -> Self {
		Self {
			data,
			host,
			config: config.validated(),
			session: Rc::new(RefCell::new(Session::default())),
		}
	}

	#[cfg(test)]
	pub fn phase(&self) -> Phase {
		self.session.borrow().phase
	}

	#[cfg(test)]
	pub fn current(&self) -> Option<String> {
		self.session.borrow().current.clone()
	}

	pub fn select(&self, name: &str) {
		info!("Selecting {name}");
		let generation = {
			let mut session = self.session.borrow_mut();
			session.generation += 1;
			session.current = Some(name.to_string());
			session.phase = Phase::Resolving;
			session.generation
		};
		self.host.mark_selected(name);

		let locations = locate(&self.data, name);
		if locations.is_empty() {
			debug!("No path to {name}; nothing to open");
		} else {
			self.host.reveal(&reveal_keys(&locations));
		}

		set_phase(&self.session, generation, Phase::WaitingForLayout);
		let (host, session, corrective) = (
			self.host.clone(),
			self.session.clone(),
			self.config.corrective_delay_ms,
		);
		self.host.after_settle(
			self.config.settle_delay_ms,
			Box::new(move || {
				set_phase(&session, generation, Phase::Scrolling);
				scroll_current(&host, &session);
				let retry_host = host.clone();
				host.after_settle(
					corrective,
					Box::new(move || {
						scroll_current(&retry_host, &session);
						set_phase(&session, generation, Phase::Idle);
					}),
				);
			}),
		);
	}
}

/// Only the newest selection may report its phase.
fn set_phase(session: &RefCell<Session>, generation: u64, phase: Phase) {
	let mut session = session.borrow_mut();
	if session.generation == generation {
		session.phase = phase;
	}
}

fn scroll_current<H: SelectionHost>(host: &H, session: &RefCell<Session>) {
	let Some(name) = session.borrow().current.clone() else {
		return;
	};
	if !host.scroll_to(&name) {
		debug!("{name} is not mounted yet; skipping scroll");
	}
}

#[cfg(test)]
mod tests {
	use std::collections::{HashSet, VecDeque};

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::family_tree::path_key::Section;
	use crate::components::family_tree::state::ExpansionState;
	use crate::components::family_tree::types::{FamilyNode, MainFamily, Spouse};

	#[derive(Default)]
	struct Fake {
		expansion: ExpansionState,
		reveals: usize,
		pending: VecDeque<(u32, Box<dyn FnOnce()>)>,
		mounted: HashSet<String>,
		scrolls: Vec<String>,
		selected: Option<String>,
	}

	#[derive(Clone, Default)]
	struct FakeHost(Rc<RefCell<Fake>>);

	impl FakeHost {
		fn mount(&self, name: &str) {
			self.0.borrow_mut().mounted.insert(name.to_string());
		}

		/// Fires queued steps in order, including ones they queue.
		fn run_timers(&self) -> Vec<u32> {
			let mut delays = Vec::new();
			loop {
				let next = self.0.borrow_mut().pending.pop_front();
				let Some((delay, step)) = next else {
					return delays;
				};
				delays.push(delay);
				step();
			}
		}
	}

	impl SelectionHost for FakeHost {
		fn reveal(&self, keys: &[PathKey]) {
			let mut fake = self.0.borrow_mut();
			fake.expansion = fake.expansion.open_all(keys);
			fake.reveals += 1;
		}

		fn after_settle(&self, delay_ms: u32, step: Box<dyn FnOnce()>) {
			self.0.borrow_mut().pending.push_back((delay_ms, step));
		}

		fn scroll_to(&self, name: &str) -> bool {
			let mut fake = self.0.borrow_mut();
			fake.scrolls.push(name.to_string());
			fake.mounted.contains(name)
		}

		fn mark_selected(&self, name: &str) {
			self.0.borrow_mut().selected = Some(name.to_string());
		}
	}

	fn dataset() -> Arc<FamilyDataset> {
		Arc::new(FamilyDataset {
			main_family: MainFamily {
				name: "Head".into(),
				wives: vec![Spouse {
					name: "A".into(),
					children: vec![
						"B".into(),
						FamilyNode {
							name: "C".into(),
							children: vec!["D".into()],
							..Default::default()
						}
						.into(),
					],
				}],
			},
			other_family_members: Vec::new(),
		})
	}

	fn controller() -> (SelectionController<FakeHost>, FakeHost) {
		let host = FakeHost::default();
		let controller = SelectionController::new(dataset(), host.clone(), TreeConfig::default());
		(controller, host)
	}

	fn key(parts: &[&str]) -> PathKey {
		parts.iter().copied().collect()
	}

	#[test]
	fn opens_path_then_scrolls_twice() {
		let (controller, host) = controller();
		host.mount("D");

		controller.select("D");
		assert_eq!(controller.phase(), Phase::WaitingForLayout);
		{
			let fake = host.0.borrow();
			assert!(fake.expansion.get(&Section::MainFamily.key()));
			assert!(fake.expansion.get(&Section::MainFamilyWives.key()));
			assert!(fake.expansion.get(&key(&["A"])));
			assert!(fake.expansion.get(&key(&["A", "C"])));
			assert!(fake.scrolls.is_empty());
			assert_eq!(fake.selected.as_deref(), Some("D"));
		}

		let config = TreeConfig::default();
		assert_eq!(
			host.run_timers(),
			vec![config.settle_delay_ms, config.corrective_delay_ms]
		);
		assert_eq!(host.0.borrow().scrolls, vec!["D", "D"]);
		assert_eq!(controller.phase(), Phase::Idle);
	}

	#[test]
	fn scrolls_after_first_settle_step() {
		let (controller, host) = controller();
		controller.select("B");

		let (_, first) = host.0.borrow_mut().pending.pop_front().unwrap();
		first();
		assert_eq!(controller.phase(), Phase::Scrolling);
		assert_eq!(host.0.borrow().scrolls, vec!["B"]);
		assert_eq!(host.0.borrow().pending.len(), 1);
	}

	#[test]
	fn unknown_name_runs_through_without_changes() {
		let (controller, host) = controller();
		controller.select("Nobody");
		host.run_timers();

		let fake = host.0.borrow();
		assert_eq!(fake.reveals, 0);
		assert_eq!(fake.expansion, ExpansionState::new());
		assert_eq!(fake.scrolls, vec!["Nobody", "Nobody"]);
		drop(fake);
		assert_eq!(controller.phase(), Phase::Idle);
	}

	#[test]
	fn reselect_mid_sequence_scrolls_to_newest() {
		let (controller, host) = controller();
		controller.select("B");
		controller.select("D");
		assert_eq!(controller.current().as_deref(), Some("D"));

		host.run_timers();
		assert_eq!(host.0.borrow().scrolls, vec!["D", "D", "D", "D"]);
		assert_eq!(controller.phase(), Phase::Idle);
	}

	#[test]
	fn stale_sequence_does_not_report_idle() {
		let (controller, host) = controller();
		controller.select("B");
		// Run the first selection's settle step, which queues its retry.
		let (_, first) = host.0.borrow_mut().pending.pop_front().unwrap();
		first();
		controller.select("D");

		let (_, stale_retry) = host.0.borrow_mut().pending.pop_front().unwrap();
		stale_retry();
		assert_eq!(controller.phase(), Phase::WaitingForLayout);

		host.run_timers();
		assert_eq!(controller.phase(), Phase::Idle);
	}
}
