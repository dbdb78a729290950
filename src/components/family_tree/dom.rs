use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::controller::SelectionHost;
use super::path_key::PathKey;
use super::state::{ExpansionState, Registry};

/// Browser side of jump-to-person: signals, timers and real scrolling.
#[derive(Clone, Copy)]
pub struct DomHost {
	pub expansion: RwSignal<ExpansionState>,
	pub selected: RwSignal<Option<String>>,
	/// Display name to the DOM id of its mounted card.
	pub registry: StoredValue<Registry<String>>,
}

impl SelectionHost for DomHost {
	fn reveal(&self, keys: &[PathKey]) {
		let next = self.expansion.with_untracked(|state| state.open_all(keys));
		if self.expansion.with_untracked(|state| *state != next) {
			self.expansion.set(next);
		}
	}

	// Waits out the transition, then one animation frame so the scroll
	// reads the committed layout.
	fn after_settle(&self, delay_ms: u32, step: Box<dyn FnOnce()>) {
		let Some(window) = web_sys::window() else {
			debug!("No window; dropping deferred step");
			return;
		};
		let on_timeout = Closure::once_into_js(move || {
			let on_frame = Closure::once_into_js(move || step());
			if let Some(window) = web_sys::window() {
				let _ = window.request_animation_frame(on_frame.unchecked_ref());
			}
		});
		let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			on_timeout.unchecked_ref(),
			i32::try_from(delay_ms).unwrap_or(i32::MAX),
		);
	}

	fn scroll_to(&self, name: &str) -> bool {
		let Some(id) = self.registry.with_value(|registry| registry.get(name).cloned()) else {
			return false;
		};
		// Collapsed cards leave a stale id behind; only mounted ones resolve.
		let Some(element) = web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.get_element_by_id(&id))
		else {
			return false;
		};
		let options = ScrollIntoViewOptions::new();
		options.set_behavior(ScrollBehavior::Smooth);
		options.set_block(ScrollLogicalPosition::Center);
		element.scroll_into_view_with_scroll_into_view_options(&options);
		true
	}

	fn mark_selected(&self, name: &str) {
		self.selected.set(Some(name.to_string()));
	}
}
