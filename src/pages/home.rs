use std::sync::Arc;

use leptos::prelude::*;

use crate::components::family_tree::FamilyTree;
use crate::config::TreeConfig;
use crate::data;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Parsed once; a bad payload lands in the error boundary below.
	let family = data::load().map(|data| {
		view! { <FamilyTree data=Arc::new(data) config=TreeConfig::default() /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="family-page">
				<header class="family-banner">
					<h1>"Narimukkil Family"</h1>
					<p class="subtitle">"Discover our family heritage and connections"</p>
				</header>
				<main class="family-content">{family}</main>
			</div>
		</ErrorBoundary>
	}
}
