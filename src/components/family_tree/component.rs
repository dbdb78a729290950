use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::prelude::*;

use super::controller::SelectionController;
use super::dom::DomHost;
use super::flatten::flatten;
use super::path_key::{PathKey, Section};
use super::render::{CHILD, NodeLayout, WIFE, children_label, family_label, layout, wives_label};
use super::search::{filter_names, highlight_segments};
use super::state::{ExpansionState, Registry};
use super::types::{FamilyDataset, FamilyNode, PersonRef, Spouse};
use crate::config::TreeConfig;

static NEXT_CARD_ID: AtomicUsize = AtomicUsize::new(0);

/// Session state shared by every card and region in one tree.
#[derive(Clone, Copy)]
pub struct TreeContext {
	pub expansion: RwSignal<ExpansionState>,
	pub search: RwSignal<String>,
	pub selected: RwSignal<Option<String>>,
	pub registry: StoredValue<Registry<String>>,
}

impl TreeContext {
	fn new() -> Self {
		let opened = ExpansionState::new()
			.open_all(&[Section::MainFamily.key(), Section::OtherMembers.key()]);
		Self {
			expansion: RwSignal::new(opened),
			search: RwSignal::new(String::new()),
			selected: RwSignal::new(None),
			registry: StoredValue::new(Registry::default()),
		}
	}

	fn host(self) -> DomHost {
		DomHost {
			expansion: self.expansion,
			selected: self.selected,
			registry: self.registry,
		}
	}

	pub fn is_open(&self, key: &PathKey) -> bool {
		self.expansion.with(|state| state.get(key))
	}

	pub fn toggle(&self, key: &PathKey) {
		let next = self.expansion.with_untracked(|state| state.toggle(key));
		self.expansion.set(next);
	}

	fn open_signal(self, key: PathKey) -> Signal<bool> {
		Signal::derive(move || self.is_open(&key))
	}

	fn toggle_callback(self, key: PathKey) -> Callback<()> {
		Callback::new(move |_| self.toggle(&key))
	}
}

fn use_tree() -> TreeContext {
	expect_context::<TreeContext>()
}

/// Name with the current search term marked.
#[component]
fn Highlighted(#[prop(into)] text: String) -> impl IntoView {
	let tree = use_tree();
	move || {
		tree.search.with(|term| {
			highlight_segments(&text, term)
				.into_iter()
				.map(|(part, hit)| {
					view! { <span class={if hit { "search-match" } else { "" }}>{part}</span> }
				})
				.collect_view()
		})
	}
}

/// A person card. Registers its DOM id so jump-to-person can find it.
#[component]
pub fn PersonCard(#[prop(into)] name: String, #[prop(into)] relationship: String) -> impl IntoView {
	let tree = use_tree();
	let id = format!("person-{}", NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed));

	let (name_reg, id_reg) = (name.clone(), id.clone());
	Effect::new(move |_| {
		tree.registry
			.update_value(|registry| registry.register(name_reg.clone(), id_reg.clone()));
	});

	let name_sel = name.clone();
	let class = move || {
		if tree.selected.with(|selected| selected.as_deref() == Some(name_sel.as_str())) {
			"person-card selected"
		} else {
			"person-card"
		}
	};

	view! {
		<div id=id class=class>
			<div class="person-avatar">"👤"</div>
			<div class="person-text">
				<h3 class="person-name">
					<Highlighted text=name />
				</h3>
				<p class="person-relationship">{relationship}</p>
			</div>
		</div>
	}
}

/// Trigger button plus content that is only mounted while open.
#[component]
pub fn Collapsible(
	#[prop(into)] open: Signal<bool>,
	#[prop(into)] on_toggle: Callback<()>,
	#[prop(into)] label: Signal<String>,
	children: ChildrenFn,
) -> impl IntoView {
	view! {
		<div class="collapsible">
			<button class="collapsible-trigger" on:click=move |_| on_toggle.run(())>
				<span class="chevron">{move || if open.get() { "▴" } else { "▾" }}</span>
				{move || label.get()}
			</button>
			<Show when=move || open.get()>
				<div class="collapsible-content">{children()}</div>
			</Show>
		</div>
	}
}

/// One person slot, recursing into its family when it has one.
#[component]
pub fn FamilyNodeView(
	node: PersonRef,
	#[prop(into)] relationship: String,
	prefix: PathKey,
) -> AnyView {
	let (name, spouse, co_spouses, children, region) = match layout(&node, &prefix) {
		NodeLayout::Leaf { name } => {
			return view! { <PersonCard name=name relationship=relationship /> }.into_any();
		}
		NodeLayout::Branch {
			name,
			spouse,
			co_spouses,
			children,
			region,
		} => (name, spouse, co_spouses, children, region),
	};

	let tree = use_tree();
	let open = tree.open_signal(region.clone());
	let label = Signal::derive(move || family_label(open.get()).to_string());
	let on_toggle = tree.toggle_callback(region.clone());

	view! {
		<div class="family-node">
			<PersonCard name=name relationship=relationship />
			<Collapsible open=open label=label on_toggle=on_toggle>
				<div class="family-node-content">
					{spouse.clone().map(|wife| view! { <PersonCard name=wife relationship=WIFE /> })}
					{co_spouses
						.iter()
						.map(|co_spouse| {
							view! {
								<PersonCard name=co_spouse.name.clone() relationship=WIFE />
								<ChildRow people=co_spouse.children.clone() prefix=region.clone() />
							}
						})
						.collect_view()}
					<ChildRow people=children.clone() prefix=region.clone() />
				</div>
			</Collapsible>
		</div>
	}
	.into_any()
}

/// Children side by side, each keyed under `prefix`.
#[component]
fn ChildRow(people: Vec<PersonRef>, prefix: PathKey) -> impl IntoView {
	(!people.is_empty()).then(|| {
		view! {
			<div class="children-row">
				{people
					.into_iter()
					.map(|child| {
						view! { <FamilyNodeView node=child relationship=CHILD prefix=prefix.clone() /> }
					})
					.collect_view()}
			</div>
		}
	})
}

/// A wife card with her children behind a "Show Children" toggle.
#[component]
fn SpouseFamily(spouse: Spouse, region: PathKey) -> impl IntoView {
	let tree = use_tree();
	let open = tree.open_signal(region.clone());
	let label = Signal::derive(move || children_label(open.get()).to_string());
	let on_toggle = tree.toggle_callback(region.clone());
	let Spouse { name, children } = spouse;

	view! {
		<div class="spouse-family">
			<PersonCard name=name relationship=WIFE />
			<Collapsible open=open label=label on_toggle=on_toggle>
				{if children.is_empty() {
					view! { <div class="no-children">"No children listed."</div> }.into_any()
				} else {
					view! { <ChildRow people=children.clone() prefix=region.clone() /> }.into_any()
				}}
			</Collapsible>
		</div>
	}
}

/// The head's wives, behind one "Wives (n)" toggle.
#[component]
fn WivesSection(wives: Vec<Spouse>) -> impl IntoView {
	let tree = use_tree();
	let key = Section::MainFamilyWives.key();
	let open = tree.open_signal(key.clone());
	let count = wives.len();
	let label = Signal::derive(move || wives_label(count));
	let on_toggle = tree.toggle_callback(key);

	view! {
		<div class="wives-section">
			<Collapsible open=open label=label on_toggle=on_toggle>
				{wives
					.iter()
					.map(|wife| {
						let region = PathKey::new().child(wife.name.as_str());
						view! { <SpouseFamily spouse=wife.clone() region=region /> }
					})
					.collect_view()}
			</Collapsible>
		</div>
	}
}

/// A sibling of the head with his wife or wives and children.
#[component]
fn MemberFamily(index: usize, member: FamilyNode) -> impl IntoView {
	let FamilyNode {
		name,
		wife,
		wives,
		children,
		relationship,
	} = member;
	let relationship = relationship.unwrap_or_else(|| "Family Member".to_string());

	let tree = use_tree();
	let region = PathKey::sibling(index, None);
	let open = tree.open_signal(region.clone());
	let label = Signal::derive(move || children_label(open.get()).to_string());
	let on_toggle = tree.toggle_callback(region.clone());
	let direct_children = (!children.is_empty()).then(move || {
		view! {
			<Collapsible open=open label=label on_toggle=on_toggle>
				<ChildRow people=children.clone() prefix=region.clone() />
			</Collapsible>
		}
	});

	view! {
		<div class="member-family">
			<PersonCard name=name relationship=relationship />
			<div class="member-relations">
				{wife.map(|wife| view! { <PersonCard name=wife relationship=WIFE /> })}
				{wives
					.into_iter()
					.enumerate()
					.map(|(j, spouse)| {
						view! { <SpouseFamily spouse=spouse region=PathKey::sibling(index, Some(j)) /> }
					})
					.collect_view()}
				{direct_children}
			</div>
		</div>
	}
}

/// A titled card whose body collapses with a top-level section key. The
/// optional head card stays visible while collapsed.
#[component]
fn SectionCard(
	#[prop(into)] title: String,
	section: Section,
	#[prop(optional, into)] head: Option<String>,
	children: ChildrenFn,
) -> impl IntoView {
	let tree = use_tree();
	let key = section.key();
	let open = tree.open_signal(key.clone());

	view! {
		<section class="section-card">
			<header class="section-header">
				<h2>{title}</h2>
				<button class="section-toggle" on:click=move |_| tree.toggle(&key)>
					{move || if open.get() { "▴" } else { "▾" }}
				</button>
			</header>
			{head.map(|name| view! { <PersonCard name=name relationship="Family Head" /> })}
			<Show when=move || open.get()>
				<div class="section-body">{children()}</div>
			</Show>
		</section>
	}
}

/// The browsable tree with search and jump-to-person.
#[component]
pub fn FamilyTree(data: Arc<FamilyDataset>, #[prop(optional)] config: TreeConfig) -> impl IntoView {
	let tree = TreeContext::new();
	provide_context(tree);

	let controller = StoredValue::new_local(SelectionController::new(
		data.clone(),
		tree.host(),
		config,
	));
	let names = flatten(&data);
	let results = move || {
		tree.search.with(|term| {
			filter_names(&names, term).map(|found| {
				found.into_iter().map(str::to_string).collect::<Vec<_>>()
			})
		})
	};

	let head = data.main_family.name.clone();
	let head_title = format!("{}'s Family", short_name(&head));
	let siblings_title = format!("{}'s Siblings", short_name(&head));
	let wives = data.main_family.wives.clone();
	let members = data.other_family_members.clone();
	let style = config.validated().transition_style();

	view! {
		<div class="family-tree" style=style>
		<section class="search-card">
			<h2>"Search Family Members"</h2>
			<input
				type="text"
				placeholder="Search by name..."
				prop:value=move || tree.search.get()
				on:input=move |ev| tree.search.set(event_target_value(&ev))
			/>
			{move || {
				results()
					.map(|found| {
						view! {
							<div class="search-results">
								<h3>{format!("Search Results ({} found)", found.len())}</h3>
								<div class="results-grid">
									{found
										.into_iter()
										.map(|name| {
											let text = name.clone();
											view! {
												<button
													class="search-result"
													on:click=move |_| {
														controller.with_value(|c| c.select(&name))
													}
												>
													<Highlighted text=text />
												</button>
											}
										})
										.collect_view()}
								</div>
							</div>
						}
					})
			}}
		</section>

		<SectionCard title=head_title section=Section::MainFamily head=head>
			{(!wives.is_empty()).then(|| view! { <WivesSection wives=wives.clone() /> })}
		</SectionCard>

		<SectionCard title=siblings_title section=Section::OtherMembers>
			<div class="other-members">
				{members
					.iter()
					.enumerate()
					.map(|(i, member)| view! { <MemberFamily index=i member=member.clone() /> })
					.collect_view()}
			</div>
		</SectionCard>

		<section class="future-generations">
			<h3>"Future Generations"</h3>
			<p>"This section is ready for additional family members and generations"</p>
		</section>
		</div>
	}
}

/// "Ahmed Kutty (Narimukkukkil Ayi Mutti)" -> "Ahmed Kutty".
fn short_name(name: &str) -> &str {
	name.split(" (").next().unwrap_or(name).trim()
}
