//! Dashboard Page
//!
//! Main view: month selector plus the chart card for the selected month.

use leptos::*;

use crate::api;
use crate::components::{ChartLegend, CovidChart};
use crate::state::global::{GlobalState, Month};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Refetch whenever the selected month changes
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let month = state_for_effect.selected_month.get();
        let generation = state_for_effect.begin_fetch();

        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_month_records(api::REGION, month).await {
                Ok(records) => {
                    if !state.apply_records(generation, records) {
                        web_sys::console::debug_1(
                            &"Discarding stale timeseries response".into(),
                        );
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch COVID timeseries: {}", e).into(),
                    );
                }
            }

            if state.is_current(generation) {
                state.loading.set(false);
            }
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Daily Cases"</h1>
                <p class="text-gray-400 mt-1">"Confirmed patients per day, 2020"</p>
            </div>

            // Chart card
            <section class="bg-gray-800 rounded-xl p-6">
                // Card header: title plus the labeled month selector
                <div class="flex items-center justify-between flex-wrap gap-4 mb-4">
                    <h2 class="text-xl font-semibold">
                        "COVID Data for " {move || state.selected_month.get().value()}
                    </h2>

                    <label class="flex items-center space-x-2 text-sm text-gray-300">
                        <span>"Select Month:"</span>
                        <MonthSelector />
                    </label>
                </div>

                <div class="border-b border-gray-700 mb-4" />

                <CovidChart />
                <ChartLegend />
            </section>
        </div>
    }
}

/// Month dropdown covering all of 2020
#[component]
fn MonthSelector() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let selected = state.selected_month;

    view! {
        <select
            class="bg-gray-700 border border-gray-600 rounded-lg px-4 py-2 focus:outline-none focus:border-blue-500"
            prop:value=move || selected.get().value()
            on:change=move |ev| {
                if let Some(month) = Month::from_value(&event_target_value(&ev)) {
                    selected.set(month);
                }
            }
        >
            {Month::ALL
                .into_iter()
                .map(|month| {
                    view! {
                        <option
                            value=month.value()
                            selected={month == selected.get_untracked()}
                        >
                            {month.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::state::global::provide_global_state;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_month_selector_renders_in_card_header() {
        mount_to_body(|| {
            provide_global_state();
            view! { <Dashboard /> }
        });

        let document = leptos::document();

        // Title and the labeled dropdown share the chart card
        assert!(document.query_selector("section h2").unwrap().is_some());
        assert!(document
            .query_selector("section label select")
            .unwrap()
            .is_some());

        let label = document.query_selector("section label").unwrap().unwrap();
        assert!(label
            .text_content()
            .unwrap_or_default()
            .contains("Select Month"));
    }
}
