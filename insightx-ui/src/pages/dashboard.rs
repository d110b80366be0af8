//! Dashboard Page
//!
//! Fetches the three aggregates once per mount. Each card falls back to a
//! placeholder when its endpoint failed.

use leptos::*;

use insightx::dashboard::{load_all, DashboardLoader, DashboardView, DATASET_CAPTION};

use crate::components::{DashboardSkeleton, SectionPanel, StatTile};
use crate::state::use_app_state;

/// Dashboard page component
#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = use_app_state().client;
    let loader = create_rw_signal(DashboardLoader::new());

    if let Some(ticket) = loader.try_update(|l| l.begin()) {
        spawn_local(async move {
            let data = load_all(&client).await;
            for endpoint in data.missing() {
                web_sys::console::error_1(
                    &format!("Failed to fetch dashboard {}", endpoint).into(),
                );
            }
            loader.try_update(|l| l.finish(ticket, data));
        });
    }

    on_cleanup(move || {
        loader.try_update(|l| l.cancel());
    });

    let dashboard = create_memo(move |_| loader.with(|l| l.state().view()));

    view! {
        <div class="dashboard">
            <div class="dashboard-header">
                <h1 class="dashboard-title">"Transaction Analytics"</h1>
                <p class="dashboard-subtitle">{DATASET_CAPTION}</p>
            </div>

            {move || match dashboard.get() {
                None => view! { <DashboardSkeleton /> }.into_view(),
                Some(view_model) => view! { <DashboardBody view_model=view_model /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn DashboardBody(view_model: DashboardView) -> impl IntoView {
    let DashboardView {
        stats,
        volume,
        breakdowns,
    } = view_model;

    view! {
        <div class="stats-grid">
            {stats.into_iter().map(|card| view! { <StatTile card=card /> }).collect_view()}
        </div>

        <div class="charts-grid two">
            {volume
                .into_iter()
                .map(|section| view! { <SectionPanel section=section /> })
                .collect_view()}
        </div>

        <div class="charts-grid three">
            {breakdowns
                .into_iter()
                .map(|section| view! { <SectionPanel section=section /> })
                .collect_view()}
        </div>
    }
}
