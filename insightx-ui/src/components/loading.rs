//! Loading Component
//!
//! Skeleton states shown while the dashboard fetches.

use leptos::*;

/// Skeleton loader for cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="stat-card skeleton">
            <div class="skeleton-line short" />
            <div class="skeleton-line tall" />
            <div class="skeleton-line" />
        </div>
    }
}

/// Four card skeletons in the stats grid
#[component]
pub fn DashboardSkeleton() -> impl IntoView {
    view! {
        <div class="stats-grid">
            {(0..4).map(|_| view! { <CardSkeleton /> }).collect_view()}
        </div>
    }
}
