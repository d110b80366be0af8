//! Dashboard Cards
//!
//! Headline number tiles and horizontal bar breakdowns.

use leptos::*;

use insightx::dashboard::{BarRow, SectionCard, StatCard, PLACEHOLDER};

/// Headline number tile
#[component]
pub fn StatTile(card: StatCard) -> impl IntoView {
    let class = if card.accent { "stat-card accent" } else { "stat-card" };

    view! {
        <div class=class>
            <div class="stat-header">
                <span class="stat-title">{card.title}</span>
                <span class="stat-icon">{card.icon}</span>
            </div>
            <div class="stat-value">{card.value}</div>
            <div class="stat-subtitle">{card.subtitle}</div>
        </div>
    }
}

/// Titled group of bars
#[component]
pub fn SectionPanel(section: SectionCard) -> impl IntoView {
    let color = section.color.css();

    let body = if section.rows.is_empty() {
        view! { <p class="section-empty">{PLACEHOLDER}</p> }.into_view()
    } else {
        section
            .rows
            .into_iter()
            .map(|row| view! { <Bar row=row color=color /> })
            .collect_view()
    };

    view! {
        <section class="section-card">
            <h3 class="section-title">{section.title}</h3>
            <p class="section-subtitle">{section.subtitle}</p>
            <div class="bars">{body}</div>
        </section>
    }
}

#[component]
fn Bar(row: BarRow, color: &'static str) -> impl IntoView {
    let value = row.display_value();
    let style = format!("width: {}%; background: {};", row.percent, color);

    view! {
        <div class="bar-row">
            <span class="bar-label">{row.label}</span>
            <div class="bar-track">
                <div class="bar-fill" style=style />
            </div>
            <span class="bar-value">{value}</span>
        </div>
    }
}
