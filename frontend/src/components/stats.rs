use yew::prelude::*;

use crate::dashboard::Dashboard;

/// Aggregate cards above the tabs. Hidden until the first stats fetch
/// resolves; a failed fetch simply leaves this section empty.
pub fn render_stats_cards(model: &Dashboard) -> Html {
    let Some(stats) = &model.stats else {
        return html! {};
    };

    html! {
        <div class="stats-cards">
            <div class="stat-card">
                <i class="fa-solid fa-chart-line"></i>
                <p class="stat-value">{ stats.total_predictions }</p>
                <p class="stat-label">{"Total Scans"}</p>
            </div>
            <div class="stat-card">
                <i class="fa-solid fa-chart-bar"></i>
                <p class="stat-value">{ stats.most_common_count.unwrap_or(0) }</p>
                <p class="stat-label">{"Most Common"}</p>
            </div>
            <div class="stat-card">
                <i class="fa-solid fa-user"></i>
                <p class="stat-value">
                    { stats.most_common_disease.clone().unwrap_or_else(|| "N/A".to_string()) }
                </p>
                <p class="stat-label">{"Top Detection"}</p>
            </div>
        </div>
    }
}
