use yew::prelude::*;

use crate::dashboard::{Dashboard, Msg};

pub fn render_history(model: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();

    html! {
        <div class="history-section">
            <div class="history-header">
                <h3>{"Scan History"}</h3>
                <button
                    class="refresh-btn"
                    title="Refresh"
                    onclick={link.callback(|_| Msg::Refresh)}
                >
                    <i class="fa-solid fa-rotate"></i>
                </button>
            </div>
            {
                if model.history.is_empty() {
                    html! {
                        <div class="history-empty">
                            <i class="fa-solid fa-clock-rotate-left"></i>
                            <p>{"No scans yet. Upload an image to get started!"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="history-list">
                            { for model.history.iter().map(|entry| {
                                html! {
                                    <div class="history-item" key={entry.id.clone().unwrap_or_else(|| entry.date.clone())}>
                                        <div>
                                            <p class="history-disease">{ &entry.disease }</p>
                                            <p class="history-date">{ &entry.date }</p>
                                        </div>
                                        <div class="history-confidence">
                                            <p>{ format!("{:.1}%", entry.confidence * 100.0) }</p>
                                            <p class="history-confidence-label">{"Confidence"}</p>
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }
            }
        </div>
    }
}
