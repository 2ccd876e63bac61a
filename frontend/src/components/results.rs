use yew::prelude::*;

use shared::display::{DetectionView, ResultView};

use crate::config;
use crate::dashboard::Dashboard;

/// Display-only rendering of the last prediction result. All mapping
/// (class names, severity tiers, urgency) happens in `shared::display`.
pub fn render_results(model: &Dashboard) -> Html {
    let Some(response) = model.workflow.result() else {
        return html! {};
    };

    match ResultView::from_response(response) {
        ResultView::Empty { message } => html! {
            <div class="results-container empty-result">
                <i class="fa-solid fa-circle-check"></i>
                <p>{ message }</p>
            </div>
        },
        ResultView::Findings {
            message,
            primary,
            detections,
            urgent,
            visualization_url,
            chart_url,
        } => html! {
            <div class="results-container">
                <div class="result-header">
                    <h4>{"Analysis Complete"}</h4>
                    { if message.is_empty() { html!{} } else { html! { <p>{ message }</p> } } }
                    {
                        if let Some(primary) = primary {
                            html! {
                                <div class="primary-detection">
                                    <p class="label">{"Primary Detection"}</p>
                                    <p class="disease">{ primary.disease }</p>
                                    <p class="confidence">
                                        { format!("Confidence: {:.1}%", primary.confidence * 100.0) }
                                    </p>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
                { render_urgency_notice(urgent) }
                <div class="detections">
                    <h4>
                        <i class="fa-solid fa-chart-bar"></i>
                        { format!(" All Detections ({})", detections.len()) }
                    </h4>
                    { for detections.iter().map(render_detection) }
                </div>
                { render_artifacts(visualization_url, chart_url) }
                <div class="disclaimer">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <p>
                        <strong>{"Medical Disclaimer: "}</strong>
                        {"This analysis is for informational purposes only and should not \
                          replace professional medical advice. Please consult a dermatologist \
                          for proper diagnosis and treatment."}
                    </p>
                </div>
            </div>
        },
    }
}

fn render_detection(detection: &DetectionView) -> Html {
    let percentage = detection.confidence * 100.0;
    html! {
        <div class={classes!("detection-item", detection.severity.css_class(), detection.urgent.then_some("urgent"))}>
            <div class="detection-label">
                <p class="detection-name">{ &detection.label }</p>
                {
                    if let Some(description) = detection.description {
                        html! { <p class="detection-description">{ description }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <div class="detection-bar-container">
                <div class="detection-bar" style={format!("width: {percentage}%")}></div>
            </div>
            <div class="detection-value">{ format!("{percentage:.1}%") }</div>
        </div>
    }
}

fn render_urgency_notice(urgent: bool) -> Html {
    if urgent {
        html! {
            <div class="urgency-notice">
                <i class="fa-solid fa-triangle-exclamation"></i>
                <p>
                    {"A detection in this scan warrants prompt attention. Please see a \
                      dermatologist as soon as possible."}
                </p>
            </div>
        }
    } else {
        html! {}
    }
}

fn render_artifacts(visualization_url: Option<String>, chart_url: Option<String>) -> Html {
    let artifact = |title: &str, url: Option<String>| {
        url.map_or_else(
            || html! {},
            |url| {
                html! {
                    <div class="artifact-card">
                        <h4>{ title.to_string() }</h4>
                        <img src={format!("{}{url}", config::BACKEND_ORIGIN)} alt={title.to_string()} />
                    </div>
                }
            },
        )
    };

    html! {
        <div class="artifacts">
            { artifact("Detection Visualization", visualization_url) }
            { artifact("Confidence Chart", chart_url) }
        </div>
    }
}
