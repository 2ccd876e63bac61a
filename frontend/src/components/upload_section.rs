use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::workflow::UploadPhase;

use super::utils::{debounce, render_error_banner, render_spinner};
use crate::dashboard::{Dashboard, Msg};

pub fn render_upload_section(model: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let submitting = model.workflow.phase() == UploadPhase::Submitting;

    html! {
        <div class="upload-section">
            <h3>{"Upload Skin Image"}</h3>
            <p class="section-subtitle">
                {"Upload a clear photo of the affected skin area for analysis"}
            </p>
            { render_error_banner(model.workflow.error()) }
            {
                if let Some(candidate) = model.workflow.candidate() {
                    render_preview(model, ctx, candidate.preview_url(), submitting)
                } else {
                    render_file_input_area(ctx)
                }
            }
        </div>
    }
}

fn render_file_input_area(ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input
            .files()
            .and_then(|files| files.item(0))
            .map(GlooFile::from);

        // Reset so re-selecting the same file fires another change event.
        input.set_value("");
        Msg::FileChosen(file)
    });

    let trigger_file_input = Callback::from(|_: ()| {
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />
            <div
                class="upload-area"
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Click to upload image"}</p>
                    <p class="file-types">{"PNG, JPG or JPEG (Max 16 MB)"}</p>
                </div>
            </div>
        </>
    }
}

fn render_preview(
    model: &Dashboard,
    ctx: &Context<Dashboard>,
    preview_url: String,
    submitting: bool,
) -> Html {
    let link = ctx.link();
    let file_name = model
        .workflow
        .candidate()
        .map(|c| c.file_name())
        .unwrap_or_default();

    html! {
        <div class="preview-container">
            <div class="preview-frame">
                <img
                    class="image-preview"
                    src={preview_url}
                    alt={format!("Preview of {file_name}")}
                />
                <button
                    class="remove-btn"
                    title="Clear selection"
                    disabled={submitting}
                    onclick={link.callback(|_| Msg::ClearSelection)}
                >
                    <i class="fa-solid fa-times"></i>
                </button>
            </div>
            <button
                class="analyze-btn"
                disabled={submitting}
                onclick={link.callback(|_| Msg::Submit)}
            >
                {
                    if submitting {
                        render_spinner("Analyzing Image...")
                    } else {
                        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Image"}</> }
                    }
                }
            </button>
        </div>
    }
}
