//! Authenticated dashboard: composes the upload workflow, results display,
//! history list, and stats cards over the API client.

use gloo_file::{File as GlooFile, ObjectUrl};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::fetch::FetchSequencer;
use shared::workflow::{CandidateInfo, UploadWorkflow};
use shared::{HistoryEntry, PredictionResponse, ProfileUser, StatsSnapshot};

use crate::api::{ApiClient, ApiError};
use crate::auth::AuthClient;
use crate::components::{header, history, results, stats, upload_section, utils};
use crate::config;

/// A selected, validated-or-not file pending upload, with its local preview.
pub struct Candidate {
    file: GlooFile,
    preview: ObjectUrl,
    media_type: String,
    byte_size: u64,
}

impl Candidate {
    pub fn new(file: GlooFile) -> Self {
        let media_type = file.raw_mime_type();
        let byte_size = file.size();
        let preview = ObjectUrl::from(file.clone());
        Self {
            file,
            preview,
            media_type,
            byte_size,
        }
    }

    pub fn file(&self) -> &GlooFile {
        &self.file
    }

    pub fn file_name(&self) -> String {
        self.file.name()
    }

    pub fn preview_url(&self) -> String {
        self.preview.to_string()
    }
}

impl CandidateInfo for Candidate {
    fn media_type(&self) -> &str {
        &self.media_type
    }

    fn byte_size(&self) -> u64 {
        self.byte_size
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upload,
    History,
}

pub enum Msg {
    // Upload workflow
    FileChosen(Option<GlooFile>),
    ClearSelection,
    Submit,
    UploadFinished(Result<PredictionResponse, ApiError>),

    // Dashboard data
    ProfileFetched(Result<ProfileUser, ApiError>),
    HistoryFetched(u64, Result<Vec<HistoryEntry>, ApiError>),
    StatsFetched(u64, Result<StatsSnapshot, ApiError>),
    Refresh,

    // Chrome
    SetTab(Tab),
    SignOut,
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub api: ApiClient,
    pub auth: AuthClient,
}

pub struct Dashboard {
    pub(crate) workflow: UploadWorkflow<Candidate>,
    /// Selection/validation errors shown near the upload control. Upload
    /// failures live in the workflow itself.
    pub(crate) banner: Option<String>,
    pub(crate) profile: Option<ProfileUser>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) stats: Option<StatsSnapshot>,
    pub(crate) tab: Tab,
    history_seq: FetchSequencer,
    stats_seq: FetchSequencer,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut dashboard = Self {
            workflow: UploadWorkflow::new(config::MAX_UPLOAD_BYTES),
            banner: None,
            profile: None,
            history: Vec::new(),
            stats: None,
            tab: Tab::Upload,
            history_seq: FetchSequencer::new(),
            stats_seq: FetchSequencer::new(),
        };
        // Independent fetches: one failing must not block the others.
        dashboard.fetch_profile(ctx);
        dashboard.fetch_history(ctx);
        dashboard.fetch_stats(ctx);
        dashboard
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(Some(file)) => {
                match self.workflow.select(Candidate::new(file)) {
                    Ok(()) => self.banner = None,
                    Err(e) => self.banner = Some(e.to_string()),
                }
                true
            }
            Msg::FileChosen(None) => {
                self.banner = Some("No valid image file selected.".to_string());
                true
            }
            Msg::ClearSelection => {
                self.workflow.clear();
                self.banner = None;
                true
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::UploadFinished(Ok(resp)) => {
                self.workflow.complete(resp);
                // Aggregates are backend-computed; re-fetch instead of
                // updating locally.
                self.fetch_history(ctx);
                self.fetch_stats(ctx);
                true
            }
            Msg::UploadFinished(Err(e)) => {
                log::warn!("Upload failed: {e}");
                self.workflow.fail(e.to_string());
                true
            }
            Msg::ProfileFetched(Ok(profile)) => {
                self.profile = Some(profile);
                true
            }
            Msg::ProfileFetched(Err(e)) => {
                log::warn!("Failed to fetch profile: {e}");
                false
            }
            Msg::HistoryFetched(epoch, result) => {
                if !self.history_seq.is_current(epoch) {
                    return false;
                }
                match result {
                    Ok(entries) => {
                        self.history = entries;
                        true
                    }
                    Err(e) => {
                        log::warn!("Failed to fetch history: {e}");
                        false
                    }
                }
            }
            Msg::StatsFetched(epoch, result) => {
                if !self.stats_seq.is_current(epoch) {
                    return false;
                }
                match result {
                    Ok(snapshot) => {
                        self.stats = Some(snapshot);
                        true
                    }
                    Err(e) => {
                        log::warn!("Failed to fetch stats: {e}");
                        false
                    }
                }
            }
            Msg::Refresh => {
                self.fetch_history(ctx);
                self.fetch_stats(ctx);
                false
            }
            Msg::SetTab(tab) => {
                self.tab = tab;
                true
            }
            Msg::SignOut => {
                // The route guard observes the session change and swaps the
                // view; nothing to tear down here.
                ctx.props().auth.sign_out();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="dashboard">
                { header::render_header(self, ctx) }
                <main class="dashboard-content">
                    { stats::render_stats_cards(self) }
                    { self.render_tabs(ctx) }
                    {
                        match self.tab {
                            Tab::Upload => html! {
                                <>
                                    { upload_section::render_upload_section(self, ctx) }
                                    { utils::render_error_banner(self.banner.as_deref()) }
                                    { results::render_results(self) }
                                </>
                            },
                            Tab::History => history::render_history(self, ctx),
                        }
                    }
                </main>
            </div>
        }
    }
}

impl Dashboard {
    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        // begin_submit is the re-entrancy guard: while a request is in
        // flight it returns None and no second request is issued.
        let Some(candidate) = self.workflow.begin_submit() else {
            return false;
        };
        let file = candidate.file().clone();
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::UploadFinished(api.upload_image(&file).await));
        });
        true
    }

    fn fetch_profile(&self, ctx: &Context<Self>) {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ProfileFetched(api.get_profile().await));
        });
    }

    fn fetch_history(&mut self, ctx: &Context<Self>) {
        let epoch = self.history_seq.begin();
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::HistoryFetched(epoch, api.get_history().await));
        });
    }

    fn fetch_stats(&mut self, ctx: &Context<Self>) {
        let epoch = self.stats_seq.begin();
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::StatsFetched(epoch, api.get_stats().await));
        });
    }

    fn render_tabs(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab_class = |tab: Tab| {
            classes!("tab-button", (self.tab == tab).then_some("active"))
        };
        html! {
            <div class="tab-bar">
                <button
                    class={tab_class(Tab::Upload)}
                    onclick={link.callback(|_| Msg::SetTab(Tab::Upload))}
                >
                    <i class="fa-solid fa-upload"></i>{" Upload Image"}
                </button>
                <button
                    class={tab_class(Tab::History)}
                    onclick={link.callback(|_| Msg::SetTab(Tab::History))}
                >
                    <i class="fa-solid fa-clock-rotate-left"></i>{" History"}
                </button>
            </div>
        }
    }
}
