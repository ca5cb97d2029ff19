mod panels;
mod styles;
mod ui_config;
mod ui_text;

pub(crate) use panels::{
    render_catalog_panel, render_live_feed_panel, render_signal_panel, render_status_panel,
    render_top_panel,
};
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
