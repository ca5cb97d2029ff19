use {
    eframe::{
        Frame,
        egui::{Context, Visuals},
    },
    std::{
        sync::{Arc, mpsc},
        time::Duration,
    },
};

use crate::{
    Cli,
    config::TIMING,
    data::{HttpSignalApi, RuntimeTransport, Session, SignalStreamManager},
    engine::{SignalDesk, UserAction},
    ui::{
        UI_CONFIG, render_catalog_panel, render_live_feed_panel, render_signal_panel,
        render_status_panel, render_top_panel,
    },
    utils::now_timestamp_ms,
};

/// Host shell: wires the network layer to the desk, forwards clicks, draws the render model.
pub struct App {
    desk: SignalDesk,
    // Local edit buffer; the desk sees every change but applies it after its own debounce.
    search_text: String,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<Self> {
        setup_custom_visuals(&cc.egui_ctx);

        let session = Session::new(args.init_data.clone());
        if session.is_anonymous() {
            log::warn!("No session credential supplied; running as anonymous session");
        }
        log::info!("Signal server: {}", args.api_base_url);

        let (events_tx, events_rx) = mpsc::channel();
        let api = Arc::new(HttpSignalApi::new(args.api_base_url.as_str(), session.clone())?);
        let transport = RuntimeTransport::new(api, events_tx.clone())?;

        let stream = SignalStreamManager::new(&args.api_base_url, session);
        stream.subscribe(&transport.handle(), events_tx)?;

        let mut desk = SignalDesk::new(Box::new(transport), events_rx);
        desk.start();

        Ok(Self {
            desk,
            search_text: String::new(),
        })
    }

    fn schedule_next_frame(&self, ctx: &Context, now_ms: i64) {
        let wait_ms = self
            .desk
            .next_deadline()
            .map(|deadline| (deadline - now_ms).clamp(0, TIMING.ui_poll_ms))
            .unwrap_or(TIMING.ui_poll_ms);
        ctx.request_repaint_after(Duration::from_millis(wait_ms as u64));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now_ms = now_timestamp_ms();
        self.desk.pump(now_ms);

        let model = self.desk.render_model(now_ms);
        let selected = self.desk.selection().instrument.clone();
        let mut actions: Vec<UserAction> = Vec::new();

        // Side and top panels must be added before the central panel.
        render_top_panel(ctx, &model, &mut self.search_text, &mut actions);
        render_status_panel(ctx, &model);
        render_catalog_panel(ctx, &model, selected.as_ref(), &mut actions);
        render_live_feed_panel(ctx, &model.live_feed, &mut actions);
        render_signal_panel(ctx, &model.signal);

        let acted = !actions.is_empty();
        for action in actions {
            self.desk.apply(action, now_ms);
        }
        if acted {
            ctx.request_repaint();
        } else {
            self.schedule_next_frame(ctx, now_ms);
        }
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
