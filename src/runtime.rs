//! Runtime - drives the update loop and performs repository side effects
//!
//! A [`Session`] owns the model, the keymap and a focus host. Messages go
//! through `update`; the returned [`Cmd`]s are executed here. Repository work
//! runs on spawned tokio tasks and reports back over a channel as messages.
//!
//! After [`Session::close`] any completion still in flight is drained and
//! dropped without touching the model.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::commands::Cmd;
use crate::grid::render::{render_grid, RenderLayout};
use crate::grid::{reconcile, FocusHost, GridViewport};
use crate::keymap::{KeyAction, Keymap, Keystroke};
use crate::messages::{AppMsg, GridMsg, Msg};
use crate::model::AppModel;
use crate::repository::ItemRepository;
use crate::update::update;

/// One mounted grid bound to a repository
pub struct Session<H: FocusHost = GridViewport> {
    model: AppModel,
    repo: Arc<dyn ItemRepository>,
    host: H,
    keymap: Keymap,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
    /// Spawned tasks whose result message has not been received yet
    pending: usize,
    closed: bool,
}

impl<H: FocusHost> Session<H> {
    pub fn new(model: AppModel, repo: Arc<dyn ItemRepository>, host: H, keymap: Keymap) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            model,
            repo,
            host,
            keymap,
            msg_tx,
            msg_rx,
            pending: 0,
            closed: false,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Repository tasks still running
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Mount: request the initial item list
    pub fn start(&mut self) -> bool {
        self.dispatch(Msg::App(AppMsg::Load))
    }

    /// Route a key-down through the keymap, then to the grid
    ///
    /// Returns whether the grid needs a redraw.
    pub fn handle_key(&mut self, keystroke: Keystroke) -> bool {
        if self.closed {
            return false;
        }

        let context = self.model.key_context();
        match self.keymap.handle_keystroke(keystroke, &context) {
            KeyAction::Execute(command) => {
                tracing::debug!("Key {} bound to {}", keystroke, command.display_name());
                let mut redraw = false;
                for msg in command.to_msgs() {
                    redraw |= self.dispatch(msg);
                }
                redraw
            }
            KeyAction::NoMatch => self.dispatch(Msg::Grid(GridMsg::Key(keystroke))),
        }
    }

    /// Run one message through `update` and execute the resulting command
    ///
    /// Returns whether the grid needs a redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        if self.closed {
            tracing::debug!("Session closed, dropping {:?}", msg_kind(&msg));
            return false;
        }

        match update(&mut self.model, msg, &mut self.host) {
            Some(cmd) => {
                let redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                redraw
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::LoadItems { generation } => {
                let repo = Arc::clone(&self.repo);
                let tx = self.msg_tx.clone();
                self.pending += 1;
                tokio::spawn(async move {
                    let result = repo.list_items().await;
                    let _ = tx.send(Msg::App(AppMsg::ItemsLoaded { generation, result }));
                });
            }
            Cmd::SaveItems(plan) => {
                let repo = Arc::clone(&self.repo);
                let tx = self.msg_tx.clone();
                self.pending += 1;
                tokio::spawn(async move {
                    let result = reconcile::execute(&plan, repo.as_ref()).await;
                    let _ = tx.send(Msg::App(AppMsg::SaveCompleted(result)));
                });
            }
            Cmd::Quit => {
                tracing::info!("Quit requested");
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Apply completions that already arrived, without waiting
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.receive(msg);
        }
        needs_redraw
    }

    /// Wait for one repository task to report back and apply its result
    ///
    /// Returns false when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.receive(msg);
                true
            }
            None => false,
        }
    }

    /// Wait until every repository task, including ones started by
    /// completions, has reported back
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    /// Tear down: later completions are dropped without touching the model
    pub fn close(&mut self) {
        if !self.closed {
            tracing::debug!("Closing session with {} tasks in flight", self.pending);
        }
        self.closed = true;
    }

    fn receive(&mut self, msg: Msg) -> bool {
        self.pending = self.pending.saturating_sub(1);
        self.dispatch(msg)
    }
}

impl Session<GridViewport> {
    /// Text rendering of the visible rows and the status line
    pub fn render(&mut self) -> String {
        let total = self.model.grid.model.row_count();
        self.host.clamp_to(total);
        let layout = RenderLayout::from_viewport(&self.host, self.model.config.column_width);
        render_grid(&self.model.grid, &layout)
    }
}

fn msg_kind(msg: &Msg) -> &'static str {
    match msg {
        Msg::Grid(_) => "grid message",
        Msg::App(AppMsg::ItemsLoaded { .. }) => "load result",
        Msg::App(AppMsg::SaveCompleted(_)) => "save result",
        Msg::App(_) => "app message",
    }
}
