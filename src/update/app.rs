//! App message handlers (loading, save completion, quit)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Load => {
            let generation = model.next_load_generation();
            model.loading = true;
            Some(Cmd::LoadItems { generation })
        }

        AppMsg::ItemsLoaded { generation, result } => {
            if generation != model.load_generation {
                tracing::debug!(
                    "Discarding stale load result (gen {}, current {})",
                    generation,
                    model.load_generation
                );
                return None;
            }
            model.loading = false;

            match result {
                Ok(items) => {
                    tracing::info!("Loaded {} items", items.len());
                    model.grid.load_error = None;
                    model.grid.apply_items(&items);
                }
                Err(e) => {
                    tracing::error!("Failed to load items: {}", e);
                    model.grid.apply_items(&[]);
                    model.grid.load_error = Some(e.to_string());
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::SaveCompleted(result) => {
            model.grid.save.is_saving = false;
            match result {
                Ok(items) => {
                    // The save's own reload supersedes any list still in flight
                    model.next_load_generation();
                    model.loading = false;
                    model.grid.save.error = None;
                    model.grid.load_error = None;
                    model.grid.apply_items(&items);
                }
                Err(e) => {
                    model.grid.save.error = Some(e.user_message());
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Quit => {
            model.should_quit = true;
            Some(Cmd::Quit)
        }
    }
}
