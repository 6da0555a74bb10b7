//! Asset list screen state: the fetched rows, the list controller over them,
//! and in-place edits.

use list_core::{ListController, ListPage, ListStateOptions};
use shared::{
    domain::{AssetRow, AssetSortKey},
    error::{DashboardError, ErrorCode},
    forms::AssetEdit,
};

use crate::commands::ScreenCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render,
    Message(String),
    Quit,
}

pub struct AssetsScreen {
    rows: Vec<AssetRow>,
    list: ListController<AssetSortKey>,
}

impl AssetsScreen {
    pub fn new(rows: Vec<AssetRow>, options: ListStateOptions<AssetSortKey>) -> Self {
        Self {
            rows,
            list: ListController::new(options),
        }
    }

    pub fn list(&self) -> &ListController<AssetSortKey> {
        &self.list
    }

    pub fn rows(&self) -> &[AssetRow] {
        &self.rows
    }

    pub fn visible(&self) -> ListPage<AssetRow> {
        self.list.process(&self.rows)
    }

    pub fn handle(&mut self, command: ScreenCommand) -> Result<Outcome, DashboardError> {
        tracing::debug!(?command, "screen command");
        match command {
            ScreenCommand::Filter(text) => self.list.set_filter_text(text),
            ScreenCommand::Sort(key) => self.list.select_sort_key(key),
            ScreenCommand::SortKey(key) => self.list.set_sort_key(key),
            ScreenCommand::Direction(dir) => self.list.set_sort_dir(dir),
            ScreenCommand::Toggle => self.list.toggle_sort_dir(),
            ScreenCommand::PageSize(size) => self.list.set_page_size(size),
            ScreenCommand::LoadMore => {
                if !self.visible().can_load_more() {
                    return Ok(Outcome::Message("All assets are already shown.".into()));
                }
                self.list.load_more();
            }
            ScreenCommand::Reset => self.list.reset(),
            ScreenCommand::Edit {
                id,
                name,
                status,
                score,
            } => {
                let current = self
                    .rows
                    .iter()
                    .find(|row| row.id == id)
                    .ok_or_else(|| DashboardError::new(ErrorCode::NotFound, format!("asset {id} not found")))?;
                let mut edit = AssetEdit::from(current);
                if let Some(name) = name {
                    edit.name = name;
                }
                if let Some(status) = status {
                    edit.status = status;
                }
                if let Some(score) = score {
                    edit.score = score;
                }
                self.rows = edit.apply(&self.rows, &id)?;
                tracing::info!(asset = %id, "asset updated");
                return Ok(Outcome::Message(format!("Updated {id}.")));
            }
            ScreenCommand::Show => {}
            ScreenCommand::Help => return Ok(Outcome::Message(crate::commands::HELP.into())),
            ScreenCommand::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Render)
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
