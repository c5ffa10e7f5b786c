//! Execution of validated requests against Trello.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::TrelloMcpServer;
use crate::context::BoardContext;
use crate::error::Result;
use crate::tools::TrelloRequest;

fn to_value<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

impl TrelloMcpServer {
    /// Run one validated request and return its JSON result.
    pub async fn execute(&self, request: TrelloRequest) -> Result<Value> {
        let ctx = self.context().await;
        let client = &self.client;

        match request {
            TrelloRequest::GetCardsByListId(req) => to_value(client.get_cards_by_list(&req).await?),
            TrelloRequest::GetLists(req) => to_value(client.get_lists(&ctx, &req).await?),
            TrelloRequest::GetRecentActivity(req) => {
                to_value(client.get_recent_activity(&ctx, &req).await?)
            }
            TrelloRequest::AddCardToList(req) => to_value(client.add_card(&req).await?),
            TrelloRequest::UpdateCardDetails(req) => to_value(client.update_card(&req).await?),
            TrelloRequest::ArchiveCard(req) => to_value(client.archive_card(&req).await?),
            TrelloRequest::AddListToBoard(req) => to_value(client.add_list(&ctx, &req).await?),
            TrelloRequest::ArchiveList(req) => to_value(client.archive_list(&req).await?),
            TrelloRequest::GetMyCards => to_value(client.get_my_cards().await?),
            TrelloRequest::MoveCard(req) => to_value(client.move_card(&req).await?),
            TrelloRequest::AttachImageToCard(req) => to_value(client.attach_image(&req).await?),
            TrelloRequest::ListBoards => to_value(client.list_boards().await?),
            TrelloRequest::SetActiveBoard(req) => {
                let board = client.get_board(&req.board_id).await?;
                self.update_context(|ctx| ctx.board_id = Some(board.id.clone()))
                    .await;
                info!(board_id = %board.id, board_name = %board.name, "Active board set");
                Ok(json!({
                    "message": format!("Active board set to {} ({})", board.name, board.id),
                    "board": board,
                }))
            }
            TrelloRequest::ListWorkspaces => to_value(client.list_workspaces().await?),
            TrelloRequest::SetActiveWorkspace(req) => {
                let workspace = client.get_workspace(&req.workspace_id).await?;
                self.update_context(|ctx| ctx.workspace_id = Some(workspace.id.clone()))
                    .await;
                info!(workspace_id = %workspace.id, "Active workspace set");
                Ok(json!({
                    "message": format!(
                        "Active workspace set to {} ({})",
                        workspace.display_name, workspace.id
                    ),
                    "workspace": workspace,
                }))
            }
            TrelloRequest::ListBoardsInWorkspace(req) => {
                to_value(client.list_boards_in_workspace(&req).await?)
            }
            TrelloRequest::GetActiveBoardInfo => {
                let board_id = ctx.resolve_board(None)?;
                let board = client.get_board(board_id).await?;
                Ok(json!({
                    "board": board,
                    "isActive": true,
                    "activeWorkspaceId": ctx.workspace_id,
                }))
            }
            TrelloRequest::GetBoardMembers(req) => {
                to_value(client.get_board_members(&ctx, &req).await?)
            }
            TrelloRequest::AssignMemberToCard(req) => to_value(client.assign_member(&req).await?),
            TrelloRequest::RemoveMemberFromCard(req) => {
                to_value(client.remove_member(&req).await?)
            }
            TrelloRequest::GetBoardLabels(req) => {
                to_value(client.get_board_labels(&ctx, &req).await?)
            }
            TrelloRequest::CreateLabel(req) => to_value(client.create_label(&ctx, &req).await?),
            TrelloRequest::UpdateLabel(req) => to_value(client.update_label(&req).await?),
            TrelloRequest::DeleteLabel(req) => to_value(client.delete_label(&req).await?),
            TrelloRequest::GetCardHistory(req) => to_value(client.get_card_history(&req).await?),
        }
    }

    /// Apply `change` and persist the result, holding the write lock until
    /// the save finishes so the saved context never trails the in-memory one.
    ///
    /// A failed save keeps the in-memory change; it only costs persistence
    /// across restarts.
    async fn update_context(&self, change: impl FnOnce(&mut BoardContext)) {
        let mut ctx = self.context.write().await;
        change(&mut *ctx);

        let store = Arc::clone(&self.store);
        let snapshot = ctx.clone();
        let saved = tokio::task::spawn_blocking(move || store.save(&snapshot)).await;
        match saved {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "Failed to persist board context"),
            Err(err) => warn!(error = %err, "Board context save task failed"),
        }
    }
}
