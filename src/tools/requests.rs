//! Typed tool requests and the validators producing them.
//!
//! Each validator checks presence of its whole required set before narrowing
//! any field, so a caller omitting a field sees "x is required" rather than a
//! type error. Unknown keys are ignored.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::arguments::ToolArguments;
use super::validation::check_url;
use crate::error::Result;

/// Every tool the server exposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    GetCardsByListId,
    GetLists,
    GetRecentActivity,
    AddCardToList,
    UpdateCardDetails,
    ArchiveCard,
    AddListToBoard,
    ArchiveList,
    GetMyCards,
    MoveCard,
    AttachImageToCard,
    ListBoards,
    SetActiveBoard,
    ListWorkspaces,
    SetActiveWorkspace,
    ListBoardsInWorkspace,
    GetActiveBoardInfo,
    GetBoardMembers,
    AssignMemberToCard,
    RemoveMemberFromCard,
    GetBoardLabels,
    CreateLabel,
    UpdateLabel,
    DeleteLabel,
    GetCardHistory,
}

impl Operation {
    /// Tool name as advertised over MCP.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Fields whose absence fails validation.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::GetCardsByListId | Self::ArchiveList => &["listId"],
            Self::AddCardToList => &["listId", "name"],
            Self::UpdateCardDetails
            | Self::ArchiveCard
            | Self::GetCardHistory => &["cardId"],
            Self::AddListToBoard | Self::CreateLabel => &["name"],
            Self::MoveCard => &["cardId", "listId"],
            Self::AttachImageToCard => &["cardId", "imageUrl"],
            Self::SetActiveBoard => &["boardId"],
            Self::SetActiveWorkspace | Self::ListBoardsInWorkspace => &["workspaceId"],
            Self::AssignMemberToCard | Self::RemoveMemberFromCard => &["cardId", "memberId"],
            Self::UpdateLabel | Self::DeleteLabel => &["labelId"],
            Self::GetLists
            | Self::GetRecentActivity
            | Self::GetMyCards
            | Self::ListBoards
            | Self::ListWorkspaces
            | Self::GetActiveBoardInfo
            | Self::GetBoardMembers
            | Self::GetBoardLabels => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCardsByListRequest {
    pub board_id: Option<String>,
    pub list_id: String,
}

/// Shared shape of requests scoped to a board and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardScopedRequest {
    pub board_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRecentActivityRequest {
    pub board_id: Option<String>,
    pub limit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardRequest {
    pub board_id: Option<String>,
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub board_id: Option<String>,
    pub card_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveCardRequest {
    pub board_id: Option<String>,
    pub card_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddListRequest {
    pub board_id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveListRequest {
    pub board_id: Option<String>,
    pub list_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub board_id: Option<String>,
    pub card_id: String,
    pub list_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachImageRequest {
    pub board_id: Option<String>,
    pub card_id: String,
    pub image_url: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveBoardRequest {
    pub board_id: String,
}

/// Request naming a workspace; used by both `set_active_workspace` and
/// `list_boards_in_workspace`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    pub workspace_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMemberRequest {
    pub board_id: Option<String>,
    pub card_id: String,
    pub member_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelRequest {
    pub board_id: Option<String>,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabelRequest {
    pub board_id: Option<String>,
    pub label_id: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLabelRequest {
    pub board_id: Option<String>,
    pub label_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCardHistoryRequest {
    pub board_id: Option<String>,
    pub card_id: String,
    pub limit: Option<f64>,
    pub filter: Option<String>,
}

/// A validated request, one variant per [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", content = "params", rename_all = "snake_case")]
pub enum TrelloRequest {
    GetCardsByListId(GetCardsByListRequest),
    GetLists(BoardScopedRequest),
    GetRecentActivity(GetRecentActivityRequest),
    AddCardToList(AddCardRequest),
    UpdateCardDetails(UpdateCardRequest),
    ArchiveCard(ArchiveCardRequest),
    AddListToBoard(AddListRequest),
    ArchiveList(ArchiveListRequest),
    GetMyCards,
    MoveCard(MoveCardRequest),
    AttachImageToCard(AttachImageRequest),
    ListBoards,
    SetActiveBoard(SetActiveBoardRequest),
    ListWorkspaces,
    SetActiveWorkspace(WorkspaceRequest),
    ListBoardsInWorkspace(WorkspaceRequest),
    GetActiveBoardInfo,
    GetBoardMembers(BoardScopedRequest),
    AssignMemberToCard(CardMemberRequest),
    RemoveMemberFromCard(CardMemberRequest),
    GetBoardLabels(BoardScopedRequest),
    CreateLabel(CreateLabelRequest),
    UpdateLabel(UpdateLabelRequest),
    DeleteLabel(DeleteLabelRequest),
    GetCardHistory(GetCardHistoryRequest),
}

impl TrelloRequest {
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetCardsByListId(_) => Operation::GetCardsByListId,
            Self::GetLists(_) => Operation::GetLists,
            Self::GetRecentActivity(_) => Operation::GetRecentActivity,
            Self::AddCardToList(_) => Operation::AddCardToList,
            Self::UpdateCardDetails(_) => Operation::UpdateCardDetails,
            Self::ArchiveCard(_) => Operation::ArchiveCard,
            Self::AddListToBoard(_) => Operation::AddListToBoard,
            Self::ArchiveList(_) => Operation::ArchiveList,
            Self::GetMyCards => Operation::GetMyCards,
            Self::MoveCard(_) => Operation::MoveCard,
            Self::AttachImageToCard(_) => Operation::AttachImageToCard,
            Self::ListBoards => Operation::ListBoards,
            Self::SetActiveBoard(_) => Operation::SetActiveBoard,
            Self::ListWorkspaces => Operation::ListWorkspaces,
            Self::SetActiveWorkspace(_) => Operation::SetActiveWorkspace,
            Self::ListBoardsInWorkspace(_) => Operation::ListBoardsInWorkspace,
            Self::GetActiveBoardInfo => Operation::GetActiveBoardInfo,
            Self::GetBoardMembers(_) => Operation::GetBoardMembers,
            Self::AssignMemberToCard(_) => Operation::AssignMemberToCard,
            Self::RemoveMemberFromCard(_) => Operation::RemoveMemberFromCard,
            Self::GetBoardLabels(_) => Operation::GetBoardLabels,
            Self::CreateLabel(_) => Operation::CreateLabel,
            Self::UpdateLabel(_) => Operation::UpdateLabel,
            Self::DeleteLabel(_) => Operation::DeleteLabel,
            Self::GetCardHistory(_) => Operation::GetCardHistory,
        }
    }
}

/// Narrow `args` into the typed request for `operation`.
pub fn validate(operation: Operation, args: &ToolArguments) -> Result<TrelloRequest> {
    args.require(operation.required_fields())?;

    let request = match operation {
        Operation::GetCardsByListId => TrelloRequest::GetCardsByListId(get_cards_by_list(args)?),
        Operation::GetLists => TrelloRequest::GetLists(board_scoped(args)?),
        Operation::GetRecentActivity => TrelloRequest::GetRecentActivity(recent_activity(args)?),
        Operation::AddCardToList => TrelloRequest::AddCardToList(add_card(args)?),
        Operation::UpdateCardDetails => TrelloRequest::UpdateCardDetails(update_card(args)?),
        Operation::ArchiveCard => TrelloRequest::ArchiveCard(archive_card(args)?),
        Operation::AddListToBoard => TrelloRequest::AddListToBoard(add_list(args)?),
        Operation::ArchiveList => TrelloRequest::ArchiveList(archive_list(args)?),
        Operation::GetMyCards => TrelloRequest::GetMyCards,
        Operation::MoveCard => TrelloRequest::MoveCard(move_card(args)?),
        Operation::AttachImageToCard => TrelloRequest::AttachImageToCard(attach_image(args)?),
        Operation::ListBoards => TrelloRequest::ListBoards,
        Operation::SetActiveBoard => TrelloRequest::SetActiveBoard(set_active_board(args)?),
        Operation::ListWorkspaces => TrelloRequest::ListWorkspaces,
        Operation::SetActiveWorkspace => TrelloRequest::SetActiveWorkspace(workspace(args)?),
        Operation::ListBoardsInWorkspace => {
            TrelloRequest::ListBoardsInWorkspace(workspace(args)?)
        }
        Operation::GetActiveBoardInfo => TrelloRequest::GetActiveBoardInfo,
        Operation::GetBoardMembers => TrelloRequest::GetBoardMembers(board_scoped(args)?),
        Operation::AssignMemberToCard => TrelloRequest::AssignMemberToCard(card_member(args)?),
        Operation::RemoveMemberFromCard => {
            TrelloRequest::RemoveMemberFromCard(card_member(args)?)
        }
        Operation::GetBoardLabels => TrelloRequest::GetBoardLabels(board_scoped(args)?),
        Operation::CreateLabel => TrelloRequest::CreateLabel(create_label(args)?),
        Operation::UpdateLabel => TrelloRequest::UpdateLabel(update_label(args)?),
        Operation::DeleteLabel => TrelloRequest::DeleteLabel(delete_label(args)?),
        Operation::GetCardHistory => TrelloRequest::GetCardHistory(card_history(args)?),
    };
    Ok(request)
}

fn board_id(args: &ToolArguments) -> Result<Option<String>> {
    args.optional_string("boardId")
}

fn board_scoped(args: &ToolArguments) -> Result<BoardScopedRequest> {
    Ok(BoardScopedRequest {
        board_id: board_id(args)?,
    })
}

fn get_cards_by_list(args: &ToolArguments) -> Result<GetCardsByListRequest> {
    Ok(GetCardsByListRequest {
        board_id: board_id(args)?,
        list_id: args.string("listId")?,
    })
}

fn recent_activity(args: &ToolArguments) -> Result<GetRecentActivityRequest> {
    Ok(GetRecentActivityRequest {
        board_id: board_id(args)?,
        limit: args.optional_number("limit")?,
    })
}

fn add_card(args: &ToolArguments) -> Result<AddCardRequest> {
    Ok(AddCardRequest {
        board_id: board_id(args)?,
        list_id: args.string("listId")?,
        name: args.string("name")?,
        description: args.optional_string("description")?,
        due_date: args.optional_string("dueDate")?,
        labels: args.optional_string_array("labels")?,
    })
}

fn update_card(args: &ToolArguments) -> Result<UpdateCardRequest> {
    Ok(UpdateCardRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
        name: args.optional_string("name")?,
        description: args.optional_string("description")?,
        due_date: args.optional_string("dueDate")?,
        labels: args.optional_string_array("labels")?,
    })
}

fn archive_card(args: &ToolArguments) -> Result<ArchiveCardRequest> {
    Ok(ArchiveCardRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
    })
}

fn add_list(args: &ToolArguments) -> Result<AddListRequest> {
    Ok(AddListRequest {
        board_id: board_id(args)?,
        name: args.string("name")?,
    })
}

fn archive_list(args: &ToolArguments) -> Result<ArchiveListRequest> {
    Ok(ArchiveListRequest {
        board_id: board_id(args)?,
        list_id: args.string("listId")?,
    })
}

fn move_card(args: &ToolArguments) -> Result<MoveCardRequest> {
    Ok(MoveCardRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
        list_id: args.string("listId")?,
    })
}

fn attach_image(args: &ToolArguments) -> Result<AttachImageRequest> {
    // The URL is checked before any other field.
    let image_url = args.string("imageUrl")?;
    check_url(&image_url, "imageUrl")?;

    Ok(AttachImageRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
        image_url,
        name: args.optional_string("name")?,
    })
}

fn set_active_board(args: &ToolArguments) -> Result<SetActiveBoardRequest> {
    Ok(SetActiveBoardRequest {
        board_id: args.string("boardId")?,
    })
}

fn workspace(args: &ToolArguments) -> Result<WorkspaceRequest> {
    Ok(WorkspaceRequest {
        workspace_id: args.string("workspaceId")?,
    })
}

fn card_member(args: &ToolArguments) -> Result<CardMemberRequest> {
    Ok(CardMemberRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
        member_id: args.string("memberId")?,
    })
}

fn create_label(args: &ToolArguments) -> Result<CreateLabelRequest> {
    Ok(CreateLabelRequest {
        board_id: board_id(args)?,
        name: args.string("name")?,
        color: args.optional_string("color")?,
    })
}

fn update_label(args: &ToolArguments) -> Result<UpdateLabelRequest> {
    Ok(UpdateLabelRequest {
        board_id: board_id(args)?,
        label_id: args.string("labelId")?,
        name: args.optional_string("name")?,
        color: args.optional_string("color")?,
    })
}

fn delete_label(args: &ToolArguments) -> Result<DeleteLabelRequest> {
    Ok(DeleteLabelRequest {
        board_id: board_id(args)?,
        label_id: args.string("labelId")?,
    })
}

fn card_history(args: &ToolArguments) -> Result<GetCardHistoryRequest> {
    Ok(GetCardHistoryRequest {
        board_id: board_id(args)?,
        card_id: args.string("cardId")?,
        limit: args.optional_number("limit")?,
        filter: args.optional_string("filter")?,
    })
}
