//! Tool definitions advertised to MCP clients.

use strum::IntoEnumIterator;

use super::requests::Operation;
use super::types::ToolParameters;

const BOARD_ID: &str = "ID of the Trello board (uses the active board if not provided)";

/// Label colors accepted by Trello.
pub const LABEL_COLORS: &[&str] = &[
    "green", "yellow", "orange", "red", "purple", "blue", "sky", "lime", "pink", "black",
];

/// A tool's public face: name, description and input schema.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub operation: Operation,
    pub description: &'static str,
    pub parameters: ToolParameters,
}

impl ToolDefinition {
    pub fn name(&self) -> &'static str {
        self.operation.name()
    }
}

/// All tools, in [`Operation`] declaration order.
pub fn all_tools() -> Vec<ToolDefinition> {
    Operation::iter().map(definition).collect()
}

/// Definition of a single tool.
pub fn definition(operation: Operation) -> ToolDefinition {
    let (description, parameters) = match operation {
        Operation::GetCardsByListId => (
            "Fetch cards from a specific Trello list on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("listId", "ID of the Trello list", true)
                .build(),
        ),
        Operation::GetLists => (
            "Retrieve all lists from the specified board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .build(),
        ),
        Operation::GetRecentActivity => (
            "Fetch recent activity on the Trello board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .number("limit", "Number of activities to fetch (default: 10)", false)
                .build(),
        ),
        Operation::AddCardToList => (
            "Add a new card to a specified list on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("listId", "ID of the list to add the card to", true)
                .string("name", "Name of the card", true)
                .string("description", "Description of the card", false)
                .string("dueDate", "Due date for the card (ISO 8601 format)", false)
                .string_array("labels", "Array of label IDs to apply to the card", false)
                .build(),
        ),
        Operation::UpdateCardDetails => (
            "Update an existing card's details on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card to update", true)
                .string("name", "New name for the card", false)
                .string("description", "New description for the card", false)
                .string("dueDate", "New due date for the card (ISO 8601 format)", false)
                .string_array("labels", "New array of label IDs for the card", false)
                .build(),
        ),
        Operation::ArchiveCard => (
            "Send a card to the archive on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card to archive", true)
                .build(),
        ),
        Operation::AddListToBoard => (
            "Add a new list to the specified board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("name", "Name of the new list", true)
                .build(),
        ),
        Operation::ArchiveList => (
            "Send a list to the archive on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("listId", "ID of the list to archive", true)
                .build(),
        ),
        Operation::GetMyCards => (
            "Fetch all cards assigned to the current user",
            ToolParameters::empty(),
        ),
        Operation::MoveCard => (
            "Move a card to a different list, potentially on a different board",
            ToolParameters::object()
                .string(
                    "boardId",
                    "ID of the target board (only needed when moving to another board)",
                    false,
                )
                .string("cardId", "ID of the card to move", true)
                .string("listId", "ID of the target list", true)
                .build(),
        ),
        Operation::AttachImageToCard => (
            "Attach an image to a card directly from a URL on a specific board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card to attach the image to", true)
                .string("imageUrl", "URL of the image to attach", true)
                .string("name", "Optional name for the attachment", false)
                .build(),
        ),
        Operation::ListBoards => (
            "List all boards the user has access to",
            ToolParameters::empty(),
        ),
        Operation::SetActiveBoard => (
            "Set the active board for future operations",
            ToolParameters::object()
                .string("boardId", "ID of the board to set as active", true)
                .build(),
        ),
        Operation::ListWorkspaces => (
            "List all workspaces the user has access to",
            ToolParameters::empty(),
        ),
        Operation::SetActiveWorkspace => (
            "Set the active workspace for future operations",
            ToolParameters::object()
                .string("workspaceId", "ID of the workspace to set as active", true)
                .build(),
        ),
        Operation::ListBoardsInWorkspace => (
            "List all boards in a specific workspace",
            ToolParameters::object()
                .string("workspaceId", "ID of the workspace to list boards from", true)
                .build(),
        ),
        Operation::GetActiveBoardInfo => (
            "Get information about the currently active board",
            ToolParameters::empty(),
        ),
        Operation::GetBoardMembers => (
            "Get all members of a board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .build(),
        ),
        Operation::AssignMemberToCard => (
            "Assign a member to a card",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card", true)
                .string("memberId", "ID of the member to assign", true)
                .build(),
        ),
        Operation::RemoveMemberFromCard => (
            "Remove a member from a card",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card", true)
                .string("memberId", "ID of the member to remove", true)
                .build(),
        ),
        Operation::GetBoardLabels => (
            "Get all labels defined on a board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .build(),
        ),
        Operation::CreateLabel => (
            "Create a new label on a board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("name", "Name of the label", true)
                .string_enum("color", "Color of the label", LABEL_COLORS, false)
                .build(),
        ),
        Operation::UpdateLabel => (
            "Update an existing label's name or color",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("labelId", "ID of the label to update", true)
                .string("name", "New name for the label", false)
                .string_enum("color", "New color for the label", LABEL_COLORS, false)
                .build(),
        ),
        Operation::DeleteLabel => (
            "Delete a label from a board",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("labelId", "ID of the label to delete", true)
                .build(),
        ),
        Operation::GetCardHistory => (
            "Get the history of actions performed on a card",
            ToolParameters::object()
                .string("boardId", BOARD_ID, false)
                .string("cardId", "ID of the card", true)
                .number("limit", "Maximum number of actions to return", false)
                .string(
                    "filter",
                    "Comma-separated action types to include (e.g. updateCard,commentCard)",
                    false,
                )
                .build(),
        ),
    };

    ToolDefinition {
        operation,
        description,
        parameters,
    }
}
