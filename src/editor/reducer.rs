use std::str::FromStr;

use crate::models::Draft;

use super::EditorError;

/// A single change to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    SetTitle(String),
    SetDescription(String),
    SetBody(String),
    AddTag(String),
    /// Removes every tag equal to the given one
    RemoveTag(String),
}

impl DraftAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DraftAction::SetTitle(_) => "SET_TITLE",
            DraftAction::SetDescription(_) => "SET_DESCRIPTION",
            DraftAction::SetBody(_) => "SET_BODY",
            DraftAction::AddTag(_) => "ADD_TAG",
            DraftAction::RemoveTag(_) => "REMOVE_TAG",
        }
    }
}

/// Parses `KIND=VALUE`, e.g. `ADD_TAG=rust`.
impl FromStr for DraftAction {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| EditorError::MalformedAction(s.to_string()))?;
        let value = value.to_string();

        match kind.trim().to_ascii_uppercase().as_str() {
            "SET_TITLE" => Ok(DraftAction::SetTitle(value)),
            "SET_DESCRIPTION" => Ok(DraftAction::SetDescription(value)),
            "SET_BODY" => Ok(DraftAction::SetBody(value)),
            "ADD_TAG" => Ok(DraftAction::AddTag(value)),
            "REMOVE_TAG" => Ok(DraftAction::RemoveTag(value)),
            _ => Err(EditorError::UnhandledAction(kind.to_string())),
        }
    }
}

/// Apply `action` to `draft`, producing the next draft.
pub fn reduce(draft: Draft, action: DraftAction) -> Draft {
    match action {
        DraftAction::SetTitle(title) => Draft { title, ..draft },
        DraftAction::SetDescription(description) => Draft { description, ..draft },
        DraftAction::SetBody(body) => Draft { body, ..draft },
        DraftAction::AddTag(tag) => {
            let mut tag_list = draft.tag_list;
            tag_list.push(tag);
            Draft { tag_list, ..draft }
        }
        DraftAction::RemoveTag(tag) => {
            let mut tag_list = draft.tag_list;
            tag_list.retain(|t| *t != tag);
            Draft { tag_list, ..draft }
        }
    }
}

/// Apply a sequence of actions in order
pub fn reduce_all<I>(draft: Draft, actions: I) -> Draft
where
    I: IntoIterator<Item = DraftAction>,
{
    actions.into_iter().fold(draft, reduce)
}
