//! Command reducer: apply an input to a state and get the next state back.

use serde::{Deserialize, Serialize};

use super::{GameState, Language, NodeEdit, PlayMode, TaskDraft};
use crate::error::RulesError;
use crate::graph::NodeId;
use crate::navigation::Direction;

/// Kind of event a flavor line is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorKind {
    Complete,
    Move,
}

/// A discrete input to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    FocusNode(NodeId),
    MoveFocus(Direction),
    Travel,
    CompleteCurrent,
    SetMode(PlayMode),
    SetLanguage(Language),
    AddManualTask(TaskDraft),
    CreateBranch(TaskDraft),
    InsertBlankNodes { origin: NodeId, count: usize },
    EditNode { id: NodeId, edit: NodeEdit },
    DeleteNode(NodeId),
    SetFlag { name: String, value: bool },
    ClearFlag(String),
}

/// Side effect requested by a transition. Handled outside the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The camera should glide to this node.
    RecenterCamera(NodeId),
    /// A short flavor line may be requested for this event.
    RequestFlavorText { kind: FlavorKind, subject: String },
}

/// The state after a command, plus the effects it requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub effects: Vec<Effect>,
    /// Ids of nodes created by the command.
    pub created: Vec<NodeId>,
}

impl GameState {
    /// Apply a command to a copy of this state.
    ///
    /// `self` is never modified; on error the caller simply keeps the state
    /// it already has.
    pub fn apply(&self, command: GameCommand) -> Result<Transition, RulesError> {
        let mut next = self.clone();
        let mut effects = Vec::new();
        let mut created = Vec::new();

        match command {
            GameCommand::FocusNode(id) => next.focus_node(&id)?,
            GameCommand::MoveFocus(direction) => {
                next.move_focus(direction);
            }
            GameCommand::Travel => {
                let outcome = next.travel()?;
                effects.push(Effect::RecenterCamera(outcome.to.clone()));
                if !outcome.authored {
                    if let Some(node) = next.node(&outcome.to) {
                        effects.push(Effect::RequestFlavorText {
                            kind: FlavorKind::Move,
                            subject: next.displayed(node).title.to_string(),
                        });
                    }
                }
            }
            GameCommand::CompleteCurrent => {
                if let Some(completion) = next.complete_current() {
                    if let Some(node) = next.node(&completion.node) {
                        effects.push(Effect::RequestFlavorText {
                            kind: FlavorKind::Complete,
                            subject: next.displayed(node).title.to_string(),
                        });
                    }
                }
            }
            GameCommand::SetMode(mode) => next.set_mode(mode),
            GameCommand::SetLanguage(language) => next.settings.language = language,
            GameCommand::AddManualTask(draft) => created.push(next.add_manual_task(draft)?),
            GameCommand::CreateBranch(draft) => created.push(next.create_branch(draft)?),
            GameCommand::InsertBlankNodes { origin, count } => {
                created = next.insert_blank_nodes(&origin, count)?;
            }
            GameCommand::EditNode { id, edit } => {
                next.edit_node(&id, edit)?;
            }
            GameCommand::DeleteNode(id) => {
                next.delete_node(&id)?;
            }
            GameCommand::SetFlag { name, value } => next.set_flag(&name, value)?,
            GameCommand::ClearFlag(name) => {
                next.clear_flag(&name)?;
            }
        }

        Ok(Transition {
            state: next,
            effects,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPosition;

    fn gm_state_with_task() -> (GameState, NodeId) {
        let mut state = GameState::new();
        state.set_mode(PlayMode::Gm);
        let id = state.add_manual_task(TaskDraft::new("Next", "", 1)).unwrap();
        state.set_mode(PlayMode::Player);
        (state, id)
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let (state, id) = gm_state_with_task();
        let before = state.clone();

        let transition = state.apply(GameCommand::FocusNode(id.clone())).unwrap();

        assert_eq!(state, before);
        assert_eq!(transition.state.focus(), &id);
    }

    #[test]
    fn test_travel_requests_camera_and_flavor() {
        let (state, id) = gm_state_with_task();
        let focused = state.apply(GameCommand::FocusNode(id.clone())).unwrap().state;

        let transition = focused.apply(GameCommand::Travel).unwrap();

        assert_eq!(
            transition.effects,
            vec![
                Effect::RecenterCamera(id.clone()),
                Effect::RequestFlavorText {
                    kind: FlavorKind::Move,
                    subject: "Next".into(),
                },
            ]
        );
    }

    #[test]
    fn test_gm_travel_skips_flavor() {
        let (mut state, id) = gm_state_with_task();
        state.set_mode(PlayMode::Gm);
        state.focus_node(&id).unwrap();

        let transition = state.apply(GameCommand::Travel).unwrap();

        assert_eq!(transition.effects, vec![Effect::RecenterCamera(id)]);
    }

    #[test]
    fn test_failed_command_reports_error() {
        let state = GameState::new();
        let result = state.apply(GameCommand::Travel);
        assert!(matches!(result, Err(RulesError::AlreadyAtTarget(_))));
    }

    #[test]
    fn test_repeat_completion_has_no_effect() {
        let state = GameState::new();
        let once = state.apply(GameCommand::CompleteCurrent).unwrap();
        assert_eq!(once.effects.len(), 1);
        assert_eq!(once.state.xp(), 20);

        let twice = once.state.apply(GameCommand::CompleteCurrent).unwrap();
        assert!(twice.effects.is_empty());
        assert_eq!(twice.state.xp(), 20);
    }

    #[test]
    fn test_created_ids_reported() {
        let mut state = GameState::new();
        state.set_mode(PlayMode::Gm);

        let transition = state
            .apply(GameCommand::InsertBlankNodes {
                origin: NodeId::start(),
                count: 2,
            })
            .unwrap();

        assert_eq!(transition.created.len(), 2);
        let first = transition.state.node(&transition.created[0]).unwrap();
        assert_eq!(first.position, GridPosition::new(0, -1));
    }
}
