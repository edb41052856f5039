//! The session driver - one board, its generator and its status line.
//!
//! Generation is split into a begin/finish pair so an event loop can send the
//! request, keep handling input, and apply the result whenever it arrives.
//! Results are applied to whatever the board looks like at that moment.
//! Only one generation request may be outstanding at a time.

use board_rules::{
    Direction, DirectionOrder, Effect, GameCommand, GameState, Language, NodeId,
    PlayMode, RulesError, TaskDraft,
};
use tracing::{debug, info, warn};

use crate::config::QuestConfig;
use crate::error::{GenerationError, PersistError, SessionError};
use crate::generation::{TaskGenerator, TaskSuggestion};
use crate::messages::{rank_title, StatusMessage};
use crate::persistence::{self, FileStore, MemoryStore, SaveStore};

/// Keyboard input relevant to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Other,
}

impl Key {
    fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Enter | Key::Other => None,
        }
    }
}

/// An outstanding generation request, captured when it was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Follow-ups around the pawn's node.
    Scout {
        origin: NodeId,
        title: String,
        description: String,
        language: Language,
    },
    /// Sub-tasks around the focused node (GM).
    Breakdown {
        origin: NodeId,
        title: String,
        description: String,
        language: Language,
    },
    /// A quest line out of the focused node (GM).
    Campaign {
        origin: NodeId,
        start_title: String,
        goal: String,
        milestones: String,
        language: Language,
    },
}

impl GenerationRequest {
    pub fn origin(&self) -> &NodeId {
        match self {
            GenerationRequest::Scout { origin, .. }
            | GenerationRequest::Breakdown { origin, .. }
            | GenerationRequest::Campaign { origin, .. } => origin,
        }
    }

    fn is_campaign(&self) -> bool {
        matches!(self, GenerationRequest::Campaign { .. })
    }

    fn failure_status(&self) -> StatusMessage {
        if self.is_campaign() {
            StatusMessage::CampaignFailed
        } else {
            StatusMessage::ScanFailed
        }
    }
}

/// A board session.
pub struct Session<G> {
    state: GameState,
    generator: G,
    store: Box<dyn SaveStore>,
    order: Box<dyn DirectionOrder + Send + Sync>,
    config: QuestConfig,
    is_generating: bool,
    status: StatusMessage,
}

impl<G: TaskGenerator> Session<G> {
    /// Start a fresh board. Saves go to `save_dir` if configured, memory otherwise.
    pub fn new(config: QuestConfig, generator: G) -> Self {
        let store: Box<dyn SaveStore> = match &config.save_dir {
            Some(dir) => Box::new(FileStore::new(dir.clone())),
            None => Box::new(MemoryStore::new()),
        };
        Self {
            state: config.new_game(),
            order: config.direction_order(),
            generator,
            store,
            config,
            is_generating: false,
            status: StatusMessage::Ready,
        }
    }

    pub fn with_store(mut self, store: impl SaveStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_direction_order(mut self, order: impl DirectionOrder + Send + Sync + 'static) -> Self {
        self.order = Box::new(order);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// The status line in the current language.
    pub fn status_text(&self) -> String {
        self.status.text(self.state.settings.language)
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn rank_title(&self) -> &'static str {
        rank_title(self.state.level(), self.state.settings.language)
    }

    /// Apply a board command and return the effects it requested.
    ///
    /// On error the board is unchanged and the status line explains why.
    pub fn execute(&mut self, command: GameCommand) -> Result<Vec<Effect>, SessionError> {
        match self.state.apply(command) {
            Ok(transition) => {
                self.state = transition.state;
                for effect in &transition.effects {
                    if let Effect::RecenterCamera(id) = effect {
                        debug!(node_id = %id, "Camera recentered");
                    }
                }
                Ok(transition.effects)
            }
            Err(e) => {
                debug!(error = %e, "Command refused");
                self.status = StatusMessage::from_rules_error(&e);
                Err(e.into())
            }
        }
    }

    pub async fn handle_key(&mut self, key: Key) -> Result<bool, SessionError> {
        if let Some(direction) = key.direction() {
            self.execute(GameCommand::MoveFocus(direction))?;
            return Ok(true);
        }
        if key == Key::Enter && self.state.focus() != self.state.pawn() {
            self.travel().await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Move the pawn onto the focused node, then ask for a flavor line.
    pub async fn travel(&mut self) -> Result<(), SessionError> {
        let effects = self.execute(GameCommand::Travel)?;
        self.run_flavor_effects(effects).await;
        Ok(())
    }

    /// Complete the pawn's node, then ask for a flavor line.
    pub async fn complete(&mut self) -> Result<(), SessionError> {
        let level_before = self.state.level();
        let effects = self.execute(GameCommand::CompleteCurrent)?;
        if effects.is_empty() {
            return Ok(());
        }
        self.status = if self.state.level() > level_before {
            StatusMessage::LevelUp(self.state.level())
        } else {
            StatusMessage::TaskCompleted
        };
        self.run_flavor_effects(effects).await;
        Ok(())
    }

    /// Flavor text is best effort; failures and empty lines change nothing.
    async fn run_flavor_effects(&mut self, effects: Vec<Effect>) {
        let language = self.state.settings.language;
        for effect in effects {
            let Effect::RequestFlavorText { kind, subject } = effect else {
                continue;
            };
            match self.generator.flavor_text(kind, &subject, language).await {
                Ok(text) if !text.trim().is_empty() => self.status = StatusMessage::Flavor(text),
                Ok(_) => {}
                Err(e) => warn!(error = %e, kind = ?kind, "Flavor text unavailable"),
            }
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.settings.language = language;
    }

    pub fn toggle_gm_mode(&mut self) -> PlayMode {
        let next = match self.state.mode() {
            PlayMode::Player => PlayMode::Gm,
            PlayMode::Gm => PlayMode::Player,
        };
        self.state.set_mode(next);
        info!(mode = ?next, "Play mode changed");
        next
    }

    /// Show a refused request on the status line and hand the error back.
    fn reject(&mut self, error: SessionError) -> SessionError {
        debug!(error = %error, "Request refused");
        self.status = StatusMessage::from_error(&error);
        error
    }

    fn claim_generation(&mut self) -> Result<(), SessionError> {
        if self.is_generating {
            return Err(self.reject(SessionError::Busy));
        }
        Ok(())
    }

    fn require_gm(&mut self, operation: &'static str) -> Result<(), SessionError> {
        if self.state.is_gm() {
            return Ok(());
        }
        Err(self.reject(RulesError::gm_only(operation).into()))
    }

    fn node_text(&self, id: &NodeId) -> Result<(String, String), SessionError> {
        let node = self
            .state
            .node(id)
            .ok_or_else(|| RulesError::not_found(id.clone()))?;
        let shown = self.state.displayed(node);
        Ok((shown.title.to_string(), shown.description.to_string()))
    }

    /// Start scouting around the pawn.
    pub fn begin_scout(&mut self) -> Result<GenerationRequest, SessionError> {
        self.claim_generation()?;
        let origin = self.state.pawn().clone();
        let (title, description) = self.node_text(&origin)?;
        info!(node_id = %origin, "Scouting for follow-up tasks");

        self.is_generating = true;
        self.status = StatusMessage::Scanning;
        Ok(GenerationRequest::Scout {
            origin,
            title,
            description,
            language: self.state.settings.language,
        })
    }

    /// Start breaking the focused node down into sub-tasks. GM only.
    pub fn begin_breakdown(&mut self) -> Result<GenerationRequest, SessionError> {
        self.claim_generation()?;
        self.require_gm("break down task")?;
        let origin = self.state.focus().clone();
        let (title, description) = self.node_text(&origin)?;
        info!(node_id = %origin, "Breaking task down");

        self.is_generating = true;
        self.status = StatusMessage::Scanning;
        Ok(GenerationRequest::Breakdown {
            origin,
            title,
            description,
            language: self.state.settings.language,
        })
    }

    /// Start designing a campaign out of the focused node. GM only.
    pub fn begin_campaign(
        &mut self,
        goal: impl Into<String>,
        milestones: impl Into<String>,
    ) -> Result<GenerationRequest, SessionError> {
        self.claim_generation()?;
        self.require_gm("create campaign")?;
        let origin = self.state.focus().clone();
        let (start_title, _) = self.node_text(&origin)?;
        let goal = goal.into();
        info!(node_id = %origin, goal = %goal, "Designing campaign");

        self.is_generating = true;
        self.status = StatusMessage::Designing;
        Ok(GenerationRequest::Campaign {
            origin,
            start_title,
            goal,
            milestones: milestones.into(),
            language: self.state.settings.language,
        })
    }

    /// Apply a generation result to the current board and clear the busy flag.
    ///
    /// An empty suggestion list adds nothing and is not an error.
    pub fn finish_generation(
        &mut self,
        request: GenerationRequest,
        result: Result<Vec<TaskSuggestion>, GenerationError>,
    ) -> Result<Vec<NodeId>, SessionError> {
        self.is_generating = false;

        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, node_id = %request.origin(), "Generation failed");
                self.status = request.failure_status();
                return Err(e.into());
            }
        };
        if suggestions.is_empty() {
            info!(node_id = %request.origin(), "Generation returned no tasks");
            self.status = StatusMessage::NoViablePaths;
            return Ok(Vec::new());
        }

        let drafts: Vec<TaskDraft> = suggestions.into_iter().map(TaskDraft::from).collect();
        let origin = request.origin().clone();
        let applied = if request.is_campaign() {
            self.state.spawn_campaign(&origin, drafts)
        } else {
            self.state.spawn_followups(&origin, drafts, self.order.as_ref())
        };

        match applied {
            Ok(created) => {
                info!(node_id = %origin, placed = created.len(), "Generated tasks placed");
                self.status = if request.is_campaign() {
                    StatusMessage::CampaignCreated
                } else {
                    StatusMessage::NewPaths
                };
                Ok(created)
            }
            Err(RulesError::NoViablePaths(id)) => {
                info!(node_id = %id, "No free cells for generated tasks");
                self.status = StatusMessage::NoViablePaths;
                Err(RulesError::NoViablePaths(id).into())
            }
            Err(e) => {
                warn!(error = %e, "Generated tasks could not be applied");
                self.status = request.failure_status();
                Err(e.into())
            }
        }
    }

    async fn run_request(&self, request: &GenerationRequest) -> Result<Vec<TaskSuggestion>, GenerationError> {
        match request {
            GenerationRequest::Scout {
                title,
                description,
                language,
                ..
            }
            | GenerationRequest::Breakdown {
                title,
                description,
                language,
                ..
            } => self.generator.followup_tasks(title, description, *language).await,
            GenerationRequest::Campaign {
                start_title,
                goal,
                milestones,
                language,
                ..
            } => {
                self.generator
                    .campaign_tasks(start_title, goal, milestones, *language)
                    .await
            }
        }
    }

    /// Scout around the pawn and place the results.
    pub async fn scout(&mut self) -> Result<Vec<NodeId>, SessionError> {
        let request = self.begin_scout()?;
        let result = self.run_request(&request).await;
        self.finish_generation(request, result)
    }

    /// Break the focused node down and place the results. GM only.
    pub async fn breakdown(&mut self) -> Result<Vec<NodeId>, SessionError> {
        let request = self.begin_breakdown()?;
        let result = self.run_request(&request).await;
        self.finish_generation(request, result)
    }

    /// Generate and lay out a campaign from the focused node. GM only.
    pub async fn campaign(&mut self, goal: &str, milestones: &str) -> Result<Vec<NodeId>, SessionError> {
        let request = self.begin_campaign(goal, milestones)?;
        let result = self.run_request(&request).await;
        self.finish_generation(request, result)
    }

    /// Write the board to the progress save slot.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let key = self.config.save_key.clone();
        let result = persistence::save_progress(&self.state).and_then(|text| self.store.write(&key, &text));
        self.finish_write(&key, result)
    }

    /// Replace the board with the progress save. Nothing changes on failure.
    pub fn load(&mut self) -> Result<(), SessionError> {
        let key = self.config.save_key.clone();
        let result = self
            .read_slot(&key)
            .and_then(|text| persistence::load_progress(&text, &self.state));
        self.finish_read(&key, result)
    }

    /// Write the authored content to the campaign slot.
    pub fn export_campaign(&mut self) -> Result<(), SessionError> {
        let key = self.config.campaign_key.clone();
        let result = persistence::export_campaign(&self.state).and_then(|text| self.store.write(&key, &text));
        self.finish_write(&key, result)
    }

    /// Replace the board content with the stored campaign.
    pub fn import_campaign(&mut self) -> Result<(), SessionError> {
        let key = self.config.campaign_key.clone();
        let result = self
            .read_slot(&key)
            .and_then(|text| persistence::import_campaign(&text, &self.state));
        self.finish_read(&key, result)
    }

    fn read_slot(&self, key: &str) -> Result<String, PersistError> {
        self.store
            .read(key)?
            .ok_or_else(|| PersistError::Missing(key.to_string()))
    }

    fn finish_write(&mut self, key: &str, result: Result<(), PersistError>) -> Result<(), SessionError> {
        match result {
            Ok(()) => {
                info!(key = %key, "Board saved");
                self.status = StatusMessage::Saved;
                Ok(())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Save failed");
                self.status = StatusMessage::SaveFailed;
                Err(e.into())
            }
        }
    }

    fn finish_read(&mut self, key: &str, result: Result<GameState, PersistError>) -> Result<(), SessionError> {
        match result {
            Ok(state) => {
                info!(key = %key, nodes = state.nodes().len(), "Board loaded");
                self.state = state;
                self.status = StatusMessage::Loaded;
                Ok(())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Load rejected");
                self.status = StatusMessage::LoadFailed;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockTaskGenerator;
    use board_rules::{FlavorKind, GridPosition, IdentityOrder, NodeKind};

    fn config() -> QuestConfig {
        QuestConfig {
            language: Language::En,
            shuffle_directions: false,
            ..QuestConfig::default()
        }
    }

    fn session(generator: MockTaskGenerator) -> Session<MockTaskGenerator> {
        Session::new(config(), generator).with_direction_order(IdentityOrder)
    }

    fn tasks(titles: &[&str]) -> Vec<TaskSuggestion> {
        titles
            .iter()
            .map(|title| TaskSuggestion::new(*title, "", 2))
            .collect()
    }

    fn position_of(session: &Session<MockTaskGenerator>, id: &NodeId) -> GridPosition {
        session.state().node(id).unwrap().position
    }

    /// Session with a second task placed above the start node.
    fn session_with_neighbour(generator: MockTaskGenerator) -> (Session<MockTaskGenerator>, NodeId) {
        let mut session = session(generator);
        session.toggle_gm_mode();
        session
            .execute(GameCommand::AddManualTask(TaskDraft::new("Library", "Read", 1)))
            .unwrap();
        session.toggle_gm_mode();
        let id = session.state().nodes()[1].id.clone();
        (session, id)
    }

    #[tokio::test]
    async fn test_scout_places_followups() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_followup_tasks()
            .withf(|title, _, language| title.to_string() == "Journey Begins" && *language == Language::En)
            .times(1)
            .returning(|_, _, _| Ok(tasks(&["Plan", "Pack"])));
        let mut session = session(generator);

        let created = session.scout().await.unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(position_of(&session, &created[0]), GridPosition::new(0, -1));
        assert_eq!(position_of(&session, &created[1]), GridPosition::new(1, 0));
        assert_eq!(session.state().edges().len(), 2);
        assert_eq!(session.status(), &StatusMessage::NewPaths);
        assert!(!session.is_generating());
    }

    #[test]
    fn test_second_request_rejected_while_busy() {
        let mut session = session(MockTaskGenerator::new());
        session.toggle_gm_mode();

        let request = session.begin_scout().unwrap();
        assert!(session.is_generating());
        assert!(matches!(session.begin_scout(), Err(SessionError::Busy)));
        assert_eq!(session.status(), &StatusMessage::Busy);
        assert_eq!(session.status_text(), "Still working on the last request.");
        assert!(matches!(session.begin_campaign("Goal", ""), Err(SessionError::Busy)));
        assert!(session.is_generating());

        let created = session.finish_generation(request, Ok(Vec::new())).unwrap();

        assert!(created.is_empty());
        assert!(!session.is_generating());
        assert_eq!(session.status(), &StatusMessage::NoViablePaths);
        assert_eq!(session.state().nodes().len(), 1);
    }

    #[test]
    fn test_late_result_applies_to_current_board() {
        let (mut session, neighbour) = session_with_neighbour(MockTaskGenerator::new());
        let request = session.begin_scout().unwrap();

        session.execute(GameCommand::FocusNode(neighbour.clone())).unwrap();
        session.execute(GameCommand::Travel).unwrap();

        let created = session
            .finish_generation(request, Ok(tasks(&["Map", "Lantern"])))
            .unwrap();

        // Origin was captured at request time; (0,-1) is taken by the neighbour.
        assert_eq!(position_of(&session, &created[0]), GridPosition::new(1, 0));
        assert_eq!(position_of(&session, &created[1]), GridPosition::new(0, 1));
        assert_eq!(session.state().pawn(), &neighbour);
    }

    #[test]
    fn test_late_result_for_deleted_origin() {
        let (mut session, neighbour) = session_with_neighbour(MockTaskGenerator::new());
        session.execute(GameCommand::FocusNode(neighbour.clone())).unwrap();
        session.execute(GameCommand::Travel).unwrap();
        let request = session.begin_scout().unwrap();

        session.toggle_gm_mode();
        session.execute(GameCommand::DeleteNode(neighbour)).unwrap();
        let result = session.finish_generation(request, Ok(tasks(&["Lost"])));

        assert!(matches!(
            result,
            Err(SessionError::Rules(RulesError::NodeNotFound(_)))
        ));
        assert_eq!(session.status(), &StatusMessage::ScanFailed);
        assert_eq!(session.state().nodes().len(), 1);
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn test_scan_failure_leaves_board() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_followup_tasks()
            .returning(|_, _, _| Err(GenerationError::RequestFailed("offline".into())));
        let mut session = session(generator);
        let before = session.state().clone();

        let result = session.scout().await;

        assert!(matches!(result, Err(SessionError::Generation(_))));
        assert_eq!(session.state(), &before);
        assert_eq!(session.status(), &StatusMessage::ScanFailed);
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn test_boxed_in_scout_adds_nothing() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_followup_tasks()
            .returning(|_, _, _| Ok(tasks(&["A", "B", "C", "D"])));
        let mut session = session(generator);
        session.scout().await.unwrap();
        let before = session.state().clone();

        let result = session.scout().await;

        assert!(matches!(
            result,
            Err(SessionError::Rules(RulesError::NoViablePaths(_)))
        ));
        assert_eq!(session.state(), &before);
        assert_eq!(session.status(), &StatusMessage::NoViablePaths);
    }

    #[tokio::test]
    async fn test_breakdown_requires_gm() {
        let mut session = session(MockTaskGenerator::new());

        let result = session.breakdown().await;

        assert!(matches!(
            result,
            Err(SessionError::Rules(RulesError::RequiresGmMode(_)))
        ));
        assert!(!session.is_generating());
        assert!(matches!(session.status(), StatusMessage::Rejected(_)));
    }

    #[tokio::test]
    async fn test_breakdown_from_focus() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_followup_tasks()
            .withf(|title, description, _| title.to_string() == "Library" && description.to_string() == "Read")
            .returning(|_, _, _| Ok(tasks(&["Shelf"])));
        let (mut session, neighbour) = session_with_neighbour(generator);
        session.toggle_gm_mode();
        session.execute(GameCommand::FocusNode(neighbour.clone())).unwrap();

        let created = session.breakdown().await.unwrap();

        assert_eq!(position_of(&session, &created[0]), GridPosition::new(0, -2));
        assert!(session.state().graph().is_adjacent(&neighbour, &created[0]));
    }

    #[tokio::test]
    async fn test_campaign_chain() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_campaign_tasks()
            .withf(|start, goal, milestones, _| {
                start.to_string() == "Journey Begins"
                    && goal.to_string() == "Run a marathon"
                    && milestones.to_string() == "10k"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(tasks(&["Jog", "10k", "Marathon"])));
        let mut session = session(generator);
        session.toggle_gm_mode();

        let created = session.campaign("Run a marathon", "10k").await.unwrap();

        assert_eq!(created.len(), 3);
        assert_eq!(position_of(&session, &created[2]), GridPosition::new(3, 0));
        assert_eq!(session.state().node(&created[2]).unwrap().kind, NodeKind::Boss);
        assert_eq!(session.status(), &StatusMessage::CampaignCreated);
    }

    #[tokio::test]
    async fn test_arrow_and_enter_travel_with_flavor() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_flavor_text()
            .withf(|kind, subject, _| *kind == FlavorKind::Move && subject.to_string() == "Library")
            .times(1)
            .returning(|_, _, _| Ok("The stacks await.".into()));
        let (mut session, neighbour) = session_with_neighbour(generator);

        assert!(session.handle_key(Key::Up).await.unwrap());
        assert_eq!(session.state().focus(), &neighbour);
        assert!(session.handle_key(Key::Enter).await.unwrap());

        assert_eq!(session.state().pawn(), &neighbour);
        assert_eq!(session.status(), &StatusMessage::Flavor("The stacks await.".into()));
    }

    #[tokio::test]
    async fn test_enter_on_pawn_and_other_keys_ignored() {
        let mut session = session(MockTaskGenerator::new());

        assert!(!session.handle_key(Key::Enter).await.unwrap());
        assert!(!session.handle_key(Key::Other).await.unwrap());
        assert_eq!(session.state().pawn(), &NodeId::start());
    }

    #[tokio::test]
    async fn test_too_far_status() {
        let (mut session, neighbour) = session_with_neighbour(MockTaskGenerator::new());
        session.toggle_gm_mode();
        session.execute(GameCommand::FocusNode(neighbour)).unwrap();
        session
            .execute(GameCommand::AddManualTask(TaskDraft::new("Far", "", 1)))
            .unwrap();
        let far = session.state().nodes()[2].id.clone();
        session.toggle_gm_mode();
        session.execute(GameCommand::FocusNode(far)).unwrap();

        let result = session.travel().await;

        assert!(matches!(
            result,
            Err(SessionError::Rules(RulesError::NotAdjacent { .. }))
        ));
        assert_eq!(session.status(), &StatusMessage::TooFar);
        assert_eq!(session.state().pawn(), &NodeId::start());
    }

    #[tokio::test]
    async fn test_flavor_failure_keeps_completion() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_flavor_text()
            .returning(|_, _, _| Err(GenerationError::RequestFailed("timeout".into())));
        let mut session = session(generator);

        session.complete().await.unwrap();

        assert_eq!(session.state().xp(), 20);
        assert_eq!(session.status(), &StatusMessage::TaskCompleted);
    }

    #[tokio::test]
    async fn test_empty_flavor_ignored_and_repeat_completion_quiet() {
        let mut generator = MockTaskGenerator::new();
        generator
            .expect_flavor_text()
            .times(1)
            .returning(|_, _, _| Ok(String::new()));
        let mut session = session(generator);

        session.complete().await.unwrap();
        session.complete().await.unwrap();

        assert_eq!(session.state().xp(), 20);
        assert_eq!(session.status(), &StatusMessage::TaskCompleted);
    }

    #[test]
    fn test_save_and_load() {
        let (mut session, neighbour) = session_with_neighbour(MockTaskGenerator::new());
        session.save().unwrap();
        assert_eq!(session.status(), &StatusMessage::Saved);
        let saved = session.state().snapshot();

        session.execute(GameCommand::FocusNode(neighbour)).unwrap();
        session.execute(GameCommand::Travel).unwrap();
        session.load().unwrap();

        assert_eq!(session.state().snapshot(), saved);
        assert_eq!(session.status(), &StatusMessage::Loaded);
    }

    #[test]
    fn test_load_without_save_fails_cleanly() {
        let mut session = session(MockTaskGenerator::new());
        let before = session.state().clone();

        let result = session.load();

        assert!(matches!(
            result,
            Err(SessionError::Persist(PersistError::Missing(_)))
        ));
        assert_eq!(session.state(), &before);
        assert_eq!(session.status(), &StatusMessage::LoadFailed);
    }

    #[test]
    fn test_campaign_export_import_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuestConfig {
            save_dir: Some(dir.path().to_path_buf()),
            ..config()
        };
        let mut author = Session::new(config.clone(), MockTaskGenerator::new());
        author.toggle_gm_mode();
        author
            .execute(GameCommand::AddManualTask(TaskDraft::new("Gate", "", 1)))
            .unwrap();
        let gate = author.state().nodes()[1].id.clone();
        author.execute(GameCommand::FocusNode(gate.clone())).unwrap();
        author.execute(GameCommand::Travel).unwrap();
        author.export_campaign().unwrap();
        assert!(dir.path().join("taskquest-campaign.json").exists());

        let mut player = Session::new(config, MockTaskGenerator::new());
        player.import_campaign().unwrap();

        assert_eq!(player.state().nodes().len(), 2);
        assert_eq!(player.state().pawn(), &NodeId::start());
        assert_eq!(player.state().focus(), &NodeId::start());
        assert!(player.state().node(&gate).is_some());
    }

    #[test]
    fn test_language_and_rank() {
        let mut session = session(MockTaskGenerator::new());
        assert_eq!(session.rank_title(), "Novice Planner");
        assert_eq!(session.status_text(), "Ready for adventure.");

        session.set_language(Language::Ja);

        assert_eq!(session.rank_title(), "見習い冒険者");
        assert_eq!(session.status_text(), "冒険の準備完了。");
    }
}
