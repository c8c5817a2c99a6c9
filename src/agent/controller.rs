//! Agent controller: the per-tick decide-and-learn loop.

use std::fmt;

use crate::{
    adapters::TextModelRepository,
    agent::episode::{EpisodeContext, Phase},
    app::AgentConfig,
    identifiers::StateId,
    ports::{ActionPolicy, ModelRepository},
    q_learning::{
        EpsilonGreedyPolicy, ExplorationSchedule, Observation, StateLayout, TdLearner, ValueTable,
        policy::Convergence,
        reward::{RewardModel, Transition},
    },
    types::{Action, Mode, Percept, Pose},
};

/// End-of-process report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    pub training_enabled: bool,
    pub episodes: usize,
    pub states: usize,
    pub convergence: Convergence,
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.training_enabled {
            write!(f, "Episodes to converge: {}", self.convergence)?;
        } else {
            f.write_str("Training disabled")?;
        }
        write!(f, " (episodes: {}, states: {})", self.episodes, self.states)
    }
}

/// Q-learning agent for the Wumpus World.
///
/// The simulator calls [`WumpusAgent::initialize`] at the start of each
/// episode, [`WumpusAgent::process`] once per tick and
/// [`WumpusAgent::game_over`] when the episode ends. None of these fail:
/// storage and encoding problems are logged and the agent keeps acting.
///
/// The value table is loaded at construction and saved by
/// [`WumpusAgent::finish`], which also runs on drop.
pub struct WumpusAgent {
    config: AgentConfig,
    encoder: StateLayout,
    table: ValueTable,
    rewards: RewardModel,
    learner: TdLearner,
    policy: Box<dyn ActionPolicy>,
    repository: Box<dyn ModelRepository>,
    episode: EpisodeContext,
    phase: Phase,
    episodes_completed: usize,
    finished: bool,
}

impl fmt::Debug for WumpusAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WumpusAgent")
            .field("policy", &self.policy.name())
            .field("phase", &self.phase)
            .field("pose", &self.episode.pose)
            .field("states", &self.table.len())
            .field("episodes_completed", &self.episodes_completed)
            .finish()
    }
}

impl WumpusAgent {
    /// Create an agent with an epsilon-greedy policy and text model storage.
    pub fn new(config: AgentConfig) -> Self {
        let seeking = ExplorationSchedule::new(config.effective_epsilon_seeking(), config.epsilon_step);
        let carrying =
            ExplorationSchedule::new(config.effective_epsilon_carrying(), config.epsilon_step);
        let policy =
            EpsilonGreedyPolicy::new(config.action_set, seeking, carrying).with_seed(config.seed);
        Self::with_parts(config, Box::new(policy), Box::new(TextModelRepository::new()))
    }

    /// Create an agent driven by a custom policy.
    pub fn with_policy(config: AgentConfig, policy: Box<dyn ActionPolicy>) -> Self {
        Self::with_parts(config, policy, Box::new(TextModelRepository::new()))
    }

    pub fn with_parts(
        config: AgentConfig,
        policy: Box<dyn ActionPolicy>,
        repository: Box<dyn ModelRepository>,
    ) -> Self {
        let table = load_table(&config, repository.as_ref());
        Self {
            encoder: config.state_layout.clone(),
            rewards: RewardModel::new(config.rewards),
            learner: TdLearner::new(config.learning_rate, config.discount_factor, config.terminal),
            config,
            table,
            policy,
            repository,
            episode: EpisodeContext::new(),
            phase: Phase::Uninitialized,
            episodes_completed: 0,
            finished: false,
        }
    }

    /// Start a new episode at the entrance, facing right.
    pub fn initialize(&mut self) {
        self.episode = EpisodeContext::new();
        self.phase = Phase::Seeking;
    }

    /// Handle one tick: learn from the last transition and choose the next
    /// action.
    pub fn process(&mut self, percept: Percept) -> Action {
        if self.phase == Phase::Uninitialized {
            log::debug!("process called before initialize; starting a new episode");
            self.initialize();
        }

        let was_carrying = self.episode.carrying_gold;
        if self.episode.observe(&percept) {
            log::info!(
                "gold grabbed after {} steps in episode {}",
                self.episode.steps,
                self.episodes_completed + 1
            );
            if self.phase == Phase::Seeking {
                self.phase = Phase::Carrying;
            }
            self.policy
                .record_goal(Mode::Seeking, self.episodes_completed);
        }

        let state = self.encode(&percept);
        self.table.ensure(state);

        if self.phase != Phase::Terminal {
            self.learn(state, &percept, was_carrying);
        }

        self.episode.steps += 1;
        if self.episode.steps >= self.config.max_steps && self.phase != Phase::Terminal {
            log::warn!(
                "episode {} hit the step ceiling of {}",
                self.episodes_completed + 1,
                self.config.max_steps
            );
            self.phase = Phase::Terminal;
        }

        let action = self.choose_action(state, &percept);
        if action == Action::Climb
            && self.episode.carrying_gold
            && self.episode.pose.at_entrance()
        {
            self.phase = Phase::Terminal;
        }
        log::debug!(
            "state {state} ({}) -> {action}",
            self.encoder.describe(state)
        );

        self.episode.previous_state = Some(state);
        self.episode.previous_action = Some(action);
        self.episode.previous_percept = percept;
        action
    }

    /// Finish the episode and write its terminal value.
    pub fn game_over(&mut self, score: i32) {
        let ceiling_reached = self.episode.steps >= self.config.max_steps;
        let mut climbed_out = false;

        if let (Some(state), Some(action)) =
            (self.episode.previous_state, self.episode.previous_action)
        {
            climbed_out = action == Action::Climb
                && self.episode.carrying_gold
                && self.episode.pose.at_entrance();

            if ceiling_reached {
                log::debug!("step ceiling reached; no terminal value written");
            } else if climbed_out {
                if let Some(slot) = self.config.action_set.index_of(Action::Climb) {
                    self.learner
                        .terminal(&mut self.table, state, slot, self.rewards.schedule().exit);
                }
                self.policy
                    .record_goal(Mode::Carrying, self.episodes_completed);
            } else if let Some(slot) = self.config.action_set.index_of(action) {
                self.learner
                    .terminal(&mut self.table, state, slot, self.rewards.schedule().death);
            }
        }

        self.episodes_completed += 1;
        self.phase = Phase::Terminal;
        log::info!(
            "episode {} over: score {score}, {} steps, {}",
            self.episodes_completed,
            self.episode.steps,
            if climbed_out {
                "escaped with the gold"
            } else {
                "no escape"
            }
        );
    }

    /// Save the table and report convergence. Later calls only report.
    ///
    /// The summary is only logged at info level; callers that want the
    /// end-of-process line on stdout print the returned value:
    ///
    /// ```
    /// use wumpus_agent::{AgentConfig, WumpusAgent};
    ///
    /// let mut agent = WumpusAgent::new(AgentConfig::default().with_training(false));
    /// let summary = agent.finish();
    /// println!("{summary}");
    /// assert_eq!(summary.to_string(), "Training disabled (episodes: 0, states: 0)");
    /// ```
    pub fn finish(&mut self) -> TrainingSummary {
        if !self.finished {
            self.finished = true;
            if let Some(path) = &self.config.model_save_path {
                match self.repository.save(&self.table, path) {
                    Ok(()) => log::info!("saved {} states to {}", self.table.len(), path.display()),
                    Err(err) => log::warn!("{err}; learned values from this run are lost"),
                }
            }
            log::info!("{}", self.summary());
        }
        self.summary()
    }

    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            training_enabled: self.config.training_enabled,
            episodes: self.episodes_completed,
            states: self.table.len(),
            convergence: self.policy.convergence(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ValueTable {
        &mut self.table
    }

    pub fn policy(&self) -> &dyn ActionPolicy {
        self.policy.as_ref()
    }

    pub fn pose(&self) -> Pose {
        self.episode.pose
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.episode.mode()
    }

    pub fn steps(&self) -> usize {
        self.episode.steps
    }

    pub fn wumpus_dead(&self) -> bool {
        self.episode.wumpus_dead
    }

    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    /// State id the agent would assign to a situation.
    pub fn state_of(&self, pose: Pose, carrying_gold: bool, percept: Percept) -> StateId {
        let observation = Observation::new(pose, carrying_gold, percept);
        self.encoder.encode_clamped(&observation)
    }

    fn encode(&self, percept: &Percept) -> StateId {
        let observation = Observation::new(self.episode.pose, self.episode.carrying_gold, *percept);
        self.encoder.encode(&observation).unwrap_or_else(|err| {
            log::warn!("{err}; clamping into the grid");
            self.encoder.encode_clamped(&observation)
        })
    }

    fn learn(&mut self, state: StateId, percept: &Percept, was_carrying: bool) {
        let (Some(previous_state), Some(previous_action)) =
            (self.episode.previous_state, self.episode.previous_action)
        else {
            return;
        };
        if previous_action == Action::Climb && self.episode.pose.at_entrance() {
            // Climbing at the entrance ends the episode; `game_over` scores it.
            return;
        }
        let Some(slot) = self.config.action_set.index_of(previous_action) else {
            return;
        };

        if self.auto_grab_due(percept) {
            // The move that reached the gold takes the goal reward.
            let goal = self.rewards.schedule().goal;
            self.learner
                .terminal(&mut self.table, previous_state, slot, goal);
            return;
        }

        let transition = Transition {
            previous_action,
            previous_percept: self.episode.previous_percept,
            current_percept: *percept,
            carrying_gold: was_carrying,
        };
        let event = self.rewards.classify(&transition);
        let reward = self.rewards.value(event);
        if event.is_terminal() {
            self.learner
                .terminal(&mut self.table, previous_state, slot, reward);
        } else {
            self.learner
                .update(&mut self.table, previous_state, slot, reward, state);
        }
    }

    fn choose_action(&mut self, state: StateId, percept: &Percept) -> Action {
        if self.episode.carrying_gold && self.config.backtracking {
            return self.episode.path.next_home_step();
        }
        if self.auto_grab_due(percept) {
            return Action::Grab;
        }

        let action = self
            .policy
            .select_action(&self.table, state, self.episode.mode());
        if self.config.backtracking && !self.episode.carrying_gold {
            self.episode.path.record(action);
        }
        action
    }

    fn auto_grab_due(&self, percept: &Percept) -> bool {
        self.config.auto_grab && percept.glitter && !self.episode.carrying_gold
    }
}

impl Drop for WumpusAgent {
    fn drop(&mut self) {
        if !self.finished {
            self.finish();
        }
    }
}

fn load_table(config: &AgentConfig, repository: &dyn ModelRepository) -> ValueTable {
    let width = config.action_set.width();
    let Some(path) = &config.model_load_path else {
        return ValueTable::for_actions(config.action_set);
    };
    match repository.load(path, width) {
        Ok(table) => {
            log::info!("loaded {} states from {}", table.len(), path.display());
            table
        }
        Err(err) => {
            log::warn!("{err}; starting with an empty table");
            ValueTable::for_actions(config.action_set)
        }
    }
}
