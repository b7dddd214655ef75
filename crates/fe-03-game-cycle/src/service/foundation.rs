use super::ledger::MeterLedger;
use crate::domain::config::{FoundationConfig, GameContextMode};
use crate::domain::errors::FoundationError;
use crate::domain::events::FoundationEvent;
use crate::domain::fields::{encode_bool, encode_u64, game_cycle_scopes, Field};
use crate::domain::meters::MeterSet;
use crate::domain::state::{GameCycleOperation, GameCycleState};
use crate::ports::outbound::{
    BetLimitProvider, EventObserver, NullProgressiveSink, ProgressiveSink, StaticBetLimits,
};
use fe_01_critical_store::{CommitReceipt, DurableJournal};
use fe_02_transaction_coordinator::{
    CriticalStore, GuardedStore, TransactionCoordinator, TransactionError, TransactionOwner,
};
use fe_telemetry::metrics;
use shared_bus::{EventPoster, EventQueue, QueueKind};
use shared_types::BaseUnits;
use std::sync::Arc;
use tracing::{info, warn};

/// Game-cycle values that live in the `GameCycle` scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleFlags {
    pub accumulated_outcome: BaseUnits,
    pub cashout_offerable: bool,
    pub bank_transfer_eligible: bool,
}

/// Active theme context. Not persisted; a restart comes back in the
/// configured mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeContext {
    pub theme: Option<String>,
    pub payvar: Option<String>,
    pub mode: GameContextMode,
}

/// One simulated installation: store, transaction gate, event queues and
/// the game-cycle state machine.
pub struct Foundation {
    pub(super) config: FoundationConfig,
    pub(super) coordinator: TransactionCoordinator,
    pub(super) events: Arc<EventQueue<FoundationEvent>>,
    pub(super) state: GameCycleState,
    pub(super) ledger: MeterLedger,
    pub(super) cycle: CycleFlags,
    pub(super) game_cycle: u64,
    pub(super) history_head: u64,
    pub(super) context: ThemeContext,
    pub(super) enforced_commit_failure: bool,
    pub(super) bet_limits: Box<dyn BetLimitProvider>,
    pub(super) progressive: Box<dyn ProgressiveSink>,
    pub(super) observer: Option<Box<dyn EventObserver>>,
}

impl std::fmt::Debug for Foundation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Foundation")
            .field("state", &self.state)
            .field("meters", self.ledger.meters())
            .field("game_cycle", &self.game_cycle)
            .field("owner", &self.coordinator.owner())
            .field("context", &self.context)
            .finish()
    }
}

impl Foundation {
    /// Open with static default bet limits and no linked progressives.
    pub fn open(config: FoundationConfig) -> Result<Self, FoundationError> {
        Self::with_collaborators(
            config,
            Box::new(StaticBetLimits::default()),
            Box::new(NullProgressiveSink),
        )
    }

    /// Open the journal, then either restore the persisted game cycle (warm
    /// start) or initialize one at Idle (cold start).
    ///
    /// # Errors
    ///
    /// - `Store` if the committed snapshot is corrupt or the data directory
    ///   is locked.
    /// - `RestoreFailed` if a persisted field fails validation.
    pub fn with_collaborators(
        config: FoundationConfig,
        bet_limits: Box<dyn BetLimitProvider>,
        progressive: Box<dyn ProgressiveSink>,
    ) -> Result<Self, FoundationError> {
        let coordinator = TransactionCoordinator::open(&config.journal)?;
        let context = ThemeContext {
            mode: config.context_mode,
            ..ThemeContext::default()
        };
        let mut foundation = Self {
            config,
            coordinator,
            events: Arc::new(EventQueue::new()),
            state: GameCycleState::Invalid,
            ledger: MeterLedger::default(),
            cycle: CycleFlags::default(),
            game_cycle: 0,
            history_head: 0,
            context,
            enforced_commit_failure: false,
            bet_limits,
            progressive,
            observer: None,
        };

        let initialized = foundation
            .coordinator
            .snapshot()
            .contains(&Field::GameCycleState.address()?);
        if initialized {
            foundation.restore()?;
        } else {
            foundation.cold_start()?;
        }

        info!(
            state = %foundation.state,
            game_cycle = foundation.game_cycle,
            medium = %foundation.coordinator.journal().describe_medium(),
            pending_events = foundation.events.pending(QueueKind::Transactional),
            "[fe-03] Foundation ready"
        );
        Ok(foundation)
    }

    fn cold_start(&mut self) -> Result<(), FoundationError> {
        if !self.coordinator.open_system_transaction() {
            return Err(TransactionError::TransactionAlreadyOpen {
                owner: self.coordinator.owner(),
            }
            .into());
        }
        {
            let mut store = self.coordinator.store()?;
            self.ledger.initialize(&mut store)?;
            store.write(&Field::GameCycleNumber.address()?, encode_u64(0))?;
            store.write(&Field::HistoryHead.address()?, encode_u64(0))?;
        }
        self.transition(GameCycleOperation::Initialize, GameCycleState::Idle)?;
        self.persist_pending_events()?;
        self.coordinator.close_system_transaction()?;
        info!("[fe-03] Cold start: game cycle initialized at Idle");
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Open a caller transaction.
    ///
    /// # Errors
    ///
    /// `TransactionAlreadyOpen`, or `EventsPendingAgainstOpen` until
    /// [`Self::process_events`] has drained the transactional queue.
    pub fn open_transaction(&mut self) -> Result<(), FoundationError> {
        self.coordinator.open_caller_transaction(self.events.as_ref())?;
        Ok(())
    }

    /// Persist the replayable events and commit the caller transaction.
    pub fn close_transaction(&mut self) -> Result<CommitReceipt, FoundationError> {
        if self.coordinator.owner() == TransactionOwner::Caller {
            self.persist_pending_events()?;
        }
        Ok(self.coordinator.close_transaction()?)
    }

    /// Run `f` inside a caller transaction.
    ///
    /// The transaction is closed whether or not `f` succeeds; failed
    /// operations change nothing, so the commit only carries what succeeded.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, FoundationError>,
    ) -> Result<T, FoundationError> {
        self.open_transaction()?;
        let result = f(self);
        self.close_transaction()?;
        result
    }

    pub fn is_transaction_open(&self) -> bool {
        self.coordinator.is_open()
    }

    pub fn transaction_owner(&self) -> TransactionOwner {
        self.coordinator.owner()
    }

    /// Critical data access for the game; requires an open transaction.
    pub fn critical_store(&mut self) -> Result<GuardedStore<'_>, FoundationError> {
        Ok(self.coordinator.store()?)
    }

    pub(super) fn persist_pending_events(&mut self) -> Result<(), FoundationError> {
        let bytes = self.events.encode_persisted()?;
        self.coordinator
            .store()?
            .write(&Field::PendingEvents.address()?, bytes)?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> GameCycleState {
        self.state
    }

    pub fn meters(&self) -> &MeterSet {
        self.ledger.meters()
    }

    pub fn accumulated_outcome(&self) -> BaseUnits {
        self.cycle.accumulated_outcome
    }

    pub fn cycle_flags(&self) -> CycleFlags {
        self.cycle
    }

    /// Number of the current (or last) game cycle.
    pub fn game_cycle_number(&self) -> u64 {
        self.game_cycle
    }

    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    pub fn config(&self) -> &FoundationConfig {
        &self.config
    }

    pub fn journal(&self) -> &DurableJournal {
        self.coordinator.journal()
    }

    /// Cloneable handle for posting events from other threads.
    pub fn poster(&self) -> EventPoster<FoundationEvent> {
        EventPoster::new(Arc::clone(&self.events))
    }

    pub fn pending_events(&self, kind: QueueKind) -> usize {
        self.events.pending(kind)
    }

    pub fn set_observer(&mut self, observer: Box<dyn EventObserver>) {
        self.observer = Some(observer);
    }

    // =========================================================================
    // State machine plumbing
    // =========================================================================

    /// Transaction, context mode and legal-state checks every operation
    /// runs before touching anything.
    pub(super) fn begin(&self, operation: GameCycleOperation) -> Result<(), FoundationError> {
        self.coordinator.require_open_transaction()?;
        if operation.requires_play_mode() && self.context.mode != GameContextMode::Play {
            return Err(FoundationError::ContextModeMismatch {
                operation,
                mode: self.context.mode,
            });
        }
        if !operation.is_legal_in(self.state) {
            return Err(self.illegal(operation));
        }
        Ok(())
    }

    fn illegal(&self, operation: GameCycleOperation) -> FoundationError {
        metrics::record_illegal_transition();
        warn!(
            operation = %operation,
            state = %self.state,
            "Illegal state transition rejected"
        );
        FoundationError::IllegalStateTransition {
            operation,
            current: self.state,
            legal: operation.legal_states(),
        }
    }

    /// Move to `to`, running exit and enter side effects. The new state is
    /// written before the in-memory state changes.
    pub(super) fn transition(
        &mut self,
        operation: GameCycleOperation,
        to: GameCycleState,
    ) -> Result<(), FoundationError> {
        let from = self.state;
        if !from.can_transition_to(to) {
            return Err(self.illegal(operation));
        }

        if from == GameCycleState::Idle {
            self.exit_idle()?;
        }
        self.coordinator
            .store()?
            .write(&Field::GameCycleState.address()?, vec![to.as_u8()])?;
        self.state = to;

        match to {
            GameCycleState::Idle => self.enter_idle()?,
            GameCycleState::Playing | GameCycleState::AncillaryPlaying => self.enter_playing()?,
            GameCycleState::MainPlayComplete => {
                self.set_cashout_offerable(self.config.ancillary_enabled)?
            }
            _ => {}
        }

        info!(
            from = %from,
            to = %to,
            operation = %operation,
            game_cycle = self.game_cycle,
            "[fe-03] Game cycle transition"
        );
        Ok(())
    }

    fn enter_idle(&mut self) -> Result<(), FoundationError> {
        {
            let mut store = self.coordinator.store()?;
            for scope in game_cycle_scopes() {
                store.clear_scope(scope)?;
            }
            self.ledger.reset_bets(&mut store)?;
        }
        self.cycle = CycleFlags::default();
        Ok(())
    }

    fn exit_idle(&mut self) -> Result<(), FoundationError> {
        self.set_cashout_offerable(false)?;
        let mut store = self.coordinator.store()?;
        self.ledger.set_paid(&mut store, 0)?;
        Ok(())
    }

    fn enter_playing(&mut self) -> Result<(), FoundationError> {
        if self.config.banked_credits {
            self.set_bank_transfer_eligible(true)?;
        }
        Ok(())
    }

    // =========================================================================
    // Persisted fields
    // =========================================================================

    fn write_field(&mut self, field: Field, bytes: Vec<u8>) -> Result<(), FoundationError> {
        self.coordinator.store()?.write(&field.address()?, bytes)?;
        Ok(())
    }

    pub(super) fn set_accumulated_outcome(&mut self, value: BaseUnits) -> Result<(), FoundationError> {
        if self.cycle.accumulated_outcome != value {
            self.write_field(Field::AccumulatedOutcome, encode_u64(value))?;
            self.cycle.accumulated_outcome = value;
        }
        Ok(())
    }

    fn set_cashout_offerable(&mut self, value: bool) -> Result<(), FoundationError> {
        if self.cycle.cashout_offerable != value {
            self.write_field(Field::CashoutOfferable, encode_bool(value))?;
            self.cycle.cashout_offerable = value;
        }
        Ok(())
    }

    fn set_bank_transfer_eligible(&mut self, value: bool) -> Result<(), FoundationError> {
        if self.cycle.bank_transfer_eligible != value {
            self.write_field(Field::BankTransferEligible, encode_bool(value))?;
            self.cycle.bank_transfer_eligible = value;
        }
        Ok(())
    }

    pub(super) fn set_game_cycle_number(&mut self, value: u64) -> Result<(), FoundationError> {
        self.write_field(Field::GameCycleNumber, encode_u64(value))?;
        self.game_cycle = value;
        Ok(())
    }

    pub(super) fn set_history_head(&mut self, value: u64) -> Result<(), FoundationError> {
        self.write_field(Field::HistoryHead, encode_u64(value))?;
        self.history_head = value;
        Ok(())
    }

    pub(super) fn post(&self, event: FoundationEvent) {
        match event.queue() {
            QueueKind::Transactional => self.events.post(event),
            QueueKind::NonTransactional => self.events.post_non_transactional(event),
        }
    }

    pub(super) fn post_money_changed(&self) {
        let meters = self.ledger.meters();
        self.post(FoundationEvent::MoneyChanged {
            wagerable: meters.wagerable,
            bank: meters.bank,
            paid: meters.paid,
        });
    }
}
