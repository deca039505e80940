//! Top-level orchestration loop: executes the step for the current
//! state, feeds the outcome through the pure transition table, and
//! paces every transition with a randomized delay.

use tracing::{error, info};

use vrs_config::{Config, Credentials};
use vrs_core::State;
use vrs_gateway::{AppointmentGateway, Portal};
use vrs_scheduler::{StepOutcome, next_state, random_delay, run_cycle};
use vrs_session::SessionContext;

pub struct Orchestrator<P> {
    portal: P,
    config: Config,
    credentials: Credentials,
    ctx: SessionContext,
    retry_count: u32,
}

impl<P> Orchestrator<P>
where
    P: Portal + AppointmentGateway,
{
    pub fn new(portal: P, config: Config, credentials: Credentials) -> Self {
        Self {
            portal,
            config,
            credentials,
            ctx: SessionContext::new(),
            retry_count: 0,
        }
    }

    /// Drive the loop to a terminal state. There is no cancellation;
    /// stopping early means killing the process.
    pub async fn run(&mut self) -> State {
        let mut state = State::NotLoggedIn;

        while !state.is_terminal() {
            let outcome = self.execute(state).await;
            state = next_state(state, outcome);
            random_delay(&self.config.delays).await;
        }

        match state {
            State::Complete => info!("Successfully rescheduled appointment."),
            _ => error!("Reached an error state, stopping..."),
        }
        state
    }

    async fn execute(&mut self, state: State) -> StepOutcome {
        match state {
            State::NotLoggedIn => match self.portal.login(&self.credentials).await {
                Ok(()) => {
                    // Fresh session: drop any identifiers from before.
                    self.ctx.reset_session();
                    self.retry_count = 0;
                    StepOutcome::Done
                }
                Err(err) => {
                    error!(error = %err, "Login failed");
                    StepOutcome::Failed
                }
            },
            State::NavigateToReschedule => match self.portal.goto_reschedule().await {
                Ok(action_id) => {
                    self.ctx.set_action_id(action_id);
                    StepOutcome::Done
                }
                Err(err) => {
                    error!(error = %err, "Navigation failed");
                    StepOutcome::Failed
                }
            },
            State::Rescheduling => StepOutcome::Cycle(
                run_cycle(
                    &mut self.portal,
                    &mut self.ctx,
                    &self.config,
                    &mut self.retry_count,
                )
                .await,
            ),
            State::Refresh => {
                self.retry_count = 0;
                match self.portal.reload().await {
                    Ok(()) => StepOutcome::Done,
                    Err(err) => {
                        error!(error = %err, "Reload failed");
                        StepOutcome::Failed
                    }
                }
            }
            // The loop never executes terminal states.
            State::Complete | State::Error => StepOutcome::Done,
        }
    }

    #[cfg(test)]
    pub(crate) fn retry_count(&self) -> u32 {
        self.retry_count
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
