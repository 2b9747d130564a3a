use crate::{
    algorithm::allocation::{AllocationPlan, plan_allocation},
    algorithm::assembly::assemble_member,
    algorithm::shuffle::{secure_rng, shuffle},
    algorithm::validation::validate_member,
    io::configuration::COLLECTION_SHUFFLE_PASSES,
    io::error::{GenerationError, Result, WithContext},
    model::config::CollectionConfig,
    model::member::{Collection, Member},
};
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Retry policy for whole-collection attempts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Seed for reproducible runs; operating system entropy when absent
    pub seed: Option<u64>,
    /// Upper bound on attempts; retries forever when absent
    pub max_attempts: Option<usize>,
}

/// Progress notifications emitted while generating
#[derive(Debug)]
pub enum GenerationEvent<'e> {
    /// A fresh attempt planned its pools
    AttemptStarted {
        /// 1-based attempt number
        attempt: usize,
        /// Members the attempt must produce
        supply: usize,
    },
    /// A member passed validation and joined the attempt's results
    MemberAccepted {
        /// 1-based attempt number
        attempt: usize,
        /// Members accepted so far in this attempt
        accepted: usize,
    },
    /// The attempt hit a recoverable failure and was discarded
    AttemptFailed {
        /// 1-based attempt number
        attempt: usize,
        /// Cause of the failure
        error: &'e GenerationError,
    },
}

/// State owned by a single attempt and discarded with it
#[derive(Debug)]
pub struct AttemptContext {
    /// Pools still available to the attempt
    pub plan: AllocationPlan,
    /// Members accepted so far
    pub accepted: Vec<Member>,
}

impl AttemptContext {
    /// Start an attempt from freshly planned pools
    pub fn new(plan: AllocationPlan, supply: usize) -> Self {
        Self {
            plan,
            accepted: Vec::with_capacity(supply),
        }
    }
}

/// Batch controller that runs attempts until one yields a full collection
///
/// Each attempt plans fresh pools, then assembles and validates members one
/// at a time. Any recoverable failure discards everything the attempt built
/// and starts over with a new plan.
pub struct CollectionExecutor {
    config: CollectionConfig,
    rng: StdRng,
    max_attempts: Option<usize>,
    attempt: usize,
}

impl CollectionExecutor {
    /// Create an executor for a validated configuration
    pub fn new(config: CollectionConfig, executor_config: ExecutorConfig) -> Self {
        Self {
            config,
            rng: secure_rng(executor_config.seed),
            max_attempts: executor_config.max_attempts,
            attempt: 0,
        }
    }

    /// Configuration being generated
    pub const fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Number of attempts started so far
    pub const fn attempts(&self) -> usize {
        self.attempt
    }

    /// Generate without progress notifications
    ///
    /// # Errors
    ///
    /// See [`CollectionExecutor::run_with`]
    pub fn run(&mut self) -> Result<Collection> {
        self.run_with(|_| {})
    }

    /// Run attempts until one succeeds, reporting progress to `on_event`
    ///
    /// The accepted members of the successful attempt are shuffled again
    /// before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Allocation fails (static configuration problem, never retried)
    /// - The attempt limit is reached, wrapping the last failure
    pub fn run_with<F>(&mut self, mut on_event: F) -> Result<Collection>
    where
        F: FnMut(GenerationEvent<'_>),
    {
        loop {
            self.attempt += 1;
            let attempt = self.attempt;

            match self.run_attempt(&mut on_event) {
                Ok(mut members) => {
                    shuffle(&mut members, COLLECTION_SHUFFLE_PASSES, &mut self.rng)?;
                    info!(attempt, members = members.len(), "collection generated");
                    return Ok(Collection::new(members));
                }
                Err(error) if error.is_recoverable() => {
                    debug!(attempt, error = %error, "attempt discarded");
                    on_event(GenerationEvent::AttemptFailed {
                        attempt,
                        error: &error,
                    });

                    if self.max_attempts.is_some_and(|max| attempt >= max) {
                        return Err(GenerationError::AttemptsExhausted {
                            attempts: attempt,
                            last_error: Box::new(error),
                        });
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Run a single attempt over the whole supply
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Allocation fails for any attribute
    /// - A member cannot be assembled (`SelectionExhausted`)
    /// - A member fails post-hoc validation (`ValidationFailed`)
    pub fn run_attempt<F>(&mut self, on_event: &mut F) -> Result<Vec<Member>>
    where
        F: FnMut(GenerationEvent<'_>),
    {
        let supply = self.config.supply();
        let plan = plan_allocation(self.config.attributes(), supply, &mut self.rng)?;
        let mut context = AttemptContext::new(plan, supply);

        debug!(attempt = self.attempt, supply, "attempt started");
        on_event(GenerationEvent::AttemptStarted {
            attempt: self.attempt,
            supply,
        });

        for member_index in 0..supply {
            let member = assemble_member(&self.config, &mut context.plan, &context.accepted)
                .with_member(member_index)?;

            let attributes = self.config.attributes();
            validate_member(
                &member,
                self.config.exclusion_rules(),
                attributes,
                &context.accepted,
            )
            .map_err(|failure| GenerationError::ValidationFailed {
                member_index,
                failure,
                layers: member.labels(attributes),
            })?;

            context.accepted.push(member);
            on_event(GenerationEvent::MemberAccepted {
                attempt: self.attempt,
                accepted: context.accepted.len(),
            });
        }

        Ok(context.accepted)
    }
}
