use hos_core::CoreError;
use hos_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("planner emitted more than {0} stops; check the rule set")]
    StopLimit(usize),
}

pub type PlanResult<T> = Result<T, PlanError>;
