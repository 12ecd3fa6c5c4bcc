use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("alignment database has no reference position")]
    NoReferencePosition,

    #[error("alignment engine has not been initialised")]
    NotInitialised,

    #[error("direction vectors form a singular basis")]
    SingularBasis,

    #[error("convex hull construction failed: {0}")]
    Hull(String),

    #[error("no facet intersection and no usable nearest-neighbour transform")]
    NoTransform,
}

pub type Result<T> = std::result::Result<T, Error>;
