//! Repository traits (ports)

mod repositories;

pub use repositories::{
    RepoResult, ResponseOrder, ResponseRepository, ResponseWithUser, SurveyRepository,
    SurveyWithCount, UserRepository,
};
