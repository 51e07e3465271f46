mod skill;
mod transaction;
mod user;

pub mod graphql;
pub mod queries;
pub mod timestamp;

pub use skill::{SkillEntry, SkillTransaction};
pub use transaction::TransactionRecord;
pub use user::UserProfile;

use serde::{Deserialize, Serialize};

/// `data` payload of the user profile query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserQueryData {
    #[serde(default)]
    pub user: Vec<UserProfile>,
}

/// `data` payload of the XP transaction query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpQueryData {
    #[serde(default)]
    pub transaction: Vec<TransactionRecord>,
}

/// `data` payload of the skills query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillQueryData {
    #[serde(default)]
    pub transaction: Vec<SkillTransaction>,
}
