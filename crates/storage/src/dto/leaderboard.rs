use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::attempt::AttemptResponse;
use crate::models::Category;

/// A racer's best time on one run within a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BestTimeEntry {
    pub rank: i64,
    pub name: String,
    pub category: Category,
    pub run_name: String,
    pub best_time: f64,
    pub formatted_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInfo {
    pub label: Category,
    pub slug: String,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            label: category,
            slug: category.slug().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryLeaderboard {
    pub category: CategoryInfo,
    pub entries: Vec<BestTimeEntry>,
}

/// Every category ranking in display order plus the chronological attempt log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub categories: Vec<CategoryLeaderboard>,
    pub attempts: Vec<AttemptResponse>,
}
