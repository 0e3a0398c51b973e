pub mod attempts;
pub mod leaderboard;
