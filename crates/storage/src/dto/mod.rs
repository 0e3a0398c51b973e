pub mod attempt;
pub mod leaderboard;
