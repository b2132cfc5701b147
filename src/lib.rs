pub mod categorize;
pub mod export;
pub mod http_client;
pub mod positions;
pub mod ratings_fetch;
pub mod report;
pub mod roster_fetch;
pub mod schedule_fetch;
pub mod team_directory;
