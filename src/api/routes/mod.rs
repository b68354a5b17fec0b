pub mod lobby;
pub mod teams;
