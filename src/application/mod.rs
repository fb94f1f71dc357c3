pub mod party;
