mod party_repo;

pub use party_repo::SqlitePartyRepository;
