use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::entities::{MemberRole, Party, PartyMember};
use crate::domain::repositories::{PartyRepository, RepositoryError};

/// SQLite implementation of PartyRepository
pub struct SqlitePartyRepository {
    pool: SqlitePool,
}

impl SqlitePartyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
        Uuid::parse_str(value)
            .map_err(|e| RepositoryError::Database(format!("Invalid UUID {:?}: {}", value, e)))
    }

    fn row_to_party(row: &sqlx::sqlite::SqliteRow) -> Result<Party, RepositoryError> {
        use sqlx::Row;

        let id: String = row.get("id");
        let owner_id: String = row.get("owner_id");
        let max_size: i64 = row.get("max_size");

        Ok(Party {
            id: Self::parse_uuid(&id)?,
            owner_id: Self::parse_uuid(&owner_id)?,
            invite_code: row.get("invite_code"),
            max_size: max_size as u32,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            members: Vec::new(),
        })
    }

    fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<PartyMember, RepositoryError> {
        use sqlx::Row;

        let party_id: String = row.get("party_id");
        let account_id: String = row.get("account_id");
        let role_str: String = row.get("role");

        Ok(PartyMember {
            party_id: Self::parse_uuid(&party_id)?,
            account_id: Self::parse_uuid(&account_id)?,
            role: MemberRole::from_str(&role_str)
                .ok_or_else(|| RepositoryError::Database(format!("Unknown role: {}", role_str)))?,
            joined_at: row.get("joined_at"),
        })
    }
}

/// Map sqlx errors, surfacing unique-index violations as their own variants
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("invite_code") {
                return RepositoryError::InviteCodeTaken;
            }
            return RepositoryError::AlreadyExists(message.to_string());
        }
    }
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl PartyRepository for SqlitePartyRepository {
    async fn find_membership(
        &self,
        account_id: Uuid,
    ) -> Result<Option<PartyMember>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM party_members WHERE account_id = ?")
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Party>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM parties WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_party).transpose()
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Party>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM parties WHERE invite_code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_party).transpose()
    }

    async fn get_members(&self, party_id: Uuid) -> Result<Vec<PartyMember>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM party_members WHERE party_id = ? ORDER BY joined_at ASC, rowid ASC",
        )
        .bind(party_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(Self::row_to_member).collect()
    }

    async fn create_with_owner(
        &self,
        party: &Party,
        owner: &PartyMember,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO parties (id, owner_id, invite_code, max_size, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(party.id.to_string())
        .bind(party.owner_id.to_string())
        .bind(&party.invite_code)
        .bind(party.max_size as i64)
        .bind(party.created_at)
        .bind(party.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            "INSERT INTO party_members (party_id, account_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(owner.party_id.to_string())
        .bind(owner.account_id.to_string())
        .bind(owner.role.as_str())
        .bind(owner.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn add_member_if_room(
        &self,
        member: &PartyMember,
        max_size: u32,
    ) -> Result<bool, RepositoryError> {
        // Count and insert in one statement so concurrent joins cannot overshoot max_size
        let result = sqlx::query(
            r#"
            INSERT INTO party_members (party_id, account_id, role, joined_at)
            SELECT ?, ?, ?, ?
            WHERE (SELECT COUNT(*) FROM party_members WHERE party_id = ?) < ?
            "#,
        )
        .bind(member.party_id.to_string())
        .bind(member.account_id.to_string())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .bind(member.party_id.to_string())
        .bind(max_size as i64)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_member(
        &self,
        party_id: Uuid,
        account_id: Uuid,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM party_members WHERE party_id = ? AND account_id = ?")
            .bind(party_id.to_string())
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn transfer_ownership(
        &self,
        party_id: Uuid,
        from: Uuid,
        to: Uuid,
    ) -> Result<(), RepositoryError> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let demoted = sqlx::query(
            "UPDATE party_members SET role = ? WHERE party_id = ? AND account_id = ? AND role = ?",
        )
        .bind(MemberRole::Member.as_str())
        .bind(party_id.to_string())
        .bind(from.to_string())
        .bind(MemberRole::Owner.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        // Another transfer already moved the owner role away from `from`
        if demoted.rows_affected() == 0 {
            return Err(RepositoryError::OwnerChanged);
        }

        let promoted =
            sqlx::query("UPDATE party_members SET role = ? WHERE party_id = ? AND account_id = ?")
                .bind(MemberRole::Owner.as_str())
                .bind(party_id.to_string())
                .bind(to.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        // Target left between the membership check and now; dropping tx rolls back
        if promoted.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("member {}", to)));
        }

        sqlx::query("UPDATE parties SET owner_id = ?, updated_at = ? WHERE id = ?")
            .bind(to.to_string())
            .bind(now)
            .bind(party_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn disband(&self, party_id: Uuid) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM party_members WHERE party_id = ?")
            .bind(party_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query("DELETE FROM parties WHERE id = ?")
            .bind(party_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn update_invite_code(
        &self,
        party_id: Uuid,
        code: &str,
    ) -> Result<(), RepositoryError> {
        let now = chrono::Utc::now().timestamp_millis();

        let result = sqlx::query("UPDATE parties SET invite_code = ?, updated_at = ? WHERE id = ?")
            .bind(code)
            .bind(now)
            .bind(party_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("party {}", party_id)));
        }

        Ok(())
    }
}
