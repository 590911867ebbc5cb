//! `PostgreSQL` user directory implementation.

use super::{
    models::{NewUserRoleRow, UserRow},
    schema::{roles, user_roles, users},
};
use crate::identity::{
    domain::{Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use crate::persistence::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find(&self, id: &UserId) -> UserDirectoryResult<Option<User>> {
        let user_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .find(user_id)
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn role_of(&self, id: &UserId) -> UserDirectoryResult<Option<String>> {
        let user_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            user_roles::table
                .inner_join(roles::table)
                .filter(user_roles::user_id.eq(user_id))
                .order(roles::id)
                .select(roles::name)
                .first::<String>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)
        })
        .await
    }

    async fn all(&self) -> UserDirectoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            users::table
                .order(users::id)
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }

    async fn add(&self, user: &User, role: Role) -> UserDirectoryResult<()> {
        let row = UserRow {
            id: user.id().as_str().to_owned(),
            name: user.name().to_owned(),
            surname: user.surname().to_owned(),
        };
        let user_id = user.id().clone();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|conn| {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .execute(conn)?;
                    replace_role(conn, &row.id, role)
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserDirectoryError::DuplicateUser(user_id.clone())
                    }
                    _ => UserDirectoryError::persistence(err),
                })
        })
        .await
    }

    async fn assign_role(&self, id: &UserId, role: Role) -> UserDirectoryResult<()> {
        let user_id = id.clone();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|conn| {
                    let exists = diesel::select(diesel::dsl::exists(
                        users::table.find(user_id.as_str()),
                    ))
                    .get_result::<bool>(conn)?;
                    if !exists {
                        return Err(DieselError::NotFound);
                    }
                    replace_role(conn, user_id.as_str(), role)
                })
                .map_err(|err| not_found_or_persistence(err, &user_id))
        })
        .await
    }

    async fn remove(&self, id: &UserId) -> UserDirectoryResult<()> {
        let user_id = id.clone();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|conn| {
                    diesel::delete(
                        user_roles::table.filter(user_roles::user_id.eq(user_id.as_str())),
                    )
                    .execute(conn)?;
                    let deleted = diesel::delete(users::table.find(user_id.as_str())).execute(conn)?;
                    if deleted == 0 {
                        return Err(DieselError::NotFound);
                    }
                    Ok(())
                })
                .map_err(|err| not_found_or_persistence(err, &user_id))
        })
        .await
    }
}

/// Replaces every assignment of `user_id` with `role`, creating the role row
/// on first use.
fn replace_role(conn: &mut PgConnection, user_id: &str, role: Role) -> QueryResult<()> {
    let role_id = ensure_role(conn, role.as_str())?;
    diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id))).execute(conn)?;
    diesel::insert_into(user_roles::table)
        .values(&NewUserRoleRow {
            user_id: user_id.to_owned(),
            role_id,
        })
        .execute(conn)?;
    Ok(())
}

fn ensure_role(conn: &mut PgConnection, name: &str) -> QueryResult<i32> {
    let existing = roles::table
        .filter(roles::name.eq(name))
        .select(roles::id)
        .first::<i32>(conn)
        .optional()?;
    if let Some(role_id) = existing {
        return Ok(role_id);
    }
    diesel::insert_into(roles::table)
        .values(roles::name.eq(name))
        .returning(roles::id)
        .get_result(conn)
}

fn not_found_or_persistence(err: DieselError, user_id: &UserId) -> UserDirectoryError {
    match err {
        DieselError::NotFound => UserDirectoryError::NotFound(user_id.clone()),
        _ => UserDirectoryError::persistence(err),
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow { id, name, surname } = row;
    let user_id = UserId::new(id).map_err(UserDirectoryError::persistence)?;
    User::new(user_id, name, surname).map_err(UserDirectoryError::persistence)
}
