//! Diesel schema for users and role assignments.

diesel::table! {
    /// Directory users.
    users (id) {
        /// Identifier issued by the identity provider.
        #[max_length = 450]
        id -> Varchar,
        /// Given name.
        #[max_length = 255]
        name -> Varchar,
        /// Family name.
        #[max_length = 255]
        surname -> Varchar,
    }
}

diesel::table! {
    /// Known role names.
    roles (id) {
        /// Role identifier.
        id -> Int4,
        /// Unique role name, e.g. `Project Manager`.
        #[max_length = 256]
        name -> Varchar,
    }
}

diesel::table! {
    /// User-to-role assignment relation.
    user_roles (user_id, role_id) {
        /// Assigned user.
        #[max_length = 450]
        user_id -> Varchar,
        /// Assigned role.
        role_id -> Int4,
    }
}

diesel::joinable!(user_roles -> roles (role_id));
diesel::joinable!(user_roles -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, roles, user_roles);
