//! Field-level permissions for task changes.
//!
//! [`field_grant`] is the single table deciding which role may change which
//! field. [`TaskAccess`] first works out how the acting user relates to a
//! particular task, so a project manager who does not manage the task's
//! project, or a developer who is not assigned to it, is treated like a user
//! without a role.

use super::{Task, TaskEdit, TaskField, TaskStatus};
use crate::identity::domain::{Actor, Role};
use crate::project::domain::Project;
use thiserror::Error;

/// What a role may do with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The field must not change.
    Denied,
    /// The field may change as long as the status does not move backwards.
    ForwardOnly,
    /// Any change is allowed.
    Allowed,
}

/// Looks up the permission of `role` on `field`.
#[must_use]
pub const fn field_grant(role: Role, field: TaskField) -> Grant {
    match (role, field) {
        (Role::Admin, _)
        | (
            Role::ProjectManager,
            TaskField::Name
            | TaskField::Description
            | TaskField::Deadline
            | TaskField::Progress
            | TaskField::DeveloperId,
        )
        | (Role::Developer, TaskField::Progress) => Grant::Allowed,
        (Role::ProjectManager | Role::Developer, TaskField::Status) => Grant::ForwardOnly,
        _ => Grant::Denied,
    }
}

/// How the acting user relates to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRelation {
    /// The actor is an administrator.
    Administrator,
    /// The actor manages the task's project.
    ProjectOwner,
    /// The actor is the task's developer.
    AssignedDeveloper,
    /// The actor has no standing on the task.
    Unrelated,
}

impl TaskRelation {
    /// Returns the role whose grants apply to this relation.
    #[must_use]
    pub const fn effective_role(self) -> Role {
        match self {
            Self::Administrator => Role::Admin,
            Self::ProjectOwner => Role::ProjectManager,
            Self::AssignedDeveloper => Role::Developer,
            Self::Unrelated => Role::Default,
        }
    }
}

/// Reason an edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenial {
    /// The relation grants no change of the field.
    #[error("{relation:?} may not change {field}")]
    FieldNotGranted {
        /// Field that was changed.
        field: TaskField,
        /// Relation of the actor to the task.
        relation: TaskRelation,
    },
    /// The status would move backwards.
    #[error("{relation:?} may not move status from {from} back to {to}")]
    ReverseTransition {
        /// Stored status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
        /// Relation of the actor to the task.
        relation: TaskRelation,
    },
}

/// Permissions of one actor on one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAccess {
    relation: TaskRelation,
}

impl TaskAccess {
    /// Resolves the actor's relation to `task`.
    ///
    /// `project` is the task's project; a manager can only own a task whose
    /// project is known.
    #[must_use]
    pub fn resolve(actor: &Actor, task: &Task, project: Option<&Project>) -> Self {
        let relation = match actor.role() {
            Role::Admin => TaskRelation::Administrator,
            Role::ProjectManager
                if project.is_some_and(|owned| owned.is_managed_by(actor.user_id())) =>
            {
                TaskRelation::ProjectOwner
            }
            Role::Developer if task.is_assigned_to(actor.user_id()) => {
                TaskRelation::AssignedDeveloper
            }
            Role::ProjectManager | Role::Developer | Role::Default => TaskRelation::Unrelated,
        };
        Self { relation }
    }

    /// Returns the resolved relation.
    #[must_use]
    pub const fn relation(self) -> TaskRelation {
        self.relation
    }

    /// Returns the grant on `field`.
    #[must_use]
    pub const fn grant(self, field: TaskField) -> Grant {
        field_grant(self.relation.effective_role(), field)
    }

    /// Checks every field that `edit` changes on `task`.
    ///
    /// # Errors
    ///
    /// Returns the first [`AccessDenial`] found, in form order.
    pub fn check_edit(self, task: &Task, edit: &TaskEdit) -> Result<(), AccessDenial> {
        for field in task.changed_fields(edit) {
            match self.grant(field) {
                Grant::Allowed => {}
                Grant::ForwardOnly if task.status().can_advance_to(edit.status) => {}
                Grant::ForwardOnly => {
                    return Err(AccessDenial::ReverseTransition {
                        from: task.status(),
                        to: edit.status,
                        relation: self.relation,
                    });
                }
                Grant::Denied => {
                    return Err(AccessDenial::FieldNotGranted {
                        field,
                        relation: self.relation,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` when the actor may submit edits to the task at all.
    ///
    /// Unrelated actors are refused even when their form changes nothing.
    #[must_use]
    pub const fn may_edit(self) -> bool {
        !matches!(self.relation, TaskRelation::Unrelated)
    }

    /// Returns `true` when the actor may delete the task.
    #[must_use]
    pub const fn may_delete(self) -> bool {
        matches!(
            self.relation,
            TaskRelation::Administrator | TaskRelation::ProjectOwner
        )
    }

    /// Returns `true` when the actor may see the task.
    #[must_use]
    pub const fn may_view(self) -> bool {
        !matches!(self.relation, TaskRelation::Unrelated)
    }

    /// Returns `true` when the actor may create tasks in `project`.
    #[must_use]
    pub fn may_create(actor: &Actor, project: &Project) -> bool {
        match actor.role() {
            Role::Admin => true,
            Role::ProjectManager => project.is_managed_by(actor.user_id()),
            Role::Developer | Role::Default => false,
        }
    }
}
