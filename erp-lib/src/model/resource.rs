//! Backend resources and their action endpoints

use std::fmt;

/// A REST collection of the ERP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Parts,
    Operations,
    JobOrders,
    OvertimeRequests,
    PurchaseRequests,
    Suppliers,
    PaymentTerms,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Parts,
        Resource::Operations,
        Resource::JobOrders,
        Resource::OvertimeRequests,
        Resource::PurchaseRequests,
        Resource::Suppliers,
        Resource::PaymentTerms,
    ];

    /// Collection path relative to the API base, without slashes.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Parts => "tasks/parts",
            Resource::Operations => "tasks/operations",
            Resource::JobOrders => "projects/job-orders",
            Resource::OvertimeRequests => "overtime/requests",
            Resource::PurchaseRequests => "procurement/purchase-requests",
            Resource::Suppliers => "procurement/suppliers",
            Resource::PaymentTerms => "procurement/payment-terms",
        }
    }

    /// Field holding the primary key of an entity.
    pub fn id_field(&self) -> &'static str {
        match self {
            Resource::Parts | Resource::Operations => "key",
            Resource::JobOrders => "job_no",
            _ => "id",
        }
    }

    /// Human-readable singular name.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Parts => "part",
            Resource::Operations => "operation",
            Resource::JobOrders => "job order",
            Resource::OvertimeRequests => "overtime request",
            Resource::PurchaseRequests => "purchase request",
            Resource::Suppliers => "supplier",
            Resource::PaymentTerms => "payment term",
        }
    }

    /// Item actions the backend offers for this resource.
    pub fn actions(&self) -> &'static [ItemAction] {
        match self {
            Resource::Parts => &[],
            Resource::Operations => &[ItemAction::MarkCompleted, ItemAction::UnmarkCompleted],
            Resource::JobOrders => &[
                ItemAction::Start,
                ItemAction::Complete,
                ItemAction::Hold,
                ItemAction::Resume,
                ItemAction::Cancel,
            ],
            Resource::OvertimeRequests => {
                &[ItemAction::Approve, ItemAction::Reject, ItemAction::Cancel]
            }
            Resource::PurchaseRequests => &[
                ItemAction::Submit,
                ItemAction::Approve,
                ItemAction::Reject,
                ItemAction::Cancel,
                ItemAction::Complete,
            ],
            Resource::Suppliers | Resource::PaymentTerms => &[ItemAction::ToggleStatus],
        }
    }

    pub fn supports(&self, action: ItemAction) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// An action endpoint on one entity (`POST <collection>/<id>/<action>/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    MarkCompleted,
    UnmarkCompleted,
    Approve,
    Reject,
    Cancel,
    Submit,
    Complete,
    Start,
    Hold,
    Resume,
    ToggleStatus,
}

impl ItemAction {
    pub fn path(&self) -> &'static str {
        match self {
            ItemAction::MarkCompleted => "mark_completed",
            ItemAction::UnmarkCompleted => "unmark_completed",
            ItemAction::Approve => "approve",
            ItemAction::Reject => "reject",
            ItemAction::Cancel => "cancel",
            ItemAction::Submit => "submit",
            ItemAction::Complete => "complete",
            ItemAction::Start => "start",
            ItemAction::Hold => "hold",
            ItemAction::Resume => "resume",
            ItemAction::ToggleStatus => "toggle_status",
        }
    }

    /// Past-tense verb for success messages.
    pub fn done(&self) -> &'static str {
        match self {
            ItemAction::MarkCompleted => "marked completed",
            ItemAction::UnmarkCompleted => "marked incomplete",
            ItemAction::Approve => "approved",
            ItemAction::Reject => "rejected",
            ItemAction::Cancel => "cancelled",
            ItemAction::Submit => "submitted",
            ItemAction::Complete => "completed",
            ItemAction::Start => "started",
            ItemAction::Hold => "put on hold",
            ItemAction::Resume => "resumed",
            ItemAction::ToggleStatus => "status toggled",
        }
    }
}

impl std::str::FromStr for ItemAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.replace('-', "_").as_str() {
            "mark_completed" => ItemAction::MarkCompleted,
            "unmark_completed" => ItemAction::UnmarkCompleted,
            "approve" => ItemAction::Approve,
            "reject" => ItemAction::Reject,
            "cancel" => ItemAction::Cancel,
            "submit" => ItemAction::Submit,
            "complete" => ItemAction::Complete,
            "start" => ItemAction::Start,
            "hold" => ItemAction::Hold,
            "resume" => ItemAction::Resume,
            "toggle_status" => ItemAction::ToggleStatus,
            other => return Err(format!("unknown action '{other}'")),
        };
        Ok(action)
    }
}

/// An action endpoint on a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionAction {
    /// `POST <collection>/bulk-create/`
    BulkCreate,
    /// `PUT <collection>/planning/bulk-save/`
    PlanningBulkSave,
}

impl CollectionAction {
    pub fn path(&self) -> &'static str {
        match self {
            CollectionAction::BulkCreate => "bulk-create",
            CollectionAction::PlanningBulkSave => "planning/bulk-save",
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            CollectionAction::BulkCreate => reqwest::Method::POST,
            CollectionAction::PlanningBulkSave => reqwest::Method::PUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!("mark-completed".parse::<ItemAction>(), Ok(ItemAction::MarkCompleted));
        assert_eq!("toggle_status".parse::<ItemAction>(), Ok(ItemAction::ToggleStatus));
        assert!("explode".parse::<ItemAction>().is_err());
    }

    #[test]
    fn test_supported_actions() {
        assert!(Resource::Operations.supports(ItemAction::MarkCompleted));
        assert!(!Resource::Parts.supports(ItemAction::Approve));
        assert!(Resource::Suppliers.supports(ItemAction::ToggleStatus));
    }
}
