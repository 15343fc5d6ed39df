//! GraphQL schema for the Nivaran API.
//!
//! Resolvers are thin: classification and display logic lives in
//! `nivaran-core`, authorization decisions in `api-shared`. Each guarded
//! operation declares its allowed roles inline, next to its registration.

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Enum, Error, ErrorExtensions, Object, Result,
    Schema, SimpleObject,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use api_shared::errors::ErrorCode;
use api_shared::PrincipalSource;
use nivaran_core::status::{
    self, BookedSlotStatus, LabOrderStatus, OrderStatus, StatusDisplay, StatusTaxonomy,
    SubscriptionStatus, VideoSessionStatus,
};
use nivaran_core::{Role, sla};

use crate::guard::{GraphqlPrincipalSource, RequireRole};

/// Escalation policy attached to the schema at startup.
#[derive(Clone, Copy)]
pub struct SlaPolicy {
    pub approaching_window: Duration,
}

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with its policy data attached.
pub fn build_schema(policy: SlaPolicy) -> AppSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(policy)
        .finish()
}

/// GraphQL mirror of the platform role taxonomy.
#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "Role", remote = "nivaran_core::roles::Role")]
pub enum RoleKind {
    Patient,
    Doctor,
    Admin,
    Lab,
    Phlebotomist,
    Pharmacy,
    Delivery,
}

/// GraphQL mirror of the SLA classification taxonomy.
#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "SlaStatus", remote = "nivaran_core::sla::SlaStatus")]
pub enum SlaStatusKind {
    OnTime,
    Approaching,
    Breached,
}

/// The authenticated caller.
#[derive(SimpleObject)]
pub struct Viewer {
    pub user_id: Uuid,
    pub role: RoleKind,
    pub role_display_name: String,
}

/// Role directory entry for the admin portal.
#[derive(SimpleObject)]
pub struct RoleInfo {
    pub role: RoleKind,
    pub display_name: String,
    pub badge_color: String,
}

/// Display metadata entry of a status catalog.
#[derive(SimpleObject)]
pub struct StatusCatalogEntry {
    /// Wire value of the status.
    pub value: String,
    /// Patient-facing label.
    pub label: String,
    /// Icon slug shown beside the label.
    pub icon: String,
}

impl StatusCatalogEntry {
    fn new(value: &str, display: StatusDisplay) -> Self {
        Self {
            value: value.to_string(),
            label: display.label.to_string(),
            icon: display.icon.to_string(),
        }
    }
}

/// SLA classification of an escalation deadline.
#[derive(SimpleObject)]
pub struct SlaInfoPayload {
    pub status: SlaStatusKind,
    pub reason: Option<String>,
    pub hours_overdue: Option<i64>,
    pub deadline_at: DateTime<Utc>,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The authenticated caller and their role metadata.
    async fn me(&self, ctx: &Context<'_>) -> Result<Viewer> {
        let principal = GraphqlPrincipalSource(ctx).principal().ok_or_else(|| {
            Error::new("Authentication required")
                .extend_with(|_, e| e.set("code", ErrorCode::Unauthenticated.as_str()))
        })?;

        Ok(Viewer {
            user_id: principal.user_id,
            role: principal.role.into(),
            role_display_name: principal.role.display_name().to_string(),
        })
    }

    /// All roles with their display metadata, for the admin portal.
    #[graphql(guard = "RequireRole::any_of(&[Role::Admin])")]
    async fn role_directory(&self) -> Vec<RoleInfo> {
        Role::ALL
            .iter()
            .map(|role| RoleInfo {
                role: (*role).into(),
                display_name: role.display_name().to_string(),
                badge_color: role.badge_color().to_string(),
            })
            .collect()
    }

    /// Lab order status catalog, in lifecycle order.
    async fn lab_order_statuses(&self) -> Vec<StatusCatalogEntry> {
        LabOrderStatus::ALL
            .iter()
            .map(|s| StatusCatalogEntry::new(s.as_str(), s.display()))
            .collect()
    }

    /// Pharmacy/delivery order status catalog, in lifecycle order.
    async fn order_statuses(&self) -> Vec<StatusCatalogEntry> {
        OrderStatus::ALL
            .iter()
            .map(|s| StatusCatalogEntry::new(s.as_str(), s.display()))
            .collect()
    }

    /// Video visit status catalog, in lifecycle order.
    async fn video_session_statuses(&self) -> Vec<StatusCatalogEntry> {
        VideoSessionStatus::ALL
            .iter()
            .map(|s| StatusCatalogEntry::new(s.as_str(), s.display()))
            .collect()
    }

    /// Booked slot status catalog, in lifecycle order.
    async fn booked_slot_statuses(&self) -> Vec<StatusCatalogEntry> {
        BookedSlotStatus::ALL
            .iter()
            .map(|s| StatusCatalogEntry::new(s.as_str(), s.display()))
            .collect()
    }

    /// Subscription status catalog, in lifecycle order.
    async fn subscription_statuses(&self) -> Vec<StatusCatalogEntry> {
        SubscriptionStatus::ALL
            .iter()
            .map(|s| StatusCatalogEntry::new(s.as_str(), s.display()))
            .collect()
    }

    /// Resolve display metadata for a raw lab order status value.
    ///
    /// Unknown values resolve to a fallback entry rather than erroring;
    /// schema drift between producer and consumer is logged server-side.
    async fn lab_order_status_display(&self, raw: String) -> StatusCatalogEntry {
        let display = status::display_for_raw::<LabOrderStatus>(&raw);
        StatusCatalogEntry::new(&raw, display)
    }

    /// SLA classification of a deadline, for escalation dashboards.
    #[graphql(guard = "RequireRole::any_of(&[Role::Doctor, Role::Admin])")]
    async fn sla_status(
        &self,
        ctx: &Context<'_>,
        deadline_at: DateTime<Utc>,
    ) -> Result<SlaInfoPayload> {
        let policy = ctx.data::<SlaPolicy>()?;
        let info = sla::classify(deadline_at, Utc::now(), policy.approaching_window);

        Ok(SlaInfoPayload {
            status: info.status.into(),
            reason: info.reason,
            hours_overdue: info.hours_overdue,
            deadline_at: info.deadline_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::Principal;
    use async_graphql::Request;
    use serde_json::{Value, json};

    fn schema() -> AppSchema {
        build_schema(SlaPolicy {
            approaching_window: Duration::hours(12),
        })
    }

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    fn first_error_code(response: &async_graphql::Response) -> Value {
        let error = response.errors.first().expect("response should carry an error");
        serde_json::to_value(error).expect("serialize error")["extensions"]["code"].clone()
    }

    #[tokio::test]
    async fn me_requires_authentication() {
        let response = schema().execute(Request::new("{ me { userId } }")).await;
        assert_eq!(first_error_code(&response), json!("UNAUTHENTICATED"));
    }

    #[tokio::test]
    async fn me_returns_the_principal_role() {
        let request =
            Request::new("{ me { role roleDisplayName } }").data(principal(Role::Phlebotomist));
        let response = schema().execute(request).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        assert_eq!(data["me"]["role"], json!("PHLEBOTOMIST"));
        assert_eq!(data["me"]["roleDisplayName"], json!("Sample collector"));
    }

    #[tokio::test]
    async fn role_directory_rejects_anonymous_callers() {
        let response = schema()
            .execute(Request::new("{ roleDirectory { displayName } }"))
            .await;
        assert_eq!(first_error_code(&response), json!("UNAUTHENTICATED"));
    }

    #[tokio::test]
    async fn role_directory_rejects_non_admin_roles() {
        let request =
            Request::new("{ roleDirectory { displayName } }").data(principal(Role::Doctor));
        let response = schema().execute(request).await;
        assert_eq!(first_error_code(&response), json!("FORBIDDEN"));
    }

    #[tokio::test]
    async fn role_directory_lists_all_seven_roles_for_admins() {
        let request = Request::new("{ roleDirectory { role displayName badgeColor } }")
            .data(principal(Role::Admin));
        let response = schema().execute(request).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        let directory = data["roleDirectory"].as_array().expect("array");
        assert_eq!(directory.len(), 7);
    }

    #[tokio::test]
    async fn status_catalogs_are_public_and_complete() {
        let query = "{
            labOrderStatuses { value label icon }
            orderStatuses { value }
            videoSessionStatuses { value }
            bookedSlotStatuses { value }
            subscriptionStatuses { value }
        }";
        let response = schema().execute(Request::new(query)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        assert_eq!(data["labOrderStatuses"].as_array().expect("array").len(), 15);
        assert_eq!(data["orderStatuses"].as_array().expect("array").len(), 10);
        assert_eq!(
            data["videoSessionStatuses"].as_array().expect("array").len(),
            8
        );
        assert_eq!(
            data["bookedSlotStatuses"].as_array().expect("array").len(),
            4
        );
        assert_eq!(
            data["subscriptionStatuses"].as_array().expect("array").len(),
            4
        );
        assert_eq!(
            data["labOrderStatuses"][0],
            json!({"value": "ORDERED", "label": "Test ordered", "icon": "clipboard-list"})
        );
    }

    #[tokio::test]
    async fn unknown_raw_status_resolves_to_the_fallback_entry() {
        let query = r#"{ labOrderStatusDisplay(raw: "TELEPORTED") { value label icon } }"#;
        let response = schema().execute(Request::new(query)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        assert_eq!(
            data["labOrderStatusDisplay"],
            json!({"value": "TELEPORTED", "label": "Unknown status", "icon": "help-circle"})
        );
    }

    #[tokio::test]
    async fn sla_status_is_limited_to_doctors_and_admins() {
        let query = r#"{ slaStatus(deadlineAt: "2099-01-01T00:00:00Z") { status } }"#;

        let response = schema()
            .execute(Request::new(query).data(principal(Role::Patient)))
            .await;
        assert_eq!(first_error_code(&response), json!("FORBIDDEN"));

        let response = schema()
            .execute(Request::new(query).data(principal(Role::Doctor)))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        assert_eq!(data["slaStatus"]["status"], json!("ON_TIME"));
    }

    #[tokio::test]
    async fn sla_status_reports_breaches_with_overdue_hours() {
        let query = r#"{ slaStatus(deadlineAt: "2020-01-01T00:00:00Z") {
            status reason hoursOverdue
        } }"#;
        let response = schema()
            .execute(Request::new(query).data(principal(Role::Admin)))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().expect("data should be json");
        assert_eq!(data["slaStatus"]["status"], json!("BREACHED"));
        assert!(data["slaStatus"]["hoursOverdue"].as_i64().expect("hours") > 0);
        assert!(data["slaStatus"]["reason"].as_str().expect("reason").len() > 0);
    }
}
