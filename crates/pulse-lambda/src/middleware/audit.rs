use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;
use uuid::Uuid;

/// Request logging middleware.
///
/// Logs every API request as a structured event using `tracing`. In
/// production these flow to CloudWatch via the JSON subscriber.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    info!(
        method = %method,
        path = %uri,
        status = status,
        "api_request"
    );

    response
}

/// A structured audit event for a successful mutation, emitted by handlers
/// after the store call returns.
#[derive(Debug)]
pub struct AuditEvent {
    pub action: &'static str,
    pub resource_type: &'static str,
    pub resource_id: Uuid,
    pub principal: String,
}

impl AuditEvent {
    pub fn new(
        action: &'static str,
        resource_type: &'static str,
        resource_id: Uuid,
        principal: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type,
            resource_id,
            principal: principal.into(),
        }
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        info!(
            audit.action = self.action,
            audit.resource_type = self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.principal = %self.principal,
            "audit event"
        );
    }
}
