use std::sync::Arc;

use service::student::StudentService;

use crate::routes::graphql::StudentSchema;

/// Shared application state handed to every adapter.
///
/// The GraphQL schema also carries the service in its context data; both
/// point at the same instance.
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<StudentService>,
    pub schema: StudentSchema,
}

impl ServerState {
    pub fn new(service: Arc<StudentService>) -> Self {
        let schema = crate::routes::graphql::build_schema(Arc::clone(&service));
        Self { service, schema }
    }
}
