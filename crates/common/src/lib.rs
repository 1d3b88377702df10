pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "running" };
        assert_eq!(h.status, "running");
    }

    #[test]
    fn error_body_carries_status_and_message() {
        let body = types::ErrorBody::new(404, "Not Found", "Student not found with id: 7");
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert!(body.message.contains('7'));
        assert!(!body.timestamp.is_empty());
    }
}
