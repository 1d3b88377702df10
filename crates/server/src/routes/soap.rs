use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use service::student::domain::StudentInput;

use crate::state::ServerState;

use self::codec::{SoapFault, SoapRequest};

/// POST /ws: single SOAP endpoint dispatching on the body's operation
/// element, mirroring the two operations of the service.
pub async fn handle(State(state): State<ServerState>, body: String) -> Response {
    let request = match codec::parse_request(&body) {
        Ok(request) => request,
        Err(fault) => return fault_response(&fault),
    };

    let rendered = match request {
        SoapRequest::CreateStudent { name, age, grade } => state
            .service
            .create(StudentInput { name, age, grade })
            .await
            .map(|record| codec::render_student_response("createStudentResponse", &record)),
        SoapRequest::GetStudentById { id } => state
            .service
            .get_by_id(id)
            .await
            .map(|record| codec::render_student_response("getStudentByIdResponse", &record)),
    };

    match rendered {
        Ok(xml) => xml_response(StatusCode::OK, xml),
        Err(err) => fault_response(&SoapFault::from_student_error(&err)),
    }
}

fn xml_response(status: StatusCode, xml: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/xml; charset=utf-8")], xml).into_response()
}

fn fault_response(fault: &SoapFault) -> Response {
    if fault.is_server_fault() {
        tracing::error!(error = %fault.message, "soap unexpected failure");
    }
    // SOAP 1.1 carries faults on HTTP 500; the faultcode tells them apart.
    xml_response(StatusCode::INTERNAL_SERVER_ERROR, codec::render_fault(fault))
}

pub mod codec {
    use std::collections::HashMap;

    use quick_xml::escape::escape;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    use common::types::ErrorBody;
    use service::student::domain::StudentRecord;
    use service::student::errors::StudentError;

    pub const NAMESPACE_URI: &str = "http://learning.com/crud/soap";
    const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

    #[derive(Debug, PartialEq, Eq)]
    pub enum SoapRequest {
        CreateStudent { name: String, age: i32, grade: String },
        GetStudentById { id: i64 },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FaultCode {
        Client,
        Server,
    }

    #[derive(Debug)]
    pub struct SoapFault {
        pub code: FaultCode,
        pub message: String,
        pub detail: Option<ErrorBody>,
    }

    impl SoapFault {
        pub fn client(message: impl Into<String>) -> Self {
            Self { code: FaultCode::Client, message: message.into(), detail: None }
        }

        pub fn from_student_error(err: &StudentError) -> Self {
            match err {
                StudentError::NotFound(_) => Self::client(err.to_string()),
                StudentError::Repository(_) => Self {
                    code: FaultCode::Server,
                    message: err.to_string(),
                    detail: Some(ErrorBody::new(500, "Internal Server Error", err.to_string())),
                },
            }
        }

        pub fn is_server_fault(&self) -> bool {
            self.code == FaultCode::Server
        }
    }

    /// Parse a SOAP envelope into one of the two supported operations.
    ///
    /// Matching is on local names only, so any namespace prefix a client
    /// chooses is accepted.
    pub fn parse_request(body: &str) -> Result<SoapRequest, SoapFault> {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut operation: Option<String> = None;
        let mut current_field: Option<String> = None;
        let mut fields: HashMap<String, String> = HashMap::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    match local.as_str() {
                        "Envelope" | "Header" | "Body" => {}
                        "createStudentRequest" | "getStudentByIdRequest" if operation.is_none() => {
                            operation = Some(local);
                        }
                        _ if operation.is_some() => current_field = Some(local),
                        _ => {}
                    }
                }
                Ok(Event::Text(t)) => {
                    if let Some(field) = current_field.as_ref() {
                        let text = t
                            .unescape()
                            .map_err(|e| SoapFault::client(format!("malformed SOAP envelope: {e}")))?;
                        fields.insert(field.clone(), text.into_owned());
                    }
                }
                Ok(Event::End(_)) => current_field = None,
                Ok(Event::Eof) => break,
                Err(e) => return Err(SoapFault::client(format!("malformed SOAP envelope: {e}"))),
                Ok(_) => {}
            }
        }

        match operation.as_deref() {
            Some("createStudentRequest") => {
                let name = take_field(&mut fields, "name")?;
                let age = take_field(&mut fields, "age")?
                    .parse::<i32>()
                    .map_err(|_| SoapFault::client("age must be an integer"))?;
                let grade = take_field(&mut fields, "grade")?;
                Ok(SoapRequest::CreateStudent { name, age, grade })
            }
            Some("getStudentByIdRequest") => {
                let id = take_field(&mut fields, "id")?
                    .parse::<i64>()
                    .map_err(|_| SoapFault::client("id must be an integer"))?;
                Ok(SoapRequest::GetStudentById { id })
            }
            _ => Err(SoapFault::client("unknown SOAP operation")),
        }
    }

    fn take_field(fields: &mut HashMap<String, String>, name: &str) -> Result<String, SoapFault> {
        fields
            .remove(name)
            .ok_or_else(|| SoapFault::client(format!("missing required element: {name}")))
    }

    /// Render a `<student>` payload wrapped in the named response element.
    pub fn render_student_response(operation: &str, record: &StudentRecord) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<soapenv:Envelope xmlns:soapenv="{env}">"#,
                "<soapenv:Body>",
                r#"<ns2:{op} xmlns:ns2="{ns}">"#,
                "<ns2:student>",
                "<ns2:id>{id}</ns2:id>",
                "<ns2:name>{name}</ns2:name>",
                "<ns2:age>{age}</ns2:age>",
                "<ns2:grade>{grade}</ns2:grade>",
                "</ns2:student>",
                "</ns2:{op}>",
                "</soapenv:Body>",
                "</soapenv:Envelope>",
            ),
            env = SOAP_ENV_NS,
            ns = NAMESPACE_URI,
            op = operation,
            id = record.id,
            name = escape(record.name.as_str()),
            age = record.age,
            grade = escape(record.grade.as_str()),
        )
    }

    pub fn render_fault(fault: &SoapFault) -> String {
        let faultcode = match fault.code {
            FaultCode::Client => "soapenv:Client",
            FaultCode::Server => "soapenv:Server",
        };
        let detail = match &fault.detail {
            Some(body) => format!(
                concat!(
                    "<detail>",
                    "<timestamp>{timestamp}</timestamp>",
                    "<status>{status}</status>",
                    "<message>{message}</message>",
                    "</detail>",
                ),
                timestamp = escape(body.timestamp.as_str()),
                status = body.status,
                message = escape(body.message.as_str()),
            ),
            None => String::new(),
        };
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<soapenv:Envelope xmlns:soapenv="{env}">"#,
                "<soapenv:Body>",
                "<soapenv:Fault>",
                "<faultcode>{faultcode}</faultcode>",
                "<faultstring>{faultstring}</faultstring>",
                "{detail}",
                "</soapenv:Fault>",
                "</soapenv:Body>",
                "</soapenv:Envelope>",
            ),
            env = SOAP_ENV_NS,
            faultcode = faultcode,
            faultstring = escape(fault.message.as_str()),
            detail = detail,
        )
    }

}
