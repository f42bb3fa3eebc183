use serde::Serialize;
use std::fmt;

/// Which branch answered a query; the label is what the trace log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteModule {
    Faq,
    Email,
    TicketCreate,
    TicketTrack,
    Actions,
    Context,
    Fallback,
    ErrorHandler,
}

impl RouteModule {
    pub fn label(&self) -> &'static str {
        match self {
            RouteModule::Faq => "FAQ Module",
            RouteModule::Email => "Email Module",
            RouteModule::TicketCreate => "Support Module (Create Ticket)",
            RouteModule::TicketTrack => "Support Module (Track Ticket)",
            RouteModule::Actions => "Actions Module",
            RouteModule::Context => "Context-Enhanced Response",
            RouteModule::Fallback => "Fallback",
            RouteModule::ErrorHandler => "Error Handler",
        }
    }
}

impl fmt::Display for RouteModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RouteModule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// What the user sees for one routed query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub confidence: f64,
    pub context_aware: bool,
    pub context_used: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_by: Option<String>,
}

impl RouteResponse {
    pub fn answer(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_labels() {
        assert_eq!(RouteModule::Actions.to_string(), "Actions Module");
        assert_eq!(
            serde_json::to_string(&RouteModule::TicketTrack).unwrap(),
            "\"Support Module (Track Ticket)\""
        );
    }

    #[test]
    fn test_response_serialization_skips_empty() {
        let json = serde_json::to_value(RouteResponse::answer("hi", 0.5)).unwrap();
        assert_eq!(json["text"], "hi");
        assert!(json.get("actions").is_none());
        assert!(json.get("data").is_none());
        assert_eq!(json["context_aware"], false);
    }
}
