//! Route lookup.
//!
//! # Responsibilities
//! - Hold the fixed table of (method, path) → route
//! - Look up the route for a request, once
//! - Return an explicit `Route::NotFound` rather than a silent default
//!
//! # Design Decisions
//! - Exact path match only; there are no path parameters
//! - Table order decides between entries sharing a path
//! - `OPTIONS` never reaches the table (pre-flight is answered first)

use axum::http::Method;

/// Every destination a request can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` and `/healthz`, any method.
    Health,
    /// `/env`, any method.
    Env,
    /// `GET /whatsapp/test`
    WhatsAppTest,
    /// `POST /criar-entrega`
    CreateDelivery,
    /// `POST /aceitar-motorista`
    AcceptDriver,
    /// `GET /whatsapp/webhook`
    WebhookVerify,
    /// `POST /whatsapp/webhook`
    WebhookReceive,
    /// Nothing matched.
    NotFound,
}

impl Route {
    /// Stable label for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Route::Health => "health",
            Route::Env => "env",
            Route::WhatsAppTest => "whatsapp_test",
            Route::CreateDelivery => "create_delivery",
            Route::AcceptDriver => "accept_driver",
            Route::WebhookVerify => "webhook_verify",
            Route::WebhookReceive => "webhook_receive",
            Route::NotFound => "not_found",
        }
    }

    /// Whether the response goes out without the JSON/CORS envelope.
    pub fn is_bare(self) -> bool {
        matches!(self, Route::WebhookVerify)
    }
}

/// Method condition of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFilter {
    Any,
    Get,
    Post,
}

impl MethodFilter {
    fn allows(self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Get => *method == Method::GET,
            MethodFilter::Post => *method == Method::POST,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RouteEntry {
    path: &'static str,
    method: MethodFilter,
    route: Route,
}

const GATEWAY_ROUTES: &[RouteEntry] = &[
    RouteEntry { path: "/", method: MethodFilter::Any, route: Route::Health },
    RouteEntry { path: "/healthz", method: MethodFilter::Any, route: Route::Health },
    RouteEntry { path: "/env", method: MethodFilter::Any, route: Route::Env },
    RouteEntry { path: "/whatsapp/test", method: MethodFilter::Get, route: Route::WhatsAppTest },
    RouteEntry { path: "/criar-entrega", method: MethodFilter::Post, route: Route::CreateDelivery },
    RouteEntry { path: "/aceitar-motorista", method: MethodFilter::Post, route: Route::AcceptDriver },
    RouteEntry { path: "/whatsapp/webhook", method: MethodFilter::Get, route: Route::WebhookVerify },
    RouteEntry { path: "/whatsapp/webhook", method: MethodFilter::Post, route: Route::WebhookReceive },
];

/// Immutable route table, shared by all requests.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: &'static [RouteEntry],
}

impl RouteTable {
    /// The gateway's route table.
    pub fn gateway() -> Self {
        Self {
            entries: GATEWAY_ROUTES,
        }
    }

    /// Find the route for `method` and `path`.
    pub fn match_request(&self, method: &Method, path: &str) -> Route {
        self.entries
            .iter()
            .find(|entry| entry.path == path && entry.method.allows(method))
            .map(|entry| entry.route)
            .unwrap_or(Route::NotFound)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::gateway()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_any_method() {
        let table = RouteTable::gateway();
        assert_eq!(table.match_request(&Method::GET, "/"), Route::Health);
        assert_eq!(table.match_request(&Method::POST, "/healthz"), Route::Health);
        assert_eq!(table.match_request(&Method::DELETE, "/env"), Route::Env);
    }

    #[test]
    fn test_method_restricted_routes() {
        let table = RouteTable::gateway();
        assert_eq!(table.match_request(&Method::GET, "/whatsapp/test"), Route::WhatsAppTest);
        assert_eq!(table.match_request(&Method::POST, "/whatsapp/test"), Route::NotFound);
        assert_eq!(table.match_request(&Method::POST, "/criar-entrega"), Route::CreateDelivery);
        assert_eq!(table.match_request(&Method::GET, "/criar-entrega"), Route::NotFound);
        assert_eq!(table.match_request(&Method::POST, "/aceitar-motorista"), Route::AcceptDriver);
    }

    #[test]
    fn test_webhook_split_by_method() {
        let table = RouteTable::gateway();
        assert_eq!(table.match_request(&Method::GET, "/whatsapp/webhook"), Route::WebhookVerify);
        assert_eq!(table.match_request(&Method::POST, "/whatsapp/webhook"), Route::WebhookReceive);
        assert_eq!(table.match_request(&Method::PUT, "/whatsapp/webhook"), Route::NotFound);
        assert!(Route::WebhookVerify.is_bare());
        assert!(!Route::WebhookReceive.is_bare());
    }

    #[test]
    fn test_exact_match_only() {
        let table = RouteTable::gateway();
        assert_eq!(table.match_request(&Method::GET, "/nope"), Route::NotFound);
        assert_eq!(table.match_request(&Method::GET, "/healthz/"), Route::NotFound);
        assert_eq!(table.match_request(&Method::POST, "/criar-entrega/1"), Route::NotFound);
    }
}
