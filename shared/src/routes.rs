//! Route table for the schedule endpoint.
//!
//! Routes are matched by exact method and by *substring* of the path, in
//! table order. `/schedule/events`, `/events?id=3` and `/api/events/42` all
//! reach the event handlers; a path containing both fragments resolves to
//! whichever entry comes first.

/// Everything the schedule endpoint can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    ListEvents,
    ListPersons,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    CreatePerson,
    DeletePerson,
}

/// One row of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub method: &'static str,
    /// Path fragment that must appear somewhere in the path; empty matches any path.
    pub fragment: &'static str,
    pub route: Route,
}

/// Routes in priority order; the first match wins.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { method: "OPTIONS", fragment: "", route: Route::Preflight },
    RouteEntry { method: "GET", fragment: "events", route: Route::ListEvents },
    RouteEntry { method: "GET", fragment: "persons", route: Route::ListPersons },
    RouteEntry { method: "POST", fragment: "events", route: Route::CreateEvent },
    RouteEntry { method: "PUT", fragment: "events", route: Route::UpdateEvent },
    RouteEntry { method: "DELETE", fragment: "events", route: Route::DeleteEvent },
    RouteEntry { method: "POST", fragment: "persons", route: Route::CreatePerson },
    RouteEntry { method: "DELETE", fragment: "persons", route: Route::DeletePerson },
];

impl RouteEntry {
    fn matches(&self, method: &str, path: &str) -> bool {
        self.method == method && path.contains(self.fragment)
    }
}

impl Route {
    /// Find the first route whose method and path fragment match.
    pub fn resolve(method: &str, path: &str) -> Option<Route> {
        ROUTES
            .iter()
            .find(|entry| entry.matches(method, path))
            .map(|entry| entry.route)
    }

    /// Whether handling this route needs a datastore connection.
    pub fn needs_datastore(self) -> bool {
        !matches!(self, Route::Preflight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_each_route() {
        let cases = [
            ("OPTIONS", "/schedule/anything", Route::Preflight),
            ("GET", "/schedule/events", Route::ListEvents),
            ("GET", "/schedule/persons", Route::ListPersons),
            ("POST", "/schedule/events", Route::CreateEvent),
            ("PUT", "/schedule/events", Route::UpdateEvent),
            ("DELETE", "/schedule/events", Route::DeleteEvent),
            ("POST", "/schedule/persons", Route::CreatePerson),
            ("DELETE", "/schedule/persons", Route::DeletePerson),
        ];

        for (method, path, expected) in cases {
            assert_eq!(Route::resolve(method, path), Some(expected), "{} {}", method, path);
        }
    }

    #[test]
    fn test_preflight_matches_any_path() {
        assert_eq!(Route::resolve("OPTIONS", ""), Some(Route::Preflight));
        assert_eq!(Route::resolve("OPTIONS", "/nothing/here"), Some(Route::Preflight));
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(Route::resolve("GET", "/api/v1/events/42"), Some(Route::ListEvents));
        assert_eq!(Route::resolve("DELETE", "/my-persons-list"), Some(Route::DeletePerson));
    }

    #[test]
    fn test_first_match_wins() {
        // Both fragments present: the events entry precedes the persons entry.
        assert_eq!(Route::resolve("GET", "/persons-events"), Some(Route::ListEvents));
        assert_eq!(Route::resolve("POST", "/persons/events"), Some(Route::CreateEvent));
    }

    #[test]
    fn test_unmatched() {
        assert_eq!(Route::resolve("GET", "/schedule/calendar"), None);
        assert_eq!(Route::resolve("PUT", "/schedule/persons"), None);
        assert_eq!(Route::resolve("PATCH", "/schedule/events"), None);
        assert_eq!(Route::resolve("get", "/schedule/events"), None);
    }

    #[test]
    fn test_only_preflight_skips_datastore() {
        assert!(!Route::Preflight.needs_datastore());
        assert!(ROUTES
            .iter()
            .filter(|entry| entry.route != Route::Preflight)
            .all(|entry| entry.route.needs_datastore()));
    }
}
