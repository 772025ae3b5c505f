use crate::api::{ApiError, QueryResponse};

pub const NO_RESPONSE: &str = "No response";
pub const CONNECT_ERROR: &str = "Error: Could not connect to API";

/// Text shown for a settled request: the answer when the service supplied
/// one, a fixed fallback when it did not, and one generic error string for
/// every failure kind.
pub fn display_text(outcome: Result<QueryResponse, ApiError>) -> String {
    match outcome {
        Ok(reply) => reply
            .answer
            .filter(|answer| !answer.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string()),
        Err(_) => CONNECT_ERROR.to_string(),
    }
}

/// View state for the query form. Pure data: the event loop feeds it key
/// presses and request completions, `ui::render` reads it.
///
/// Submission has no preconditions of its own; the event loop suppresses
/// re-entrant submits while `loading`, and the generation counter discards
/// results of superseded requests if that guard is ever bypassed.
pub struct App {
    pub query: String,
    pub response: String,
    pub loading: bool,
    pub should_quit: bool,
    pub scroll: u16,
    generation: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            response: String::new(),
            loading: false,
            should_quit: false,
            scroll: 0,
            generation: 0,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    /// Starts a submission and returns its generation number. An empty
    /// query is a valid submission.
    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        log::debug!("submitting query #{}", self.generation);
        self.generation
    }

    /// Applies a settled request. Completions for a superseded generation
    /// are discarded so a slow earlier request can never overwrite the
    /// result of a later one.
    pub fn finish_request(&mut self, generation: u64, outcome: Result<QueryResponse, ApiError>) {
        if generation != self.generation {
            log::debug!("discarding result of superseded query #{generation}");
            return;
        }
        if let Err(err) = &outcome {
            log::warn!("query #{generation} failed: {err}");
        }
        self.response = display_text(outcome);
        self.loading = false;
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> Result<QueryResponse, ApiError> {
        Ok(QueryResponse {
            answer: Some(text.to_string()),
        })
    }

    #[test]
    fn typed_characters_land_in_query_verbatim() {
        let mut app = App::new();
        for c in "  spaced  query?".chars() {
            app.push_char(c);
        }
        assert_eq!(app.query, "  spaced  query?");

        app.pop_char();
        assert_eq!(app.query, "  spaced  query");
    }

    #[test]
    fn submit_sets_loading_synchronously_and_settles_on_success() {
        let mut app = App::new();
        let generation = app.begin_request();
        assert!(app.loading);

        app.finish_request(generation, answer("hello"));
        assert!(!app.loading);
        assert_eq!(app.response, "hello");
    }

    #[test]
    fn submit_settles_on_failure_too() {
        let mut app = App::new();
        let generation = app.begin_request();

        app.finish_request(generation, Err(ApiError::Timeout));
        assert!(!app.loading);
        assert_eq!(app.response, CONNECT_ERROR);
    }

    #[test]
    fn missing_answer_displays_fallback() {
        let mut app = App::new();
        let generation = app.begin_request();
        app.finish_request(generation, Ok(QueryResponse { answer: None }));
        assert_eq!(app.response, NO_RESPONSE);
    }

    #[test]
    fn empty_answer_displays_fallback() {
        let mut app = App::new();
        let generation = app.begin_request();
        app.finish_request(generation, answer(""));
        assert_eq!(app.response, NO_RESPONSE);
    }

    #[test]
    fn overlapping_requests_keep_only_the_newest_result() {
        let mut app = App::new();
        let first = app.begin_request();
        let second = app.begin_request();

        // The slow first request settles after the second one started.
        app.finish_request(first, answer("stale"));
        assert!(app.loading);
        assert_eq!(app.response, "");

        app.finish_request(second, answer("fresh"));
        assert!(!app.loading);
        assert_eq!(app.response, "fresh");
    }

    #[test]
    fn out_of_order_completions_do_not_clobber_the_newest_result() {
        let mut app = App::new();
        let first = app.begin_request();
        let second = app.begin_request();

        app.finish_request(second, answer("fresh"));
        app.finish_request(first, Err(ApiError::Timeout));

        assert!(!app.loading);
        assert_eq!(app.response, "fresh");
    }

    #[test]
    fn query_survives_submission_and_new_response_resets_scroll() {
        let mut app = App::new();
        for c in "keep me".chars() {
            app.push_char(c);
        }
        let generation = app.begin_request();
        app.scroll_down();
        app.scroll_down();
        app.finish_request(generation, answer("line one\nline two"));

        assert_eq!(app.query, "keep me");
        assert_eq!(app.scroll, 0);
        assert_eq!(app.response, "line one\nline two");
    }
}
