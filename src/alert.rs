//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments that HTMX swaps into the `#alert-container`
//! element rendered by [crate::html::base].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible message shown after a form submission or deletion.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details below the headline.
    Success { message: String, details: String },
    /// A success message on its own.
    SuccessSimple { message: String },
    /// An error message with instructions on how to fix the problem.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::Success { message, details } => (false, message, details),
            Alert::SuccessSimple { message } => (false, message, String::new()),
            Alert::Error { message, details } => (true, message, details),
        };

        let container_style = if is_error {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        html! {
            div
                class=(container_style)
                role="alert"
                data-alert=(if is_error { "error" } else { "success" })
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto text-sm font-medium opacity-75 hover:opacity-100"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_then_details() {
        let html = Alert::Error {
            message: "Could not delete product".to_owned(),
            details: "The product could not be found.".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let paragraphs = fragment
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(
            paragraphs,
            ["Could not delete product", "The product could not be found."]
        );
        assert!(html.contains(r#"data-alert="error""#));
    }

    #[test]
    fn simple_success_alert_has_no_details() {
        let html = Alert::SuccessSimple {
            message: "Product deleted successfully".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let paragraph_count = fragment.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(paragraph_count, 1);
        assert!(html.contains(r#"data-alert="success""#));
    }
}
