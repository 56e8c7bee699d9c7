use std::fmt;
use std::future::Future;

use serde_json::json;

use crate::logging::{log_event, LogLevel};

pub const COPY_ATTRIBUTE: &str = "data-copy";
pub const COPIED_MESSAGE: &str = "¡Copiado al portapapeles!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClipboardError {
    Unavailable,
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard API is not available"),
            Self::Rejected(reason) => write!(f, "clipboard write rejected: {reason}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

/// Failures are logged only; the user sees nothing.
pub async fn copy_to_clipboard<C: Clipboard>(
    clipboard: &C,
    text: &str,
    log_level: LogLevel,
    notify: impl FnOnce(&str),
) -> Result<(), ClipboardError> {
    match clipboard.write_text(text).await {
        Ok(()) => {
            notify(COPIED_MESSAGE);
            Ok(())
        }
        Err(error) => {
            log_event(
                log_level,
                LogLevel::Error,
                "clipboard_write_failed",
                json!({ "error": error.to_string() }),
            );
            Err(error)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserClipboard {
    inner: Option<web_sys::Clipboard>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserClipboard {
    pub fn from_window(window: &web_sys::Window) -> Self {
        use wasm_bindgen::JsValue;

        // Older engines and insecure origins expose no `navigator.clipboard`.
        let navigator: JsValue = window.navigator().into();
        let available = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false);

        Self {
            inner: available.then(|| window.navigator().clipboard()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> {
        let promise = self
            .inner
            .as_ref()
            .map(|clipboard| clipboard.write_text(text));

        async move {
            let Some(promise) = promise else {
                return Err(ClipboardError::Unavailable);
            };

            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|error| {
                    ClipboardError::Rejected(
                        error
                            .as_string()
                            .or_else(|| {
                                js_sys::Reflect::get(&error, &"message".into())
                                    .ok()
                                    .and_then(|message| message.as_string())
                            })
                            .unwrap_or_else(|| "unknown error".to_string()),
                    )
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeClipboard {
        outcome: Result<(), ClipboardError>,
        written: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        fn with_outcome(outcome: Result<(), ClipboardError>) -> Self {
            Self {
                outcome,
                written: RefCell::new(Vec::new()),
            }
        }
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> {
            self.written.borrow_mut().push(text.to_string());
            let outcome = self.outcome.clone();
            async move { outcome }
        }
    }

    #[tokio::test]
    async fn successful_copy_shows_confirmation() {
        let clipboard = FakeClipboard::with_outcome(Ok(()));
        let mut shown = None;

        let result = copy_to_clipboard(&clipboard, "hola@example.com", LogLevel::Info, |message| {
            shown = Some(message.to_string());
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(shown.as_deref(), Some(COPIED_MESSAGE));
        assert_eq!(
            *clipboard.written.borrow(),
            vec!["hola@example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn rejected_copy_is_silent_to_the_user() {
        let rejection = ClipboardError::Rejected("NotAllowedError".to_string());
        let clipboard = FakeClipboard::with_outcome(Err(rejection.clone()));
        let mut notified = false;

        let result = copy_to_clipboard(&clipboard, "+57 300 000 0000", LogLevel::Error, |_| {
            notified = true;
        })
        .await;

        assert_eq!(result, Err(rejection));
        assert!(!notified);
    }

    #[tokio::test]
    async fn missing_clipboard_api_is_reported_as_unavailable() {
        let clipboard = FakeClipboard::with_outcome(Err(ClipboardError::Unavailable));

        let result = copy_to_clipboard(&clipboard, "x", LogLevel::Error, |_| {}).await;

        let error = result.expect_err("unavailable clipboard fails");
        assert_eq!(error.to_string(), "clipboard API is not available");
    }
}
