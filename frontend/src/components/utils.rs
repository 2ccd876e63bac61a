use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Inline error banner rendered near the control that caused it.
pub fn render_error_banner(message: Option<&str>) -> Html {
    if let Some(message) = message {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_spinner(label: &str) -> Html {
    html! {
        <>
            <i class="fa-solid fa-spinner fa-spin"></i>
            { format!(" {label}") }
        </>
    }
}
